use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::{AppConfig, StorageBackend};
use migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use crate::errors::StartupError;
use crate::routes;
use crate::state::AppState;
use service::{
    crud::CrudService,
    review::{MapReviewRepository, Review, ReviewService, SeaOrmReviewRepository},
};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    let raw = format!("{}:{}", cfg.server.host, cfg.server.port);
    raw.parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bad listen address {raw}: {e}")))
}

/// Build the review service for the configured storage backend.
/// The postgres backend runs pending migrations first.
pub async fn build_review_service(cfg: &AppConfig) -> anyhow::Result<Arc<dyn CrudService<Review, i64>>> {
    let svc: Arc<dyn CrudService<Review, i64>> = match cfg.storage.backend {
        StorageBackend::Memory => {
            info!(backend = "memory", "review storage ready");
            Arc::new(ReviewService::new(Arc::new(MapReviewRepository::in_memory())))
        }
        StorageBackend::File => {
            let path = &cfg.storage.file_path;
            common::env::ensure_data_dir(path).await?;
            let repo = MapReviewRepository::open(path).await?;
            info!(backend = "file", %path, "review storage ready");
            Arc::new(ReviewService::new(Arc::new(repo)))
        }
        StorageBackend::Postgres => {
            let db = models::db::connect_with_config(&cfg.database).await?;
            migration::Migrator::up(&db, None).await?;
            info!(backend = "postgres", "review storage ready, migrations applied");
            Arc::new(ReviewService::new(Arc::new(SeaOrmReviewRepository { db })))
        }
    };
    Ok(svc)
}

/// Router with CORS and tracing for the given state.
pub fn build_app(state: AppState) -> Router {
    routes::build_router(state, build_cors())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

/// Public entry: build the app and run the HTTP server until Ctrl+C.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let review_service = build_review_service(&cfg).await?;
    let app = build_app(AppState::new(review_service));

    let addr = bind_addr(&cfg)?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "reviews api listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_addr_from_config() {
        let cfg = AppConfig::default();
        assert_eq!(bind_addr(&cfg).unwrap().port(), 8080);

        let mut bad = AppConfig::default();
        bad.server.host = "not a host".into();
        assert!(matches!(bind_addr(&bad), Err(StartupError::InvalidConfig(_))));
    }

    #[tokio::test]
    async fn memory_backend_builds() -> anyhow::Result<()> {
        let svc = build_review_service(&AppConfig::default()).await?;
        assert!(svc.get_all().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn file_backend_builds_and_persists() -> anyhow::Result<()> {
        let dir = std::env::temp_dir().join(format!("reviews_startup_{}", uuid::Uuid::new_v4()));
        let mut cfg = AppConfig::default();
        cfg.storage.backend = StorageBackend::File;
        cfg.storage.file_path = dir.join("reviews.json").to_string_lossy().into_owned();

        let svc = build_review_service(&cfg).await?;
        svc.create(Review::new(1, 7, "kept on disk")).await?;

        let reopened = build_review_service(&cfg).await?;
        assert_eq!(reopened.get_all().await?.len(), 1);
        let _ = tokio::fs::remove_dir_all(&dir).await;
        Ok(())
    }
}
