use std::net::SocketAddr;

use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use configs::{AppConfig, StorageBackend};
use server::startup::{build_app, build_review_service};
use server::state::AppState;

struct TestApp {
    base_url: String,
    client: reqwest::Client,
}

/// Serve the full app on an ephemeral port, backed by a temp JSON file.
async fn start_server() -> anyhow::Result<TestApp> {
    let mut cfg = AppConfig::default();
    cfg.storage.backend = StorageBackend::File;
    cfg.storage.file_path = format!("target/test-data/{}/reviews.json", uuid::Uuid::new_v4());

    let svc = build_review_service(&cfg).await?;
    let app = build_app(AppState::new(svc));

    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("server error: {}", e);
        }
    });

    Ok(TestApp { base_url: format!("http://{}:{}", addr.ip(), addr.port()), client: reqwest::Client::new() })
}

#[tokio::test]
async fn e2e_health() -> anyhow::Result<()> {
    let app = start_server().await?;
    let resp = app.client.get(format!("{}/health", app.base_url)).send().await?;
    assert_eq!(resp.status(), HttpStatusCode::OK);
    let body: Value = resp.json().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn e2e_create_approve_filter() -> anyhow::Result<()> {
    let app = start_server().await?;

    let resp = app
        .client
        .post(format!("{}/api/reviews", app.base_url))
        .json(&json!({"posId": 10, "authorId": 1, "review": "Friendly staff"}))
        .send()
        .await?;
    assert_eq!(resp.status(), HttpStatusCode::CREATED);
    let created: Value = resp.json().await?;
    let id = created["id"].as_i64().ok_or_else(|| anyhow::anyhow!("missing id"))?;

    let resp = app
        .client
        .post(format!("{}/api/reviews/{}/approve", app.base_url, id))
        .query(&[("user_id", "2")])
        .send()
        .await?;
    assert_eq!(resp.status(), HttpStatusCode::OK);
    let approved: Value = resp.json().await?;
    assert_eq!(approved["approvedBy"], 2);
    assert_eq!(approved["createdAt"], created["createdAt"]);

    let resp = app
        .client
        .get(format!("{}/api/reviews/filter", app.base_url))
        .query(&[("pos_id", "10"), ("approved", "true")])
        .send()
        .await?;
    assert_eq!(resp.status(), HttpStatusCode::OK);
    let found: Vec<Value> = resp.json().await?;
    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["id"], id);
    Ok(())
}
