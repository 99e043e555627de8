use std::path::PathBuf;
use std::sync::{
    atomic::{AtomicI64, Ordering},
    Arc,
};

use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use super::domain::Review;
use crate::errors::ServiceError;
use crate::storage::json_map_store::JsonMapStore;

/// Storage port for reviews. Implementations assign ids on insert.
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Review>, ServiceError>;
    async fn get(&self, id: i64) -> Result<Option<Review>, ServiceError>;
    async fn insert(&self, review: Review) -> Result<Review, ServiceError>;
    /// `review.id` selects the row; a missing row is `ServiceError::NotFound`.
    async fn update(&self, review: Review) -> Result<Review, ServiceError>;
    /// Returns whether a review was removed.
    async fn delete(&self, id: i64) -> Result<bool, ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmReviewRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl ReviewRepository for SeaOrmReviewRepository {
    async fn list(&self) -> Result<Vec<Review>, ServiceError> {
        let rows = models::review::list(&self.db).await.map_err(ServiceError::from_model)?;
        Ok(rows.into_iter().map(Review::from).collect())
    }

    async fn get(&self, id: i64) -> Result<Option<Review>, ServiceError> {
        let row = models::review::find(&self.db, id).await.map_err(ServiceError::from_model)?;
        Ok(row.map(Review::from))
    }

    async fn insert(&self, review: Review) -> Result<Review, ServiceError> {
        let row = models::review::create(&self.db, review.to_fields())
            .await
            .map_err(ServiceError::from_model)?;
        Ok(row.into())
    }

    async fn update(&self, review: Review) -> Result<Review, ServiceError> {
        let id = review.id.ok_or_else(|| ServiceError::Validation("review id is required".into()))?;
        let row = models::review::update(&self.db, id, review.to_fields())
            .await
            .map_err(ServiceError::from_model)?;
        Ok(row.into())
    }

    async fn delete(&self, id: i64) -> Result<bool, ServiceError> {
        models::review::delete(&self.db, id).await.map_err(ServiceError::from_model)
    }
}

/// Repository over a `JsonMapStore`: in memory, or persisted to a JSON file.
/// Ids are handed out from a counter that never reuses a deleted id within a process.
pub struct MapReviewRepository {
    store: Arc<JsonMapStore<i64, Review>>,
    last_id: AtomicI64,
}

impl MapReviewRepository {
    pub fn in_memory() -> Self {
        Self { store: JsonMapStore::in_memory(), last_id: AtomicI64::new(0) }
    }

    /// Open (or create) the JSON file at `path`.
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Self, ServiceError> {
        let store = JsonMapStore::new(path).await?;
        let last = store.keys().await.into_iter().max().unwrap_or(0);
        Ok(Self { store, last_id: AtomicI64::new(last) })
    }
}

#[async_trait]
impl ReviewRepository for MapReviewRepository {
    async fn list(&self) -> Result<Vec<Review>, ServiceError> {
        let mut all: Vec<Review> = self.store.list().await.into_iter().map(|(_, r)| r).collect();
        all.sort_by_key(|r| r.id);
        Ok(all)
    }

    async fn get(&self, id: i64) -> Result<Option<Review>, ServiceError> {
        Ok(self.store.get(&id).await)
    }

    async fn insert(&self, mut review: Review) -> Result<Review, ServiceError> {
        let id = self.last_id.fetch_add(1, Ordering::SeqCst) + 1;
        review.id = Some(id);
        self.store
            .update_map(move |m| {
                m.insert(id, review.clone());
                Ok(review)
            })
            .await
    }

    async fn update(&self, review: Review) -> Result<Review, ServiceError> {
        let id = review.id.ok_or_else(|| ServiceError::Validation("review id is required".into()))?;
        self.store
            .update_map(move |m| match m.get_mut(&id) {
                Some(slot) => {
                    *slot = review.clone();
                    Ok(review)
                }
                None => Err(ServiceError::NotFound(format!("review {id}"))),
            })
            .await
    }

    async fn delete(&self, id: i64) -> Result<bool, ServiceError> {
        self.store.remove(&id).await
    }
}
