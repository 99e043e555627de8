use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, info, instrument};

use super::domain::Review;
use super::repository::ReviewRepository;
use crate::crud::CrudService;
use crate::errors::ServiceError;

/// Application service encapsulating review business rules.
/// Stamps timestamps, keeps new reviews unapproved, and preserves approval on partial updates.
pub struct ReviewService<R: ReviewRepository> {
    repo: Arc<R>,
}

impl<R: ReviewRepository> ReviewService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }
}

#[async_trait]
impl<R: ReviewRepository + 'static> CrudService<Review, i64> for ReviewService<R> {
    async fn get_all(&self) -> Result<Vec<Review>, ServiceError> {
        let mut all = self.repo.list().await?;
        all.sort_by_key(|r| r.id);
        debug!(count = all.len(), "list reviews");
        Ok(all)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Review>, ServiceError> {
        self.repo.get(id).await
    }

    #[instrument(skip(self, review), fields(pos_id = review.pos_id, author_id = review.author_id))]
    async fn create(&self, mut review: Review) -> Result<Review, ServiceError> {
        models::review::validate_review_text(&review.review)?;
        let now = Utc::now();
        review.id = None;
        review.created_at = Some(now);
        review.updated_at = Some(now);
        // approval only happens through an explicit approve
        review.approved = Some(false);
        review.approved_by = None;
        let created = self.repo.insert(review).await?;
        info!(id = ?created.id, "review_created");
        Ok(created)
    }

    #[instrument(skip(self, review), fields(id = ?review.id))]
    async fn update(&self, mut review: Review) -> Result<Review, ServiceError> {
        let id = review.id.ok_or_else(|| ServiceError::Validation("review id is required".into()))?;
        models::review::validate_review_text(&review.review)?;
        let existing = self.repo.get(id).await?.ok_or_else(|| ServiceError::not_found("review"))?;

        review.created_at = existing.created_at;
        review.updated_at = Some(Utc::now());
        review.approved = review.approved.or(existing.approved);
        review.approved_by = review.approved_by.or(existing.approved_by);

        let updated = self.repo.update(review).await?;
        info!(id, approved = ?updated.approved, "review_updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        if self.repo.delete(id).await? {
            info!(id, "review_deleted");
        } else {
            debug!(id, "delete of unknown review ignored");
        }
        Ok(())
    }
}
