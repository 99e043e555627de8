use std::sync::Arc;

use service::crud::CrudService;
use service::review::Review;
use tracing::{info, warn};

use crate::crud::CrudController;
use crate::dtos::ReviewDto;
use crate::errors::ApiError;
use crate::mapper::ReviewDtoMapper;
use crate::validation::Validate;

/// Reviews of points of sale: the generic CRUD operations plus `filter` and `approve`.
pub struct ReviewController {
    crud: CrudController<Review, ReviewDto, i64>,
}

impl ReviewController {
    pub fn new(service: Arc<dyn CrudService<Review, i64>>) -> Self {
        Self { crud: CrudController::new(service, Arc::new(ReviewDtoMapper)) }
    }

    pub async fn get_all(&self) -> Result<Vec<ReviewDto>, ApiError> {
        self.crud.get_all().await
    }

    pub async fn get_by_id(&self, id: i64) -> Result<ReviewDto, ApiError> {
        self.crud.get_by_id(id).await
    }

    pub async fn create(&self, dto: ReviewDto) -> Result<ReviewDto, ApiError> {
        let created = self.crud.create(dto).await?;
        info!(id = ?created.id, pos_id = ?created.pos_id, "created review");
        Ok(created)
    }

    /// Edit a review. Approval fields in the payload are ignored; only `approve` changes them.
    pub async fn update(&self, id: i64, mut dto: ReviewDto) -> Result<ReviewDto, ApiError> {
        dto.validate()?;
        let stored = self.crud.get_by_id(id).await?;
        if dto.approved.is_some_and(|a| Some(a) != stored.approved) {
            warn!(id, "ignoring approval change in update payload");
        }
        dto.approved = stored.approved;
        dto.approved_by = stored.approved_by;
        self.crud.update(id, dto).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.crud.delete(id).await
    }

    /// Reviews of one point of sale with the given approval state, in `get_all` order.
    pub async fn filter(&self, pos_id: i64, approved: bool) -> Result<Vec<ReviewDto>, ApiError> {
        let all = self.crud.get_all().await?;
        let matching = filter_reviews(all, pos_id, approved);
        info!(pos_id, approved, count = matching.len(), "filtered reviews");
        Ok(matching)
    }

    /// Mark a review approved by `user_id`. The only path that submits approval fields to update.
    pub async fn approve(&self, id: i64, user_id: i64) -> Result<ReviewDto, ApiError> {
        let mut dto = self.crud.get_by_id(id).await?;
        dto.approved = Some(true);
        dto.approved_by = Some(user_id);
        let approved = self.crud.update(id, dto).await?;
        info!(id, user_id, "approved review");
        Ok(approved)
    }
}

/// Exact match on both `posId` and `approved`; a null `approved` matches neither value.
pub fn filter_reviews(all: Vec<ReviewDto>, pos_id: i64, approved: bool) -> Vec<ReviewDto> {
    all.into_iter()
        .filter(|dto| dto.pos_id == Some(pos_id) && dto.approved == Some(approved))
        .collect()
}
