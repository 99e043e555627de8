use std::sync::Arc;

use service::crud::CrudService;
use service::review::Review;

use crate::reviews::ReviewController;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub reviews: Arc<ReviewController>,
}

impl AppState {
    pub fn new(review_service: Arc<dyn CrudService<Review, i64>>) -> Self {
        Self { reviews: Arc::new(ReviewController::new(review_service)) }
    }
}
