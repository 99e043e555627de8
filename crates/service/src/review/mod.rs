//! Reviews of points of sale: domain type, storage port and the `CrudService` implementation.

pub mod domain;
pub mod repository;
pub mod service;

pub use domain::Review;
pub use repository::{MapReviewRepository, ReviewRepository, SeaOrmReviewRepository};
pub use service::ReviewService;
