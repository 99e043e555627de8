use thiserror::Error;

use models::errors::ModelError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("database error: {0}")]
    Db(String),
    #[error("model error: {0}")]
    Model(#[from] ModelError),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    /// Lift a model error, keeping "row missing" as `NotFound`.
    pub fn from_model(err: ModelError) -> Self {
        match err {
            ModelError::NotFound(what) => Self::NotFound(what),
            other => Self::Model(other),
        }
    }

    /// True for errors caused by the caller's input rather than the backend.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Model(ModelError::Validation(_)))
    }
}
