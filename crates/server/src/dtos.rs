use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::validation::{Validate, ValidationErrors};

/// Wire object the generic controller works with.
pub trait Dto<Id>: Validate + Send + 'static {
    fn id(&self) -> Option<Id>;
    fn set_id(&mut self, id: Option<Id>);
}

/// A review of a point of sale as seen by API clients.
///
/// `posId`, `authorId` and a non-blank `review` are required on create and update.
/// `id`, `createdAt` and `updatedAt` are filled in by the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDto {
    #[schema(example = 101)]
    pub id: Option<i64>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    #[schema(example = 1)]
    pub pos_id: Option<i64>,
    #[schema(example = 7)]
    pub author_id: Option<i64>,
    #[schema(example = "Great coffee")]
    pub review: Option<String>,
    pub approved: Option<bool>,
    /// User who approved the review.
    pub approved_by: Option<i64>,
}

impl Validate for ReviewDto {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errs = ValidationErrors::default();
        errs.require("posId", &self.pos_id);
        errs.require("authorId", &self.author_id);
        errs.require_not_blank("review", &self.review);
        errs.into_result()
    }
}

impl Dto<i64> for ReviewDto {
    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: Option<i64>) {
        self.id = id;
    }
}
