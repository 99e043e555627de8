use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A review of a point of sale written by a user.
///
/// `id` and the timestamps are assigned by the service layer; a review starts
/// unapproved and only becomes approved through an explicit approval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: Option<i64>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub pos_id: i64,
    pub author_id: i64,
    pub review: String,
    pub approved: Option<bool>,
    pub approved_by: Option<i64>,
}

impl Review {
    pub fn new(pos_id: i64, author_id: i64, review: impl Into<String>) -> Self {
        Self {
            id: None,
            created_at: None,
            updated_at: None,
            pos_id,
            author_id,
            review: review.into(),
            approved: None,
            approved_by: None,
        }
    }

    pub fn is_approved(&self) -> bool {
        self.approved == Some(true)
    }
}

impl From<models::review::Model> for Review {
    fn from(m: models::review::Model) -> Self {
        Self {
            id: Some(m.id),
            created_at: Some(m.created_at.with_timezone(&Utc)),
            updated_at: Some(m.updated_at.with_timezone(&Utc)),
            pos_id: m.pos_id,
            author_id: m.author_id,
            review: m.review,
            approved: m.approved,
            approved_by: m.approved_by,
        }
    }
}

impl Review {
    /// Column values for the database row; missing timestamps become `now`.
    pub fn to_fields(&self) -> models::review::ReviewFields {
        let now = Utc::now();
        models::review::ReviewFields {
            pos_id: self.pos_id,
            author_id: self.author_id,
            review: self.review.clone(),
            approved: self.approved,
            approved_by: self.approved_by,
            created_at: self.created_at.unwrap_or(now),
            updated_at: self.updated_at.unwrap_or(now),
        }
    }
}
