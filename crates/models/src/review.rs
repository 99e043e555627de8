use chrono::{DateTime, Utc};
use sea_orm::{entity::prelude::*, ActiveValue::NotSet, DatabaseConnection, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::errors;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "review")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub pos_id: i64,
    pub author_id: i64,
    #[sea_orm(column_type = "Text")]
    pub review: String,
    pub approved: Option<bool>,
    pub approved_by: Option<i64>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Column values written on insert and update. The id is owned by the database.
#[derive(Clone, Debug, PartialEq)]
pub struct ReviewFields {
    pub pos_id: i64,
    pub author_id: i64,
    pub review: String,
    pub approved: Option<bool>,
    pub approved_by: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub fn validate_review_text(text: &str) -> Result<(), errors::ModelError> {
    if text.trim().is_empty() {
        return Err(errors::ModelError::Validation("review must not be blank".into()));
    }
    Ok(())
}

pub async fn list(db: &DatabaseConnection) -> Result<Vec<Model>, errors::ModelError> {
    Entity::find()
        .order_by_asc(Column::Id)
        .all(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn find(db: &DatabaseConnection, id: i64) -> Result<Option<Model>, errors::ModelError> {
    Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn create(db: &DatabaseConnection, fields: ReviewFields) -> Result<Model, errors::ModelError> {
    validate_review_text(&fields.review)?;
    let am = ActiveModel {
        id: NotSet,
        pos_id: Set(fields.pos_id),
        author_id: Set(fields.author_id),
        review: Set(fields.review),
        approved: Set(fields.approved),
        approved_by: Set(fields.approved_by),
        created_at: Set(fields.created_at.into()),
        updated_at: Set(fields.updated_at.into()),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn update(db: &DatabaseConnection, id: i64, fields: ReviewFields) -> Result<Model, errors::ModelError> {
    validate_review_text(&fields.review)?;
    let mut found: ActiveModel = find(db, id)
        .await?
        .ok_or_else(|| errors::ModelError::NotFound(format!("review {id}")))?
        .into();
    found.pos_id = Set(fields.pos_id);
    found.author_id = Set(fields.author_id);
    found.review = Set(fields.review);
    found.approved = Set(fields.approved);
    found.approved_by = Set(fields.approved_by);
    found.created_at = Set(fields.created_at.into());
    found.updated_at = Set(fields.updated_at.into());
    found.update(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// Returns whether a row was removed.
pub async fn delete(db: &DatabaseConnection, id: i64) -> Result<bool, errors::ModelError> {
    let res = Entity::delete_by_id(id)
        .exec(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(res.rows_affected > 0)
}
