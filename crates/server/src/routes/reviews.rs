use axum::{
    extract::{rejection::{JsonRejection, QueryRejection}, Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::dtos::ReviewDto;
use crate::errors::ApiError;
use crate::state::AppState;
use crate::validation::ValidationErrors;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FilterQuery {
    /// Point of sale id (required)
    pub pos_id: Option<i64>,
    /// Approval state to match (required)
    pub approved: Option<bool>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ApproveQuery {
    /// Approving user id (required)
    pub user_id: Option<i64>,
}

/// Routes mounted under `/api/reviews`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/filter", get(filter))
        .route("/:id", get(get_one).put(update).delete(remove))
        .route("/:id/approve", post(approve))
}

#[utoipa::path(
    get, path = "/api/reviews", tag = "reviews",
    responses((status = 200, description = "All reviews", body = [ReviewDto]))
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<ReviewDto>>, ApiError> {
    Ok(Json(state.reviews.get_all().await?))
}

#[utoipa::path(
    get, path = "/api/reviews/{id}", tag = "reviews",
    params(("id" = i64, Path, description = "Review ID")),
    responses(
        (status = 200, description = "OK", body = ReviewDto),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_one(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<ReviewDto>, ApiError> {
    Ok(Json(state.reviews.get_by_id(id).await?))
}

#[utoipa::path(
    post, path = "/api/reviews", tag = "reviews",
    request_body = ReviewDto,
    responses(
        (status = 201, description = "Created", body = ReviewDto),
        (status = 400, description = "Validation Error", body = crate::errors::ErrorBody)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<ReviewDto>, JsonRejection>,
) -> Result<(StatusCode, Json<ReviewDto>), ApiError> {
    let Json(dto) = payload?;
    let created = state.reviews.create(dto).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put, path = "/api/reviews/{id}", tag = "reviews",
    params(("id" = i64, Path, description = "Review ID")),
    request_body = ReviewDto,
    responses(
        (status = 200, description = "Updated", body = ReviewDto),
        (status = 400, description = "Validation Error", body = crate::errors::ErrorBody),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<ReviewDto>, JsonRejection>,
) -> Result<Json<ReviewDto>, ApiError> {
    let Json(dto) = payload?;
    Ok(Json(state.reviews.update(id, dto).await?))
}

#[utoipa::path(
    delete, path = "/api/reviews/{id}", tag = "reviews",
    params(("id" = i64, Path, description = "Review ID")),
    responses((status = 204, description = "Deleted"))
)]
pub async fn remove(State(state): State<AppState>, Path(id): Path<i64>) -> Result<StatusCode, ApiError> {
    state.reviews.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get, path = "/api/reviews/filter", tag = "reviews",
    params(FilterQuery),
    responses(
        (status = 200, description = "Matching reviews", body = [ReviewDto]),
        (status = 400, description = "Missing or malformed parameter", body = crate::errors::ErrorBody)
    )
)]
pub async fn filter(
    State(state): State<AppState>,
    query: Result<Query<FilterQuery>, QueryRejection>,
) -> Result<Json<Vec<ReviewDto>>, ApiError> {
    let Query(q) = query?;
    let (pos_id, approved) = match (q.pos_id, q.approved) {
        (Some(pos_id), Some(approved)) => (pos_id, approved),
        (pos_id, approved) => {
            let mut errs = ValidationErrors::default();
            errs.require("pos_id", &pos_id);
            errs.require("approved", &approved);
            return Err(errs.into());
        }
    };
    Ok(Json(state.reviews.filter(pos_id, approved).await?))
}

#[utoipa::path(
    post, path = "/api/reviews/{id}/approve", tag = "reviews",
    params(("id" = i64, Path, description = "Review ID"), ApproveQuery),
    responses(
        (status = 200, description = "Approved", body = ReviewDto),
        (status = 400, description = "Missing or malformed parameter", body = crate::errors::ErrorBody),
        (status = 404, description = "Not Found")
    )
)]
pub async fn approve(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    query: Result<Query<ApproveQuery>, QueryRejection>,
) -> Result<Json<ReviewDto>, ApiError> {
    let Query(q) = query?;
    let user_id = q.user_id.ok_or_else(|| ValidationErrors::single("user_id", "must not be null"))?;
    Ok(Json(state.reviews.approve(id, user_id).await?))
}
