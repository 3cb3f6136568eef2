use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;

use service::reviews::{self, CreateReviewInput, ReviewBody, ReviewQuery, UpdateReviewInput};

use crate::auth::{CurrentUser, ServerState};
use crate::errors::ApiError;

pub async fn list(
    State(state): State<ServerState>,
    _caller: CurrentUser,
    Query(query): Query<ReviewQuery>,
) -> Result<Json<Vec<ReviewBody>>, ApiError> {
    Ok(Json(reviews::list_reviews(&state.db, query).await?))
}

/// POST /reviews — customer only, one review per business.
pub async fn create(
    State(state): State<ServerState>,
    CurrentUser(actor): CurrentUser,
    Json(input): Json<CreateReviewInput>,
) -> Result<(StatusCode, Json<ReviewBody>), ApiError> {
    let created = reviews::create_review(&state.db, &actor, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn retrieve(
    State(state): State<ServerState>,
    _caller: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ReviewBody>, ApiError> {
    Ok(Json(reviews::get_review(&state.db, id).await?))
}

pub async fn update(
    State(state): State<ServerState>,
    CurrentUser(actor): CurrentUser,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateReviewInput>,
) -> Result<Json<ReviewBody>, ApiError> {
    Ok(Json(reviews::update_review(&state.db, &actor, id, input).await?))
}

pub async fn destroy(
    State(state): State<ServerState>,
    CurrentUser(actor): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    reviews::delete_review(&state.db, &actor, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
