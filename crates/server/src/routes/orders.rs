use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;

use service::orders::{self, CreateOrderInput, OrderBody, UpdateOrderInput};

use crate::auth::{CurrentUser, ServerState};
use crate::errors::ApiError;

pub async fn list(
    State(state): State<ServerState>,
    CurrentUser(actor): CurrentUser,
) -> Result<Json<Vec<OrderBody>>, ApiError> {
    Ok(Json(orders::list_orders(&state.db, &actor).await?))
}

/// POST /orders — customer only; the response deliberately has no
/// updated_at field.
pub async fn create(
    State(state): State<ServerState>,
    CurrentUser(actor): CurrentUser,
    Json(input): Json<CreateOrderInput>,
) -> Result<(StatusCode, Json<OrderBody>), ApiError> {
    let placed = orders::create_order(&state.db, &actor, input).await?;
    Ok((StatusCode::CREATED, Json(placed)))
}

pub async fn retrieve(
    State(state): State<ServerState>,
    CurrentUser(actor): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<OrderBody>, ApiError> {
    Ok(Json(orders::get_order(&state.db, &actor, id).await?))
}

/// PATCH /orders/:id — business participant flips the status.
pub async fn update(
    State(state): State<ServerState>,
    CurrentUser(actor): CurrentUser,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateOrderInput>,
) -> Result<Json<OrderBody>, ApiError> {
    Ok(Json(orders::update_order_status(&state.db, &actor, id, input).await?))
}

/// DELETE /orders/:id — staff only; participants get a 403.
pub async fn destroy(
    State(state): State<ServerState>,
    CurrentUser(actor): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    orders::delete_order(&state.db, &actor, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn count_in_progress(
    State(state): State<ServerState>,
    _caller: CurrentUser,
    Path(business_user_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let order_count = orders::count_in_progress(&state.db, business_user_id).await?;
    Ok(Json(serde_json::json!({ "order_count": order_count })))
}

pub async fn count_completed(
    State(state): State<ServerState>,
    _caller: CurrentUser,
    Path(business_user_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let order_count = orders::count_completed(&state.db, business_user_id).await?;
    Ok(Json(serde_json::json!({ "order_count": order_count })))
}
