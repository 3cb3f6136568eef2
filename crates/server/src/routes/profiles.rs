use axum::extract::{Path, State};
use axum::Json;
use uuid::Uuid;

use models::profile::ProfileKind;
use service::profiles::{self, ProfileBody, UpdateProfileInput};

use crate::auth::{CurrentUser, ServerState};
use crate::errors::ApiError;

pub async fn retrieve(
    State(state): State<ServerState>,
    _caller: CurrentUser,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ProfileBody>, ApiError> {
    Ok(Json(profiles::get_profile(&state.db, user_id).await?))
}

/// PATCH /profile/:user_id — owner only; the customer/business kind is not
/// part of the patch surface.
pub async fn update(
    State(state): State<ServerState>,
    CurrentUser(actor): CurrentUser,
    Path(user_id): Path<Uuid>,
    Json(input): Json<UpdateProfileInput>,
) -> Result<Json<ProfileBody>, ApiError> {
    Ok(Json(profiles::update_profile(&state.db, &actor, user_id, input).await?))
}

pub async fn list_business(
    State(state): State<ServerState>,
    _caller: CurrentUser,
) -> Result<Json<Vec<ProfileBody>>, ApiError> {
    Ok(Json(profiles::list_by_kind(&state.db, ProfileKind::Business).await?))
}

pub async fn list_customer(
    State(state): State<ServerState>,
    _caller: CurrentUser,
) -> Result<Json<Vec<ProfileBody>>, ApiError> {
    Ok(Json(profiles::list_by_kind(&state.db, ProfileKind::Customer).await?))
}
