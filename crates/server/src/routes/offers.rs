use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;

use service::offers::{
    self, CreateOfferInput, OfferBody, OfferDetailBody, OfferListItem, OfferQuery, UpdateOfferInput,
};
use service::pagination::Page;

use crate::auth::{CurrentUser, ServerState};
use crate::errors::ApiError;

/// GET /offers — open to anonymous callers.
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<OfferQuery>,
) -> Result<Json<Page<OfferListItem>>, ApiError> {
    Ok(Json(offers::list_offers(&state.db, query).await?))
}

/// POST /offers — business only.
pub async fn create(
    State(state): State<ServerState>,
    CurrentUser(actor): CurrentUser,
    Json(input): Json<CreateOfferInput>,
) -> Result<(StatusCode, Json<OfferBody>), ApiError> {
    let created = offers::create_offer(&state.db, &actor, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn retrieve(
    State(state): State<ServerState>,
    _caller: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<OfferListItem>, ApiError> {
    Ok(Json(offers::get_offer(&state.db, id).await?))
}

pub async fn update(
    State(state): State<ServerState>,
    CurrentUser(actor): CurrentUser,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateOfferInput>,
) -> Result<Json<OfferBody>, ApiError> {
    Ok(Json(offers::update_offer(&state.db, &actor, id, input).await?))
}

pub async fn destroy(
    State(state): State<ServerState>,
    CurrentUser(actor): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    offers::delete_offer(&state.db, &actor, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /offerdetails/:id — any authenticated caller.
pub async fn retrieve_detail(
    State(state): State<ServerState>,
    _caller: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<OfferDetailBody>, ApiError> {
    Ok(Json(offers::get_offer_detail(&state.db, id).await?))
}
