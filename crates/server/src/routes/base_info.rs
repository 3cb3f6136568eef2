use axum::extract::State;
use axum::Json;

use service::base_info::{self, BaseInfoBody};

use crate::auth::ServerState;
use crate::errors::ApiError;

/// GET /base-info — platform statistics, open to anonymous callers.
pub async fn retrieve(State(state): State<ServerState>) -> Result<Json<BaseInfoBody>, ApiError> {
    Ok(Json(base_info::base_info(&state.db).await?))
}
