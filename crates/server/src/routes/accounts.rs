use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use service::auth::domain::{LoginInput, RegisterInput};
use service::auth::errors::AuthError;
use service::auth::repo::seaorm::SeaOrmAuthRepository;
use service::auth::service::{AuthConfig, AuthService};

use crate::auth::{CurrentUser, ServerState};
use crate::errors::ApiError;

#[derive(Serialize)]
pub struct SessionOutput {
    pub token: String,
    pub username: String,
    pub email: String,
    pub user_id: Uuid,
}

fn auth_service(state: &ServerState) -> AuthService<SeaOrmAuthRepository> {
    AuthService::new(
        Arc::new(SeaOrmAuthRepository { db: state.db.clone() }),
        AuthConfig { jwt_secret: state.auth.jwt_secret.clone(), password_algorithm: "argon2".into() },
    )
}

// Login failures are reported as validation-shaped 400s; only missing or
// invalid bearer credentials yield a 401.
fn map_auth_error(e: AuthError) -> ApiError {
    debug!(code = e.code(), error = %e, "auth request rejected");
    match e {
        AuthError::Validation(msg) => ApiError::bad_request(msg),
        AuthError::Conflict => ApiError::bad_request("user already exists".into()),
        AuthError::Unauthorized | AuthError::NotFound => {
            ApiError::bad_request("invalid username or password".into())
        }
        _ => ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error", None),
    }
}

pub async fn registration(
    State(state): State<ServerState>,
    Json(input): Json<RegisterInput>,
) -> Result<(StatusCode, Json<SessionOutput>), ApiError> {
    let session = auth_service(&state).register(input).await.map_err(map_auth_error)?;
    Ok((
        StatusCode::CREATED,
        Json(SessionOutput {
            token: session.token,
            username: session.user.username,
            email: session.user.email,
            user_id: session.user.id,
        }),
    ))
}

pub async fn login(
    State(state): State<ServerState>,
    Json(input): Json<LoginInput>,
) -> Result<Json<SessionOutput>, ApiError> {
    let session = auth_service(&state).login(input).await.map_err(map_auth_error)?;
    Ok(Json(SessionOutput {
        token: session.token,
        username: session.user.username,
        email: session.user.email,
        user_id: session.user.id,
    }))
}

/// Bearer tokens are stateless; logout only checks the credential and lets
/// the client drop its copy.
pub async fn logout(_caller: CurrentUser) -> StatusCode {
    StatusCode::NO_CONTENT
}
