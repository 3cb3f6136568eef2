use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use sea_orm::{DatabaseConnection, EntityTrait};
use tracing::debug;
use uuid::Uuid;

use models::{profile, user};
use service::auth::service as auth_service;
use service::policy::Actor;

use crate::errors::ApiError;

#[derive(Clone)]
pub struct ServerAuthConfig {
    pub jwt_secret: String,
}

#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
    pub auth: ServerAuthConfig,
}

/// Extractor for the verified caller: parses the bearer credential, checks
/// the token, and loads the account plus its profile. Any failure along the
/// way is a 401.
pub struct CurrentUser(pub Actor);

#[async_trait]
impl FromRequestParts<ServerState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &ServerState) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(ApiError::unauthorized)?;
        let token = header.strip_prefix("Bearer ").ok_or_else(ApiError::unauthorized)?;

        let claims = auth_service::decode_token(&state.auth.jwt_secret, token).map_err(|e| {
            debug!(code = e.code(), error = %e, "token rejected");
            ApiError::unauthorized()
        })?;
        let user_id = Uuid::parse_str(&claims.uid).map_err(|_| ApiError::unauthorized())?;

        let account = user::Entity::find_by_id(user_id)
            .one(&state.db)
            .await
            .map_err(|e| ApiError::from(service::errors::ServiceError::db(e)))?
            .ok_or_else(ApiError::unauthorized)?;
        let profile = profile::find_by_user(&state.db, account.id)
            .await
            .map_err(|e| ApiError::from(service::errors::ServiceError::Model(e)))?
            .ok_or_else(ApiError::unauthorized)?;

        Ok(CurrentUser(Actor { user: account, profile }))
    }
}
