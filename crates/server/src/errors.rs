use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

use models::errors::ModelError;
use service::errors::ServiceError;

/// JSON error envelope: `{"error": <label>, "detail": <message>}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: &'static str,
    pub detail: Option<String>,
}

impl ApiError {
    pub fn new(status: StatusCode, error: &'static str, detail: Option<String>) -> Self {
        Self { status, error, detail }
    }

    pub fn unauthorized() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "Authentication Error", Some("valid bearer token required".into()))
    }

    pub fn bad_request(detail: String) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Validation Error", Some(detail))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "error": self.error,
            "detail": self.detail,
        });
        (self.status, Json(body)).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(msg) => Self::bad_request(msg),
            ServiceError::Unauthorized => Self::unauthorized(),
            ServiceError::Forbidden(msg) => Self::new(StatusCode::FORBIDDEN, "Permission Denied", Some(msg)),
            ServiceError::NotFound(msg) => Self::new(StatusCode::NOT_FOUND, "Not Found", Some(msg)),
            // Uniqueness races surface as validation-shaped 400s
            ServiceError::Conflict(msg) => Self::bad_request(msg),
            ServiceError::Model(ModelError::Validation(msg)) => Self::bad_request(msg),
            ServiceError::Db(msg) | ServiceError::Model(ModelError::Db(msg)) => {
                error!(error = %msg, "internal service error");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error", None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_errors_map_to_expected_statuses() {
        let cases = [
            (ServiceError::Validation("details: bad".into()), StatusCode::BAD_REQUEST),
            (ServiceError::Unauthorized, StatusCode::UNAUTHORIZED),
            (ServiceError::forbidden("nope"), StatusCode::FORBIDDEN),
            (ServiceError::not_found("offer"), StatusCode::NOT_FOUND),
            (ServiceError::Conflict("dup".into()), StatusCode::BAD_REQUEST),
            (ServiceError::Db("boom".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status, status);
        }
    }
}
