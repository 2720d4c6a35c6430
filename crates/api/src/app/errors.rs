use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use lampshop_auth::AuthError;
use lampshop_catalog::CatalogError;
use lampshop_core::{DomainError, EntityId};

/// Every failure a handler can report, mapped onto one JSON error shape.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("invalid request body: {0}")]
    BadRequest(String),

    #[error("authorization required")]
    MissingToken,
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        match self {
            ApiError::Domain(DomainError::NotFound { .. }) => {
                json_error(StatusCode::NOT_FOUND, "not_found", message)
            }
            ApiError::Domain(DomainError::InvalidId(_)) => {
                json_error(StatusCode::BAD_REQUEST, "invalid_id", message)
            }
            ApiError::Auth(AuthError::InvalidCredentials) => {
                json_error(StatusCode::UNAUTHORIZED, "invalid_credentials", message)
            }
            ApiError::Auth(AuthError::Unauthorized(_)) | ApiError::MissingToken => {
                // The rejection reason is logged by the middleware, not disclosed.
                json_error(StatusCode::UNAUTHORIZED, "unauthorized", "invalid or expired token")
            }
            ApiError::Auth(AuthError::Signing(_)) => {
                tracing::error!(error = %message, "token signing failed");
                json_error(StatusCode::INTERNAL_SERVER_ERROR, "token_error", "could not issue token")
            }
            ApiError::Catalog(CatalogError::AttributesNotFound(_)) => {
                json_error(StatusCode::NOT_FOUND, "attributes_not_found", message)
            }
            ApiError::BadRequest(_) => json_error(StatusCode::BAD_REQUEST, "bad_request", message),
        }
    }
}

pub fn json_error(status: StatusCode, code: &'static str, message: impl Into<String>) -> Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

/// Parse a path segment into an entity id (`400 invalid_id` on failure).
pub fn parse_id(raw: &str) -> Result<EntityId, ApiError> {
    Ok(raw.parse::<EntityId>()?)
}
