use std::sync::Arc;

use axum::{Extension, Json, extract::rejection::JsonRejection};
use chrono::Utc;

use lampshop_auth::AuthGate;

use crate::app::dto::{LoginRequest, LoginResponse};
use crate::app::errors::ApiError;

pub async fn login(
    Extension(gate): Extension<Arc<AuthGate>>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    let Json(req) = body?;

    let issued = gate.login(&req.username, &req.password).inspect_err(|_| {
        tracing::info!(username = %req.username, "login failed");
    })?;

    tracing::info!(username = %req.username, expires_at = %issued.expires_at, "admin logged in");

    Ok(Json(LoginResponse {
        expires_in: issued.expires_in(Utc::now()),
        token: issued.token,
    }))
}
