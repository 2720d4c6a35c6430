use axum::{Extension, Json, http::StatusCode, response::IntoResponse};

use crate::app::dto::WhoAmIResponse;
use crate::context::AdminContext;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn whoami(Extension(admin): Extension<AdminContext>) -> impl IntoResponse {
    Json(WhoAmIResponse {
        subject: admin.subject().as_str(),
    })
    .into_response()
}
