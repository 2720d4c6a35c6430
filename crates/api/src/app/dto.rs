use serde::{Deserialize, Serialize};

use lampshop_orders::OrderStatus;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: OrderStatus,
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    /// Seconds until the token expires.
    pub expires_in: i64,
}

#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub result: &'static str,
}

impl DeletedResponse {
    pub fn new() -> Self {
        Self { result: "deleted" }
    }
}

#[derive(Debug, Serialize)]
pub struct WhoAmIResponse<'a> {
    pub subject: &'a str,
}
