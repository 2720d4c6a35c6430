//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: stores, catalog and notifier shared by handlers
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request/response DTOs
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};

use lampshop_auth::{AuthGate, StaticCredentials};

use crate::config::ApiConfig;
use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
///
/// Must run inside a tokio runtime (see [`services::AppServices::from_config`]).
pub fn build_app(config: ApiConfig) -> Router {
    let services = services::AppServices::from_config(&config);
    build_app_with(&config, services)
}

/// Build the router around caller-provided services.
pub fn build_app_with(config: &ApiConfig, services: services::AppServices) -> Router {
    let gate = Arc::new(AuthGate::new(
        config.jwt_secret.as_bytes(),
        Arc::new(StaticCredentials::admin()),
    ));
    let auth_state = middleware::AuthState { gate: gate.clone() };
    let services = Arc::new(services);

    // Protected routes: require a valid bearer token.
    let protected = routes::protected_router()
        .layer(Extension(services.clone()))
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            middleware::auth_middleware,
        ));

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::public_router())
        .layer(Extension(services))
        .layer(Extension(gate))
        .merge(protected)
}
