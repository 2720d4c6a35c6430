//! HTTP API: routing, auth middleware, and request/response mapping for the
//! lamp shop admin back office.

pub mod app;
pub mod config;
pub mod context;
pub mod middleware;

pub use config::{ApiConfig, NotifierKind};
