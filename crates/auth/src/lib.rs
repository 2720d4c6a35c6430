//! `lampshop-auth`: administrator authentication gate.
//!
//! Verifies the administrator credential pair and issues/verifies signed,
//! time-limited bearer tokens. This crate is decoupled from HTTP and storage
//! and performs no authorization (no roles, no permissions).
//!
//! Tokens are stateless: there is no revocation list, so a token stays valid
//! for its whole TTL regardless of server-side events.

pub mod claims;
pub mod credentials;
pub mod gate;

pub use claims::{TokenClaims, TokenRejection, validate_claims};
pub use credentials::{CredentialValidator, StaticCredentials};
pub use gate::{AuthError, AuthGate, IssuedToken, Subject, TOKEN_TTL};
