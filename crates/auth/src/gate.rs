//! Token issuance and verification.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::claims::{TokenClaims, TokenRejection, validate_claims};
use crate::credentials::CredentialValidator;

/// Lifetime of an issued token.
pub const TOKEN_TTL: Duration = Duration::hours(2);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("unauthorized: {0}")]
    Unauthorized(#[from] TokenRejection),

    #[error("failed to sign token: {0}")]
    Signing(String),
}

/// Identity carried by an accepted token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Subject(String);

impl Subject {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Subject {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A freshly signed token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl IssuedToken {
    /// Whole seconds until expiry, measured from `now`.
    pub fn expires_in(&self, now: DateTime<Utc>) -> i64 {
        (self.expires_at - now).num_seconds().max(0)
    }
}

/// Stateless bearer-token gate.
///
/// Holds the process-wide HS256 key, immutable after construction; verifying a
/// token is a pure function of (token, key, now) and needs no locking.
pub struct AuthGate {
    credentials: Arc<dyn CredentialValidator>,
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl AuthGate {
    pub fn new(secret: &[u8], credentials: Arc<dyn CredentialValidator>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Time checks run in `validate_claims` against an explicit `now`.
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["sub", "iat", "exp"]);

        Self {
            credentials,
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Check the credential pair and issue a token for `username`.
    pub fn login(&self, username: &str, password: &str) -> Result<IssuedToken, AuthError> {
        if !self.credentials.validate_credentials(username, password) {
            debug!(username, "login rejected");
            return Err(AuthError::InvalidCredentials);
        }
        self.issue_token_at(username, Utc::now())
    }

    /// Sign a token for `subject` as if issued at `now`.
    pub fn issue_token_at(&self, subject: &str, now: DateTime<Utc>) -> Result<IssuedToken, AuthError> {
        let claims = TokenClaims {
            sub: subject.to_string(),
            iat: now,
            exp: now + TOKEN_TTL,
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::Signing(e.to_string()))?;

        debug!(subject, expires_at = %claims.exp, "issued token");

        Ok(IssuedToken {
            token,
            expires_at: claims.exp,
        })
    }

    /// Verify signature and expiry; returns the subject on success.
    pub fn authenticate(&self, token: &str) -> Result<Subject, AuthError> {
        self.authenticate_at(token, Utc::now())
    }

    pub fn authenticate_at(&self, token: &str, now: DateTime<Utc>) -> Result<Subject, AuthError> {
        let decoded = decode::<TokenClaims>(token, &self.decoding, &self.validation)
            .map_err(|e| rejection_for(e.kind()))?;

        validate_claims(&decoded.claims, now)?;

        Ok(Subject(decoded.claims.sub))
    }
}

fn rejection_for(kind: &ErrorKind) -> TokenRejection {
    match kind {
        ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => TokenRejection::BadSignature,
        ErrorKind::ExpiredSignature => TokenRejection::Expired,
        ErrorKind::ImmatureSignature => TokenRejection::NotYetValid,
        _ => TokenRejection::Malformed,
    }
}
