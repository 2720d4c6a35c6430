//! Credential providers consulted by the gate on login.

use std::hint::black_box;

/// Decides whether a username/password pair identifies the administrator.
///
/// Swap the implementation to plug in a real identity backend; token issuance
/// does not change.
pub trait CredentialValidator: Send + Sync {
    fn validate_credentials(&self, username: &str, password: &str) -> bool;
}

/// A single compiled-in credential pair.
#[derive(Clone)]
pub struct StaticCredentials {
    username: String,
    password: String,
}

impl StaticCredentials {
    pub const ADMIN_USERNAME: &'static str = "admin";
    pub const ADMIN_PASSWORD: &'static str = "password123";

    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// The development administrator (`admin` / `password123`).
    pub fn admin() -> Self {
        Self::new(Self::ADMIN_USERNAME, Self::ADMIN_PASSWORD)
    }
}

impl core::fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("StaticCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl CredentialValidator for StaticCredentials {
    fn validate_credentials(&self, username: &str, password: &str) -> bool {
        // Evaluate both comparisons so timing does not reveal which one failed.
        let user_ok = constant_time_eq(username.as_bytes(), self.username.as_bytes());
        let pass_ok = constant_time_eq(password.as_bytes(), self.password.as_bytes());
        user_ok & pass_ok
    }
}

/// Byte comparison whose running time depends only on the longer input.
///
/// A length mismatch is folded into the accumulator instead of returning
/// early, and `black_box` keeps the loop from being turned into a
/// short-circuiting compare.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    let len = a.len().max(b.len());
    let mut diff = u8::from(a.len() != b.len());
    for i in 0..len {
        let x = a.get(i).copied().unwrap_or(0);
        let y = b.get(i).copied().unwrap_or(0);
        diff = black_box(diff | (x ^ y));
    }
    diff == 0
}
