//! Generation service credential: format check and per-client storage slot.

use crate::error::ApiError;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use regex::Regex;
use secrecy::{ExposeSecret, Secret};

/// Accepted key shapes: `sk-...` and `sk-proj-...`.
pub const CREDENTIAL_PATTERN: &str = r"^sk(?:-proj)?-[A-Za-z0-9_-]+$";

static CREDENTIAL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(CREDENTIAL_PATTERN).expect("Invalid credential regex"));

/// A credential whose format has been checked.
pub struct Credential(Secret<String>);

impl Credential {
    /// Parse a raw key, rejecting anything outside [`CREDENTIAL_PATTERN`].
    pub fn parse(raw: &str) -> Result<Self, ApiError> {
        if !CREDENTIAL_REGEX.is_match(raw) {
            return Err(ApiError::InvalidCredentialFormat);
        }
        Ok(Self(Secret::new(raw.to_string())))
    }

    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Single last-write-wins slot owned by one client instance.
#[derive(Debug, Default)]
pub struct CredentialSlot {
    current: RwLock<Option<Credential>>,
}

impl CredentialSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `raw` if it is well formed; on rejection the previous value is kept.
    pub fn set(&self, raw: &str) -> Result<(), ApiError> {
        let credential = Credential::parse(raw)?;
        *self.current.write() = Some(credential);
        Ok(())
    }

    pub fn is_set(&self) -> bool {
        self.current.read().is_some()
    }

    /// `Authorization` header value for the stored credential.
    pub fn bearer(&self) -> Option<String> {
        self.current
            .read()
            .as_ref()
            .map(|credential| format!("Bearer {}", credential.expose()))
    }
}
