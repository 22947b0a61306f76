//! Till session and bearer-token handling.

use std::fmt;

use thiserror::Error;
use zeroize::Zeroize;

/// Errors raised when an operation requires a signed-in session.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    /// No token is attached to the session.
    #[error("not signed in")]
    NotSignedIn,
}

/// Bearer token for the store API.
///
/// The raw value is zeroized on drop and redacted from debug output.
/// Acquisition and refresh belong to the external session service; this
/// type only carries the value it handed out.
#[derive(Clone)]
pub struct AccessToken {
    raw: String,
}

impl AccessToken {
    /// Wrap a raw token value.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    /// The raw token value, for the `Authorization` header.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.raw
    }
}

impl Drop for AccessToken {
    fn drop(&mut self) {
        self.raw.zeroize();
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

/// Cashier session state for the terminal process.
#[derive(Debug, Clone, Default)]
pub struct Session {
    token: Option<AccessToken>,
}

impl Session {
    /// A session holding a bearer token.
    #[must_use]
    pub fn signed_in(token: AccessToken) -> Self {
        Self { token: Some(token) }
    }

    /// A session with no token attached.
    #[must_use]
    pub fn signed_out() -> Self {
        Self::default()
    }

    /// Whether a token is attached.
    #[must_use]
    pub fn is_signed_in(&self) -> bool {
        self.token.is_some()
    }

    /// The bearer token for authenticated calls.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::NotSignedIn`] when no token is attached.
    pub fn bearer(&self) -> Result<&str, AuthError> {
        self.token
            .as_ref()
            .map(AccessToken::expose)
            .ok_or(AuthError::NotSignedIn)
    }
}
