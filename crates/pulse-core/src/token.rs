//! Bearer credential for the GraphQL endpoint.

use std::fmt;

use crate::error::{Error, InvalidInputError};

/// A bearer token injected into every GraphQL request.
///
/// # Security
///
/// - Never logged or displayed in Debug output
/// - Treat as opaque; do not parse or inspect
#[derive(Clone)]
pub struct Token(String);

impl Token {
    /// Create a new token.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is empty after trimming.
    pub fn new(token: impl Into<String>) -> Result<Self, Error> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(InvalidInputError::EmptyToken.into());
        }
        Ok(Self(token.trim().to_string()))
    }

    /// Returns the token value for use in authorization headers.
    ///
    /// # Security
    ///
    /// Use only when constructing HTTP authorization headers.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Hide token value in Debug output
impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Token").field(&"[REDACTED]").finish()
    }
}
