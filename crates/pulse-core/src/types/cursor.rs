//! Opaque pagination cursor.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A server-issued pagination token.
///
/// The client never interprets a cursor; it is handed back to the server
/// byte-for-byte as the `after` argument of the next page request.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cursor(String);

impl Cursor {
    /// Wrap a cursor value received from the server.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the raw cursor value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
