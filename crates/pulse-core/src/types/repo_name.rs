//! Repository name type.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, InvalidInputError};

/// A repository name within an organization (without the owner prefix).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RepoName(String);

impl RepoName {
    /// Create a new repository name.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is empty or contains a `/`.
    pub fn new(s: impl Into<String>) -> Result<Self, Error> {
        let s = s.into();
        let reason = if s.is_empty() {
            Some("must not be empty")
        } else if s.contains('/') {
            Some("must not include the owner")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(InvalidInputError::RepoName {
                value: s,
                reason: reason.to_string(),
            }
            .into()),
            None => Ok(Self(s)),
        }
    }

    /// Returns the repository name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RepoName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for RepoName {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<RepoName> for String {
    fn from(name: RepoName) -> Self {
        name.0
    }
}
