//! GraphQL endpoint URL type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::error::{Error, InvalidInputError};

/// The public GitHub GraphQL endpoint.
pub const GITHUB_GRAPHQL_URL: &str = "https://api.github.com/graphql";

/// A validated GraphQL endpoint URL.
///
/// Endpoints must use HTTPS; plain HTTP is accepted only for localhost so
/// tests can point the client at a local mock server.
///
/// # Example
///
/// ```
/// use pulse_core::GraphqlUrl;
///
/// let url = GraphqlUrl::github();
/// assert_eq!(url.as_str(), "https://api.github.com/graphql");
///
/// assert!(GraphqlUrl::new("http://127.0.0.1:8080/graphql").is_ok());
/// assert!(GraphqlUrl::new("http://api.github.com/graphql").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GraphqlUrl(Url);

impl GraphqlUrl {
    /// Create a new endpoint URL from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not valid or doesn't meet requirements.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let url = Url::parse(s).map_err(|e| InvalidInputError::GraphqlUrl {
            value: s.to_string(),
            reason: e.to_string(),
        })?;

        Self::validate(&url, s)?;

        Ok(Self(url))
    }

    /// The public GitHub endpoint.
    pub fn github() -> Self {
        Self(Url::parse(GITHUB_GRAPHQL_URL).expect("GitHub GraphQL URL is valid"))
    }

    /// Returns the URL as a string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the inner URL.
    pub fn as_url(&self) -> &Url {
        &self.0
    }

    /// Returns the host string.
    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }

    fn validate(url: &Url, original: &str) -> Result<(), Error> {
        if url.cannot_be_a_base() {
            return Err(InvalidInputError::GraphqlUrl {
                value: original.to_string(),
                reason: "must be an absolute URL".to_string(),
            }
            .into());
        }

        let scheme = url.scheme();
        let is_localhost = url
            .host_str()
            .is_some_and(|h| h == "localhost" || h == "127.0.0.1" || h == "[::1]");

        if scheme != "https" && !(scheme == "http" && is_localhost) {
            return Err(InvalidInputError::GraphqlUrl {
                value: original.to_string(),
                reason: "must use HTTPS (HTTP allowed only for localhost)".to_string(),
            }
            .into());
        }

        if url.host_str().is_none() {
            return Err(InvalidInputError::GraphqlUrl {
                value: original.to_string(),
                reason: "must have a host".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

impl Default for GraphqlUrl {
    fn default() -> Self {
        Self::github()
    }
}

impl fmt::Display for GraphqlUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for GraphqlUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for GraphqlUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for GraphqlUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        GraphqlUrl::new(&s).map_err(serde::de::Error::custom)
    }
}

impl AsRef<str> for GraphqlUrl {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}
