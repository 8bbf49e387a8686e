//! UTC timestamps and the later-of rule.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

/// An absolute instant, normalized to UTC.
///
/// Parsing requires an explicit zone designator. A trailing `Z` is UTC and
/// numeric offsets are converted; a timestamp without any zone is rejected
/// rather than guessed.
///
/// # Example
///
/// ```
/// use pulse_core::Timestamp;
///
/// let a = Timestamp::parse("2024-01-01T02:00:00+02:00").unwrap();
/// let b = Timestamp::parse("2024-01-01T00:00:00Z").unwrap();
/// assert_eq!(a, b);
/// assert!(Timestamp::parse("2024-01-01T00:00:00").is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Parse an RFC 3339 timestamp and normalize it to UTC.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not RFC 3339 or lacks a zone.
    pub fn parse(s: &str) -> Result<Self, Error> {
        DateTime::parse_from_rfc3339(s)
            .map(|dt| Self(dt.with_timezone(&Utc)))
            .map_err(|e| {
                InvalidInputError::Timestamp {
                    value: s.to_string(),
                    reason: e.to_string(),
                }
                .into()
            })
    }

    /// Wrap an instant that is already in UTC.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Returns the underlying instant.
    pub fn as_datetime(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Absence-tolerant maximum of two optional timestamps.
///
/// `later(None, b) == b`, `later(a, None) == a`, otherwise the greater of the
/// two. The rule is commutative and associative, so the order in which
/// records are folded never changes the result.
pub fn later(a: Option<Timestamp>, b: Option<Timestamp>) -> Option<Timestamp> {
    match (a, b) {
        (None, b) => b,
        (a, None) => a,
        (Some(a), Some(b)) => Some(a.max(b)),
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }
}

impl FromStr for Timestamp {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Timestamp {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<Timestamp> for String {
    fn from(ts: Timestamp) -> Self {
        ts.to_string()
    }
}
