//! Active/Inactive classification.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::Timestamp;

/// Whether a member counts as active in a repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Active,
    Inactive,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Active => "Active",
            Status::Inactive => "Inactive",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies last-activity timestamps against a fixed cutoff.
///
/// The cutoff is `now - threshold_days`, computed once so that every row of
/// a report is judged against the same instant. The boundary is inclusive.
/// A threshold reaching past the earliest representable instant clamps the
/// cutoff there, so every timestamped activity counts as active.
///
/// # Example
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use pulse_core::{Classifier, Status, Timestamp};
///
/// let now = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
/// let classifier = Classifier::new(now, 60);
///
/// let boundary = Timestamp::parse("2024-01-01T00:00:00Z").unwrap();
/// assert_eq!(classifier.classify(Some(boundary)), Status::Active);
/// assert_eq!(classifier.classify(None), Status::Inactive);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classifier {
    cutoff: DateTime<Utc>,
}

impl Classifier {
    pub fn new(now: DateTime<Utc>, threshold_days: u32) -> Self {
        let cutoff = TimeDelta::try_days(i64::from(threshold_days))
            .and_then(|window| now.checked_sub_signed(window))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        Self { cutoff }
    }

    /// Classify against the current wall clock.
    pub fn from_now(threshold_days: u32) -> Self {
        Self::new(Utc::now(), threshold_days)
    }

    /// The earliest instant that still counts as active.
    pub fn cutoff(&self) -> Timestamp {
        Timestamp::from_datetime(self.cutoff)
    }

    pub fn classify(&self, last_activity: Option<Timestamp>) -> Status {
        match last_activity {
            Some(ts) if ts.as_datetime() >= self.cutoff => Status::Active,
            _ => Status::Inactive,
        }
    }
}
