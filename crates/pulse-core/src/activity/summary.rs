//! Per-user activity records.

use serde::{Deserialize, Serialize};

use crate::types::{Login, Timestamp, later};

/// One of the tracked activity categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Commits,
    Issues,
    PullRequests,
}

/// A single attributed activity: who, and when.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityEvent {
    pub login: Login,
    pub at: Timestamp,
}

impl ActivityEvent {
    pub fn new(login: Login, at: Timestamp) -> Self {
        Self { login, at }
    }
}

/// Count and most recent timestamp for one user in one category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityRecord {
    /// Running total of observed events.
    pub count: u64,
    /// Latest observed event; never moves backwards.
    pub last: Option<Timestamp>,
}

impl ActivityRecord {
    /// Record one event.
    pub fn observe(&mut self, at: Timestamp) {
        self.count += 1;
        self.last = later(self.last, Some(at));
    }
}

/// Everything known about one user in one repository.
///
/// A summary starts with all counters at zero and no timestamps, and only
/// ever grows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserActivitySummary {
    pub commits: ActivityRecord,
    pub issues: ActivityRecord,
    pub prs: ActivityRecord,
}

impl UserActivitySummary {
    /// Mutable access to the record for a category.
    pub fn record_mut(&mut self, category: Category) -> &mut ActivityRecord {
        match category {
            Category::Commits => &mut self.commits,
            Category::Issues => &mut self.issues,
            Category::PullRequests => &mut self.prs,
        }
    }

    /// Latest activity across all categories.
    pub fn last_activity(&self) -> Option<Timestamp> {
        later(later(self.commits.last, self.issues.last), self.prs.last)
    }

    /// True if no event has been recorded in any category.
    pub fn is_empty(&self) -> bool {
        self.commits.count == 0 && self.issues.count == 0 && self.prs.count == 0
    }
}
