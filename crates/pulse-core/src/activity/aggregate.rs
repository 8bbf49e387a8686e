//! Per-repository activity map.

use std::collections::BTreeMap;

use crate::types::Login;

use super::{ActivityEvent, Category, UserActivitySummary};

/// Activity for one repository, keyed by login.
///
/// Each feed must be drained into the map exactly once: merging is additive,
/// so replaying the same events would double-count them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepoActivity {
    users: BTreeMap<Login, UserActivitySummary>,
}

impl RepoActivity {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a batch of events for one category into the map.
    ///
    /// Creates a user's summary on their first event. Returns the number of
    /// events merged.
    pub fn merge_into<I>(&mut self, category: Category, events: I) -> usize
    where
        I: IntoIterator<Item = ActivityEvent>,
    {
        let mut merged = 0;
        for event in events {
            self.users
                .entry(event.login)
                .or_default()
                .record_mut(category)
                .observe(event.at);
            merged += 1;
        }
        merged
    }

    /// Summary for a login, if the user had any activity.
    pub fn get(&self, login: &str) -> Option<&UserActivitySummary> {
        self.users.get(login)
    }

    /// Summary for a login, or an all-zero summary for a silent user.
    pub fn summary_or_default(&self, login: &str) -> UserActivitySummary {
        self.get(login).copied().unwrap_or_default()
    }

    /// Number of users with activity.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Timestamp;

    fn event(login: &str, at: &str) -> ActivityEvent {
        ActivityEvent::new(Login::new(login).unwrap(), Timestamp::parse(at).unwrap())
    }

    fn events() -> Vec<ActivityEvent> {
        vec![
            event("alice", "2024-01-03T00:00:00Z"),
            event("bob", "2023-11-20T08:00:00Z"),
            event("alice", "2024-02-10T12:00:00Z"),
            event("alice", "2023-12-25T00:00:00Z"),
            event("bob", "2024-01-01T00:00:00Z"),
            event("alice", "2024-01-31T23:59:59Z"),
        ]
    }

    #[test]
    fn creates_summaries_lazily() {
        let mut activity = RepoActivity::new();
        assert!(activity.get("alice").is_none());

        let merged = activity.merge_into(Category::Issues, [event("alice", "2024-01-01T00:00:00Z")]);

        assert_eq!(merged, 1);
        let alice = activity.get("alice").unwrap();
        assert_eq!(alice.issues.count, 1);
        assert_eq!(alice.commits.count, 0);
        assert_eq!(alice.commits.last, None);
    }

    #[test]
    fn batching_does_not_change_result() {
        let mut single = RepoActivity::new();
        single.merge_into(Category::Commits, events());

        // Same events split across branches, in a different order.
        let mut batched = RepoActivity::new();
        let mut reversed = events();
        reversed.reverse();
        let (first, second) = reversed.split_at(2);
        batched.merge_into(Category::Commits, first.to_vec());
        batched.merge_into(Category::Commits, Vec::new());
        batched.merge_into(Category::Commits, second.to_vec());

        assert_eq!(single, batched);

        let alice = batched.get("alice").unwrap();
        assert_eq!(alice.commits.count, 4);
        assert_eq!(alice.commits.last, Some(Timestamp::parse("2024-02-10T12:00:00Z").unwrap()));
        assert_eq!(batched.get("bob").unwrap().commits.count, 2);
    }

    #[test]
    fn categories_are_tracked_independently() {
        let mut activity = RepoActivity::new();
        activity.merge_into(Category::Commits, [event("alice", "2024-01-01T00:00:00Z")]);
        activity.merge_into(Category::PullRequests, [event("alice", "2024-02-01T00:00:00Z")]);

        let alice = activity.get("alice").unwrap();
        assert_eq!(alice.commits.count, 1);
        assert_eq!(alice.prs.count, 1);
        assert_eq!(alice.issues.count, 0);
        assert_eq!(
            alice.last_activity(),
            Some(Timestamp::parse("2024-02-01T00:00:00Z").unwrap())
        );
    }

    #[test]
    fn silent_user_gets_zero_summary() {
        let activity = RepoActivity::new();
        let summary = activity.summary_or_default("carol");
        assert!(summary.is_empty());
        assert_eq!(summary.last_activity(), None);
    }
}
