//! Per-organization collection and aggregation.

use std::time::Duration;

use tracing::{info, instrument};

use pulse_core::{Category, Login, OrgReport, RepoActivity, RepoName, Transport};

use crate::feeds::Feeds;
use crate::paginate::Paginator;

/// Knobs for one audit run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditOptions {
    /// Pause after each page that is followed by another.
    pub page_delay: Duration,
    /// Items requested per page.
    pub page_size: u32,
    /// Branch used when a repository reports none.
    pub default_branch: String,
}

impl Default for AuditOptions {
    fn default() -> Self {
        Self {
            page_delay: Duration::from_secs(3),
            page_size: 100,
            default_branch: "main".to_string(),
        }
    }
}

impl AuditOptions {
    #[must_use]
    pub fn with_page_delay(mut self, delay: Duration) -> Self {
        self.page_delay = delay;
        self
    }

    #[must_use]
    pub fn with_page_size(mut self, size: u32) -> Self {
        self.page_size = size;
        self
    }
}

/// Walks an organization strictly sequentially: members, repositories, then
/// per repository its branches' commits, issues, and pull requests.
///
/// Nothing here fails. Feeds that cannot be read contribute nothing and the
/// walk moves on to the next unit of work.
#[derive(Debug, Clone, Copy)]
pub struct Auditor<'a> {
    feeds: Feeds<'a>,
}

impl<'a> Auditor<'a> {
    pub fn new(transport: &'a dyn Transport, options: &'a AuditOptions) -> Self {
        let paginator = Paginator::new(transport, options.page_delay);
        Self {
            feeds: Feeds::new(paginator, options.page_size, &options.default_branch),
        }
    }

    pub fn feeds(&self) -> &Feeds<'a> {
        &self.feeds
    }

    /// Collect the roster and every non-fork repository's activity.
    #[instrument(skip(self), fields(org = %org))]
    pub async fn audit_organization(&self, org: &Login) -> OrgReport {
        let roster = self.feeds.members(org).await;
        let repos = self.feeds.repositories(org).await;

        let mut report = OrgReport::new(org.clone(), roster);
        let total = repos.len();
        for (index, repo) in repos.into_iter().enumerate() {
            info!(repo = %repo, index = index + 1, total, "auditing repository");
            let activity = self.audit_repository(org, &repo).await;
            report.insert_repository(repo, activity);
        }

        info!(
            members = report.roster().len(),
            repositories = report.repository_count(),
            "organization audit complete"
        );
        report
    }

    /// Merge commits from every branch, then issues, then pull requests.
    pub async fn audit_repository(&self, org: &Login, repo: &RepoName) -> RepoActivity {
        let mut activity = RepoActivity::new();

        let branches = self.feeds.branches(org, repo).await;
        for branch in &branches {
            let events = self.feeds.commits(org, repo, branch).await;
            let merged = activity.merge_into(Category::Commits, events);
            info!(repo = %repo, branch = %branch, commits = merged, "merged branch commits");
        }

        let issues = self.feeds.issues(org, repo).await;
        let merged = activity.merge_into(Category::Issues, issues);
        info!(repo = %repo, issues = merged, "merged issues");

        let pull_requests = self.feeds.pull_requests(org, repo).await;
        let merged = activity.merge_into(Category::PullRequests, pull_requests);
        info!(repo = %repo, pull_requests = merged, "merged pull requests");

        activity
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;
    use crate::testing::ScriptedTransport;

    fn connection(nodes: Value) -> Value {
        json!({
            "pageInfo": {"hasNextPage": false, "endCursor": null},
            "nodes": nodes
        })
    }

    fn history(edges: Value) -> Value {
        json!({"repository": {"ref": {"target": {"history": {
            "pageInfo": {"hasNextPage": false, "endCursor": null},
            "edges": edges
        }}}}})
    }

    fn commit(login: &str, at: &str) -> Value {
        json!({"node": {"committedDate": at, "author": {"user": {"login": login}}}})
    }

    fn options() -> AuditOptions {
        AuditOptions::default().with_page_delay(Duration::ZERO)
    }

    fn ts(s: &str) -> Option<pulse_core::Timestamp> {
        Some(pulse_core::Timestamp::parse(s).unwrap())
    }

    #[tokio::test]
    async fn organization_audit_aggregates_all_categories() {
        let transport = ScriptedTransport::new()
            .on(
                "membersWithRole",
                json!({"organization": {"membersWithRole": connection(json!([
                    {"login": "alice"}, {"login": "bob"}, {"login": "carol"}
                ]))}}),
            )
            .on(
                "repositories(",
                json!({"organization": {"repositories": connection(json!([
                    {"name": "api", "isFork": false},
                    {"name": "upstream-copy", "isFork": true}
                ]))}}),
            )
            .on(
                "refs(",
                json!({"repository": {"refs": connection(json!([
                    {"name": "main"}, {"name": "dev"}
                ]))}}),
            )
            .on(
                "history(",
                history(json!([
                    commit("alice", "2024-01-01T00:00:00Z"),
                    commit("alice", "2024-02-01T00:00:00Z"),
                ])),
            )
            .on(
                "issues(",
                json!({"repository": {"issues": connection(json!([
                    {"createdAt": "2024-01-15T00:00:00Z", "author": {"login": "bob"}}
                ]))}}),
            )
            .on(
                "pullRequests(",
                json!({"repository": {"pullRequests": connection(json!([
                    {"createdAt": "2024-03-01T00:00:00Z", "author": {"login": "alice"}}
                ]))}}),
            );
        let options = options();
        let auditor = Auditor::new(&transport, &options);

        let report = auditor.audit_organization(&Login::new("acme").unwrap()).await;

        assert_eq!(report.roster().len(), 3);
        assert_eq!(report.repository_count(), 1);
        assert!(report.repository("upstream-copy").is_none());

        let api = report.repository("api").unwrap();
        let alice = api.get("alice").unwrap();
        // same history read once per branch
        assert_eq!(alice.commits.count, 4);
        assert_eq!(alice.commits.last, ts("2024-02-01T00:00:00Z"));
        assert_eq!(alice.prs.count, 1);
        assert_eq!(alice.last_activity(), ts("2024-03-01T00:00:00Z"));

        let bob = api.get("bob").unwrap();
        assert_eq!(bob.issues.count, 1);
        assert_eq!(bob.commits.count, 0);
        assert!(api.get("carol").is_none());

        let branches: Vec<Value> = transport
            .calls_matching("history(")
            .into_iter()
            .map(|v| v["branch"].clone())
            .collect();
        assert_eq!(branches, [json!("refs/heads/main"), json!("refs/heads/dev")]);
    }

    #[tokio::test]
    async fn failing_feeds_leave_repository_empty() {
        let transport = ScriptedTransport::new()
            .fail("refs(", 502)
            .fail("history(", 502)
            .fail("issues(", 502)
            .fail("pullRequests(", 502);
        let options = options();
        let auditor = Auditor::new(&transport, &options);

        let activity = auditor
            .audit_repository(&Login::new("acme").unwrap(), &RepoName::new("api").unwrap())
            .await;

        assert!(activity.is_empty());
        assert_eq!(
            transport.calls_matching("history(")[0]["branch"],
            "refs/heads/main"
        );
    }

    #[tokio::test]
    async fn commits_come_only_from_listed_branches() {
        let transport = ScriptedTransport::new()
            .on("refs(", json!({"repository": {"refs": connection(json!([{"name": "dev"}]))}}))
            .on("history(", history(json!([commit("alice", "2024-01-01T00:00:00Z")])))
            .on(
                "issues(",
                json!({"repository": {"issues": connection(json!([
                    {"createdAt": "2024-01-02T00:00:00Z", "author": {"login": "bob"}}
                ]))}}),
            )
            .on("pullRequests(", json!({"repository": {"pullRequests": connection(json!([]))}}));
        let options = options();
        let auditor = Auditor::new(&transport, &options);

        let activity = auditor
            .audit_repository(&Login::new("acme").unwrap(), &RepoName::new("api").unwrap())
            .await;

        let branches: Vec<Value> = transport
            .calls_matching("history(")
            .into_iter()
            .map(|v| v["branch"].clone())
            .collect();
        assert_eq!(branches, [json!("refs/heads/dev")]);
        assert_eq!(transport.calls_matching("issues(").len(), 1);
        assert_eq!(transport.calls_matching("pullRequests(").len(), 1);

        assert_eq!(activity.get("alice").unwrap().commits.count, 1);
        let bob = activity.get("bob").unwrap();
        assert_eq!(bob.issues.count, 1);
        assert_eq!(bob.commits.count, 0);
    }

    #[tokio::test]
    async fn unknown_organization_produces_empty_report() {
        let transport = ScriptedTransport::new()
            .on("membersWithRole", json!({"organization": null}))
            .on("repositories(", json!({"organization": null}));
        let options = options();
        let auditor = Auditor::new(&transport, &options);

        let report = auditor.audit_organization(&Login::new("ghost").unwrap()).await;

        assert!(report.roster().is_empty());
        assert_eq!(report.repository_count(), 0);
    }
}
