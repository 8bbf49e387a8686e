//! Timestamped activity feeds: commits, issues, and pull requests.

use serde::Deserialize;
use tracing::{debug, instrument};

use pulse_core::{ActivityEvent, Login, Page, RepoName, Timestamp};

use super::{Connection, Feeds, queries};
use crate::paginate::{FeedResponse, MissingPath};

/// Build an event from raw fields, dropping unattributed or undated records.
fn event(login: Option<String>, at: &str) -> Option<ActivityEvent> {
    let login = Login::new(login?).ok()?;
    match Timestamp::parse(at) {
        Ok(at) => Some(ActivityEvent::new(login, at)),
        Err(err) => {
            debug!(%login, error = %err, "skipping record with unreadable timestamp");
            None
        }
    }
}

#[derive(Debug, Deserialize)]
struct CommitsData {
    repository: Option<CommitRepository>,
}

#[derive(Debug, Deserialize)]
struct CommitRepository {
    #[serde(rename = "ref")]
    git_ref: Option<GitRef>,
}

#[derive(Debug, Deserialize)]
struct GitRef {
    target: Option<CommitTarget>,
}

/// Non-commit targets (annotated tags) deserialize with no history.
#[derive(Debug, Deserialize)]
struct CommitTarget {
    history: Option<Connection<CommitNode>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommitNode {
    committed_date: String,
    author: Option<CommitAuthor>,
}

/// Git author; `user` is null when the email maps to no account.
#[derive(Debug, Deserialize)]
struct CommitAuthor {
    user: Option<Actor>,
}

#[derive(Debug, Deserialize)]
struct Actor {
    login: Option<String>,
}

impl FeedResponse for CommitsData {
    type Item = ActivityEvent;

    fn into_page(self) -> Result<Page<ActivityEvent>, MissingPath> {
        let target = self
            .repository
            .ok_or(MissingPath::new("repository"))?
            .git_ref
            .and_then(|r| r.target)
            .ok_or(MissingPath::new("branch"))?;

        let Some(history) = target.history else {
            return Ok(Page::last(Vec::new()));
        };
        Ok(history.into_page(|node| {
            let login = node.author.and_then(|a| a.user).and_then(|u| u.login);
            event(login, &node.committed_date)
        }))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthoredNode {
    created_at: String,
    /// Null for deleted accounts.
    author: Option<Actor>,
}

impl AuthoredNode {
    fn into_event(self) -> Option<ActivityEvent> {
        event(self.author.and_then(|a| a.login), &self.created_at)
    }
}

#[derive(Debug, Deserialize)]
struct IssuesData {
    repository: Option<IssuesRepository>,
}

#[derive(Debug, Deserialize)]
struct IssuesRepository {
    issues: Connection<AuthoredNode>,
}

impl FeedResponse for IssuesData {
    type Item = ActivityEvent;

    fn into_page(self) -> Result<Page<ActivityEvent>, MissingPath> {
        let repo = self.repository.ok_or(MissingPath::new("repository"))?;
        Ok(repo.issues.into_page(AuthoredNode::into_event))
    }
}

#[derive(Debug, Deserialize)]
struct PullRequestsData {
    repository: Option<PullRequestsRepository>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PullRequestsRepository {
    pull_requests: Connection<AuthoredNode>,
}

impl FeedResponse for PullRequestsData {
    type Item = ActivityEvent;

    fn into_page(self) -> Result<Page<ActivityEvent>, MissingPath> {
        let repo = self.repository.ok_or(MissingPath::new("repository"))?;
        Ok(repo.pull_requests.into_page(AuthoredNode::into_event))
    }
}

impl Feeds<'_> {
    /// Attributed commits reachable from `branch`.
    #[instrument(skip(self), fields(org = %org, repo = %repo))]
    pub async fn commits(&self, org: &Login, repo: &RepoName, branch: &str) -> Vec<ActivityEvent> {
        let mut vars = self.repo_vars(org, repo);
        vars.insert("branch".to_string(), format!("refs/heads/{branch}").into());
        self.paginator
            .collect::<CommitsData>("commits", queries::COMMITS, vars)
            .await
    }

    /// Attributed issues opened in `repo`.
    #[instrument(skip(self), fields(org = %org, repo = %repo))]
    pub async fn issues(&self, org: &Login, repo: &RepoName) -> Vec<ActivityEvent> {
        self.paginator
            .collect::<IssuesData>("issues", queries::ISSUES, self.repo_vars(org, repo))
            .await
    }

    /// Attributed pull requests opened in `repo`.
    #[instrument(skip(self), fields(org = %org, repo = %repo))]
    pub async fn pull_requests(&self, org: &Login, repo: &RepoName) -> Vec<ActivityEvent> {
        self.paginator
            .collect::<PullRequestsData>(
                "pull requests",
                queries::PULL_REQUESTS,
                self.repo_vars(org, repo),
            )
            .await
    }
}
