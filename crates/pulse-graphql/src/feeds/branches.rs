//! Repository branches feed.

use serde::Deserialize;
use tracing::{debug, instrument, warn};

use pulse_core::{Login, Page, RepoName};

use super::{Connection, Feeds, queries};
use crate::paginate::{FeedResponse, MissingPath};

#[derive(Debug, Deserialize)]
struct BranchesData {
    repository: Option<Repository>,
}

#[derive(Debug, Deserialize)]
struct Repository {
    refs: Option<Connection<Ref>>,
}

#[derive(Debug, Deserialize)]
struct Ref {
    name: String,
}

impl FeedResponse for BranchesData {
    type Item = String;

    fn into_page(self) -> Result<Page<String>, MissingPath> {
        let refs = self
            .repository
            .ok_or(MissingPath::new("repository"))?
            .refs
            .ok_or(MissingPath::new("branch list"))?;
        Ok(refs.into_page(|r| Some(r.name)))
    }
}

impl Feeds<'_> {
    /// Branch names of `repo`.
    ///
    /// A repository that reports no branches (or cannot be read) yields the
    /// configured default branch alone, so commit collection still has
    /// something to try.
    #[instrument(skip(self), fields(org = %org, repo = %repo))]
    pub async fn branches(&self, org: &Login, repo: &RepoName) -> Vec<String> {
        let branches = self
            .paginator
            .collect::<BranchesData>("branches", queries::BRANCHES, self.repo_vars(org, repo))
            .await;
        if branches.is_empty() {
            warn!(fallback = self.default_branch, "no branches found, using fallback");
            return vec![self.default_branch.to_string()];
        }
        debug!(branches = branches.len(), "collected branches");
        branches
    }
}
