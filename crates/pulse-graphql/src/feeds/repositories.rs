//! Organization repositories feed.

use serde::Deserialize;
use tracing::{debug, info, instrument};

use pulse_core::{Login, Page, RepoName};

use super::{Connection, Feeds, queries};
use crate::paginate::{FeedResponse, MissingPath};

#[derive(Debug, Deserialize)]
struct RepositoriesData {
    organization: Option<Organization>,
}

#[derive(Debug, Deserialize)]
struct Organization {
    repositories: Connection<Repository>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Repository {
    name: String,
    #[serde(default)]
    is_fork: bool,
}

impl FeedResponse for RepositoriesData {
    type Item = RepoName;

    fn into_page(self) -> Result<Page<RepoName>, MissingPath> {
        let org = self.organization.ok_or(MissingPath::new("organization"))?;
        Ok(org.repositories.into_page(|repo| {
            if repo.is_fork {
                debug!(repo = %repo.name, "skipping fork");
                return None;
            }
            RepoName::new(repo.name).ok()
        }))
    }
}

impl Feeds<'_> {
    /// Non-fork repositories of `org`, in server order.
    #[instrument(skip(self), fields(org = %org))]
    pub async fn repositories(&self, org: &Login) -> Vec<RepoName> {
        let repos = self
            .paginator
            .collect::<RepositoriesData>("repositories", queries::REPOSITORIES, self.org_vars(org))
            .await;
        info!(repositories = repos.len(), "collected repositories");
        repos
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;

    use super::*;
    use crate::paginate::Paginator;
    use crate::testing::ScriptedTransport;

    #[tokio::test]
    async fn forks_are_excluded_and_order_kept() {
        let transport = ScriptedTransport::new()
            .on(
                "repositories(",
                json!({"organization": {"repositories": {
                    "pageInfo": {"hasNextPage": true, "endCursor": "r1"},
                    "nodes": [
                        {"name": "zeta", "isFork": false},
                        {"name": "forked", "isFork": true},
                    ]
                }}}),
            )
            .on(
                "repositories(",
                json!({"organization": {"repositories": {
                    "pageInfo": {"hasNextPage": false, "endCursor": null},
                    "nodes": [{"name": "alpha", "isFork": false}]
                }}}),
            );
        let feeds = Feeds::new(Paginator::new(&transport, Duration::ZERO), 100, "main");

        let repos = feeds.repositories(&Login::new("acme").unwrap()).await;

        let names: Vec<&str> = repos.iter().map(RepoName::as_str).collect();
        assert_eq!(names, ["zeta", "alpha"]);
    }
}
