//! Organization members feed.

use serde::Deserialize;
use tracing::{info, instrument};

use pulse_core::{Login, Page, Roster};

use super::{Connection, Feeds, queries};
use crate::paginate::{FeedResponse, MissingPath};

#[derive(Debug, Deserialize)]
struct MembersData {
    organization: Option<Organization>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Organization {
    members_with_role: Connection<Member>,
}

#[derive(Debug, Deserialize)]
struct Member {
    login: String,
}

impl FeedResponse for MembersData {
    type Item = Login;

    fn into_page(self) -> Result<Page<Login>, MissingPath> {
        let org = self.organization.ok_or(MissingPath::new("organization"))?;
        Ok(org
            .members_with_role
            .into_page(|member| Login::new(member.login).ok()))
    }
}

impl Feeds<'_> {
    /// Every member of `org`, deduplicated and sorted.
    #[instrument(skip(self), fields(org = %org))]
    pub async fn members(&self, org: &Login) -> Roster {
        let roster: Roster = self
            .paginator
            .collect::<MembersData>("members", queries::MEMBERS, self.org_vars(org))
            .await
            .into_iter()
            .collect();
        info!(members = roster.len(), "collected members");
        roster
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;

    use super::*;
    use crate::paginate::Paginator;
    use crate::testing::ScriptedTransport;

    fn page(logins: &[&str], cursor: Option<&str>) -> serde_json::Value {
        json!({"organization": {"membersWithRole": {
            "pageInfo": {"hasNextPage": cursor.is_some(), "endCursor": cursor},
            "nodes": logins.iter().map(|l| json!({"login": l})).collect::<Vec<_>>(),
        }}})
    }

    #[tokio::test]
    async fn members_are_deduplicated_across_pages() {
        let transport = ScriptedTransport::new()
            .on("membersWithRole", page(&["carol", "alice"], Some("c1")))
            .on("membersWithRole", page(&["bob", "alice"], None));
        let feeds = Feeds::new(Paginator::new(&transport, Duration::ZERO), 100, "main");

        let roster = feeds.members(&Login::new("acme").unwrap()).await;

        let logins: Vec<&str> = roster.iter().map(Login::as_str).collect();
        assert_eq!(logins, ["alice", "bob", "carol"]);

        let calls = transport.calls_matching("membersWithRole");
        assert_eq!(calls[0]["org"], "acme");
        assert_eq!(calls[0]["first"], 100);
    }

    #[tokio::test]
    async fn unknown_organization_yields_empty_roster() {
        let transport = ScriptedTransport::new().on("membersWithRole", json!({"organization": null}));
        let feeds = Feeds::new(Paginator::new(&transport, Duration::ZERO), 100, "main");

        assert!(feeds.members(&Login::new("ghost").unwrap()).await.is_empty());
    }
}
