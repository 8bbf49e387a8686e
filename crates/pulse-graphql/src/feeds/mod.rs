//! The four feeds: members, repositories, branches, and timestamped activity.
//!
//! Every feed is a [`Paginator`] run with its own query document and
//! response shape; the shapes share [`Connection`] and [`PageInfo`].

mod activity;
mod branches;
mod members;
mod queries;
mod repositories;

use serde::Deserialize;
use serde_json::{Map, Value};

use pulse_core::{Cursor, Login, Page, RepoName};

use crate::paginate::Paginator;

/// Relay-style connection: a page of nodes (or edges) plus page info.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Connection<N> {
    #[serde(default)]
    pub page_info: PageInfo,
    pub nodes: Option<Vec<Option<N>>>,
    pub edges: Option<Vec<Option<Edge<N>>>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Edge<N> {
    pub node: Option<N>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PageInfo {
    #[serde(default)]
    pub has_next_page: bool,
    pub end_cursor: Option<Cursor>,
}

impl<N> Connection<N> {
    /// Flatten nodes and edges into a page, dropping null entries and
    /// anything `keep` rejects.
    pub fn into_page<T>(self, keep: impl FnMut(N) -> Option<T>) -> Page<T> {
        let nodes = self.nodes.into_iter().flatten().flatten();
        let edges = self
            .edges
            .into_iter()
            .flatten()
            .flatten()
            .filter_map(|edge| edge.node);
        Page {
            items: nodes.chain(edges).filter_map(keep).collect(),
            has_next: self.page_info.has_next_page,
            next_cursor: self.page_info.end_cursor,
        }
    }
}

/// Typed entry points for every feed the audit reads.
#[derive(Debug, Clone, Copy)]
pub struct Feeds<'a> {
    paginator: Paginator<'a>,
    page_size: u32,
    default_branch: &'a str,
}

impl<'a> Feeds<'a> {
    /// `default_branch` is substituted when a repository reports no branches.
    pub fn new(paginator: Paginator<'a>, page_size: u32, default_branch: &'a str) -> Self {
        Self {
            paginator,
            page_size,
            default_branch,
        }
    }

    fn org_vars(&self, org: &Login) -> Map<String, Value> {
        let mut vars = Map::new();
        vars.insert("org".to_string(), Value::from(org.as_str()));
        vars.insert("first".to_string(), Value::from(self.page_size));
        vars
    }

    fn repo_vars(&self, org: &Login, repo: &RepoName) -> Map<String, Value> {
        let mut vars = self.org_vars(org);
        vars.insert("repo".to_string(), Value::from(repo.as_str()));
        vars
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Named {
        name: String,
    }

    #[test]
    fn connection_skips_null_nodes() {
        let conn: Connection<Named> = serde_json::from_value(json!({
            "pageInfo": {"hasNextPage": true, "endCursor": "abc"},
            "nodes": [{"name": "a"}, null, {"name": "b"}]
        }))
        .unwrap();

        let page = conn.into_page(|n| Some(n.name));
        assert_eq!(page.items, ["a", "b"]);
        assert!(page.has_next);
        assert_eq!(page.next_cursor, Some(Cursor::new("abc")));
    }

    #[test]
    fn connection_reads_edges() {
        let conn: Connection<Named> = serde_json::from_value(json!({
            "pageInfo": {"hasNextPage": false, "endCursor": null},
            "edges": [{"node": {"name": "x"}}, {"node": null}]
        }))
        .unwrap();

        assert_eq!(conn.into_page(|n| Some(n.name)).items, ["x"]);
    }

    #[test]
    fn missing_page_info_means_last_page() {
        let conn: Connection<Named> = serde_json::from_value(json!({"nodes": null})).unwrap();
        let page = conn.into_page(|n| Some(n.name));
        assert!(page.items.is_empty());
        assert!(!page.has_next);
    }
}
