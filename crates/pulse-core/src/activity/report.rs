//! Organization roster and report.

use std::collections::BTreeSet;

use crate::types::{Login, RepoName};

use super::RepoActivity;

/// The members of an organization at query time.
///
/// Iteration is in lexicographic login order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster(BTreeSet<Login>);

impl Roster {
    pub fn iter(&self) -> impl Iterator<Item = &Login> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Login> for Roster {
    fn from_iter<I: IntoIterator<Item = Login>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Activity for every audited repository of one organization.
///
/// Repositories keep the order in which they were collected. The roster and
/// the activity maps are independent: a member may have no activity, and a
/// contributor may not be a current member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrgReport {
    organization: Login,
    roster: Roster,
    repositories: Vec<(RepoName, RepoActivity)>,
}

impl OrgReport {
    pub fn new(organization: Login, roster: Roster) -> Self {
        Self {
            organization,
            roster,
            repositories: Vec::new(),
        }
    }

    pub fn organization(&self) -> &Login {
        &self.organization
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Add a repository's activity. A repeated name replaces the earlier entry.
    pub fn insert_repository(&mut self, name: RepoName, activity: RepoActivity) {
        match self.repositories.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = activity,
            None => self.repositories.push((name, activity)),
        }
    }

    /// Activity for one repository.
    pub fn repository(&self, name: &str) -> Option<&RepoActivity> {
        self.repositories
            .iter()
            .find(|(n, _)| n.as_str() == name)
            .map(|(_, activity)| activity)
    }

    /// Iterate repositories in collection order.
    pub fn repositories(&self) -> impl Iterator<Item = (&RepoName, &RepoActivity)> {
        self.repositories.iter().map(|(n, a)| (n, a))
    }

    pub fn repository_count(&self) -> usize {
        self.repositories.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::{ActivityEvent, Category};
    use crate::types::Timestamp;

    fn login(s: &str) -> Login {
        Login::new(s).unwrap()
    }

    #[test]
    fn roster_deduplicates_and_sorts() {
        let roster: Roster = ["carol", "alice", "bob", "alice"].into_iter().map(login).collect();
        let names: Vec<_> = roster.iter().map(Login::as_str).collect();
        assert_eq!(names, ["alice", "bob", "carol"]);
    }

    #[test]
    fn repositories_are_isolated() {
        let mut report = OrgReport::new(login("acme"), Roster::default());

        let mut api = RepoActivity::new();
        api.merge_into(
            Category::Commits,
            [ActivityEvent::new(
                login("alice"),
                Timestamp::parse("2024-01-01T00:00:00Z").unwrap(),
            )],
        );
        report.insert_repository(RepoName::new("api").unwrap(), api);
        report.insert_repository(RepoName::new("docs").unwrap(), RepoActivity::new());

        assert_eq!(report.repository("api").unwrap().get("alice").unwrap().commits.count, 1);
        assert!(report.repository("docs").unwrap().get("alice").is_none());

        let order: Vec<_> = report.repositories().map(|(n, _)| n.as_str()).collect();
        assert_eq!(order, ["api", "docs"]);
    }

    #[test]
    fn reinserting_replaces_in_place() {
        let mut report = OrgReport::new(login("acme"), Roster::default());
        report.insert_repository(RepoName::new("a").unwrap(), RepoActivity::new());
        report.insert_repository(RepoName::new("b").unwrap(), RepoActivity::new());
        report.insert_repository(RepoName::new("a").unwrap(), RepoActivity::new());
        assert_eq!(report.repository_count(), 2);
    }
}
