//! Activity aggregation model.
//!
//! Feeds produce [`ActivityEvent`]s; [`RepoActivity::merge_into`] folds them
//! into one [`UserActivitySummary`] per login, and an [`OrgReport`] collects
//! the per-repository maps alongside the organization's [`Roster`].

mod aggregate;
mod report;
mod summary;

pub use aggregate::RepoActivity;
pub use report::{OrgReport, Roster};
pub use summary::{ActivityEvent, ActivityRecord, Category, UserActivitySummary};
