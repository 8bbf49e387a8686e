//! Core audit types.
//!
//! These types enforce their invariants at construction time, so the feeds
//! and the aggregator never handle an empty login or a zone-less timestamp.

mod cursor;
mod graphql_url;
mod login;
mod repo_name;
mod timestamp;

pub use cursor::Cursor;
pub use graphql_url::GraphqlUrl;
pub use login::Login;
pub use repo_name::RepoName;
pub use timestamp::{Timestamp, later};
