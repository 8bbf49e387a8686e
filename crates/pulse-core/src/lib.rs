//! pulse-core - Core types and traits for the organization activity audit.
//!
//! This crate holds everything that does not touch the network: the typed
//! identifiers, the cursor/page model shared by every feed, the activity
//! aggregation model, status classification, and the [`Transport`] and
//! [`ReportSink`] seams the backends and the binary plug into.
//!
//! # Example
//!
//! ```
//! use pulse_core::{ActivityEvent, Category, Login, RepoActivity, Timestamp};
//!
//! let alice = Login::new("alice").unwrap();
//! let mut activity = RepoActivity::default();
//! activity.merge_into(
//!     Category::Commits,
//!     [ActivityEvent::new(alice.clone(), Timestamp::parse("2024-01-01T00:00:00Z").unwrap())],
//! );
//!
//! assert_eq!(activity.get("alice").unwrap().commits.count, 1);
//! ```

pub mod activity;
pub mod error;
pub mod page;
pub mod status;
pub mod token;
pub mod traits;
pub mod types;

pub use activity::{
    ActivityEvent, ActivityRecord, Category, OrgReport, RepoActivity, Roster, UserActivitySummary,
};
pub use error::Error;
pub use page::{Continuation, Page};
pub use status::{Classifier, Status};
pub use token::Token;
pub use traits::{ReportSink, Transport};
pub use types::{Cursor, GraphqlUrl, Login, RepoName, Timestamp, later};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
