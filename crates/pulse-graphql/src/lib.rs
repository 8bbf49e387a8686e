//! pulse-graphql - GraphQL-backed collection engine.
//!
//! The layers, leaves first:
//!
//! - [`ReqwestExchange`] sends one POST to the endpoint with the bearer token.
//! - [`StatusRetry`] retries overload/upstream status codes with exponential
//!   backoff (the adapter layer).
//! - [`GraphqlTransport`] adds call-site retries for network failures,
//!   malformed envelopes and rate-limit cooldowns, and implements
//!   [`pulse_core::Transport`].
//! - [`Paginator`] drives a transport through a cursor-paginated feed.
//! - [`Feeds`] specializes the paginator for members, repositories, branches
//!   and timestamped activity.
//! - [`Auditor`] runs the per-organization collection and aggregation.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use pulse_core::{GraphqlUrl, Login, Token};
//! use pulse_graphql::{AuditOptions, Auditor, GraphqlTransport};
//!
//! # async fn example() -> Result<(), pulse_core::Error> {
//! let token = Token::new("ghp_example")?;
//! let transport = GraphqlTransport::connect(GraphqlUrl::github(), token, Duration::from_secs(30))?;
//!
//! let options = AuditOptions::default();
//! let auditor = Auditor::new(&transport, &options);
//! let report = auditor.audit_organization(&Login::new("acme")?).await;
//!
//! for (repo, activity) in report.repositories() {
//!     println!("{repo}: {} contributors", activity.len());
//! }
//! # Ok(())
//! # }
//! ```

mod audit;
mod feeds;
mod http;
mod paginate;
mod retry;
mod transport;

#[cfg(test)]
mod testing;

pub use audit::{AuditOptions, Auditor};
pub use feeds::Feeds;
pub use http::{Exchange, GraphqlRequest, HttpReply, ReqwestExchange, StatusRetry};
pub use paginate::{FeedResponse, MissingPath, Paginator};
pub use retry::{AdapterRetry, Decision, FailureKind, RetryPolicy};
pub use transport::GraphqlTransport;
