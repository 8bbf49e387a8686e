//! HTTP exchange with the GraphQL endpoint.
//!
//! This module provides the single-request boundary and the adapter-level
//! status retry layer that wraps it.

mod client;
mod status_retry;

pub use client::{Exchange, GraphqlRequest, HttpReply, ReqwestExchange};
pub use status_retry::StatusRetry;
