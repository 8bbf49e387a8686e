//! Transport trait.

use async_trait::async_trait;
use serde_json::Value;

use crate::Result;

/// Executes one logical GraphQL request.
///
/// Implementations own retry, backoff, and rate-limit handling. A returned
/// error means the attempt budget is spent; callers skip the affected unit of
/// work instead of aborting the run.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Run `query` with `variables` and return the response's `data` payload.
    async fn execute(&self, query: &str, variables: &Value) -> Result<Value>;
}
