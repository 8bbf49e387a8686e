//! Adapter-level retry on overload and upstream status codes.

use async_trait::async_trait;
use backon::Retryable;
use tracing::debug;

use pulse_core::error::TransportError;

use super::client::{Exchange, GraphqlRequest, HttpReply};
use crate::retry::AdapterRetry;

/// Why a single adapter attempt did not produce a final reply.
#[derive(Debug)]
enum AdapterFailure {
    /// The server answered with a status in the retry set.
    Status(HttpReply),
    /// No response was received; left to the call-site layer.
    Transport(TransportError),
}

/// Wraps an [`Exchange`] and retries replies whose status is in the
/// configured set, with exponential backoff.
///
/// When retries run out, the last reply is returned as-is so the call-site
/// layer can classify it. Network failures are passed through untouched.
#[derive(Debug, Clone)]
pub struct StatusRetry<E> {
    inner: E,
    config: AdapterRetry,
}

impl<E: Exchange> StatusRetry<E> {
    pub fn new(inner: E, config: AdapterRetry) -> Self {
        Self { inner, config }
    }

    pub fn inner(&self) -> &E {
        &self.inner
    }
}

#[async_trait]
impl<E: Exchange> Exchange for StatusRetry<E> {
    async fn post(&self, request: &GraphqlRequest<'_>) -> Result<HttpReply, TransportError> {
        let attempt = || async {
            let reply = match self.inner.post(request).await {
                Ok(reply) => reply,
                Err(err) => return Err(AdapterFailure::Transport(err)),
            };
            if self.config.is_retryable(reply.status) {
                Err(AdapterFailure::Status(reply))
            } else {
                Ok(reply)
            }
        };

        let outcome = attempt
            .retry(self.config.backoff())
            .notify(|failure: &AdapterFailure, dur| {
                if let AdapterFailure::Status(reply) = failure {
                    debug!(status = reply.status, ?dur, "retryable status, backing off");
                }
            })
            .when(|failure: &AdapterFailure| matches!(failure, AdapterFailure::Status(_)))
            .await;

        match outcome {
            Ok(reply) | Err(AdapterFailure::Status(reply)) => Ok(reply),
            Err(AdapterFailure::Transport(err)) => Err(err),
        }
    }
}
