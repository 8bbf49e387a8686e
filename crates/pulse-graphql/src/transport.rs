//! Call-site retrying GraphQL transport.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use pulse_core::error::ProtocolError;
use pulse_core::{Error, GraphqlUrl, Result, Token, Transport};

use crate::http::{Exchange, GraphqlRequest, HttpReply, ReqwestExchange, StatusRetry};
use crate::retry::{AdapterRetry, Decision, FailureKind, RetryPolicy};

/// Longest body excerpt kept in a protocol error.
const BODY_EXCERPT: usize = 200;

/// A [`Transport`] that retries failed requests according to a
/// [`RetryPolicy`].
///
/// Rate-limit responses (403) trigger a fixed cooldown that does not spend
/// the attempt budget. Other failures back off and retry until the budget is
/// used up, after which [`Error::Exhausted`] is returned.
#[derive(Debug, Clone)]
pub struct GraphqlTransport<E = StatusRetry<ReqwestExchange>> {
    exchange: E,
    policy: RetryPolicy,
}

impl GraphqlTransport {
    /// Connect to `endpoint` with the default adapter and call-site policies.
    pub fn connect(endpoint: GraphqlUrl, token: Token, timeout: Duration) -> Result<Self> {
        Self::connect_with(
            endpoint,
            token,
            timeout,
            AdapterRetry::default(),
            RetryPolicy::default(),
        )
    }

    /// Connect with explicit policies for both retry layers.
    pub fn connect_with(
        endpoint: GraphqlUrl,
        token: Token,
        timeout: Duration,
        adapter: AdapterRetry,
        policy: RetryPolicy,
    ) -> Result<Self> {
        let exchange = ReqwestExchange::new(endpoint, token, timeout)?;
        Ok(Self::new(StatusRetry::new(exchange, adapter), policy))
    }
}

impl<E: Exchange> GraphqlTransport<E> {
    /// Wrap any exchange with a call-site policy.
    pub fn new(exchange: E, policy: RetryPolicy) -> Self {
        Self { exchange, policy }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    pub fn exchange(&self) -> &E {
        &self.exchange
    }
}

#[async_trait]
impl<E: Exchange> Transport for GraphqlTransport<E> {
    #[instrument(skip_all)]
    async fn execute(&self, query: &str, variables: &Value) -> Result<Value> {
        let request = GraphqlRequest { query, variables };
        let attempts = self.policy.attempts();
        let mut attempt = 0u32;
        let mut cooldowns = 0u32;

        loop {
            let (kind, failure): (FailureKind, Error) = match self.exchange.post(&request).await {
                Ok(reply) if reply.is_ok() => match parse_envelope(&reply.body) {
                    Ok(data) => return Ok(data),
                    Err(err) => (FailureKind::Malformed, err.into()),
                },
                Ok(reply) => {
                    let err = protocol_error(&reply);
                    let kind = if err.is_rate_limited() {
                        FailureKind::RateLimited
                    } else {
                        FailureKind::Status
                    };
                    (kind, err.into())
                }
                Err(err) => (FailureKind::Network, err.into()),
            };

            match self.policy.decide(kind, attempt, cooldowns) {
                Decision::Cooldown(wait) => {
                    cooldowns += 1;
                    warn!(
                        wait_secs = wait.as_secs(),
                        error = %failure,
                        "rate limit or permission issue, cooling down"
                    );
                    tokio::time::sleep(wait).await;
                }
                Decision::Backoff(wait) => {
                    attempt += 1;
                    warn!(
                        attempt,
                        max_attempts = attempts,
                        wait_secs = wait.as_secs(),
                        error = %failure,
                        "request failed, retrying"
                    );
                    tokio::time::sleep(wait).await;
                }
                Decision::GiveUp => {
                    warn!(attempts = attempt + 1, error = %failure, "request failed, giving up");
                    return Err(Error::Exhausted {
                        attempts: attempt + 1,
                        last: Box::new(failure),
                    });
                }
            }
        }
    }
}

/// Extract `data` from a GraphQL envelope.
///
/// A null `data` is returned as [`Value::Null`]; the caller treats it as an
/// absent data path. An envelope with no `data` member at all is malformed.
fn parse_envelope(body: &str) -> std::result::Result<Value, ProtocolError> {
    let mut envelope: Value = serde_json::from_str(body)
        .map_err(|e| ProtocolError::new(200, vec![], Some(format!("invalid JSON: {e}"))))?;

    let messages = error_messages(&envelope);
    if !messages.is_empty() {
        warn!(errors = %messages.join("; "), "GraphQL response carried errors");
    }

    match envelope.as_object_mut().and_then(|o| o.remove("data")) {
        Some(data) => {
            debug!(null = data.is_null(), "GraphQL data received");
            Ok(data)
        }
        None => Err(ProtocolError::missing_data(messages)),
    }
}

fn error_messages(envelope: &Value) -> Vec<String> {
    envelope
        .get("errors")
        .and_then(Value::as_array)
        .map(|errors| {
            errors
                .iter()
                .filter_map(|e| e.get("message").and_then(Value::as_str))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn protocol_error(reply: &HttpReply) -> ProtocolError {
    let messages = serde_json::from_str::<Value>(&reply.body)
        .map(|v| error_messages(&v))
        .unwrap_or_default();
    let body = if reply.body.is_empty() {
        None
    } else {
        Some(reply.body.chars().take(BODY_EXCERPT).collect())
    };
    ProtocolError::new(reply.status, messages, body)
}
