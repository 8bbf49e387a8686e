//! GraphQL HTTP client implementation.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument, trace};

use pulse_core::error::TransportError;
use pulse_core::{GraphqlUrl, Result, Token};

/// Request body for the GraphQL endpoint.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct GraphqlRequest<'a> {
    pub query: &'a str,
    pub variables: &'a Value,
}

/// Raw HTTP response: status plus body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Sends one GraphQL POST and returns whatever the server answered.
///
/// Implementations do not interpret the status code; an `Err` means no HTTP
/// response was received at all.
#[async_trait]
pub trait Exchange: Send + Sync {
    async fn post(&self, request: &GraphqlRequest<'_>) -> std::result::Result<HttpReply, TransportError>;
}

/// Map a reqwest failure onto the transport error taxonomy.
pub(crate) fn classify_reqwest_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout {
            message: err.to_string(),
        }
    } else if err.is_connect() {
        TransportError::Connection {
            message: err.to_string(),
        }
    } else {
        TransportError::Http {
            message: err.to_string(),
        }
    }
}

/// HTTP exchange backed by a pooled reqwest client.
///
/// One instance is built per run and reused for every request, so
/// connections are kept alive across pages and feeds.
#[derive(Debug, Clone)]
pub struct ReqwestExchange {
    client: reqwest::Client,
    endpoint: GraphqlUrl,
    token: Token,
}

impl ReqwestExchange {
    /// Create a new exchange for the given endpoint.
    ///
    /// `timeout` bounds each individual request, including reading the body.
    pub fn new(endpoint: GraphqlUrl, token: Token, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("pulse/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(classify_reqwest_error)?;

        Ok(Self {
            client,
            endpoint,
            token,
        })
    }

    /// Returns the endpoint this exchange posts to.
    pub fn endpoint(&self) -> &GraphqlUrl {
        &self.endpoint
    }
}

#[async_trait]
impl Exchange for ReqwestExchange {
    #[instrument(skip(self, request), fields(endpoint = %self.endpoint))]
    async fn post(&self, request: &GraphqlRequest<'_>) -> std::result::Result<HttpReply, TransportError> {
        debug!("GraphQL request");
        trace!(variables = %request.variables, "request variables");

        let response = self
            .client
            .post(self.endpoint.as_url().clone())
            .bearer_auth(self.token.as_str())
            .json(request)
            .send()
            .await
            .map_err(classify_reqwest_error)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(classify_reqwest_error)?;
        trace!(status, bytes = body.len(), "GraphQL response");

        Ok(HttpReply { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exchange_creation() {
        let endpoint = GraphqlUrl::github();
        let exchange = ReqwestExchange::new(
            endpoint.clone(),
            Token::new("ghp_test").unwrap(),
            Duration::from_secs(30),
        )
        .unwrap();
        assert_eq!(exchange.endpoint(), &endpoint);
    }

    #[test]
    fn request_serializes_query_and_variables() {
        let variables = serde_json::json!({"org": "acme", "cursor": null});
        let request = GraphqlRequest {
            query: "query { viewer { login } }",
            variables: &variables,
        };
        let body = serde_json::to_value(request).unwrap();
        assert_eq!(body["query"], "query { viewer { login } }");
        assert_eq!(body["variables"]["org"], "acme");
        assert!(body["variables"]["cursor"].is_null());
    }

    #[test]
    fn exchange_debug_hides_token() {
        let exchange = ReqwestExchange::new(
            GraphqlUrl::github(),
            Token::new("ghp_secret_value").unwrap(),
            Duration::from_secs(5),
        )
        .unwrap();
        assert!(!format!("{:?}", exchange).contains("ghp_secret_value"));
    }
}
