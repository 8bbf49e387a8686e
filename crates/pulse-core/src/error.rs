//! Error types for the audit.
//!
//! Failures inside the collection engine are never fatal to a run: the
//! transport turns them into [`Error::Exhausted`] once its attempt budget is
//! spent, and callers skip the affected unit of work.

use std::fmt;
use thiserror::Error;

/// The unified error type for pulse operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (connection, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Protocol errors (non-success status, malformed GraphQL envelope).
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Input validation errors (login, URL, timestamp format).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),

    /// The retry budget ran out; `last` is the failure seen on the final attempt.
    #[error("gave up after {attempts} attempts: {last}")]
    Exhausted { attempts: u32, last: Box<Error> },
}

impl Error {
    /// Returns true if this error is a transport-level failure.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_))
    }
}

/// Transport-level errors.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out: {message}")]
    Timeout { message: String },

    /// Generic HTTP error (body read, redirect loop, request build).
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// A non-success response from the GraphQL endpoint.
#[derive(Debug, Clone)]
pub struct ProtocolError {
    /// HTTP status code.
    pub status: u16,
    /// Messages from the GraphQL `errors` array, if any.
    pub messages: Vec<String>,
    /// Leading part of the response body when no structured error was found.
    pub body: Option<String>,
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if !self.messages.is_empty() {
            write!(f, ": {}", self.messages.join("; "))?;
        } else if let Some(ref body) = self.body {
            write!(f, " - {}", body)?;
        }
        Ok(())
    }
}

impl std::error::Error for ProtocolError {}

impl ProtocolError {
    /// Create a new protocol error.
    pub fn new(status: u16, messages: Vec<String>, body: Option<String>) -> Self {
        Self {
            status,
            messages,
            body,
        }
    }

    /// A 200 response whose envelope had no `data` member.
    pub fn missing_data(messages: Vec<String>) -> Self {
        Self::new(200, messages, Some("response carried no data".to_string()))
    }

    /// Check if the status is GitHub's secondary rate limit (403).
    ///
    /// A 429 is not included: it is retried by the HTTP layer before a
    /// reply ever reaches the caller.
    pub fn is_rate_limited(&self) -> bool {
        self.status == 403
    }
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid user or organization login.
    #[error("invalid login '{value}': {reason}")]
    Login { value: String, reason: String },

    /// Invalid repository name.
    #[error("invalid repository name '{value}': {reason}")]
    RepoName { value: String, reason: String },

    /// Invalid GraphQL endpoint URL.
    #[error("invalid GraphQL URL '{value}': {reason}")]
    GraphqlUrl { value: String, reason: String },

    /// Timestamp that is not RFC 3339 with an explicit zone.
    #[error("invalid timestamp '{value}': {reason}")]
    Timestamp { value: String, reason: String },

    /// Empty bearer credential.
    #[error("credential must not be empty")]
    EmptyToken,
}
