//! Retry policies for the two retry layers.
//!
//! [`AdapterRetry`] configures the HTTP-adapter layer ([`crate::StatusRetry`]),
//! which only retries a fixed set of overload/upstream status codes.
//! [`RetryPolicy`] drives the call-site layer in [`crate::GraphqlTransport`]:
//! it decides, for each failed attempt, whether to cool down, back off, or
//! give up. Both are plain values, so the timing rules can be tested without
//! a network or a real clock.

use std::time::Duration;

use backon::ExponentialBuilder;

/// Status codes retried by the adapter layer by default.
pub const RETRYABLE_STATUSES: [u16; 5] = [429, 500, 502, 503, 504];

/// Configuration for the adapter-level status retry.
#[derive(Debug, Clone, PartialEq)]
pub struct AdapterRetry {
    /// Status codes that trigger a retry.
    pub statuses: Vec<u16>,
    /// Retries after the first attempt.
    pub max_retries: usize,
    /// Delay before the first retry.
    pub min_delay: Duration,
    /// Upper bound for any single delay.
    pub max_delay: Duration,
    /// Growth factor between consecutive delays.
    pub factor: f32,
}

impl Default for AdapterRetry {
    /// Five retries on 429/500/502/503/504, waiting 2, 4, 8, 16, then 32 seconds.
    fn default() -> Self {
        Self {
            statuses: RETRYABLE_STATUSES.to_vec(),
            max_retries: 5,
            min_delay: Duration::from_secs(2),
            max_delay: Duration::from_secs(32),
            factor: 2.0,
        }
    }
}

impl AdapterRetry {
    /// Set the delay before the first retry.
    #[must_use]
    pub fn with_min_delay(mut self, delay: Duration) -> Self {
        self.min_delay = delay;
        if self.max_delay < delay {
            self.max_delay = delay;
        }
        self
    }

    /// Set the number of retries.
    #[must_use]
    pub fn with_max_retries(mut self, retries: usize) -> Self {
        self.max_retries = retries;
        self
    }

    pub fn is_retryable(&self, status: u16) -> bool {
        self.statuses.contains(&status)
    }

    /// Build the exponential backoff strategy. No jitter: the schedule is
    /// deterministic.
    #[must_use]
    pub fn backoff(&self) -> ExponentialBuilder {
        ExponentialBuilder::default()
            .with_min_delay(self.min_delay)
            .with_max_delay(self.max_delay)
            .with_factor(self.factor)
            .with_max_times(self.max_retries)
    }
}

/// Classification of a failed call-site attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// HTTP 403, usually a secondary rate limit.
    RateLimited,
    /// Any other non-200 status that survived the adapter layer.
    Status,
    /// A 200 response that was not a usable GraphQL envelope.
    Malformed,
    /// No response: connection failure or timeout.
    Network,
}

/// What the transport should do after a failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Sleep, then repeat the same attempt without spending budget.
    Cooldown(Duration),
    /// Sleep, then make the next attempt.
    Backoff(Duration),
    /// Stop and report the failure.
    GiveUp,
}

/// Call-site retry policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts per logical request, including the first.
    pub max_attempts: u32,
    /// Base for the linear backoff after status and envelope failures:
    /// `status_backoff * (attempt + 1)`.
    pub status_backoff: Duration,
    /// Base for the exponential backoff after network failures:
    /// `network_backoff * 2^attempt`.
    pub network_backoff: Duration,
    /// Fixed wait after a rate-limit signal.
    pub rate_limit_cooldown: Duration,
    /// Cap on cooldowns per request; `None` means unbounded.
    pub max_cooldowns: Option<u32>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            status_backoff: Duration::from_secs(5),
            network_backoff: Duration::from_secs(5),
            rate_limit_cooldown: Duration::from_secs(60),
            max_cooldowns: None,
        }
    }
}

impl RetryPolicy {
    /// A policy with the given attempt budget and default timings.
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_status_backoff(mut self, base: Duration) -> Self {
        self.status_backoff = base;
        self
    }

    #[must_use]
    pub fn with_network_backoff(mut self, base: Duration) -> Self {
        self.network_backoff = base;
        self
    }

    #[must_use]
    pub fn with_rate_limit_cooldown(mut self, wait: Duration) -> Self {
        self.rate_limit_cooldown = wait;
        self
    }

    #[must_use]
    pub fn with_max_cooldowns(mut self, max: u32) -> Self {
        self.max_cooldowns = Some(max);
        self
    }

    /// The attempt budget, never less than one.
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    /// Decide what follows failed attempt number `attempt` (zero-based),
    /// given how many cooldowns this request has already used.
    pub fn decide(&self, kind: FailureKind, attempt: u32, cooldowns: u32) -> Decision {
        if kind == FailureKind::RateLimited && self.max_cooldowns.is_none_or(|max| cooldowns < max) {
            return Decision::Cooldown(self.rate_limit_cooldown);
        }

        if attempt + 1 >= self.attempts() {
            return Decision::GiveUp;
        }

        match kind {
            FailureKind::Network => Decision::Backoff(
                self.network_backoff
                    .saturating_mul(2u32.saturating_pow(attempt)),
            ),
            FailureKind::RateLimited | FailureKind::Status | FailureKind::Malformed => {
                Decision::Backoff(self.status_backoff.saturating_mul(attempt + 1))
            }
        }
    }
}
