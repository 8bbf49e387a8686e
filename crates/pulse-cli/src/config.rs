//! Run configuration read from the environment.

use std::time::Duration;

use anyhow::{Context, Result, bail};

use pulse_core::{GraphqlUrl, Login, Token};
use pulse_graphql::AuditOptions;

/// Everything a run needs besides command-line flags.
#[derive(Debug, Clone)]
pub struct Config {
    pub token: Token,
    pub organizations: Vec<Login>,
    pub threshold_days: u32,
    pub endpoint: GraphqlUrl,
    pub page_delay: Duration,
    pub request_timeout: Duration,
}

impl Config {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to its
    /// value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let token = lookup("GITHUB_TOKEN").context("GITHUB_TOKEN is not set")?;
        let token = Token::new(token).context("GITHUB_TOKEN is empty")?;

        let organizations = lookup("ORG_NAMES")
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(|name| {
                Login::new(name)
                    .with_context(|| format!("Invalid organization in ORG_NAMES: '{name}'"))
            })
            .collect::<Result<Vec<_>>>()?;
        if organizations.is_empty() {
            bail!("ORG_NAMES must name at least one organization");
        }

        let threshold_days = number(&lookup, "DAYS_INACTIVE_THRESHOLD", 60)?;

        let endpoint = match lookup("GITHUB_GRAPHQL_URL") {
            Some(url) => GraphqlUrl::new(url.trim()).context("Invalid GITHUB_GRAPHQL_URL")?,
            None => GraphqlUrl::github(),
        };

        let page_delay = Duration::from_secs(number(&lookup, "PULSE_PAGE_DELAY_SECS", 3)?);
        let request_timeout =
            Duration::from_secs(number(&lookup, "PULSE_REQUEST_TIMEOUT_SECS", 30)?);

        Ok(Self {
            token,
            organizations,
            threshold_days,
            endpoint,
            page_delay,
            request_timeout,
        })
    }

    /// Collection options for this run.
    pub fn audit_options(&self) -> AuditOptions {
        AuditOptions::default().with_page_delay(self.page_delay)
    }
}

fn number<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(value) if !value.trim().is_empty() => value
            .trim()
            .parse()
            .with_context(|| format!("{key} must be a non-negative integer, got '{value}'")),
        _ => Ok(default),
    }
}
