//! Cursor-driven pagination over a [`Transport`].

use std::fmt;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use pulse_core::{Continuation, Page, Transport};

/// A typed view of one page's `data` payload.
///
/// Each feed declares the shape it expects and how to turn it into a
/// [`Page`]. Returning [`MissingPath`] means the resource the query was
/// rooted at does not exist or is not visible to the token.
pub trait FeedResponse: DeserializeOwned {
    type Item;

    fn into_page(self) -> Result<Page<Self::Item>, MissingPath>;
}

/// The expected data path was absent from an otherwise valid response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingPath {
    /// What was missing, e.g. "repository".
    pub what: &'static str,
}

impl MissingPath {
    pub fn new(what: &'static str) -> Self {
        Self { what }
    }
}

impl fmt::Display for MissingPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} not found or inaccessible", self.what)
    }
}

impl std::error::Error for MissingPath {}

/// Drives a transport through a cursor-paginated feed.
///
/// Collection never fails: a transport error or an absent data path ends the
/// feed early and whatever was gathered so far is returned. Termination
/// follows the server's `hasNextPage` flag; there is no client-side page cap.
#[derive(Clone, Copy)]
pub struct Paginator<'a> {
    transport: &'a dyn Transport,
    page_delay: Duration,
}

impl fmt::Debug for Paginator<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Paginator")
            .field("page_delay", &self.page_delay)
            .finish_non_exhaustive()
    }
}

impl<'a> Paginator<'a> {
    pub fn new(transport: &'a dyn Transport, page_delay: Duration) -> Self {
        Self {
            transport,
            page_delay,
        }
    }

    pub fn page_delay(&self) -> Duration {
        self.page_delay
    }

    /// Collect every item of a feed.
    ///
    /// `variables` are sent with each request; the `cursor` entry is
    /// overwritten per page (null for the first). `feed` only labels log
    /// output.
    pub async fn collect<F: FeedResponse>(
        &self,
        feed: &str,
        query: &str,
        mut variables: Map<String, Value>,
    ) -> Vec<F::Item> {
        let mut items = Vec::new();
        variables.insert("cursor".to_string(), Value::Null);
        let mut pages = 0usize;

        loop {
            let vars = Value::Object(variables.clone());
            let data = match self.transport.execute(query, &vars).await {
                Ok(data) => data,
                Err(err) => {
                    warn!(feed, pages, error = %err, "failed to fetch page, keeping partial results");
                    break;
                }
            };

            if data.is_null() {
                warn!(feed, pages, "response carried no data");
                break;
            }

            let response: F = match serde_json::from_value(data) {
                Ok(response) => response,
                Err(err) => {
                    warn!(feed, pages, error = %err, "unexpected response shape");
                    break;
                }
            };

            let page = match response.into_page() {
                Ok(page) => page,
                Err(missing) => {
                    warn!(feed, pages, "{missing}");
                    break;
                }
            };

            pages += 1;
            let next = match page.continuation() {
                Continuation::Done => None,
                Continuation::After(cursor) => Some(cursor.clone()),
                Continuation::MissingCursor => {
                    warn!(feed, pages, "server reported more pages without a cursor");
                    None
                }
            };
            items.extend(page.items);

            let Some(cursor) = next else {
                break;
            };
            debug!(feed, pages, collected = items.len(), "fetching next page");
            variables.insert("cursor".to_string(), Value::String(cursor.as_str().to_string()));
            tokio::time::sleep(self.page_delay).await;
        }

        debug!(feed, pages, collected = items.len(), "feed complete");
        items
    }
}
