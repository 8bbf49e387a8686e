//! In-memory test doubles for the exchange and transport seams.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::Value;

use pulse_core::error::{ProtocolError, TransportError};
use pulse_core::{Result, Transport};

use crate::http::{Exchange, GraphqlRequest, HttpReply};

type Reply = std::result::Result<HttpReply, TransportError>;
type Outcome = std::result::Result<Value, ProtocolError>;

/// An [`Exchange`] that plays back a fixed script of replies.
///
/// The last scripted reply repeats once the script runs out.
#[derive(Debug)]
pub struct ScriptedExchange {
    script: Mutex<VecDeque<Reply>>,
    last: Mutex<Option<Reply>>,
    calls: AtomicUsize,
}

impl ScriptedExchange {
    pub fn new(script: impl IntoIterator<Item = Reply>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            last: Mutex::new(None),
            calls: AtomicUsize::new(0),
        }
    }

    /// Answer every request with `reply`.
    pub fn repeating(reply: Reply) -> Self {
        Self::new([reply])
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Exchange for ScriptedExchange {
    async fn post(&self, _request: &GraphqlRequest<'_>) -> Reply {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self.script.lock().unwrap().pop_front();
        let mut last = self.last.lock().unwrap();
        if let Some(reply) = next {
            *last = Some(reply);
        }
        last.clone().expect("scripted exchange has no replies")
    }
}

/// A [`Transport`] that answers by matching query text.
///
/// Each route pairs a query fragment with a queue of `data` payloads. The
/// first route whose fragment occurs in the query answers; its final payload
/// repeats. Queries that match no route fail with a protocol error.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    routes: Mutex<Vec<(String, VecDeque<Outcome>)>>,
    calls: Mutex<Vec<(String, Value)>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful `data` payload for queries containing `fragment`.
    pub fn on(self, fragment: &str, data: Value) -> Self {
        self.push(fragment, Ok(data))
    }

    /// Queue a failure for queries containing `fragment`.
    pub fn fail(self, fragment: &str, status: u16) -> Self {
        self.push(fragment, Err(ProtocolError::new(status, vec![], None)))
    }

    fn push(self, fragment: &str, outcome: Outcome) -> Self {
        {
            let mut routes = self.routes.lock().unwrap();
            match routes.iter_mut().find(|(f, _)| f == fragment) {
                Some((_, queue)) => queue.push_back(outcome),
                None => routes.push((fragment.to_string(), VecDeque::from([outcome]))),
            }
        }
        self
    }

    /// Variables of every call whose query contained `fragment`, in order.
    pub fn calls_matching(&self, fragment: &str) -> Vec<Value> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(query, _)| query.contains(fragment))
            .map(|(_, vars)| vars.clone())
            .collect()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn execute(&self, query: &str, variables: &Value) -> Result<Value> {
        self.calls
            .lock()
            .unwrap()
            .push((query.to_string(), variables.clone()));

        let mut routes = self.routes.lock().unwrap();
        let Some((_, queue)) = routes.iter_mut().find(|(f, _)| query.contains(f.as_str())) else {
            return Err(ProtocolError::new(404, vec!["unscripted query".to_string()], None).into());
        };
        let outcome = if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        };
        outcome
            .expect("routes are never empty")
            .map_err(Into::into)
    }
}
