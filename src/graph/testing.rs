//! In-memory [`GraphClient`] for unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use crate::error::AppError;
use crate::graph::{CypherExecutor, GraphClient, Params, Row, RowStream, Transaction};

type Canned = Result<Vec<Row>, String>;

/// Answers queries from canned responses keyed by a substring of the Cypher text.
///
/// The first registered pattern contained in the query wins; unmatched
/// queries return no rows. Every executed statement is recorded.
#[derive(Default)]
pub(crate) struct MockClient {
    responses: Vec<(String, Canned)>,
    executed: Mutex<Vec<(String, Params)>>,
    commits: AtomicUsize,
    rollbacks: AtomicUsize,
}

impl MockClient {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(mut self, pattern: &str, rows: Vec<Vec<(&str, JsonValue)>>) -> Self {
        let rows = rows.into_iter().map(|cols| cols.into_iter().collect()).collect();
        self.responses.push((pattern.to_string(), Ok(rows)));
        self
    }

    pub(crate) fn fail(mut self, pattern: &str, message: &str) -> Self {
        self.responses
            .push((pattern.to_string(), Err(message.to_string())));
        self
    }

    pub(crate) fn commits(&self) -> usize {
        self.commits.load(Ordering::SeqCst)
    }

    pub(crate) fn rollbacks(&self) -> usize {
        self.rollbacks.load(Ordering::SeqCst)
    }

    pub(crate) fn executed(&self) -> Vec<(String, Params)> {
        self.executed.lock().unwrap().clone()
    }

    fn answer(&self, cypher: &str, params: Params) -> Result<RowStream<'static>, AppError> {
        self.executed
            .lock()
            .unwrap()
            .push((cypher.to_string(), params));

        let canned = self
            .responses
            .iter()
            .find(|(pattern, _)| cypher.contains(pattern.as_str()))
            .map(|(_, canned)| canned.clone())
            .unwrap_or_else(|| Ok(Vec::new()));

        match canned {
            Ok(rows) => Ok(Box::pin(futures::stream::iter(rows.into_iter().map(Ok)))),
            Err(message) => Err(AppError::Query {
                message,
                query: cypher.to_string(),
            }),
        }
    }
}

#[async_trait]
impl CypherExecutor for MockClient {
    async fn execute_cypher(
        &self,
        cypher: &str,
        params: Params,
    ) -> Result<RowStream<'_>, AppError> {
        self.answer(cypher, params)
    }
}

#[async_trait]
impl GraphClient for MockClient {
    type Tx<'a> = MockTransaction<'a>;

    async fn begin(&self) -> Result<Self::Tx<'_>, AppError> {
        Ok(MockTransaction { client: self })
    }
}

pub(crate) struct MockTransaction<'a> {
    client: &'a MockClient,
}

#[async_trait]
impl CypherExecutor for MockTransaction<'_> {
    async fn execute_cypher(
        &self,
        cypher: &str,
        params: Params,
    ) -> Result<RowStream<'_>, AppError> {
        self.client.answer(cypher, params)
    }
}

#[async_trait]
impl Transaction for MockTransaction<'_> {
    async fn commit(self) -> Result<(), AppError> {
        self.client.commits.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn rollback(self) -> Result<(), AppError> {
        self.client.rollbacks.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
