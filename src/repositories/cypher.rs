//! Repository for caller-supplied Cypher statements.

use std::sync::Arc;

use crate::context::Context;
use crate::di::FromContext;
use crate::error::AppError;
use crate::graph::backends::neo4j::Neo4jClient;
use crate::graph::{Graph, GraphClient, Params, Row};
use crate::models::WriteSummary;

/// Runs arbitrary Cypher in read-only or committed transactions.
#[derive(FromContext)]
pub struct CypherRepository<C: GraphClient = Neo4jClient> {
    graph: Arc<Graph<C>>,
}

impl<C: GraphClient> CypherRepository<C> {
    pub fn new(graph: Arc<Graph<C>>) -> Self {
        Self { graph }
    }

    /// Run a query whose effects are always rolled back.
    pub async fn read(&self, query: &str, params: Params) -> Result<Vec<Row>, AppError> {
        let rows = self.graph.read(query, params).await?;
        tracing::debug!(rows = rows.len(), "Read query returned rows");
        Ok(rows)
    }

    /// Run a query and commit its effects.
    pub async fn write(&self, query: &str, params: Params) -> Result<WriteSummary, AppError> {
        let summary = WriteSummary::from(self.graph.write(query, params).await?);
        tracing::debug!(rows = summary.rows_returned, "Write query committed");
        Ok(summary)
    }
}
