//! Graph abstraction layer for backend-agnostic database access.
//!
//! # Architecture
//!
//! - [`CypherExecutor`] - Execute Cypher queries
//! - [`Transaction`] - Transaction lifecycle (commit/rollback)
//! - [`GraphClient`] - Connection management and transaction creation
//! - [`Graph`] - Read/write entry points used by repositories
//!
//! # Usage
//!
//! ```ignore
//! use mcp_neo4j_cypher::graph::{Graph, QueryExt};
//! use mcp_neo4j_cypher::params;
//!
//! let graph = Graph::new(client);
//!
//! // Read inside a transaction that is always rolled back
//! let rows = graph.read("MATCH (n:Person) RETURN n.name AS name", params!()).await?;
//!
//! // Write inside a committed transaction
//! graph.write("CREATE (n:Person {name: $name})", params!(name = "Alice")).await?;
//!
//! // Auto-commit query on the underlying client
//! let row = graph.query("RETURN 1 AS one").fetch_one().await?;
//! ```

mod cypher;
mod macros;
mod query;
mod row;
mod traits;

pub mod backends;

pub use cypher::{is_write_query, quote_label};
pub use query::{Query, QueryExt};
pub use row::{Params, Row, RowStream};
pub use traits::{CypherExecutor, GraphClient, Transaction};

use futures::TryStreamExt;

use crate::error::AppError;

/// High-level wrapper providing read/write transactions over any [`GraphClient`].
pub struct Graph<C: GraphClient> {
    client: C,
}

impl<C: GraphClient> Graph<C> {
    /// Creates a new graph wrapper around the given client.
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Returns a reference to the underlying client.
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Creates a query builder for a direct (auto-commit) query.
    pub fn query(&self, cypher: &str) -> Query<'_, C> {
        Query::new(&self.client, cypher)
    }

    /// Runs a query in a transaction that is always rolled back.
    ///
    /// Nothing a read statement does can be persisted, even if the query
    /// slipped past the caller's classification.
    pub async fn read(&self, cypher: &str, params: Params) -> Result<Vec<Row>, AppError> {
        let txn = self.client.begin().await?;
        let result = collect_rows(&txn, cypher, params).await;

        if let Err(e) = txn.rollback().await {
            tracing::warn!(error = %e, "Failed to roll back read transaction");
        }
        result
    }

    /// Runs a query in a transaction that is committed on success.
    pub async fn write(&self, cypher: &str, params: Params) -> Result<Vec<Row>, AppError> {
        let txn = self.client.begin().await?;

        match collect_rows(&txn, cypher, params).await {
            Ok(rows) => {
                txn.commit().await?;
                Ok(rows)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::warn!(error = %rollback_err, "Failed to roll back write transaction");
                }
                Err(e)
            }
        }
    }
}

async fn collect_rows<E: CypherExecutor>(
    executor: &E,
    cypher: &str,
    params: Params,
) -> Result<Vec<Row>, AppError> {
    executor
        .execute_cypher(cypher, params)
        .await?
        .try_collect()
        .await
}

// Forward CypherExecutor to the underlying client for convenience
#[async_trait::async_trait]
impl<C: GraphClient> CypherExecutor for Graph<C> {
    async fn execute_cypher(
        &self,
        cypher: &str,
        params: Params,
    ) -> Result<RowStream<'_>, AppError> {
        self.client.execute_cypher(cypher, params).await
    }
}

#[cfg(test)]
pub(crate) mod testing;
