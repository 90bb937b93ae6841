//! Neo4j backend implementation over the Bolt protocol.
//!
//! # Example
//!
//! ```ignore
//! use mcp_neo4j_cypher::config::Neo4jConfig;
//! use mcp_neo4j_cypher::graph::backends::neo4j::Neo4jClient;
//! use mcp_neo4j_cypher::graph::{Graph, QueryExt};
//!
//! let client = Neo4jClient::connect(&Neo4jConfig::default()).await?;
//! let graph = Graph::new(client);
//!
//! let rows = graph.query("MATCH (n:Person) RETURN n.name AS name")
//!     .fetch_all()
//!     .await?;
//! ```

use async_trait::async_trait;
use neo4rs::{query, BoltType, ConfigBuilder, Txn};
use serde_json::{Map, Value as JsonValue};
use tokio::sync::Mutex;

use crate::config::Neo4jConfig;
use crate::error::AppError;
use crate::graph::row::{Params, Row, RowStream};
use crate::graph::traits::{CypherExecutor, GraphClient, Transaction};

/// Neo4j graph client.
///
/// Wraps the driver's connection pool; cheap to clone.
#[derive(Clone)]
pub struct Neo4jClient {
    graph: neo4rs::Graph,
}

impl Neo4jClient {
    /// Connects to Neo4j with the given settings.
    ///
    /// The driver connects lazily per pooled connection, so an unreachable
    /// server surfaces on the first query rather than here.
    pub async fn connect(config: &Neo4jConfig) -> Result<Self, AppError> {
        let driver_config = ConfigBuilder::default()
            .uri(config.uri.as_str())
            .user(config.username.as_str())
            .password(config.password.as_str())
            .db(config.database.as_str())
            .max_connections(config.max_connections)
            .build()?;

        let graph = neo4rs::Graph::connect(driver_config).await?;

        Ok(Self { graph })
    }
}

#[async_trait]
impl CypherExecutor for Neo4jClient {
    async fn execute_cypher(
        &self,
        cypher: &str,
        params: Params,
    ) -> Result<RowStream<'_>, AppError> {
        use async_stream::try_stream;

        let cypher = cypher.to_string();
        let mut stream = self
            .graph
            .execute(build_query(&cypher, params)?)
            .await
            .map_err(|e| query_error(e, &cypher))?;

        Ok(Box::pin(try_stream! {
            while let Some(row) = stream.next().await.map_err(|e| query_error(e, &cypher))? {
                yield convert_row(&row, &cypher)?;
            }
        }))
    }
}

#[async_trait]
impl GraphClient for Neo4jClient {
    type Tx<'a> = Neo4jTransaction;

    async fn begin(&self) -> Result<Self::Tx<'_>, AppError> {
        let txn = self.graph.start_txn().await?;
        Ok(Neo4jTransaction {
            txn: Mutex::new(txn),
        })
    }
}

/// Explicit Neo4j transaction.
///
/// The driver needs exclusive access to the transaction while pulling
/// records, so statements are serialized through an async mutex and their
/// rows are buffered before being handed out.
pub struct Neo4jTransaction {
    txn: Mutex<Txn>,
}

#[async_trait]
impl CypherExecutor for Neo4jTransaction {
    async fn execute_cypher(
        &self,
        cypher: &str,
        params: Params,
    ) -> Result<RowStream<'_>, AppError> {
        let mut guard = self.txn.lock().await;
        let txn = &mut *guard;

        let mut stream = txn
            .execute(build_query(cypher, params)?)
            .await
            .map_err(|e| query_error(e, cypher))?;

        let mut rows = Vec::new();
        while let Some(row) = stream
            .next(txn.handle())
            .await
            .map_err(|e| query_error(e, cypher))?
        {
            rows.push(convert_row(&row, cypher));
        }

        Ok(Box::pin(futures::stream::iter(rows)))
    }
}

#[async_trait]
impl Transaction for Neo4jTransaction {
    async fn commit(self) -> Result<(), AppError> {
        self.txn.into_inner().commit().await?;
        Ok(())
    }

    async fn rollback(self) -> Result<(), AppError> {
        self.txn.into_inner().rollback().await?;
        Ok(())
    }
}

/// Builds a driver query with every JSON parameter converted to Bolt.
fn build_query(cypher: &str, params: Params) -> Result<neo4rs::Query, AppError> {
    params
        .into_iter()
        .try_fold(query(cypher), |q, (name, value)| {
            Ok(q.param(&name, param_to_bolt(&name, value)?))
        })
}

/// Converts a JSON parameter with the driver's JSON support.
///
/// Values Bolt cannot represent exactly, such as integers beyond `i64`,
/// are rejected instead of being coerced.
fn param_to_bolt(name: &str, value: JsonValue) -> Result<BoltType, AppError> {
    BoltType::try_from(value).map_err(|e| {
        AppError::Validation(format!(
            "parameter ${} cannot be sent to Neo4j: {}",
            name, e
        ))
    })
}

/// Converts a driver row into a JSON record.
///
/// Nodes and relationships come out as their property maps.
fn convert_row(row: &neo4rs::Row, cypher: &str) -> Result<Row, AppError> {
    row.to::<Map<String, JsonValue>>()
        .map(Row::new)
        .map_err(|e| AppError::Query {
            message: format!("Failed to decode record: {}", e),
            query: cypher.to_string(),
        })
}

fn query_error(err: neo4rs::Error, cypher: &str) -> AppError {
    AppError::Query {
        message: err.to_string(),
        query: cypher.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params;
    use serde_json::json;

    #[test]
    fn test_json_scalars_to_bolt() {
        assert!(matches!(param_to_bolt("v", JsonValue::Null), Ok(BoltType::Null(_))));
        assert!(matches!(param_to_bolt("v", json!(true)), Ok(BoltType::Boolean(_))));
        assert!(matches!(param_to_bolt("v", json!(42)), Ok(BoltType::Integer(_))));
        assert!(matches!(param_to_bolt("v", json!(-7)), Ok(BoltType::Integer(_))));
        assert!(matches!(param_to_bolt("v", json!(2.5)), Ok(BoltType::Float(_))));
        assert!(matches!(param_to_bolt("v", json!("Alice")), Ok(BoltType::String(_))));
    }

    #[test]
    fn test_nested_collections_to_bolt() {
        let value = param_to_bolt("v", json!({"names": ["Alice", "Bob"], "age": 30})).unwrap();
        assert!(matches!(value, BoltType::Map(_)));

        let value = param_to_bolt("v", json!([1, "two", null])).unwrap();
        assert!(matches!(value, BoltType::List(_)));
    }

    #[test]
    fn test_integer_beyond_i64_is_rejected() {
        for too_large in [json!(u64::MAX), json!(i64::MAX as u64 + 2)] {
            match param_to_bolt("customer_id", too_large) {
                Err(AppError::Validation(message)) => {
                    assert!(message.starts_with("parameter $customer_id"))
                }
                other => panic!("expected validation error, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_build_query_rejects_out_of_range_parameter() {
        assert!(build_query("RETURN $id", params!(id = 1, name = "Acme")).is_ok());

        let result = build_query("RETURN $id", params!(id = u64::MAX));
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
