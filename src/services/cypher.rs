//! Business rules around the Cypher tools.

use serde_json::Value as JsonValue;

use crate::context::Context;
use crate::di::FromContext;
use crate::error::AppError;
use crate::graph::backends::neo4j::Neo4jClient;
use crate::graph::{is_write_query, GraphClient, Params, Row};
use crate::models::{RelationshipSummary, WriteSummary};
use crate::repositories::{CustomerRepository, CypherRepository, SchemaRepository};

/// Enforces read/write guards and shapes results for the MCP tools.
#[derive(FromContext)]
pub struct CypherService<C: GraphClient = Neo4jClient> {
    cypher: CypherRepository<C>,
    schema: SchemaRepository<C>,
    customers: CustomerRepository<C>,
}

impl<C: GraphClient> CypherService<C> {
    pub fn new(
        cypher: CypherRepository<C>,
        schema: SchemaRepository<C>,
        customers: CustomerRepository<C>,
    ) -> Self {
        Self {
            cypher,
            schema,
            customers,
        }
    }

    /// Run a read-only query. Queries containing write clauses are rejected.
    pub async fn read(&self, query: &str, params: Params) -> Result<Vec<Row>, AppError> {
        if is_write_query(query) {
            return Err(AppError::WriteQueryNotAllowed);
        }
        self.cypher.read(query, params).await
    }

    /// Run a write query. Queries without write clauses are rejected.
    pub async fn write(&self, query: &str, params: Params) -> Result<WriteSummary, AppError> {
        if !is_write_query(query) {
            return Err(AppError::ReadQueryNotAllowed);
        }
        self.cypher.write(query, params).await
    }

    pub async fn schema(&self) -> Result<Vec<Row>, AppError> {
        self.schema.schema().await
    }

    pub async fn labels(&self) -> Result<Vec<Row>, AppError> {
        self.schema.labels().await
    }

    pub async fn count_nodes(&self, label: &str) -> Result<Vec<Row>, AppError> {
        self.schema.count_nodes(label).await
    }

    /// Directional relationship listing between two labels.
    ///
    /// Returned as a single-row result, the same shape as a read query.
    pub async fn relationships(
        &self,
        node1: &str,
        node2: &str,
    ) -> Result<Vec<RelationshipSummary>, AppError> {
        let types = self.schema.relationship_types(node1, node2).await?;
        let summary = RelationshipSummary::format(node1, node2, &types);
        tracing::debug!(
            entries = summary.relationship_types.len(),
            "Directional relationship query returned entries"
        );
        Ok(vec![summary])
    }

    /// Case-insensitive customer search. A blank name matches nothing.
    pub async fn find_customers(&self, name: &str) -> Result<Vec<JsonValue>, AppError> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(Vec::new());
        }
        let customers = self.customers.find_by_name(name).await?;
        tracing::debug!(count = customers.len(), "Customer search returned customers");
        Ok(customers)
    }

    /// Requests for a customer, newest first. A blank id matches nothing.
    pub async fn customer_requests(&self, customer_id: &str) -> Result<Vec<JsonValue>, AppError> {
        let customer_id = customer_id.trim();
        if customer_id.is_empty() {
            return Ok(Vec::new());
        }
        let requests = self.customers.requests(customer_id).await?;
        tracing::debug!(count = requests.len(), "Customer requests query returned requests");
        Ok(requests)
    }
}
