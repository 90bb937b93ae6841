//! Customer lookups over the `customer` / `customer_request` graph.

use std::sync::Arc;

use serde_json::Value as JsonValue;

use crate::context::Context;
use crate::di::FromContext;
use crate::error::AppError;
use crate::graph::backends::neo4j::Neo4jClient;
use crate::graph::{Graph, GraphClient, Row};
use crate::params;

/// Maximum number of customers returned by a name search.
pub const CUSTOMER_SEARCH_LIMIT: i64 = 5;

const FIND_BY_NAME_QUERY: &str = "
MATCH (c:customer)
WHERE toLower(c.name) CONTAINS toLower($name)
RETURN c
ORDER BY c.name
LIMIT $limit
";

const REQUESTS_QUERY: &str = "
MATCH (c:customer)-[:CUSTOMER]-(cr:customer_request)
WHERE c.id = $customer_id
RETURN cr
ORDER BY cr.created_on DESC
";

/// Repository for customer and customer request queries.
#[derive(FromContext)]
pub struct CustomerRepository<C: GraphClient = Neo4jClient> {
    graph: Arc<Graph<C>>,
}

impl<C: GraphClient> CustomerRepository<C> {
    pub fn new(graph: Arc<Graph<C>>) -> Self {
        Self { graph }
    }

    /// Customers whose name contains `name`, case-insensitively, ordered by name.
    pub async fn find_by_name(&self, name: &str) -> Result<Vec<JsonValue>, AppError> {
        let rows = self
            .graph
            .read(
                FIND_BY_NAME_QUERY,
                params!(name = name, limit = CUSTOMER_SEARCH_LIMIT),
            )
            .await?;

        Ok(unwrap_column(rows, "c"))
    }

    /// Requests linked to the customer with `customer_id`, newest first.
    pub async fn requests(&self, customer_id: &str) -> Result<Vec<JsonValue>, AppError> {
        let rows = self
            .graph
            .read(REQUESTS_QUERY, params!(customer_id = customer_id))
            .await?;

        Ok(unwrap_column(rows, "cr"))
    }
}

/// Takes `column` out of every row, skipping rows without it.
fn unwrap_column(rows: Vec<Row>, column: &str) -> Vec<JsonValue> {
    rows.into_iter()
        .filter_map(|mut row| row.take(column))
        .collect()
}
