//! Query builder for fluent Cypher query construction.

use futures::TryStreamExt;
use serde::Serialize;

use crate::error::AppError;
use crate::graph::row::{Params, Row, RowStream};
use crate::graph::traits::CypherExecutor;

/// A builder for constructing and executing Cypher queries.
///
/// # Example
///
/// ```ignore
/// let rows = Query::new(&client, "MATCH (c:customer) WHERE c.id = $id RETURN c")
///     .param("id", "cust-123")
///     .fetch_all()
///     .await?;
/// ```
pub struct Query<'a, E: CypherExecutor + ?Sized> {
    executor: &'a E,
    cypher: String,
    params: Params,
}

impl<'a, E: CypherExecutor + ?Sized> Query<'a, E> {
    /// Creates a new query builder.
    pub fn new(executor: &'a E, cypher: &str) -> Self {
        Self {
            executor,
            cypher: cypher.to_string(),
            params: Params::new(),
        }
    }

    /// Adds a parameter to the query, referenced in Cypher as `$name`.
    ///
    /// # Panics
    ///
    /// Panics if the value cannot be serialized to JSON.
    pub fn param<T: Serialize>(mut self, name: &str, value: T) -> Self {
        let json_value = serde_json::to_value(value).expect("failed to serialize parameter value");
        self.params.insert(name.to_string(), json_value);
        self
    }

    /// Adds every entry of a parameter map, replacing existing names.
    pub fn params(mut self, params: Params) -> Self {
        self.params.extend(params);
        self
    }

    /// Executes the query and returns a stream of rows.
    pub async fn execute(self) -> Result<RowStream<'a>, AppError> {
        self.executor
            .execute_cypher(&self.cypher, self.params)
            .await
    }

    /// Executes the query and collects all rows into a vector.
    pub async fn fetch_all(self) -> Result<Vec<Row>, AppError> {
        self.execute().await?.try_collect().await
    }

    /// Executes the query and returns the first row, if any.
    pub async fn fetch_one(self) -> Result<Option<Row>, AppError> {
        use futures::StreamExt;
        let mut stream = self.execute().await?;
        stream.next().await.transpose()
    }

    /// Executes the query without returning results.
    pub async fn run(self) -> Result<(), AppError> {
        self.executor.run_cypher(&self.cypher, self.params).await
    }
}

/// Extension trait providing `executor.query("...")` for every [`CypherExecutor`].
pub trait QueryExt: CypherExecutor {
    fn query(&self, cypher: &str) -> Query<'_, Self>
    where
        Self: Sized,
    {
        Query::new(self, cypher)
    }
}

impl<E: CypherExecutor> QueryExt for E {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct MockExecutor {
        expected_cypher: String,
        expected_params: Params,
    }

    #[async_trait::async_trait]
    impl CypherExecutor for MockExecutor {
        async fn execute_cypher(
            &self,
            cypher: &str,
            params: Params,
        ) -> Result<RowStream<'_>, AppError> {
            assert_eq!(cypher, self.expected_cypher);
            assert_eq!(params, self.expected_params);
            let row: Row = [("count(n)", json!(3))].into_iter().collect();
            Ok(Box::pin(futures::stream::iter(vec![Ok(row)])))
        }
    }

    #[tokio::test]
    async fn test_query_no_params() {
        let executor = MockExecutor {
            expected_cypher: "MATCH (n) RETURN count(n)".to_string(),
            expected_params: Params::new(),
        };

        let rows = executor
            .query("MATCH (n) RETURN count(n)")
            .fetch_all()
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get::<i64>("count(n)").unwrap(), 3);
    }

    #[tokio::test]
    async fn test_query_with_params() {
        let mut expected_params = Params::new();
        expected_params.insert("name".to_string(), json!("acme"));
        expected_params.insert("limit".to_string(), json!(5));

        let executor = MockExecutor {
            expected_cypher: "MATCH (c:customer) WHERE c.name = $name RETURN c LIMIT $limit"
                .to_string(),
            expected_params,
        };

        let row = executor
            .query("MATCH (c:customer) WHERE c.name = $name RETURN c LIMIT $limit")
            .param("name", "acme")
            .param("limit", 5)
            .fetch_one()
            .await
            .unwrap();
        assert!(row.is_some());
    }

    #[tokio::test]
    async fn test_params_merge_replaces_existing() {
        let mut expected_params = Params::new();
        expected_params.insert("id".to_string(), json!("from-map"));
        expected_params.insert("extra".to_string(), json!(true));

        let executor = MockExecutor {
            expected_cypher: "RETURN $id, $extra".to_string(),
            expected_params: expected_params.clone(),
        };

        executor
            .query("RETURN $id, $extra")
            .param("id", "from-builder")
            .params(expected_params)
            .run()
            .await
            .unwrap();
    }
}
