//! Schema repository for labels, counts, and relationship discovery.

use std::sync::Arc;

use crate::context::Context;
use crate::di::FromContext;
use crate::error::AppError;
use crate::graph::backends::neo4j::Neo4jClient;
use crate::graph::{quote_label, Graph, GraphClient, Params, Row};
use crate::models::RelationshipTypes;

/// Node labels, their attributes and outgoing relationships (requires APOC).
pub const SCHEMA_QUERY: &str = "
call apoc.meta.data() yield label, property, type, other, unique, index, elementType
where elementType = 'node' and not label starts with '_'
with label,
    collect(case when type <> 'RELATIONSHIP' then [property, type + case when unique then \" unique\" else \"\" end + case when index then \" indexed\" else \"\" end] end) as attributes,
    collect(case when type = 'RELATIONSHIP' then [property, head(other)] end) as relationships
RETURN label, apoc.map.fromPairs(attributes) as attributes, apoc.map.fromPairs(relationships) as relationships
";

/// All labels joined into one comma-separated string (requires APOC).
pub const LABELS_QUERY: &str = "
CALL db.labels() YIELD label
RETURN apoc.text.join(collect(label), ',')
";

/// Repository for schema introspection queries.
#[derive(FromContext)]
pub struct SchemaRepository<C: GraphClient = Neo4jClient> {
    graph: Arc<Graph<C>>,
}

impl<C: GraphClient> SchemaRepository<C> {
    pub fn new(graph: Arc<Graph<C>>) -> Self {
        Self { graph }
    }

    /// Per-label attribute and relationship summary.
    pub async fn schema(&self) -> Result<Vec<Row>, AppError> {
        self.graph.read(SCHEMA_QUERY, Params::new()).await
    }

    /// All labels in the graph.
    pub async fn labels(&self) -> Result<Vec<Row>, AppError> {
        self.graph.read(LABELS_QUERY, Params::new()).await
    }

    /// Count of nodes carrying `label`, returned in the `count(n)` column.
    pub async fn count_nodes(&self, label: &str) -> Result<Vec<Row>, AppError> {
        self.graph.read(&count_query(label)?, Params::new()).await
    }

    /// Distinct relationship types between two labels, by direction.
    pub async fn relationship_types(
        &self,
        node1: &str,
        node2: &str,
    ) -> Result<RelationshipTypes, AppError> {
        let (label1, label2) = (quote_label(node1)?, quote_label(node2)?);

        let forward = format!(
            "MATCH (n1:{})-[r]->(n2:{}) RETURN collect(DISTINCT type(r)) AS relationship_types",
            label1, label2
        );
        let backward = format!(
            "MATCH (n2:{})-[r]->(n1:{}) RETURN collect(DISTINCT type(r)) AS relationship_types",
            label2, label1
        );
        let any_direction = format!(
            "MATCH (n1:{})-[r]-(n2:{}) RETURN collect(DISTINCT type(r)) AS relationship_types",
            label1, label2
        );

        Ok(RelationshipTypes {
            forward: self.collect_types(&forward).await?,
            backward: self.collect_types(&backward).await?,
            any_direction: self.collect_types(&any_direction).await?,
        })
    }

    /// Reads the `relationship_types` list of the first row; no rows means no types.
    async fn collect_types(&self, query: &str) -> Result<Vec<String>, AppError> {
        let rows = self.graph.read(query, Params::new()).await?;
        match rows.first() {
            Some(row) => Ok(row.get_opt("relationship_types")?.unwrap_or_default()),
            None => Ok(Vec::new()),
        }
    }
}

/// Builds the node count query for a caller-supplied label.
pub fn count_query(label: &str) -> Result<String, AppError> {
    Ok(format!("MATCH (n:{}) RETURN count(n)", quote_label(label)?))
}
