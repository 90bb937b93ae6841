//! Schema discovery tools: labels, node counts, relationships and the APOC schema.

use rmcp::{
    handler::server::wrapper::Parameters,
    model::CallToolResult,
    schemars::{self, JsonSchema},
    tool, tool_router, ErrorData as McpError,
};
use serde::Deserialize;

use crate::graph::Params;
use crate::mcp::protocol::{error_text, query_error_text, respond, OutputFormat};
use crate::mcp::server::McpServer;
use crate::repositories::{count_query, LABELS_QUERY};
use crate::services::CypherService;

/// Parameters for tools that take no input besides the output format.
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct FormatParams {
    /// Output format: "json" (default) or "toon".
    #[serde(default)]
    pub format: Option<OutputFormat>,
}

/// Parameters for get_count_nodes_by_label.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct CountNodesParams {
    /// The label of the node type to count.
    pub label: String,
    /// Output format: "json" (default) or "toon".
    #[serde(default)]
    pub format: Option<OutputFormat>,
}

/// Parameters for get_relationships_between_nodes.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct RelationshipsParams {
    /// The label of the first node type.
    pub node1: String,
    /// The label of the second node type.
    pub node2: String,
    /// Output format: "json" (default) or "toon".
    #[serde(default)]
    pub format: Option<OutputFormat>,
}

#[tool_router(router = schema_tools, vis = "pub(crate)")]
impl McpServer {
    #[tool(
        description = "Fetch and return all labels in the graph. Returned labels are required for future queries, and are case-sensitive."
    )]
    pub async fn get_graph_labels(
        &self,
        Parameters(params): Parameters<FormatParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!("Running get_graph_labels tool");

        let outcome = self.resolve::<CypherService>().labels().await;

        respond(outcome, params.format, |e| {
            let text = query_error_text(e, LABELS_QUERY, &Params::new());
            tracing::info!("Database error executing query: {}", text);
            text
        })
    }

    #[tool(
        description = "Fetch and return the number of nodes in the graph with the given label. Only labels returned by get_graph_labels() are valid."
    )]
    pub async fn get_count_nodes_by_label(
        &self,
        Parameters(params): Parameters<CountNodesParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!(label = %params.label, "Running get_count_nodes_by_label tool");

        let query = count_query(&params.label)?;
        let outcome = self
            .resolve::<CypherService>()
            .count_nodes(&params.label)
            .await;

        respond(outcome, params.format, |e| {
            let text = query_error_text(e, &query, &Params::new());
            tracing::info!("Database error executing query: {}", text);
            text
        })
    }

    #[tool(
        description = "Fetch and return the distinct relationship types between two the given node types. Returns directional relationship information in format: node1->node2:TYPE, node2->node1:TYPE, node1-node2: Only labels returned by get_graph_labels() are valid."
    )]
    pub async fn get_relationships_between_nodes(
        &self,
        Parameters(params): Parameters<RelationshipsParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!(
            node1 = %params.node1,
            node2 = %params.node2,
            "Running get_relationships_between_nodes tool"
        );

        let outcome = self
            .resolve::<CypherService>()
            .relationships(&params.node1, &params.node2)
            .await;

        respond(outcome, params.format, |e| {
            tracing::info!(error = %e, "Database error executing directional relationship query");
            error_text(e)
        })
    }
}

#[tool_router(router = apoc_schema_tools, vis = "pub(crate)")]
impl McpServer {
    #[tool(
        description = "List all node, their attributes and their relationships to other nodes in the neo4j database. If this fails with a message that includes \"Neo.ClientError.Procedure.ProcedureNotFound\" suggest that the user install and enable the APOC plugin."
    )]
    pub async fn get_neo4j_schema(
        &self,
        Parameters(params): Parameters<FormatParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!("Running get_neo4j_schema tool");

        let outcome = self.resolve::<CypherService>().schema().await;

        if let Ok(rows) = &outcome {
            tracing::debug!(rows = rows.len(), "Schema query returned rows");
        }
        respond(outcome, params.format, |e| {
            tracing::error!(error = %e, "Database error retrieving schema");
            error_text(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ToolsConfig;
    use crate::mcp::protocol::text_of;
    use crate::mcp::server::offline_server;
    use rmcp::model::ErrorCode;

    #[tokio::test]
    async fn test_count_rejects_blank_label() {
        let server = offline_server(ToolsConfig::default()).await;

        let err = server
            .get_count_nodes_by_label(Parameters(CountNodesParams {
                label: "  ".to_string(),
                format: None,
            }))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
    }

    #[tokio::test]
    async fn test_count_reports_database_error_with_quoted_query() {
        let server = offline_server(ToolsConfig::default()).await;

        let result = server
            .get_count_nodes_by_label(Parameters(CountNodesParams {
                label: "Person".to_string(),
                format: None,
            }))
            .await
            .unwrap();

        let text = text_of(&result);
        assert!(text.starts_with("Error: "), "{}", text);
        assert!(text.ends_with("\nMATCH (n:`Person`) RETURN count(n)\n{}"), "{}", text);
    }

    #[tokio::test]
    async fn test_labels_reports_database_error_with_query() {
        let server = offline_server(ToolsConfig::default()).await;

        let result = server
            .get_graph_labels(Parameters(FormatParams::default()))
            .await
            .unwrap();

        let text = text_of(&result);
        assert!(text.starts_with("Error: "), "{}", text);
        assert!(text.contains(LABELS_QUERY));
    }

    #[tokio::test]
    async fn test_relationships_reject_blank_label() {
        let server = offline_server(ToolsConfig::default()).await;

        let err = server
            .get_relationships_between_nodes(Parameters(RelationshipsParams {
                node1: "Person".to_string(),
                node2: String::new(),
                format: None,
            }))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
    }

    #[tokio::test]
    async fn test_relationships_report_database_error_without_query() {
        let server = offline_server(ToolsConfig::default()).await;

        let result = server
            .get_relationships_between_nodes(Parameters(RelationshipsParams {
                node1: "Person".to_string(),
                node2: "Company".to_string(),
                format: None,
            }))
            .await
            .unwrap();

        let text = text_of(&result);
        assert!(text.starts_with("Error: "), "{}", text);
        assert!(!text.contains("MATCH"));
    }
}
