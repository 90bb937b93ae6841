//! Tools for running caller-supplied Cypher.
//!
//! Reads are rejected when they contain write clauses and always run in a
//! rolled-back transaction. Writes are only registered when enabled in the
//! `[tools]` config section.

use rmcp::{
    handler::server::wrapper::Parameters,
    model::CallToolResult,
    schemars::{self, JsonSchema},
    tool, tool_router, ErrorData as McpError,
};
use serde::Deserialize;

use crate::graph::Params;
use crate::mcp::protocol::{query_error_text, respond, OutputFormat};
use crate::mcp::server::McpServer;
use crate::services::CypherService;

/// Parameters for read_neo4j_cypher and write_neo4j_cypher.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct CypherParams {
    /// The Cypher query to execute.
    pub query: String,
    /// The parameters to pass to the Cypher query.
    #[serde(default)]
    pub params: Option<Params>,
    /// Output format: "json" (default) or "toon".
    #[serde(default)]
    pub format: Option<OutputFormat>,
}

#[tool_router(router = read_tools, vis = "pub(crate)")]
impl McpServer {
    #[tool(description = "Execute a read Cypher query on the neo4j database.")]
    pub async fn read_neo4j_cypher(
        &self,
        Parameters(params): Parameters<CypherParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!(query = %params.query, "Reading Neo4j Cypher query");

        let service = self.resolve::<CypherService>();
        let query_params = params.params.unwrap_or_default();
        let outcome = service.read(&params.query, query_params.clone()).await;

        if let Ok(rows) = &outcome {
            tracing::debug!(rows = rows.len(), "Read query returned rows");
        }
        respond(outcome, params.format, |e| {
            let text = query_error_text(e, &params.query, &query_params);
            tracing::info!("Database error executing query: {}", text);
            text
        })
    }
}

#[tool_router(router = write_tools, vis = "pub(crate)")]
impl McpServer {
    #[tool(description = "Execute a write Cypher query on the neo4j database.")]
    pub async fn write_neo4j_cypher(
        &self,
        Parameters(params): Parameters<CypherParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!(query = %params.query, "Writing Neo4j Cypher query");

        let service = self.resolve::<CypherService>();
        let query_params = params.params.unwrap_or_default();
        let outcome = service.write(&params.query, query_params.clone()).await;

        respond(outcome, params.format, |e| {
            let text = query_error_text(e, &params.query, &query_params);
            tracing::error!("Database error executing query: {}", text);
            text
        })
    }
}
