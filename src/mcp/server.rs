//! MCP server implementation for mcp-neo4j-cypher.

use std::sync::Arc;

use rmcp::{
    handler::server::{router::tool::ToolRouter, ServerHandler},
    model::{Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool_handler,
};

use crate::config::ToolsConfig;
use crate::context::Context;
use crate::di::FromRef;

/// MCP server exposing Cypher query tools over a Neo4j database.
///
/// This server provides AI assistants with tools to:
/// - Run read-only Cypher queries
/// - Discover labels, node counts and relationships
/// - Look up customers and their requests
/// - Optionally write to the graph and inspect the APOC schema
#[derive(Clone)]
pub struct McpServer {
    pub(crate) ctx: Arc<Context>,
    tool_router: ToolRouter<McpServer>,
}

impl McpServer {
    /// Create a new server with the given context.
    pub fn new(ctx: Context) -> Self {
        tracing::info!("Creating MCP server");

        let tool_router = Self::tool_router(&ctx.config.tools);
        Self {
            ctx: Arc::new(ctx),
            tool_router,
        }
    }

    /// Build the combined tool router, including the optional tools enabled in config.
    fn tool_router(tools: &ToolsConfig) -> ToolRouter<Self> {
        let mut router = Self::read_tools() + Self::schema_tools() + Self::customer_tools();

        if tools.enable_schema {
            router = router + Self::apoc_schema_tools();
        }
        if tools.enable_write {
            tracing::warn!("Write tool enabled: write_neo4j_cypher commits to the database");
            router = router + Self::write_tools();
        }
        router
    }

    /// Resolve a dependency from the context.
    pub fn resolve<T: FromRef<Context>>(&self) -> T {
        T::from_ref(&self.ctx)
    }

    /// Names of the registered tools, sorted.
    pub fn tool_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .tool_router
            .list_all()
            .into_iter()
            .map(|tool| tool.name.to_string())
            .collect();
        names.sort();
        names
    }
}

/// Server over a Neo4j address nothing listens on.
///
/// The driver connects lazily, so tools run until they reach the database.
#[cfg(test)]
pub(crate) async fn offline_server(tools: ToolsConfig) -> McpServer {
    use crate::config::{Config, Neo4jConfig};
    use crate::graph::backends::neo4j::Neo4jClient;

    let config = Config {
        neo4j: Neo4jConfig {
            uri: "bolt://127.0.0.1:1".to_string(),
            max_connections: 1,
            ..Default::default()
        },
        tools,
        ..Default::default()
    };
    let client = Neo4jClient::connect(&config.neo4j).await.unwrap();
    McpServer::new(Context::new(client, config))
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                r#"mcp-neo4j-cypher - Cypher tools for a Neo4j graph database

## Discovery

- **get_graph_labels** - All node labels (case-sensitive, required for other tools)
- **get_count_nodes_by_label** - Number of nodes with a label
- **get_relationships_between_nodes** - Relationship types between two labels, by direction
- **get_neo4j_schema** - Labels, attributes and relationships (when enabled, requires APOC)

## Queries

- **read_neo4j_cypher** - Run a read-only Cypher query with optional parameters
- **write_neo4j_cypher** - Run a write Cypher query (when enabled)

## Customers

- **find_customer_by_name** - Case-insensitive name search, up to 5 customers
- **get_customer_requests** - Requests for a customer id, newest first

Read tools accept `format: "toon"` for a more compact output.
"#
                .to_string(),
            ),
        }
    }
}
