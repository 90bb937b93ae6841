//! Customer lookup tools.

use rmcp::{
    handler::server::wrapper::Parameters,
    model::CallToolResult,
    schemars::{self, JsonSchema},
    tool, tool_router, ErrorData as McpError,
};
use serde::Deserialize;

use crate::mcp::protocol::{error_text, respond, OutputFormat};
use crate::mcp::server::McpServer;
use crate::services::CypherService;

/// Parameters for find_customer_by_name.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct FindCustomerParams {
    /// The customer name to search for (case insensitive).
    pub name: String,
    /// Output format: "json" (default) or "toon".
    #[serde(default)]
    pub format: Option<OutputFormat>,
}

/// Parameters for get_customer_requests.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct CustomerRequestsParams {
    /// The customer ID to get requests for.
    pub customer_id: String,
    /// Output format: "json" (default) or "toon".
    #[serde(default)]
    pub format: Option<OutputFormat>,
}

#[tool_router(router = customer_tools, vis = "pub(crate)")]
impl McpServer {
    #[tool(
        description = "Find customers by name using case-insensitive search. Returns a list of customer objects that contain the search term in their name. Limited to 5 customer results."
    )]
    pub async fn find_customer_by_name(
        &self,
        Parameters(params): Parameters<FindCustomerParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!(name = %params.name, "Running find_customer_by_name tool");

        let outcome = self
            .resolve::<CypherService>()
            .find_customers(&params.name)
            .await;

        respond(outcome, params.format, |e| {
            tracing::info!(error = %e, "Database error executing customer search query");
            error_text(e)
        })
    }

    #[tool(
        description = "Find customer requests for a specific customer. Returns a list of customer_request objects ordered by created_date DESC."
    )]
    pub async fn get_customer_requests(
        &self,
        Parameters(params): Parameters<CustomerRequestsParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!(customer_id = %params.customer_id, "Running get_customer_requests tool");

        let outcome = self
            .resolve::<CypherService>()
            .customer_requests(&params.customer_id)
            .await;

        respond(outcome, params.format, |e| {
            tracing::info!(error = %e, "Database error executing customer requests query");
            error_text(e)
        })
    }
}
