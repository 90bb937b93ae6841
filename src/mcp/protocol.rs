//! MCP protocol response helpers.

use rmcp::model::{CallToolResult, Content, ErrorData};
use rmcp::schemars::{self, JsonSchema};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::graph::Params;

/// Output format for tool responses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// JSON text (default).
    #[default]
    Json,
    /// TOON (Token-Oriented Object Notation) - 40-60% fewer tokens.
    Toon,
}

/// Tool response that renders the inner value as a single text content.
///
/// # Example
///
/// ```ignore
/// Response::json(rows).into()                          // JSON text
/// Response(rows, Some(OutputFormat::Toon)).into()      // TOON text
/// ```
pub struct Response<T>(pub T, pub Option<OutputFormat>);

impl<T> Response<T> {
    /// Create a response with default (JSON) format.
    pub fn json(data: T) -> Self {
        Response(data, None)
    }
}

impl<T: Serialize> Response<T> {
    /// Renders the payload in the requested format.
    pub fn render(&self) -> Result<String, AppError> {
        match self.1.unwrap_or_default() {
            OutputFormat::Json => Ok(serde_json::to_string(&self.0)?),
            OutputFormat::Toon => serde_toon::to_string(&self.0)
                .map_err(|e| AppError::Internal(format!("TOON serialization error: {}", e))),
        }
    }
}

impl<T: Serialize> From<Response<T>> for Result<CallToolResult, ErrorData> {
    fn from(response: Response<T>) -> Self {
        let text = response.render()?;
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}

/// Tool-level failure: the error text is returned as the tool's regular output.
pub fn failure(text: impl Into<String>) -> CallToolResult {
    CallToolResult::success(vec![Content::text(text.into())])
}

/// Text of the first content item of a tool result.
#[cfg(test)]
pub(crate) fn text_of(result: &CallToolResult) -> String {
    match &result.content[0].raw {
        rmcp::model::RawContent::Text(text) => text.text.clone(),
        other => panic!("expected text content, got {:?}", other),
    }
}

/// Text reported for a database failure, with an APOC hint when a procedure is missing.
pub fn error_text(err: &AppError) -> String {
    let mut text = format!("Error: {}", err);
    if text.contains("ProcedureNotFound") {
        text.push_str("\nHint: install and enable the APOC plugin on the Neo4j server.");
    }
    text
}

/// Text reported for a failed caller-supplied query, echoing the query and its parameters.
pub fn query_error_text(err: &AppError, query: &str, params: &Params) -> String {
    let params = serde_json::to_string(params).unwrap_or_else(|_| format!("{:?}", params));
    format!("{}\n{}\n{}", error_text(err), query, params)
}

/// Splits an outcome into protocol errors and tool-level failures.
///
/// Caller errors (guard violations, invalid labels) become `INVALID_PARAMS`
/// protocol errors; any other error is returned as plain tool output whose
/// text is produced by `describe`.
pub fn respond<T: Serialize>(
    outcome: Result<T, AppError>,
    format: Option<OutputFormat>,
    describe: impl FnOnce(&AppError) -> String,
) -> Result<CallToolResult, ErrorData> {
    match outcome {
        Ok(data) => Response(data, format).into(),
        Err(e) if e.is_caller_error() => Err(e.into()),
        Err(e) => Ok(failure(describe(&e))),
    }
}
