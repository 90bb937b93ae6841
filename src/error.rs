//! Application error types with MCP protocol conversion.

use rmcp::model::ErrorCode;
use thiserror::Error;

/// Application-level errors for the Cypher MCP server.
#[derive(Error, Debug)]
pub enum AppError {
    // Neo4j errors
    #[error("Neo4j connection error: {0}")]
    Connection(#[from] neo4rs::Error),

    #[error("Neo4j query error: {message}")]
    Query { message: String, query: String },

    #[error("Neo4j is unreachable after {attempts} attempts: {source}")]
    HealthCheckFailed {
        attempts: u32,
        #[source]
        source: Box<AppError>,
    },

    // Tool guard errors
    #[error("Only MATCH queries are allowed for read-query")]
    WriteQueryNotAllowed,

    #[error("Only write queries are allowed for write-query")]
    ReadQueryNotAllowed,

    #[error("Invalid label: {0:?}")]
    InvalidLabel(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),

    // Config errors
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

impl AppError {
    /// Stable application code used as the message prefix on the wire.
    pub fn app_code(&self) -> &'static str {
        match self {
            AppError::Connection(_) => "CONNECTION_ERROR",
            AppError::Query { .. } => "QUERY_ERROR",
            AppError::HealthCheckFailed { .. } => "HEALTHCHECK_FAILED",
            AppError::WriteQueryNotAllowed => "WRITE_QUERY_NOT_ALLOWED",
            AppError::ReadQueryNotAllowed => "READ_QUERY_NOT_ALLOWED",
            AppError::InvalidLabel(_) => "INVALID_LABEL",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Serialization(_) => "SERIALIZATION_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
            AppError::Config(_) => "CONFIG_ERROR",
        }
    }

    /// Whether the error was caused by the caller's input rather than the database.
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            AppError::WriteQueryNotAllowed
                | AppError::ReadQueryNotAllowed
                | AppError::InvalidLabel(_)
                | AppError::Validation(_)
        )
    }
}

impl From<AppError> for rmcp::model::ErrorData {
    fn from(err: AppError) -> Self {
        let code = if err.is_caller_error() {
            ErrorCode::INVALID_PARAMS
        } else {
            ErrorCode::INTERNAL_ERROR
        };

        rmcp::model::ErrorData::new(code, format!("[{}] {}", err.app_code(), err), None)
    }
}
