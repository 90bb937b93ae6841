//! MCP tool implementations organized by domain.

pub mod customer;
pub mod cypher;
pub mod schema;
