//! Model Context Protocol (MCP) server exposing Cypher tools over Neo4j.
//!
//! ## Architecture
//!
//! The server uses compile-time dependency injection via the `Context` struct.
//! Services are resolved at tool execution time using `FromRef`.
//!
//! ## Modules
//!
//! - `server`: MCP server implementation with tool router
//! - `protocol`: response formatting and error splitting
//! - `tools`: Tool implementations organized by domain

pub mod protocol;
pub(crate) mod server;
mod tools;

pub use server::McpServer;
