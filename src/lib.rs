//! mcp-neo4j-cypher - MCP server exposing Cypher tools over Neo4j
//!
//! Read queries run in rolled-back transactions, writes are opt-in, and
//! schema discovery and customer lookups are exposed as dedicated tools.

pub mod cli;
pub mod config;
pub mod context;
pub mod di;
pub mod error;
pub mod graph;
pub mod health;
pub mod mcp;
pub mod models;
pub mod repositories;
pub mod services;

pub use di::FromRef;
