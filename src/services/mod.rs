//! Business logic services for the Cypher tools.

mod cypher;

pub use cypher::CypherService;
