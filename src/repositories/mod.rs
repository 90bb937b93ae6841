//! Data access layer for graph operations.
//!
//! Repositories wrap the Cypher they run and are resolved from the
//! [`Context`](crate::context::Context) via `#[derive(FromContext)]`.

mod customer;
mod cypher;
mod schema;

pub use customer::{CustomerRepository, CUSTOMER_SEARCH_LIMIT};
pub use cypher::CypherRepository;
pub use schema::{count_query, SchemaRepository, LABELS_QUERY, SCHEMA_QUERY};
