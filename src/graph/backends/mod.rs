//! Backend implementations for different graph databases.
//!
//! Each backend implements the core traits from [`crate::graph::traits`]:
//!
//! - [`CypherExecutor`](crate::graph::CypherExecutor)
//! - [`Transaction`](crate::graph::Transaction)
//! - [`GraphClient`](crate::graph::GraphClient)
//!
//! | Backend | Module |
//! |---------|--------|
//! | Neo4j (Bolt) | [`neo4j`] |

pub mod neo4j;
