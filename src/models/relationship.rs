//! Relationship summaries between two node labels.

use serde::{Deserialize, Serialize};

/// Relationship types observed between two labels, split by direction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipTypes {
    /// Types of `(node1)-[r]->(node2)`.
    pub forward: Vec<String>,
    /// Types of `(node2)-[r]->(node1)`.
    pub backward: Vec<String>,
    /// Types of `(node1)-[r]-(node2)`, ignoring direction.
    pub any_direction: Vec<String>,
}

/// Formatted relationship listing returned to MCP clients.
///
/// Serializes as `{"relationship_types": [...]}`; tools wrap it in a
/// single-element array to match the shape of a read query result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipSummary {
    pub relationship_types: Vec<String>,
}

impl RelationshipSummary {
    /// Formats directed and undirected relationship types between `node1` and `node2`.
    ///
    /// Produces `node1->node2:TYPE` for each forward type, then
    /// `node2->node1:TYPE` for each backward type, then exactly one
    /// `node1-node2:` entry listing (comma-joined) the types seen without a
    /// direction that appear in neither directed list.
    pub fn format(node1: &str, node2: &str, types: &RelationshipTypes) -> Self {
        let is_directed = |t: &String| types.forward.contains(t) || types.backward.contains(t);

        let undirected: Vec<&str> = types
            .any_direction
            .iter()
            .filter(|t| !is_directed(t))
            .map(String::as_str)
            .collect();

        let relationship_types = types
            .forward
            .iter()
            .map(|t| format!("{}->{}:{}", node1, node2, t))
            .chain(
                types
                    .backward
                    .iter()
                    .map(|t| format!("{}->{}:{}", node2, node1, t)),
            )
            .chain(std::iter::once(format!(
                "{}-{}:{}",
                node1,
                node2,
                undirected.join(",")
            )))
            .collect();

        Self { relationship_types }
    }
}
