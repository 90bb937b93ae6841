//! Domain models for tool results.

mod relationship;
mod write;

pub use relationship::{RelationshipSummary, RelationshipTypes};
pub use write::WriteSummary;
