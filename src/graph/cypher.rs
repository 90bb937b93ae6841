//! Lexical helpers for Cypher text supplied by tool callers.
//!
//! # Example
//!
//! ```
//! use mcp_neo4j_cypher::graph::{is_write_query, quote_label};
//!
//! assert!(is_write_query("MATCH (n) SET n.seen = true"));
//! assert!(!is_write_query("MATCH (n:customer) RETURN n.created_on"));
//! assert_eq!(quote_label("customer_request").unwrap(), "`customer_request`");
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::AppError;

/// Clauses that modify the graph.
static WRITE_CLAUSE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(MERGE|CREATE|SET|DELETE|REMOVE|ADD)\b")
        .expect("valid write clause regex")
});

/// Returns true if the query contains a graph-modifying keyword.
///
/// Matching is case-insensitive on whole words only, so identifiers such as
/// `created_on` or `onset` do not count. The check is lexical: a keyword
/// inside a string literal also classifies the query as a write.
pub fn is_write_query(query: &str) -> bool {
    WRITE_CLAUSE.is_match(query)
}

/// Renders a caller-supplied label as an escaped Cypher identifier.
///
/// Labels are interpolated into query text (Cypher has no label
/// parameters), so they are always backtick-quoted with embedded backticks
/// doubled.
pub fn quote_label(label: &str) -> Result<String, AppError> {
    let label = label.trim();
    if label.is_empty() {
        return Err(AppError::InvalidLabel(label.to_string()));
    }
    let label = label.strip_prefix('`').and_then(|l| l.strip_suffix('`')).unwrap_or(label);
    if label.is_empty() || label.contains('\0') {
        return Err(AppError::InvalidLabel(label.to_string()));
    }
    Ok(format!("`{}`", label.replace('`', "``")))
}
