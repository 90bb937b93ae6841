//! Macro for building query parameter maps.

/// Builds a [`Params`](crate::graph::Params) map from `name = value` pairs.
///
/// Values are serialized with `serde_json::json!`, so anything that
/// implements `Serialize` works.
///
/// # Usage
///
/// ```ignore
/// use mcp_neo4j_cypher::params;
///
/// let empty = params!();
/// let params = params!(name = "acme", limit = 5);
/// let rows = graph.read("MATCH (c:customer {name: $name}) RETURN c LIMIT $limit", params).await?;
/// ```
#[macro_export]
macro_rules! params {
    () => {
        $crate::graph::Params::new()
    };
    ($($name:ident = $value:expr),+ $(,)?) => {{
        let mut params = $crate::graph::Params::new();
        $(params.insert(stringify!($name).to_string(), ::serde_json::json!($value));)+
        params
    }};
}
