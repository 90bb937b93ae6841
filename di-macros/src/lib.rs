//! Compile-time dependency injection derives for mcp-neo4j-cypher.
//!
//! - `#[derive(Context)]` makes each field of the DI root extractable
//! - `#[derive(FromContext)]` assembles a repository or service from the root
//!
//! Generated code references `crate::FromRef`, so the consuming crate must
//! expose the trait at its root.

use proc_macro::TokenStream;

mod context;
mod from_context;

/// Generates `FromRef<Root>` for the type of every named field of `Root`.
///
/// All fields must implement `Clone`.
///
/// # Example
///
/// ```ignore
/// #[derive(Context, Clone)]
/// pub struct Context {
///     pub graph: AppGraph,
///     pub config: Arc<Config>,
/// }
///
/// // impl FromRef<Context> for AppGraph { ... }
/// // impl FromRef<Context> for Arc<Config> { ... }
/// ```
#[proc_macro_derive(Context)]
pub fn derive_context(input: TokenStream) -> TokenStream {
    context::derive_context_impl(input)
}

/// Generates `FromRef<Context>` resolving every field from the context.
///
/// Type parameters with a default are instantiated with it, so a
/// repository generic over its graph client is resolved for the production
/// client while tests build it directly with a mock.
///
/// # Example
///
/// ```ignore
/// #[derive(FromContext)]
/// pub struct SchemaRepository<C: GraphClient = Neo4jClient> {
///     graph: Arc<Graph<C>>,
/// }
///
/// // impl FromRef<Context> for SchemaRepository<Neo4jClient> { ... }
/// ```
///
/// The context type defaults to `Context` and can be overridden with
/// `#[from_context(Context = "path::To::Root")]`.
#[proc_macro_derive(FromContext, attributes(from_context))]
pub fn derive_from_context(input: TokenStream) -> TokenStream {
    from_context::derive_from_context_impl(input)
}
