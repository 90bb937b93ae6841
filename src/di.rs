//! Dependency injection infrastructure.
//!
//! Dependencies are resolved at compile time through the `FromRef` trait and
//! the derives from `di-macros`:
//!
//! - `#[derive(Context)]` on the root exposes each of its fields
//! - `#[derive(FromContext)]` on repositories and services resolves each
//!   field from the root
//!
//! # Example
//!
//! ```ignore
//! use crate::context::Context;
//! use crate::di::FromContext;
//!
//! #[derive(FromContext)]
//! pub struct CustomerRepository<C: GraphClient = Neo4jClient> {
//!     graph: Arc<Graph<C>>,
//! }
//!
//! let repo = CustomerRepository::from_ref(&ctx);
//! ```

/// Trait for extracting a value from a reference to another type.
///
/// Types that implement `FromRef<T>` can be extracted from `&T`.
pub trait FromRef<T> {
    fn from_ref(input: &T) -> Self;
}

/// Any Clone type can be extracted from itself.
impl<T: Clone> FromRef<T> for T {
    fn from_ref(input: &T) -> Self {
        input.clone()
    }
}

pub use di_macros::{Context, FromContext};
