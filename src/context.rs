//! Application context providing dependency injection root.

use std::sync::Arc;

use crate::config::Config;
use crate::di::Context as ContextDerive;
use crate::error::AppError;
use crate::graph::backends::neo4j::Neo4jClient;
use crate::graph::Graph;

/// Shared graph handle used by repositories.
pub type AppGraph = Arc<Graph<Neo4jClient>>;

/// Root application context for dependency injection.
///
/// `#[derive(Context)]` makes each field extractable via `FromRef<Context>`,
/// so repositories and services deriving `FromContext` are resolved at
/// compile time.
#[derive(ContextDerive, Clone)]
pub struct Context {
    /// Neo4j graph database connection pool.
    pub graph: AppGraph,
    /// Application configuration.
    pub config: Arc<Config>,
}

impl Context {
    /// Creates a new context with the given dependencies.
    pub fn new(client: Neo4jClient, config: Config) -> Self {
        Self {
            graph: Arc::new(Graph::new(client)),
            config: Arc::new(config),
        }
    }

    /// Connects to Neo4j using the configured credentials and builds the context.
    pub async fn connect(config: Config) -> Result<Self, AppError> {
        tracing::info!(
            uri = %config.neo4j.uri,
            database = %config.neo4j.database,
            "Connecting to Neo4j"
        );
        let client = Neo4jClient::connect(&config.neo4j).await?;
        Ok(Self::new(client, config))
    }
}
