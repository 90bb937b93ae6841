//! Check command handler.

use color_eyre::Result;

use crate::config::Config;
use crate::context::Context;
use crate::health::wait_until_ready;

use super::App;

impl App {
    /// Load the configuration and run the health check against Neo4j.
    pub async fn run_check(&self) -> Result<()> {
        let config = Config::load()?;
        tracing::info!(
            uri = %config.neo4j.uri,
            database = %config.neo4j.database,
            "Configuration loaded"
        );

        let policy = config.healthcheck.clone();
        let ctx = Context::connect(config).await?;
        wait_until_ready(ctx.graph.as_ref(), &policy).await?;

        tracing::info!("Neo4j is reachable, ready to serve");
        Ok(())
    }
}
