//! CLI module for mcp-neo4j-cypher.
//!
//! Subcommands:
//! - `check`: Verify configuration and database connectivity
//! - `mcp`: Run the MCP server (stdio transport)
//! - `serve`: Run the MCP server (HTTP transport)

mod check;
mod mcp;
mod serve;

use clap::{Parser, Subcommand};

/// mcp-neo4j-cypher - Cypher tools for Neo4j over MCP
#[derive(Parser)]
#[command(name = "mcp-neo4j-cypher")]
#[command(about = "MCP server exposing Cypher query tools over a Neo4j graph database")]
#[command(version)]
pub struct App {
    /// Run in verbose mode
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Load the configuration and confirm Neo4j answers queries
    Check,

    /// Run the MCP server (stdio transport for local use)
    Mcp,

    /// Run the MCP server (HTTP transport for remote access)
    Serve {
        /// Host address to bind to (overrides server.host)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides server.port)
        #[arg(long)]
        port: Option<u16>,

        /// Start serving without waiting for Neo4j
        #[arg(long)]
        skip_healthcheck: bool,
    },
}

impl App {
    /// Run the CLI application.
    pub async fn run(self) -> color_eyre::Result<()> {
        match self.command {
            Command::Check => self.run_check().await,
            Command::Mcp => self.run_mcp().await,
            Command::Serve {
                ref host,
                port,
                skip_healthcheck,
            } => self.run_serve(host.as_deref(), port, skip_healthcheck).await,
        }
    }
}
