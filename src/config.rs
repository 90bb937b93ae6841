//! Configuration with layered resolution using figment.
//!
//! Resolution order (highest priority last):
//! 1. User config: `~/.config/mcp-neo4j-cypher/config.toml` (XDG) or platform config dir
//! 2. Project config: `.mcp-neo4j-cypher.toml`
//! 3. Environment variables: `NEO4J_*`, `FASTMCP_*`, `MCP_NEO4J_CYPHER_*`
//!
//! # Example
//!
//! ```toml
//! [neo4j]
//! uri = "bolt://localhost:7687"
//! username = "neo4j"
//! password = "secret"
//! database = "neo4j"
//!
//! [server]
//! host = "0.0.0.0"
//! port = 8000
//! api_key = "change-me"
//!
//! [tools]
//! enable_write = true
//! ```
//!
//! The connection variables used by the Neo4j tooling ecosystem
//! (`NEO4J_URI`, `NEO4J_USERNAME`, `NEO4J_PASSWORD`, `NEO4J_DATABASE`) map
//! onto the `[neo4j]` section, and `FASTMCP_HOST` / `FASTMCP_PORT` onto
//! `[server]`. Anything else can be set with
//! `MCP_NEO4J_CYPHER_<SECTION>__<KEY>`, e.g. `MCP_NEO4J_CYPHER_TOOLS__ENABLE_WRITE=true`.

use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

/// Project-level config file name, resolved against the working directory.
pub const PROJECT_CONFIG_FILE: &str = ".mcp-neo4j-cypher.toml";

/// Boxed wrapper for figment::Error to reduce Result size on the stack.
#[derive(Debug)]
pub struct ConfigError(Box<figment::Error>);

impl Deref for ConfigError {
    type Target = figment::Error;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self(Box::new(err))
    }
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub neo4j: Neo4jConfig,
    pub server: ServerConfig,
    pub healthcheck: HealthCheckConfig,
    pub tools: ToolsConfig,
}

/// Neo4j connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Neo4jConfig {
    /// Bolt URI, e.g. `bolt://localhost:7687` or `neo4j+s://host`.
    pub uri: String,
    pub username: String,
    pub password: String,
    /// Database every session runs against.
    pub database: String,
    /// Upper bound of the driver connection pool.
    pub max_connections: usize,
}

impl Default for Neo4jConfig {
    fn default() -> Self {
        Self {
            uri: "bolt://localhost:7687".to_string(),
            username: "neo4j".to_string(),
            password: "password".to_string(),
            database: "neo4j".to_string(),
            max_connections: 16,
        }
    }
}

/// HTTP transport settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Bearer token required on every request when set.
    pub api_key: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            api_key: None,
        }
    }
}

/// Startup connectivity check policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthCheckConfig {
    /// Delay before the first attempt, giving a freshly started database time to boot.
    pub initial_delay_secs: u64,
    /// Number of failed attempts before giving up.
    pub max_attempts: u32,
}

impl Default for HealthCheckConfig {
    fn default() -> Self {
        Self {
            initial_delay_secs: 3,
            max_attempts: 3,
        }
    }
}

impl HealthCheckConfig {
    pub fn initial_delay(&self) -> Duration {
        Duration::from_secs(self.initial_delay_secs)
    }

    /// Back-off after the given (1-based) failed attempt: `(1 + attempt) * 2` seconds.
    pub fn backoff(&self, attempt: u32) -> Duration {
        Duration::from_secs(u64::from(1 + attempt) * 2)
    }
}

/// Optional tool registration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    /// Register `write_neo4j_cypher`.
    pub enable_write: bool,
    /// Register `get_neo4j_schema` (requires APOC).
    pub enable_schema: bool,
}

impl Config {
    /// Load config with layered resolution (defaults → user → project → env).
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(Self::figment(&Self::user_config_path(), Path::new(PROJECT_CONFIG_FILE)))
    }

    /// Build the layered figment for the given user and project config files.
    ///
    /// Missing files are skipped.
    pub fn figment(user_config: &Path, project_config: &Path) -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            // Layer 1: User config (lowest priority)
            .merge(Toml::file(user_config))
            // Layer 2: Project config
            .merge(Toml::file(project_config))
            // Layer 3: Environment variables (highest priority)
            .merge(Env::prefixed("MCP_NEO4J_CYPHER_").split("__"))
            .merge(
                Env::prefixed("NEO4J_")
                    .only(&["uri", "username", "password", "database"])
                    .map(|key| format!("neo4j.{}", key).into()),
            )
            .merge(
                Env::prefixed("FASTMCP_")
                    .only(&["host", "port"])
                    .map(|key| format!("server.{}", key).into()),
            )
    }

    /// Extract a config from an already-assembled figment.
    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        figment.extract().map_err(ConfigError::from)
    }

    /// User config path: ~/.config/mcp-neo4j-cypher/config.toml (XDG) or platform config dir.
    fn user_config_path() -> PathBuf {
        // Prefer XDG config location (~/.config) on all platforms
        if let Some(home) = dirs::home_dir() {
            let xdg_path = home
                .join(".config")
                .join("mcp-neo4j-cypher")
                .join("config.toml");
            if xdg_path.exists() {
                return xdg_path;
            }
        }
        // Fall back to platform-specific config dir
        dirs::config_dir()
            .map(|p| p.join("mcp-neo4j-cypher").join("config.toml"))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_toml(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_defaults_without_sources() {
        let config = Config::from_figment(Figment::from(Serialized::defaults(
            Config::default(),
        )))
        .unwrap();

        assert_eq!(config.neo4j.uri, "bolt://localhost:7687");
        assert_eq!(config.neo4j.database, "neo4j");
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8000);
        assert!(config.server.api_key.is_none());
        assert_eq!(config.healthcheck.max_attempts, 3);
        assert!(!config.tools.enable_write);
        assert!(!config.tools.enable_schema);
    }

    #[test]
    fn test_project_file_overrides_user_file() {
        let dir = tempfile::tempdir().unwrap();
        let user = write_toml(
            &dir,
            "user.toml",
            "[neo4j]\nuri = \"bolt://user-host:7687\"\npassword = \"user-secret\"\n",
        );
        let project = write_toml(
            &dir,
            "project.toml",
            "[neo4j]\nuri = \"bolt://project-host:7687\"\n\n[tools]\nenable_write = true\n",
        );

        let config = Config::from_figment(
            Figment::from(Serialized::defaults(Config::default()))
                .merge(Toml::file(&user))
                .merge(Toml::file(&project)),
        )
        .unwrap();

        assert_eq!(config.neo4j.uri, "bolt://project-host:7687");
        assert_eq!(config.neo4j.password, "user-secret");
        assert_eq!(config.neo4j.username, "neo4j");
        assert!(config.tools.enable_write);
    }

    #[test]
    fn test_missing_files_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let figment = Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(dir.path().join("absent-user.toml")))
            .merge(Toml::file(dir.path().join("absent-project.toml")));

        let config = Config::from_figment(figment).unwrap();
        assert_eq!(config.neo4j.username, "neo4j");
    }

    #[test]
    fn test_wrong_type_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let project = write_toml(&dir, "project.toml", "[server]\nport = \"not-a-port\"\n");

        let result = Config::from_figment(
            Figment::from(Serialized::defaults(Config::default())).merge(Toml::file(&project)),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_env_overrides_files() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                PROJECT_CONFIG_FILE,
                "[neo4j]\nuri = \"bolt://file-host:7687\"\n\n[server]\nport = 9000\n",
            )?;
            jail.set_env("NEO4J_URI", "neo4j+s://env-host:7687");
            jail.set_env("FASTMCP_PORT", "8123");
            jail.set_env("MCP_NEO4J_CYPHER_TOOLS__ENABLE_SCHEMA", "true");

            let config: Config =
                Config::figment(Path::new("absent-user.toml"), Path::new(PROJECT_CONFIG_FILE))
                    .extract()?;

            assert_eq!(config.neo4j.uri, "neo4j+s://env-host:7687");
            assert_eq!(config.server.port, 8123);
            assert!(config.tools.enable_schema);
            Ok(())
        });
    }

    #[test]
    fn test_backoff_schedule() {
        let hc = HealthCheckConfig::default();
        assert_eq!(hc.initial_delay(), Duration::from_secs(3));
        assert_eq!(hc.backoff(1), Duration::from_secs(4));
        assert_eq!(hc.backoff(2), Duration::from_secs(6));
        assert_eq!(hc.backoff(3), Duration::from_secs(8));
    }
}
