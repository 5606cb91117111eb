//! API server configuration.
//!
//! Layered with the `config` crate, later sources winning:
//!
//! ```text
//! defaults  →  shareit.toml (optional)  →  SHAREIT_* environment variables
//! ```
//!
//! `SHAREIT_PORT=8081` overrides `port`, `SHAREIT_DATABASE_PATH` overrides
//! `database_path`, and so on.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

/// Base name of the optional configuration file (`shareit.toml`).
pub const CONFIG_FILE: &str = "shareit";

/// API server configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiConfig {
    /// Interface to bind
    pub host: String,

    /// HTTP port
    pub port: u16,

    /// SQLite database file
    pub database_path: PathBuf,

    /// Connection pool size
    pub max_connections: u32,

    /// Default tracing filter, overridden by `RUST_LOG`
    pub log_level: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            host: "127.0.0.1".to_string(),
            port: 9090,
            database_path: PathBuf::from("./data/shareit.db"),
            max_connections: 5,
            log_level: "info".to_string(),
        }
    }
}

impl ApiConfig {
    /// Load configuration from `shareit.toml` and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(CONFIG_FILE)
    }

    /// Load configuration using `file` as the optional config file name.
    pub fn load_from(file: &str) -> Result<Self, ConfigError> {
        Self::from_sources(file, Environment::with_prefix("SHAREIT").try_parsing(true))
    }

    fn from_sources(file: &str, env: Environment) -> Result<Self, ConfigError> {
        let defaults = ApiConfig::default();

        let config: ApiConfig = Config::builder()
            .set_default("host", defaults.host)?
            .set_default("port", i64::from(defaults.port))?
            .set_default("database_path", defaults.database_path.display().to_string())?
            .set_default("max_connections", i64::from(defaults.max_connections))?
            .set_default("log_level", defaults.log_level)?
            .add_source(File::with_name(file).required(false))
            .add_source(env)
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Checks values the type system can't.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::InvalidValue("port".to_string()));
        }

        if self.max_connections == 0 {
            return Err(ConfigError::InvalidValue("max_connections".to_string()));
        }

        if self.database_path.as_os_str().is_empty() {
            return Err(ConfigError::MissingRequired("database_path".to_string()));
        }

        self.socket_addr().map(|_| ())
    }

    /// Address the HTTP listener binds to.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|_| ConfigError::InvalidValue("host".to_string()))?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),

    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
}
