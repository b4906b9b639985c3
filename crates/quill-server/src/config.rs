//! Server configuration loading from file and environment variables.

use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;
use thiserror::Error;

use crate::api_search::SearchSettings;

/// Top-level server configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Server network settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Database settings.
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Substring search settings.
    #[serde(default)]
    pub search: SearchConfig,
}

/// Network configuration for the HTTP server.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to.
    #[serde(default = "default_host")]
    pub host: IpAddr,

    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file. `:memory:` is refused; it cannot
    /// serve concurrent requests.
    #[serde(default = "default_db_path")]
    pub path: String,

    /// SQLite busy timeout in milliseconds.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,

    /// Maximum number of pooled connections.
    #[serde(default = "default_pool_max_size")]
    pub pool_max_size: u32,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "quill_server=debug,info").
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to output logs in JSON format.
    #[serde(default)]
    pub json: bool,
}

/// Search configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// Deadline for a single `/find_string` request, in milliseconds.
    #[serde(default = "default_search_timeout_ms")]
    pub timeout_ms: u64,

    /// Longest accepted search string, in bytes.
    #[serde(default = "default_max_pattern_len")]
    pub max_pattern_len: usize,
}

impl SearchConfig {
    /// Converts to the settings carried in application state.
    pub fn settings(&self) -> SearchSettings {
        SearchSettings {
            timeout: Duration::from_millis(self.timeout_ms),
            max_pattern_len: self.max_pattern_len,
        }
    }
}

impl DatabaseConfig {
    /// Converts to the pool settings understood by `quill-db`.
    pub fn runtime_settings(&self) -> quill_db::DbRuntimeSettings {
        quill_db::DbRuntimeSettings {
            busy_timeout_ms: self.busy_timeout_ms,
            pool_max_size: self.pool_max_size,
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1))
}

fn default_port() -> u16 {
    8000
}

fn default_db_path() -> String {
    "quill.db".to_string()
}

fn default_busy_timeout_ms() -> u64 {
    quill_db::DbRuntimeSettings::default().busy_timeout_ms
}

fn default_pool_max_size() -> u32 {
    quill_db::DbRuntimeSettings::default().pool_max_size
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_search_timeout_ms() -> u64 {
    5_000
}

fn default_max_pattern_len() -> usize {
    1024
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            busy_timeout_ms: default_busy_timeout_ms(),
            pool_max_size: default_pool_max_size(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_search_timeout_ms(),
            max_pattern_len: default_max_pattern_len(),
        }
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse the configuration file.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value parsed but cannot be served.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Loads configuration from a TOML file, falling back to defaults, then
/// applies environment overrides.
///
/// Environment variable overrides:
/// - `QUILL_HOST` overrides `server.host`
/// - `QUILL_PORT` overrides `server.port`
/// - `QUILL_DB_PATH` overrides `database.path`
/// - `QUILL_LOG_LEVEL` overrides `logging.level`
/// - `QUILL_LOG_JSON` overrides `logging.json` (set to "true" to enable)
/// - `QUILL_SEARCH_TIMEOUT_MS` overrides `search.timeout_ms`
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but cannot be read or parsed,
/// or if the resulting settings are unusable (see [`validate`]).
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let mut config = load_file(path)?;
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    validate(&config)?;
    Ok(config)
}

/// Rejects settings the server cannot run with.
///
/// An in-memory database disappears with its last connection and its
/// shared-cache locks fail concurrent readers outright, so the server only
/// runs against a file.
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.database.path.trim() == quill_db::MEMORY_PATH {
        return Err(ConfigError::Invalid(
            "database.path must be a file; in-memory databases are for tests".to_string(),
        ));
    }
    if config.database.pool_max_size == 0 {
        return Err(ConfigError::Invalid(
            "database.pool_max_size must be at least 1".to_string(),
        ));
    }
    Ok(())
}

fn load_file(path: Option<&str>) -> Result<Config, ConfigError> {
    match path {
        Some(p) => match std::fs::read_to_string(p) {
            Ok(contents) => Ok(toml::from_str(&contents)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = p, "config file not found, using defaults");
                Ok(Config::default())
            }
            Err(e) => Err(ConfigError::FileRead(e)),
        },
        None => Ok(Config::default()),
    }
}

fn apply_env_overrides(config: &mut Config, var: impl Fn(&str) -> Option<String>) {
    if let Some(host) = var("QUILL_HOST") {
        if let Ok(parsed) = host.parse() {
            config.server.host = parsed;
        }
    }
    if let Some(port) = var("QUILL_PORT") {
        if let Ok(parsed) = port.parse() {
            config.server.port = parsed;
        }
    }
    if let Some(db_path) = var("QUILL_DB_PATH") {
        config.database.path = db_path;
    }
    if let Some(level) = var("QUILL_LOG_LEVEL") {
        config.logging.level = level;
    }
    if let Some(json) = var("QUILL_LOG_JSON") {
        config.logging.json = json == "true" || json == "1";
    }
    if let Some(timeout) = var("QUILL_SEARCH_TIMEOUT_MS") {
        if let Ok(parsed) = timeout.parse() {
            config.search.timeout_ms = parsed;
        }
    }
}
