//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Balance engine configuration.
    #[serde(default)]
    pub engine: EngineConfig,
    /// Simulated return configuration.
    #[serde(default)]
    pub simulation: SimulationConfig,
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    #[serde(default = "default_url")]
    pub url: String,
    /// Maximum number of connections in the pool.
    ///
    /// SQLite allows one writer at a time; the default of 1 keeps write
    /// transactions from tripping over each other. Raise it when pointing
    /// at a server database.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    /// Connection acquire timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

fn default_url() -> String {
    "sqlite://vestra.db?mode=rwc".to_string()
}

fn default_max_connections() -> u32 {
    1
}

fn default_min_connections() -> u32 {
    1
}

fn default_connect_timeout() -> u64 {
    8
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
        }
    }
}

/// Balance engine configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Upper bound on waiting for an account's serialization lock, in
    /// milliseconds. Acquisition past this bound fails instead of blocking.
    #[serde(default = "default_lock_wait_ms")]
    pub lock_wait_ms: u64,
}

fn default_lock_wait_ms() -> u64 {
    5000
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            lock_wait_ms: default_lock_wait_ms(),
        }
    }
}

/// Simulated return configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SimulationConfig {
    /// Default return percentage applied by `accrue_return` when the caller
    /// does not pass a rate.
    #[serde(default = "default_return_percent")]
    pub return_percent: rust_decimal::Decimal,
}

fn default_return_percent() -> rust_decimal::Decimal {
    rust_decimal::Decimal::TWO
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            return_percent: default_return_percent(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("VESTRA").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
