//! Application configuration loaded from environment variables.

use serde::Deserialize;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Path of the JSON history log.
    #[serde(default = "default_history_path")]
    pub history_path: String,

    /// Default number of entries shown by history queries.
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// HTTP server port for the keep-alive endpoints.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,

    /// Enable verbose logging.
    #[serde(default)]
    pub verbose: bool,
}

fn default_history_path() -> String {
    "history.json".to_string()
}

fn default_history_limit() -> usize {
    5
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), String> {
        if self.history_path.trim().is_empty() {
            return Err("HISTORY_PATH must not be empty".to_string());
        }

        if self.history_limit == 0 {
            return Err("HISTORY_LIMIT must be at least 1".to_string());
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            history_path: default_history_path(),
            history_limit: default_history_limit(),
            port: default_port(),
            rust_log: default_log_level(),
            verbose: false,
        }
    }
}
