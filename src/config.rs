//! Application configuration loaded from environment variables.

use std::path::PathBuf;

use serde::Deserialize;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Server Configuration ===
    /// Address the HTTP server binds to.
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP server port.
    #[serde(default = "default_port")]
    pub port: u16,

    // === Data ===
    /// JSON snapshot preloaded into the store at startup.
    #[serde(default)]
    pub seed_file: Option<PathBuf>,

    // === Observability ===
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,

    /// Enable verbose logging.
    #[serde(default)]
    pub verbose: bool,

    /// Emit logs as JSON lines.
    #[serde(default)]
    pub log_json: bool,

    /// Install the Prometheus recorder and serve `/metrics`.
    #[serde(default = "default_true")]
    pub metrics_enabled: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            seed_file: None,
            rust_log: default_log_level(),
            verbose: false,
            log_json: false,
            metrics_enabled: default_true(),
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), String> {
        if self.host.trim().is_empty() {
            return Err("HOST must not be empty".to_string());
        }

        if self.port == 0 {
            return Err("PORT must be between 1 and 65535".to_string());
        }

        if let Some(path) = &self.seed_file {
            if !path.is_file() {
                return Err(format!("SEED_FILE {} does not exist", path.display()));
            }
        }

        Ok(())
    }

    /// `host:port` for the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Effective log filter: `debug` when verbose, `RUST_LOG` otherwise.
    pub fn log_filter(&self) -> &str {
        if self.verbose {
            "debug"
        } else {
            &self.rust_log
        }
    }
}
