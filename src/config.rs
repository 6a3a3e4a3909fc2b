//! Service configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `USERS_HOST` - Bind address (default: 0.0.0.0)
//! - `USERS_PORT` - Listen port (default: 8000)
//! - `USERS_FILE` - Path of the JSON file (default: users.json)
//! - `USERS_SEED` - Run the built-in seed at startup (default: true)
//! - `USERS_LOG_FORMAT` - `text` or `json` (default: text)
//!
//! Log filtering follows `RUST_LOG`.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: &str = "8000";
const DEFAULT_FILE: &str = "users.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable is set but its value does not parse.
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

/// Service configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Users file, rewritten on every mutation
    pub users_file: PathBuf,
    /// Whether to run the built-in seed before serving
    pub seed: bool,
    /// Formatter for the tracing subscriber
    pub log_format: LogFormat,
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// A `.env` file in the working directory is read first if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Missing .env is fine
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`, which returns a variable's value
    /// or `None` when unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let host = get("USERS_HOST", DEFAULT_HOST)
            .parse::<IpAddr>()
            .map_err(|e| invalid("USERS_HOST", e))?;
        let port = get("USERS_PORT", DEFAULT_PORT)
            .parse::<u16>()
            .map_err(|e| invalid("USERS_PORT", e))?;
        let users_file = PathBuf::from(get("USERS_FILE", DEFAULT_FILE));
        let seed = parse_bool("USERS_SEED", &get("USERS_SEED", "true"))?;
        let log_format = match get("USERS_LOG_FORMAT", "text").to_ascii_lowercase().as_str() {
            "text" => LogFormat::Text,
            "json" => LogFormat::Json,
            other => return Err(invalid("USERS_LOG_FORMAT", format!("unknown format {other:?}"))),
        };

        Ok(Self {
            host,
            port,
            users_file,
            seed,
            log_format,
        })
    }

    /// Returns the socket address to bind to.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(invalid(key, format!("expected a boolean, got {other:?}"))),
    }
}

fn invalid(key: &str, err: impl ToString) -> ConfigError {
    ConfigError::InvalidEnvVar(key.to_string(), err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_pairs(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let config = from_pairs(&[]).unwrap();
        assert_eq!(config.socket_addr(), "0.0.0.0:8000".parse::<SocketAddr>().unwrap());
        assert_eq!(config.users_file, PathBuf::from("users.json"));
        assert!(config.seed);
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    fn overrides() {
        let config = from_pairs(&[
            ("USERS_HOST", "127.0.0.1"),
            ("USERS_PORT", "9090"),
            ("USERS_FILE", "/tmp/u.json"),
            ("USERS_SEED", "no"),
            ("USERS_LOG_FORMAT", "JSON"),
        ])
        .unwrap();
        assert_eq!(config.socket_addr(), "127.0.0.1:9090".parse::<SocketAddr>().unwrap());
        assert_eq!(config.users_file, PathBuf::from("/tmp/u.json"));
        assert!(!config.seed);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn bad_port_names_the_variable() {
        let err = from_pairs(&[("USERS_PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "USERS_PORT"));
    }

    #[test]
    fn bad_bool_is_rejected() {
        assert!(from_pairs(&[("USERS_SEED", "maybe")]).is_err());
    }

    #[test]
    fn bad_log_format_is_rejected() {
        assert!(from_pairs(&[("USERS_LOG_FORMAT", "xml")]).is_err());
    }
}
