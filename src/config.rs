//! Application configuration
//!
//! Loaded from a TOML file; every section and field falls back to its
//! default when missing.
//!
//! ```toml
//! [server]
//! api_host = "0.0.0.0"
//! api_port = 3000
//!
//! [database]
//! url = "sqlite://./parking.db?mode=rwc"
//!
//! [logging]
//! level = "info"
//! format = "pretty"
//!
//! [parking]
//! free_minutes = 60
//! fine_rate_per_hour = 10
//! ```

use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::FinePolicy;
use crate::infrastructure::DatabaseConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub parking: ParkingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub api_host: String,
    pub api_port: u16,
    /// Seconds to wait for in-flight requests on shutdown
    pub shutdown_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            api_host: "0.0.0.0".to_string(),
            api_port: 3000,
            shutdown_timeout: 30,
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.api_host, self.api_port)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// EnvFilter directive used when RUST_LOG is unset
    pub level: String,
    /// `pretty` or `json`
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParkingConfig {
    /// Stay included before the overstay fine starts
    pub free_minutes: u32,
    /// Fine per started hour beyond the free stay
    pub fine_rate_per_hour: u32,
}

impl Default for ParkingConfig {
    fn default() -> Self {
        Self {
            free_minutes: 60,
            fine_rate_per_hour: 10,
        }
    }
}

impl ParkingConfig {
    pub fn fine_policy(&self) -> FinePolicy {
        FinePolicy::new(
            i64::from(self.free_minutes),
            Decimal::from(self.fine_rate_per_hour),
        )
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml(&raw)
    }

    pub fn from_toml(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }
}

/// `~/.config/parking-service/config.toml`, or `./config.toml` when no
/// config directory is known.
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .map(|dir| dir.join("parking-service").join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let cfg = AppConfig::from_toml("").unwrap();
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.server.address(), "0.0.0.0:3000");
        assert_eq!(cfg.database.url, "sqlite://./parking.db?mode=rwc");
        assert_eq!(cfg.parking.fine_policy(), FinePolicy::default());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let cfg = AppConfig::from_toml(
            r#"
            [server]
            api_port = 8088

            [database]
            url = "memory"

            [parking]
            fine_rate_per_hour = 25
            "#,
        )
        .unwrap();

        assert_eq!(cfg.server.api_port, 8088);
        assert_eq!(cfg.server.api_host, "0.0.0.0");
        assert!(cfg.database.is_memory());
        assert_eq!(cfg.parking.free_minutes, 60);
        assert_eq!(
            cfg.parking.fine_policy().rate_per_hour,
            Decimal::from(25)
        );
        assert_eq!(cfg.logging.format, "pretty");
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = AppConfig::from_toml("[server\napi_port = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = AppConfig::load(Path::new("/nonexistent/parking/config.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn default_path_ends_with_service_dir() {
        assert!(default_config_path().ends_with("config.toml"));
    }
}
