//! Configuration module
//!
//! Reads a TOML file (default `~/.config/car-rental/config.toml`) with
//! sections for the HTTP server, database, logging and pricing policy.
//! Every section is optional; missing values fall back to defaults.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::domain::pricing::PricingPolicy;
use crate::shared::errors::InfraError;

/// Full application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub pricing: PricingPolicy,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    #[serde(default = "default_database_url")]
    pub url: String,
}

impl DatabaseSettings {
    /// `DATABASE_URL` takes precedence over the config file.
    pub fn connection_url(&self) -> String {
        std::env::var("DATABASE_URL").unwrap_or_else(|_| self.url.clone())
    }
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: default_database_url(),
        }
    }
}

fn default_database_url() -> String {
    "sqlite://./car_rental.db?mode=rwc".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, InfraError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| InfraError::Config(format!("read {}: {e}", path.display())))?;
        toml::from_str(&raw).map_err(|e| InfraError::Config(format!("parse {}: {e}", path.display())))
    }
}

/// Default config location: `<config dir>/car-rental/config.toml`.
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("car-rental")
        .join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn empty_toml_yields_defaults() {
        let cfg: AppConfig = toml::from_str("").unwrap();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.database.url, "sqlite://./car_rental.db?mode=rwc");
        assert_eq!(cfg.logging.level, "info");
        assert_eq!(cfg.pricing.base_daily_rate, dec!(600));
    }

    #[test]
    fn sections_override_defaults() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [server]
            host = "127.0.0.1"
            port = 9090

            [database]
            url = "sqlite::memory:"

            [logging]
            level = "debug"

            [pricing]
            base_daily_rate = "700"
            base_distance_rate = "25"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.address(), "127.0.0.1:9090");
        assert_eq!(cfg.database.url, "sqlite::memory:");
        assert_eq!(cfg.logging.level, "debug");
        assert_eq!(cfg.pricing.base_daily_rate, dec!(700));
        assert_eq!(cfg.pricing.base_distance_rate, dec!(25));
    }

    #[test]
    fn partial_pricing_section_keeps_other_defaults() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [pricing]
            base_daily_rate = "800"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.pricing.base_daily_rate, dec!(800));
        assert_eq!(cfg.pricing.base_distance_rate, dec!(20));
    }
}
