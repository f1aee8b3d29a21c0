//! # API Configuration
//!
//! Server, database, and checkout settings for the HTTP server.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     TILL_PORT=8080                                                     │
//! │     TILL_DB_PATH=/var/lib/till/till.db                                 │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config <path>, or                                                │
//! │     ~/.config/till/till.toml (Linux)                                   │
//! │     ~/Library/Application Support/com.till.checkout/till.toml (macOS)  │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [server]
//! bind_addr = "0.0.0.0"
//! port = 3000
//!
//! [database]
//! path = "/var/lib/till/till.db"
//! max_connections = 5
//!
//! [checkout]
//! distance = 1000.0
//! minimum_freight = 10.0
//! order_codes = "year_sequence"  # year_sequence | uuid
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use till_core::freight::{DEFAULT_DISTANCE, DEFAULT_MINIMUM_FREIGHT};
use till_core::lookup::{UuidOrderCodes, YearSequenceCodes};
use till_core::{FreightPolicy, Money, OrderCodeGenerator};

// =============================================================================
// Errors
// =============================================================================

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Order Code Strategy
// =============================================================================

/// Which `OrderCodeGenerator` the engine gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderCodeStrategy {
    /// `<year>0000001`
    #[default]
    YearSequence,

    /// Random UUID v4 per order.
    Uuid,
}

impl OrderCodeStrategy {
    pub fn generator(&self) -> Arc<dyn OrderCodeGenerator> {
        match self {
            OrderCodeStrategy::YearSequence => Arc::new(YearSequenceCodes),
            OrderCodeStrategy::Uuid => Arc::new(UuidOrderCodes),
        }
    }
}

impl std::str::FromStr for OrderCodeStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "year_sequence" | "year" => Ok(OrderCodeStrategy::YearSequence),
            "uuid" => Ok(OrderCodeStrategy::Uuid),
            other => Err(ConfigError::Invalid(format!(
                "Unknown order code strategy: '{}'. Valid options: year_sequence, uuid",
                other
            ))),
        }
    }
}

// =============================================================================
// Sections
// =============================================================================

/// `[server]`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_bind_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerSettings {
    fn default() -> Self {
        ServerSettings {
            bind_addr: default_bind_addr(),
            port: default_port(),
        }
    }
}

impl ServerSettings {
    /// Returns the full bind address.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

/// `[database]`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseSettings {
    /// SQLite file, or `:memory:`.
    #[serde(default = "default_db_path")]
    pub path: PathBuf,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_db_path() -> PathBuf {
    directories::ProjectDirs::from("com", "till", "checkout")
        .map(|dirs| dirs.data_dir().join("till.db"))
        .unwrap_or_else(|| PathBuf::from("till.db"))
}

fn default_max_connections() -> u32 {
    5
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        DatabaseSettings {
            path: default_db_path(),
            max_connections: default_max_connections(),
        }
    }
}

/// `[checkout]`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutSettings {
    #[serde(default = "default_distance")]
    pub distance: f64,

    #[serde(default = "default_minimum_freight")]
    pub minimum_freight: f64,

    #[serde(default)]
    pub order_codes: OrderCodeStrategy,
}

fn default_distance() -> f64 {
    DEFAULT_DISTANCE
}

fn default_minimum_freight() -> f64 {
    DEFAULT_MINIMUM_FREIGHT.amount()
}

impl Default for CheckoutSettings {
    fn default() -> Self {
        CheckoutSettings {
            distance: default_distance(),
            minimum_freight: default_minimum_freight(),
            order_codes: OrderCodeStrategy::default(),
        }
    }
}

impl CheckoutSettings {
    pub fn freight_policy(&self) -> FreightPolicy {
        FreightPolicy::new(self.distance, Money::new(self.minimum_freight))
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete API configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub database: DatabaseSettings,

    #[serde(default)]
    pub checkout: CheckoutSettings,
}

impl ApiConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`config_path`, else the platform `till.toml`)
    /// 3. Environment variables
    ///
    /// An explicit `config_path` that does not exist is an error; a missing
    /// platform file is not.
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = match config_path {
            Some(path) => Self::from_file(&path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Parses a TOML config file.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        info!(?path, "Loading config from file");
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.server.port == 0 {
            return Err(ConfigError::Invalid("port must be greater than 0".into()));
        }

        if self.database.max_connections == 0 {
            return Err(ConfigError::Invalid(
                "max_connections must be greater than 0".into(),
            ));
        }

        if !self.checkout.distance.is_finite() || self.checkout.distance <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "distance must be a positive number, got {}",
                self.checkout.distance
            )));
        }

        if !self.checkout.minimum_freight.is_finite() || self.checkout.minimum_freight < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "minimum_freight must be a non-negative number, got {}",
                self.checkout.minimum_freight
            )));
        }

        Ok(())
    }

    /// Applies `TILL_*` overrides. `lookup` is `std::env::var` outside tests.
    fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(addr) = lookup("TILL_BIND_ADDR") {
            self.server.bind_addr = addr;
        }

        if let Some(port) = lookup("TILL_PORT") {
            match port.parse::<u16>() {
                Ok(p) => {
                    debug!(port = p, "Overriding port from environment");
                    self.server.port = p;
                }
                Err(_) => warn!(port = %port, "Ignoring invalid TILL_PORT"),
            }
        }

        if let Some(path) = lookup("TILL_DB_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.database.path = PathBuf::from(path);
        }

        if let Some(distance) = lookup("TILL_FREIGHT_DISTANCE") {
            match distance.parse::<f64>() {
                Ok(d) => self.checkout.distance = d,
                Err(_) => warn!(distance = %distance, "Ignoring invalid TILL_FREIGHT_DISTANCE"),
            }
        }

        if let Some(minimum) = lookup("TILL_MIN_FREIGHT") {
            match minimum.parse::<f64>() {
                Ok(m) => self.checkout.minimum_freight = m,
                Err(_) => warn!(minimum = %minimum, "Ignoring invalid TILL_MIN_FREIGHT"),
            }
        }

        if let Some(strategy) = lookup("TILL_ORDER_CODES") {
            match strategy.parse() {
                Ok(parsed) => self.checkout.order_codes = parsed,
                Err(e) => warn!(error = %e, "Ignoring TILL_ORDER_CODES"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "till", "checkout")
            .map(|dirs| dirs.config_dir().join("till.toml"))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ApiConfig::default();
        assert_eq!(config.server.bind_address(), "0.0.0.0:3000");
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.checkout.freight_policy(), FreightPolicy::default());
        assert_eq!(config.checkout.order_codes, OrderCodeStrategy::YearSequence);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml() {
        let config: ApiConfig = toml::from_str(
            r#"
            [server]
            port = 8080

            [checkout]
            order_codes = "uuid"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.bind_addr, "0.0.0.0");
        assert_eq!(config.checkout.order_codes, OrderCodeStrategy::Uuid);
        assert_eq!(config.checkout.minimum_freight, 10.0);
    }

    #[test]
    fn test_env_overrides() {
        let mut config = ApiConfig::default();
        config.apply_env_overrides(env(&[
            ("TILL_PORT", "9090"),
            ("TILL_DB_PATH", ":memory:"),
            ("TILL_FREIGHT_DISTANCE", "500"),
            ("TILL_MIN_FREIGHT", "7.5"),
            ("TILL_ORDER_CODES", "uuid"),
        ]));

        assert_eq!(config.server.port, 9090);
        assert_eq!(config.database.path, PathBuf::from(":memory:"));
        assert_eq!(config.checkout.distance, 500.0);
        assert_eq!(config.checkout.minimum_freight, 7.5);
        assert_eq!(config.checkout.order_codes, OrderCodeStrategy::Uuid);
    }

    #[test]
    fn test_invalid_env_values_are_ignored() {
        let mut config = ApiConfig::default();
        config.apply_env_overrides(env(&[
            ("TILL_PORT", "not-a-port"),
            ("TILL_ORDER_CODES", "sequential"),
        ]));

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.checkout.order_codes, OrderCodeStrategy::YearSequence);
    }

    #[test]
    fn test_validation() {
        let mut config = ApiConfig::default();
        config.server.port = 0;
        assert!(config.validate().is_err());

        let mut config = ApiConfig::default();
        config.checkout.distance = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = ApiConfig::default();
        config.checkout.minimum_freight = -0.01;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let err = ApiConfig::load(Some(PathBuf::from("/nonexistent/till.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
