//! # Commerce Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     ZHILAK_STORE_NAME=ZHILAK                                           │
//! │     ZHILAK_CURRENCY=INR                                                │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/zhilak/commerce.toml (Linux)                             │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [store]
//! name = "ZHILAK"
//! currency = "INR"
//!
//! [payment]
//! description = "Luxury Collection Purchase"
//!
//! [feed]
//! capacity = 256
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

// =============================================================================
// Error
// =============================================================================

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Failed to read config: {0}")]
    Load(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

// =============================================================================
// Sections
// =============================================================================

/// Storefront identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSettings {
    /// Merchant name shown on the payment sheet.
    #[serde(default = "default_store_name")]
    pub name: String,

    /// ISO 4217 code sent to the payment processor.
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_store_name() -> String {
    "ZHILAK".to_string()
}

fn default_currency() -> String {
    zhilak_core::CURRENCY_CODE.to_string()
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings {
            name: default_store_name(),
            currency: default_currency(),
        }
    }
}

/// Payment sheet settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentSettings {
    #[serde(default = "default_payment_description")]
    pub description: String,
}

fn default_payment_description() -> String {
    "Luxury Collection Purchase".to_string()
}

impl Default for PaymentSettings {
    fn default() -> Self {
        PaymentSettings {
            description: default_payment_description(),
        }
    }
}

/// Order change feed settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedSettings {
    /// Buffered change notifications per subscriber before it lags.
    #[serde(default = "default_feed_capacity")]
    pub capacity: usize,
}

fn default_feed_capacity() -> usize {
    256
}

impl Default for FeedSettings {
    fn default() -> Self {
        FeedSettings {
            capacity: default_feed_capacity(),
        }
    }
}

// =============================================================================
// Commerce Config
// =============================================================================

/// Complete configuration of the commerce layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommerceConfig {
    #[serde(default)]
    pub store: StoreSettings,

    #[serde(default)]
    pub payment: PaymentSettings,

    #[serde(default)]
    pub feed: FeedSettings,
}

impl CommerceConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (commerce.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading commerce config from file");
                config = Self::from_file(&path)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load commerce config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Parses a TOML file without applying overrides.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store.name.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "store.name".into(),
                reason: "must not be empty".into(),
            });
        }

        let currency = &self.store.currency;
        if currency.len() != 3 || !currency.bytes().all(|b| b.is_ascii_uppercase()) {
            return Err(ConfigError::InvalidValue {
                field: "store.currency".into(),
                reason: format!("expected a three letter ISO 4217 code, got '{}'", currency),
            });
        }

        if self.feed.capacity == 0 {
            return Err(ConfigError::InvalidValue {
                field: "feed.capacity".into(),
                reason: "must be greater than 0".into(),
            });
        }

        Ok(())
    }

    /// Applies `ZHILAK_*` overrides. `lookup` reads one variable.
    fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(name) = lookup("ZHILAK_STORE_NAME") {
            self.store.name = name;
        }

        if let Some(currency) = lookup("ZHILAK_CURRENCY") {
            debug!(currency = %currency, "Overriding currency from environment");
            self.store.currency = currency.to_uppercase();
        }

        if let Some(description) = lookup("ZHILAK_PAYMENT_DESCRIPTION") {
            self.payment.description = description;
        }

        if let Some(capacity) = lookup("ZHILAK_FEED_CAPACITY") {
            match capacity.parse::<usize>() {
                Ok(c) => self.feed.capacity = c,
                Err(_) => warn!(capacity = %capacity, "Ignoring non-numeric ZHILAK_FEED_CAPACITY"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "zhilak", "zhilak")
            .map(|dirs| dirs.config_dir().join("commerce.toml"))
    }
}
