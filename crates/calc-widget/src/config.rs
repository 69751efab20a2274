//! Widget configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::format::DEFAULT_SIGNIFICANT_DIGITS;

/// Errors raised while loading a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Malformed JSON
    #[error("Invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A field holds a value the widget cannot use
    #[error("Invalid configuration value for {field}: {message}")]
    InvalidValue {
        /// Field name
        field: &'static str,
        /// What is wrong with it
        message: String,
    },
}

impl ConfigError {
    fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            message: message.into(),
        }
    }
}

/// Tunables for the calculator widget
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    /// How long an error message stays on the display
    pub revert_delay_ms: u64,
    /// Length of the shake animation played on error
    pub shake_duration_ms: u64,
    /// Significant digits kept for fractional results
    pub significant_digits: usize,
    /// Storage key for the theme preference
    pub theme_storage_key: String,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            revert_delay_ms: 700,
            shake_duration_ms: 180,
            significant_digits: DEFAULT_SIGNIFICANT_DIGITS,
            theme_storage_key: "calc-theme".to_string(),
        }
    }
}

impl WidgetConfig {
    /// Largest precision that still means something for an `f64`
    pub const MAX_SIGNIFICANT_DIGITS: usize = 17;

    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the error revert delay
    #[must_use]
    pub const fn with_revert_delay_ms(mut self, ms: u64) -> Self {
        self.revert_delay_ms = ms;
        self
    }

    /// Set the shake animation length
    #[must_use]
    pub const fn with_shake_duration_ms(mut self, ms: u64) -> Self {
        self.shake_duration_ms = ms;
        self
    }

    /// Set the result precision
    #[must_use]
    pub const fn with_significant_digits(mut self, digits: usize) -> Self {
        self.significant_digits = digits;
        self
    }

    /// Set the theme storage key
    #[must_use]
    pub fn with_theme_storage_key(mut self, key: impl Into<String>) -> Self {
        self.theme_storage_key = key.into();
        self
    }

    /// Error revert delay as a `Duration`
    #[must_use]
    pub const fn revert_delay(&self) -> Duration {
        Duration::from_millis(self.revert_delay_ms)
    }

    /// Checks every field
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=Self::MAX_SIGNIFICANT_DIGITS).contains(&self.significant_digits) {
            return Err(ConfigError::invalid(
                "significant_digits",
                format!(
                    "{} is outside 1..={}",
                    self.significant_digits,
                    Self::MAX_SIGNIFICANT_DIGITS
                ),
            ));
        }
        if self.theme_storage_key.trim().is_empty() {
            return Err(ConfigError::invalid(
                "theme_storage_key",
                "must not be empty",
            ));
        }
        Ok(())
    }

    /// Parses and validates a JSON configuration; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes the configuration to JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
