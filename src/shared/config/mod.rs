//! List configuration module
//!
//! Provides the spacing configuration used by the ordering engine.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::shared::position::{Spacing, DEFAULT_MAX_SLOTS, DEFAULT_MIN_SLOTS, DEFAULT_SPACING};

/// Ordering configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListConfig {
    /// Gap between neighbours after a reindex
    pub spacing: i64,
    /// Number of spacing slots allowed below zero
    pub min_slots: i64,
    /// Number of spacing slots allowed above zero
    pub max_slots: i64,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            spacing: DEFAULT_SPACING,
            min_slots: DEFAULT_MIN_SLOTS,
            max_slots: DEFAULT_MAX_SLOTS,
        }
    }
}

impl ListConfig {
    /// Create a new ListConfigBuilder
    pub fn builder() -> ListConfigBuilder {
        ListConfigBuilder::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        // A spacing of 1 leaves no room for a midpoint, ever
        if self.spacing < 2 {
            return Err(ConfigError::InvalidValue {
                field: "spacing",
                reason: format!("must be at least 2, got {}", self.spacing),
            });
        }
        if self.min_slots < 1 {
            return Err(ConfigError::InvalidValue {
                field: "min_slots",
                reason: format!("must be positive, got {}", self.min_slots),
            });
        }
        if self.max_slots < 1 {
            return Err(ConfigError::InvalidValue {
                field: "max_slots",
                reason: format!("must be positive, got {}", self.max_slots),
            });
        }
        self.spacing
            .checked_mul(self.max_slots.max(self.min_slots))
            .ok_or(ConfigError::InvalidValue {
                field: "spacing",
                reason: "position bounds overflow i64".to_string(),
            })?;
        Ok(())
    }

    /// Position bounds derived from this configuration
    pub fn spacing(&self) -> Spacing {
        Spacing::new(self.spacing, self.min_slots, self.max_slots)
    }
}

/// Builder for ListConfig
#[derive(Debug, Default)]
pub struct ListConfigBuilder {
    spacing: Option<i64>,
    min_slots: Option<i64>,
    max_slots: Option<i64>,
}

impl ListConfigBuilder {
    /// Set the spacing
    pub fn spacing(mut self, spacing: i64) -> Self {
        self.spacing = Some(spacing);
        self
    }

    /// Set the number of slots below zero
    pub fn min_slots(mut self, slots: i64) -> Self {
        self.min_slots = Some(slots);
        self
    }

    /// Set the number of slots above zero
    pub fn max_slots(mut self, slots: i64) -> Self {
        self.max_slots = Some(slots);
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<ListConfig, ConfigError> {
        let defaults = ListConfig::default();
        let config = ListConfig {
            spacing: self.spacing.unwrap_or(defaults.spacing),
            min_slots: self.min_slots.unwrap_or(defaults.min_slots),
            max_slots: self.max_slots.unwrap_or(defaults.max_slots),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
    #[error("invalid number in {name}: {value}")]
    InvalidNumber { name: &'static str, value: String },
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}
