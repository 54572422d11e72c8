//! Configuration system for the gallery SDK

use crate::error::{GalleryError, Result};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

/// Global configuration for the gallery
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Determinate progress simulation settings
    pub progress: ProgressConfig,
    /// Indeterminate loader settings
    pub loading: LoadingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Level applied to targets without a category override
    pub default_level: String,
    /// Category-specific log levels (category name -> level string)
    pub category_levels: HashMap<String, String>,
}

/// Determinate progress settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressConfig {
    /// Fraction added per tick, in `(0.0, 1.0]`
    pub step_size: f32,
    /// Delay between ticks in milliseconds
    pub tick_interval_ms: u64,
}

/// Indeterminate loader settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadingConfig {
    /// Simulated work for the linear indicator
    pub linear_delay_ms: u64,
    /// Simulated work for the circular indicator
    pub circular_delay_ms: u64,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        let mut category_levels = HashMap::new();
        category_levels.insert("core".to_string(), "info".to_string());
        category_levels.insert("progress".to_string(), "info".to_string());
        category_levels.insert("loading".to_string(), "info".to_string());
        category_levels.insert("config".to_string(), "warn".to_string());

        Self {
            default_level: "info".to_string(),
            category_levels,
        }
    }
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            step_size: 0.1,
            tick_interval_ms: 300,
        }
    }
}

impl Default for LoadingConfig {
    fn default() -> Self {
        Self {
            linear_delay_ms: 3_000,
            circular_delay_ms: 13_000,
        }
    }
}

impl ProgressConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Reject step sizes outside `(0.0, 1.0]` and zero intervals
    pub fn validate(&self) -> Result<()> {
        if !self.step_size.is_finite() || self.step_size <= 0.0 || self.step_size > 1.0 {
            return Err(GalleryError::configuration(format!(
                "progress.step_size must be in (0.0, 1.0], got {}",
                self.step_size
            )));
        }
        if self.tick_interval_ms == 0 {
            return Err(GalleryError::configuration(
                "progress.tick_interval_ms must be greater than zero",
            ));
        }
        Ok(())
    }
}

impl LoadingConfig {
    pub fn linear_delay(&self) -> Duration {
        Duration::from_millis(self.linear_delay_ms)
    }

    pub fn circular_delay(&self) -> Duration {
        Duration::from_millis(self.circular_delay_ms)
    }
}

impl GalleryConfig {
    /// Parse a configuration from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a JSON configuration file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        self.progress.validate()
    }
}

/// Global configuration manager
pub struct ConfigManager {
    config: Arc<RwLock<GalleryConfig>>,
}

impl ConfigManager {
    /// Create a configuration manager with custom config
    pub fn with_config(config: GalleryConfig) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
        }
    }

    /// Get a copy of the current configuration
    pub fn get_config(&self) -> GalleryConfig {
        self.config.read().clone()
    }
}

/// Global configuration instance
static CONFIG_MANAGER: OnceLock<ConfigManager> = OnceLock::new();

/// Initialize the global configuration manager with custom config.
/// Has no effect if the global manager already exists.
pub fn init_config_with(config: GalleryConfig) -> &'static ConfigManager {
    CONFIG_MANAGER.get_or_init(|| ConfigManager::with_config(config))
}
