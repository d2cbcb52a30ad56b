//! Configuration file support for Lift.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/lift/config.toml`. The
//! adjustment engine itself never reads this: it takes an
//! [`AdjustmentConfig`] value as an explicit argument on every call, and
//! the file config exists only so callers (the CLI) have somewhere to keep
//! that value between runs.

use crate::types::{to_centi, Inventory, PlateSpec, WeightUnit};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Parameters of the weight adjustment engine, immutable per invocation.
///
/// Thresholds say how long a streak must run before the weight moves;
/// the amounts and tolerance say how it moves.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AdjustmentConfig {
    /// Consecutive successes required before the weight increases
    #[serde(default = "default_increment_after_successes")]
    pub increment_after_successes: u32,

    /// Consecutive failures required before the weight decreases
    #[serde(default = "default_decrement_after_failures")]
    pub decrement_after_failures: u32,

    /// Decrease to a percentage of the current weight instead of
    /// subtracting a fixed amount
    #[serde(default = "default_use_proportional_decrement")]
    pub use_proportional_decrement: bool,

    /// Percentage of the current weight kept on a proportional decrease,
    /// in (0, 100]
    #[serde(default = "default_decrement_percentage")]
    pub decrement_percentage: f64,

    /// Amount subtracted on a fixed decrease
    #[serde(default = "default_fixed_decrement_amount")]
    pub fixed_decrement_amount: f64,

    /// Amount added on an increase
    #[serde(default = "default_increment_amount")]
    pub increment_amount: f64,

    /// Grid the computed weight is rounded up to in continuous mode
    #[serde(default = "default_rounding_tolerance")]
    pub rounding_tolerance: f64,
}

impl Default for AdjustmentConfig {
    fn default() -> Self {
        Self {
            increment_after_successes: default_increment_after_successes(),
            decrement_after_failures: default_decrement_after_failures(),
            use_proportional_decrement: default_use_proportional_decrement(),
            decrement_percentage: default_decrement_percentage(),
            fixed_decrement_amount: default_fixed_decrement_amount(),
            increment_amount: default_increment_amount(),
            rounding_tolerance: default_rounding_tolerance(),
        }
    }
}

impl AdjustmentConfig {
    /// Check every field invariant.
    ///
    /// Called by the engine before any state is touched, so a bad config
    /// can never leave a partial update behind.
    pub fn validate(&self) -> Result<()> {
        if self.increment_after_successes == 0 {
            return Err(Error::Config(
                "increment_after_successes must be at least 1".into(),
            ));
        }
        if self.decrement_after_failures == 0 {
            return Err(Error::Config(
                "decrement_after_failures must be at least 1".into(),
            ));
        }
        if !(self.decrement_percentage > 0.0 && self.decrement_percentage <= 100.0) {
            return Err(Error::Config(format!(
                "decrement_percentage must be in (0, 100], got {}",
                self.decrement_percentage
            )));
        }
        if !(self.fixed_decrement_amount > 0.0) {
            return Err(Error::Config(format!(
                "fixed_decrement_amount must be positive, got {}",
                self.fixed_decrement_amount
            )));
        }
        if !(self.increment_amount > 0.0) {
            return Err(Error::Config(format!(
                "increment_amount must be positive, got {}",
                self.increment_amount
            )));
        }
        if self.rounding_tolerance <= 0.0 || to_centi(self.rounding_tolerance) == 0 {
            return Err(Error::InvalidTolerance {
                tolerance: self.rounding_tolerance,
            });
        }
        Ok(())
    }
}

// Default value functions
fn default_increment_after_successes() -> u32 {
    1
}

fn default_decrement_after_failures() -> u32 {
    1
}

fn default_use_proportional_decrement() -> bool {
    true
}

fn default_decrement_percentage() -> f64 {
    50.0
}

fn default_fixed_decrement_amount() -> f64 {
    5.0
}

fn default_increment_amount() -> f64 {
    5.0
}

fn default_rounding_tolerance() -> f64 {
    5.0
}

fn default_starting_weight() -> f64 {
    45.0
}

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub adjustment: AdjustmentConfig,

    #[serde(default)]
    pub defaults: DefaultsConfig,

    #[serde(default)]
    pub plates: PlatesConfig,
}

/// Defaults applied when creating new exercises
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default = "default_starting_weight")]
    pub starting_weight: f64,

    #[serde(default)]
    pub weight_unit: WeightUnit,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            starting_weight: default_starting_weight(),
            weight_unit: WeightUnit::default(),
        }
    }
}

/// Equipment the user owns, if they track it
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct PlatesConfig {
    #[serde(default)]
    pub available: Vec<PlateSpec>,
}

impl PlatesConfig {
    /// Build the configured inventory, or None when no plates are listed
    pub fn inventory(&self) -> Result<Option<Inventory>> {
        if self.available.is_empty() {
            return Ok(None);
        }
        Inventory::new(self.available.clone()).map(Some)
    }
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.adjustment.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| {
            let home = std::env::var("HOME").expect("HOME environment variable not set");
            PathBuf::from(home).join(".config")
        });
        base.join("lift").join("config.toml")
    }

    /// Save the current configuration to the default path
    pub fn save(&self) -> Result<()> {
        let config_path = Self::default_config_path();
        self.save_to(&config_path)
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}
