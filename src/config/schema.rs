//! Configuration schema types
//!
//! The configuration is owned by the caller, not the engine: the loader parses
//! and validates it, then hands an immutable [`VeilConfig`] to each component
//! constructor. No ambient global state.

use crate::domain::{FieldRule, Locale};
use serde::{Deserialize, Serialize};

/// Main Veil configuration
///
/// This is the root structure that maps to the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VeilConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Encrypted mapping store settings
    #[serde(default)]
    pub store: StoreConfig,

    /// Format-preserving cipher settings
    #[serde(default)]
    pub fpe: FpeConfig,

    /// Pseudonym generation settings
    #[serde(default)]
    pub pseudonym: PseudonymConfig,

    /// Ordered field rules; declaration order decides match priority
    #[serde(default)]
    pub rules: Vec<FieldRule>,
}

impl VeilConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid. Rule
    /// patterns that can never match are not an error here (the engine
    /// silently skips them); the loader reports them as warnings.
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.store.validate()?;
        self.fpe.validate()?;
        Ok(())
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

fn default_store_path() -> String {
    "mapping_table.enc".to_string()
}

/// Encrypted mapping store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Path to the encrypted mapping file
    #[serde(default = "default_store_path")]
    pub path: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
        }
    }
}

impl StoreConfig {
    fn validate(&self) -> Result<(), String> {
        if self.path.trim().is_empty() {
            return Err("store.path must not be empty".to_string());
        }
        Ok(())
    }
}

fn default_tweak() -> String {
    "veil".to_string()
}

/// Format-preserving cipher configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FpeConfig {
    /// Tweak label; hashed to the 64-bit FF3 tweak. Not secret, but changing
    /// it changes every format-preserved output.
    #[serde(default = "default_tweak")]
    pub tweak: String,
}

impl Default for FpeConfig {
    fn default() -> Self {
        Self {
            tweak: default_tweak(),
        }
    }
}

impl FpeConfig {
    fn validate(&self) -> Result<(), String> {
        if self.tweak.is_empty() {
            return Err("fpe.tweak must not be empty".to_string());
        }
        Ok(())
    }
}

fn default_variance_days() -> u32 {
    30
}

/// Pseudonym generation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PseudonymConfig {
    /// Default locale for generated values; rules may override per field
    #[serde(default)]
    pub locale: Locale,

    /// Default date jitter window in days, used when a rule omits its own
    #[serde(default = "default_variance_days")]
    pub date_variance_days: u32,
}

impl Default for PseudonymConfig {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            date_variance_days: default_variance_days(),
        }
    }
}
