//! User settings for passbook
//!
//! Manages operator preferences: the issuer prefix used when generating
//! account numbers and the currency symbol used in console output.

use serde::{Deserialize, Serialize};

use super::paths::PassbookPaths;
use crate::error::PassbookError;

/// User settings for passbook
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Fixed 10-digit issuer prefix for generated account numbers
    #[serde(default = "default_issuer_prefix")]
    pub issuer_prefix: String,

    /// Currency symbol for console output
    #[serde(default = "default_currency")]
    pub currency_symbol: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_issuer_prefix() -> String {
    "7810106666".to_string()
}

fn default_currency() -> String {
    "$".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            issuer_prefix: default_issuer_prefix(),
            currency_symbol: default_currency(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &PassbookPaths) -> Result<Self, PassbookError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                PassbookError::Storage(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                PassbookError::Storage(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Create default settings
            let settings = Settings::default();
            // Don't save yet - let caller decide when to persist
            Ok(settings)
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &PassbookPaths) -> Result<(), PassbookError> {
        // Ensure the config directory exists
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            PassbookError::Storage(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(&settings_path, contents).map_err(|e| {
            PassbookError::Storage(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }
}
