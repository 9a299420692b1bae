//! Path management for passbook
//!
//! Provides XDG-compliant path resolution for the ledger file and settings.
//!
//! ## Path Resolution Order
//!
//! 1. `PASSBOOK_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/passbook` or `~/.config/passbook`
//! 3. Windows: `%APPDATA%\passbook`

use std::path::PathBuf;

use crate::error::PassbookError;

/// Manages all paths used by passbook
#[derive(Debug, Clone)]
pub struct PassbookPaths {
    /// Base directory for all passbook data
    base_dir: PathBuf,
}

impl PassbookPaths {
    /// Create a new PassbookPaths instance
    ///
    /// Path resolution:
    /// 1. `PASSBOOK_DATA_DIR` env var (explicit override)
    /// 2. Unix: `$XDG_CONFIG_HOME/passbook` or `~/.config/passbook`
    /// 3. Windows: `%APPDATA%\passbook`
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, PassbookError> {
        let base_dir = if let Ok(custom) = std::env::var("PASSBOOK_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create PassbookPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/passbook/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the ledger snapshot file
    pub fn ledger_file(&self) -> PathBuf {
        self.base_dir.join("ledger.json")
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> Result<(), PassbookError> {
        std::fs::create_dir_all(&self.base_dir).map_err(|e| {
            PassbookError::Storage(format!("Failed to create base directory: {}", e))
        })?;

        Ok(())
    }
}

/// Resolve the default data directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, PassbookError> {
    // Unix (Linux/macOS): Use XDG_CONFIG_HOME if set, otherwise ~/.config
    let config_base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").expect("HOME environment variable not set");
            PathBuf::from(home).join(".config")
        });
    Ok(config_base.join("passbook"))
}

/// Resolve the default data directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, PassbookError> {
    // Windows: Use APPDATA
    let appdata = std::env::var("APPDATA")
        .map_err(|_| PassbookError::Storage("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("passbook"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PassbookPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.ledger_file(), temp_dir.path().join("ledger.json"));
        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path().join("nested").join("passbook");
        let paths = PassbookPaths::with_base_dir(base.clone());

        paths.ensure_directories().unwrap();

        assert!(base.exists());
    }
}
