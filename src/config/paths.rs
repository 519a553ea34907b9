//! Path management for spendwatch
//!
//! Provides XDG-compliant path resolution for configuration and data.
//!
//! ## Path Resolution Order
//!
//! 1. `SPENDWATCH_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/spendwatch` or `~/.config/spendwatch`
//! 3. Windows: `%APPDATA%\spendwatch`

use std::path::PathBuf;

use crate::error::SpendwatchError;

/// Manages all paths used by spendwatch
#[derive(Debug, Clone)]
pub struct SpendwatchPaths {
    /// Base directory for all spendwatch data
    base_dir: PathBuf,
}

impl SpendwatchPaths {
    /// Create a new SpendwatchPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the platform config directory cannot be
    /// determined.
    pub fn new() -> Result<Self, SpendwatchError> {
        let base_dir = if let Ok(custom) = std::env::var("SPENDWATCH_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create SpendwatchPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to budgets.json
    pub fn budgets_file(&self) -> PathBuf {
        self.data_dir().join("budgets.json")
    }

    /// Get the path to transactions.json
    pub fn transactions_file(&self) -> PathBuf {
        self.data_dir().join("transactions.json")
    }

    /// Get the path to devices.json (the token registry)
    pub fn devices_file(&self) -> PathBuf {
        self.data_dir().join("devices.json")
    }

    /// Ensure all required directories exist
    pub fn ensure_directories(&self) -> Result<(), SpendwatchError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| SpendwatchError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| SpendwatchError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }
}

/// Resolve the default data directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, SpendwatchError> {
    let config_base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|_| {
            std::env::var("HOME").map(|home| PathBuf::from(home).join(".config"))
        })
        .map_err(|_| SpendwatchError::Config("Could not determine home directory".into()))?;
    Ok(config_base.join("spendwatch"))
}

/// Resolve the default data directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, SpendwatchError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| SpendwatchError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("spendwatch"))
}
