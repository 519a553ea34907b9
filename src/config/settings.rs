//! User settings for spendwatch
//!
//! Only the preferences the alerting subsystem reads: the currency symbol
//! used when rendering alert bodies.

use serde::{Deserialize, Serialize};

use super::paths::SpendwatchPaths;
use crate::error::SpendwatchError;
use crate::models::Amount;
use crate::storage::{read_json, write_json_atomic};

/// User settings for spendwatch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol prefixed to formatted amounts in alerts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
        }
    }
}

impl Settings {
    /// Load settings from disk, creating the file with defaults if missing
    pub fn load_or_create(paths: &SpendwatchPaths) -> Result<Self, SpendwatchError> {
        let path = paths.settings_file();

        if path.exists() {
            read_json(&path)
        } else {
            let settings = Self::default();
            write_json_atomic(&path, &settings)?;
            Ok(settings)
        }
    }

    /// Format an amount with the configured currency symbol
    pub fn format_amount(&self, amount: Amount) -> String {
        if amount.is_negative() {
            format!("-{}{}", self.currency_symbol, amount.abs())
        } else {
            format!("{}{}", self.currency_symbol, amount)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_or_create_writes_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SpendwatchPaths::with_base_dir(temp_dir.path().to_path_buf());
        paths.ensure_directories().unwrap();

        let settings = Settings::load_or_create(&paths).unwrap();
        assert_eq!(settings.currency_symbol, "$");
        assert!(paths.settings_file().exists());

        // Second load reads the file back
        let again = Settings::load_or_create(&paths).unwrap();
        assert_eq!(again.schema_version, settings.schema_version);
    }

    #[test]
    fn test_format_amount() {
        let settings = Settings::default();
        assert_eq!(
            settings.format_amount(Amount::from_minor(1_200_000)),
            "$1,200,000"
        );
        assert_eq!(
            settings.format_amount(Amount::from_minor(-200_000)),
            "-$200,000"
        );
    }
}
