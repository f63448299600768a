//! User settings for storebooks

use serde::{Deserialize, Serialize};

use super::paths::LedgerPaths;
use crate::error::{LedgerError, LedgerResult};
use crate::storage::file_io::{read_json, write_json_atomic};

/// User settings, stored as `config.json` in the base directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Symbol shown in front of amounts in terminal output
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Record every accepted change in `audit.log`
    #[serde(default)]
    pub audit_log_enabled: bool,

    /// End income snapshots and exports with a `Total` row
    #[serde(default = "default_include_total_row")]
    pub include_total_row: bool,

    /// Year used by `year` when none is given; falls back to the current year
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_year: Option<i32>,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_include_total_row() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            audit_log_enabled: false,
            include_total_row: default_include_total_row(),
            default_year: None,
        }
    }
}

impl Settings {
    /// Load settings from disk, or defaults if the file doesn't exist yet
    ///
    /// Defaults are not written back; the caller decides when to persist.
    pub fn load_or_create(paths: &LedgerPaths) -> LedgerResult<Self> {
        read_json(paths.settings_file()).map_err(|e| match e {
            LedgerError::Json(message) => {
                LedgerError::Config(format!("Failed to parse settings file: {}", message))
            }
            other => other,
        })
    }

    pub fn save(&self, paths: &LedgerPaths) -> LedgerResult<()> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }

    /// Set a setting from its `config` command key
    pub fn set(&mut self, key: &str, value: &str) -> LedgerResult<()> {
        match key {
            "currency_symbol" => self.currency_symbol = value.to_string(),
            "audit_log_enabled" => self.audit_log_enabled = parse_bool(key, value)?,
            "include_total_row" => self.include_total_row = parse_bool(key, value)?,
            "default_year" => {
                self.default_year = if value.is_empty() || value == "none" {
                    None
                } else {
                    Some(value.parse().map_err(|_| {
                        LedgerError::Config(format!("'{}' is not a valid year", value))
                    })?)
                }
            }
            _ => {
                return Err(LedgerError::Config(format!(
                    "Unknown setting '{}'",
                    key
                )))
            }
        }
        Ok(())
    }
}

fn parse_bool(key: &str, value: &str) -> LedgerResult<bool> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(LedgerError::Config(format!(
            "{} expects true or false, got '{}'",
            key, value
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.currency_symbol, "$");
        assert!(!settings.audit_log_enabled);
        assert!(settings.include_total_row);
        assert_eq!(settings.default_year, None);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.audit_log_enabled = true;
        settings.default_year = Some(2023);
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"currency_symbol": "€"}"#).unwrap();
        assert_eq!(settings.currency_symbol, "€");
        assert!(settings.include_total_row);
    }

    #[test]
    fn test_set_by_key() {
        let mut settings = Settings::default();
        settings.set("audit_log_enabled", "yes").unwrap();
        settings.set("default_year", "2022").unwrap();
        assert!(settings.audit_log_enabled);
        assert_eq!(settings.default_year, Some(2022));

        assert!(settings.set("include_total_row", "maybe").is_err());
        assert!(settings.set("colour", "blue").is_err());
    }

    #[test]
    fn test_corrupt_settings_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), "{not json").unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, LedgerError::Config(_)));
    }
}
