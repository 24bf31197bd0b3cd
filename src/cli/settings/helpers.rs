//! Helper functions for settings operations.

use std::path::Path;

use crate::core::config::data::Config;

use super::error::SettingError;

/// Load, modify, and save the config file, mapping failures to
/// `SettingError::ConfigError`.
pub fn mutate_config<F, T>(path: &Path, f: F) -> Result<T, SettingError>
where
    F: FnOnce(&mut Config) -> Result<T, SettingError>,
{
    let mut config =
        Config::load_from_path(path).map_err(|e| SettingError::ConfigError(e.to_string()))?;
    let result = f(&mut config)?;
    config
        .save_to_path(path)
        .map_err(|e| SettingError::ConfigError(e.to_string()))?;
    Ok(result)
}

/// Parse a boolean value from user input.
///
/// Accepts: on/off, true/false, yes/no (case-insensitive).
pub fn parse_bool(input: &str) -> Option<bool> {
    match input.to_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Some(true),
        "off" | "false" | "no" | "0" => Some(false),
        _ => None,
    }
}

/// Format a boolean value for display.
pub fn format_bool(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}

pub fn success_set(key: &str, display: &str) -> String {
    format!("✅ Set {key} to: {display}")
}
