//! Integer settings with an inclusive range.

use crate::cli::settings::error::SettingError;
use crate::cli::settings::helpers::success_set;
use crate::cli::settings::SettingHandler;
use crate::core::config::data::{
    Config, DEFAULT_HEALTH_INTERVAL_SECS, DEFAULT_SIDEBAR_WIDTH, MAX_SIDEBAR_WIDTH,
    MIN_SIDEBAR_WIDTH,
};

pub struct NumberHandler {
    key: &'static str,
    hint: &'static str,
    example: &'static str,
    min: u64,
    max: u64,
    default: u64,
    get: fn(&Config) -> Option<u64>,
    set_field: fn(&mut Config, Option<u64>),
}

impl SettingHandler for NumberHandler {
    fn key(&self) -> &'static str {
        self.key
    }

    fn set(&self, config: &mut Config, args: &[String]) -> Result<String, SettingError> {
        let Some(input) = args.first() else {
            return Err(SettingError::MissingArgs {
                hint: self.hint,
                example: self.example,
            });
        };

        let value = input
            .trim()
            .parse::<u64>()
            .ok()
            .filter(|value| (self.min..=self.max).contains(value))
            .ok_or_else(|| SettingError::InvalidNumber {
                key: self.key,
                input: input.clone(),
                min: self.min,
                max: self.max,
            })?;
        (self.set_field)(config, Some(value));
        Ok(success_set(self.key, &value.to_string()))
    }

    fn unset(&self, config: &mut Config) -> String {
        (self.set_field)(config, None);
        format!("✅ Unset {} (will use default: {})", self.key, self.default)
    }

    fn format(&self, config: &Config) -> String {
        match (self.get)(config) {
            Some(value) => format!("  {}: {value}", self.key),
            None => format!("  {}: (unset, default: {})", self.key, self.default),
        }
    }
}

/// Create a handler for the `health_interval_secs` setting.
pub fn health_interval_handler() -> NumberHandler {
    NumberHandler {
        key: "health_interval_secs",
        hint: "To change how often the backend is polled, give a number of seconds:",
        example: "agentchat set health_interval_secs 60",
        min: 1,
        max: 3600,
        default: DEFAULT_HEALTH_INTERVAL_SECS,
        get: |c| c.health_interval_secs,
        set_field: |c, v| c.health_interval_secs = v,
    }
}

/// Create a handler for the `sidebar_width` setting.
pub fn sidebar_width_handler() -> NumberHandler {
    NumberHandler {
        key: "sidebar_width",
        hint: "To change the initial sidebar width, give a number of columns:",
        example: "agentchat set sidebar_width 40",
        min: u64::from(MIN_SIDEBAR_WIDTH),
        max: u64::from(MAX_SIDEBAR_WIDTH),
        default: u64::from(DEFAULT_SIDEBAR_WIDTH),
        get: |c| c.sidebar_width.map(u64::from),
        // The handler range keeps values within u16.
        set_field: |c, v| c.sidebar_width = v.and_then(|v| u16::try_from(v).ok()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sidebar_width_enforces_range() {
        let handler = sidebar_width_handler();
        let mut config = Config::default();

        assert!(matches!(
            handler.set(&mut config, &["10".to_string()]),
            Err(SettingError::InvalidNumber { min: 28, max: 60, .. })
        ));
        assert!(matches!(
            handler.set(&mut config, &["wide".to_string()]),
            Err(SettingError::InvalidNumber { .. })
        ));

        handler
            .set(&mut config, &["45".to_string()])
            .expect("valid width");
        assert_eq!(config.sidebar_width, Some(45));
        assert_eq!(handler.format(&config), "  sidebar_width: 45");
    }

    #[test]
    fn health_interval_unset_reports_default() {
        let handler = health_interval_handler();
        let mut config = Config {
            health_interval_secs: Some(5),
            ..Default::default()
        };
        assert_eq!(
            handler.unset(&mut config),
            "✅ Unset health_interval_secs (will use default: 30)"
        );
        assert_eq!(config.health_interval_secs, None);
    }
}
