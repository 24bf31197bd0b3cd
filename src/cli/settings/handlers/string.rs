//! Text-valued settings.

use crate::cli::settings::error::SettingError;
use crate::cli::settings::helpers::success_set;
use crate::cli::settings::SettingHandler;
use crate::core::config::data::{Config, DEFAULT_BASE_URL};
use crate::utils::url::normalize_base_url;

/// Handler for the `base_url` setting.
pub struct BaseUrlHandler;

impl SettingHandler for BaseUrlHandler {
    fn key(&self) -> &'static str {
        "base_url"
    }

    fn set(&self, config: &mut Config, args: &[String]) -> Result<String, SettingError> {
        let Some(input) = args.first().map(|arg| arg.trim()) else {
            return Err(SettingError::MissingArgs {
                hint: "To point agentchat at a backend, provide its API root:",
                example: "agentchat set base_url http://localhost:8000",
            });
        };

        let lower = input.to_ascii_lowercase();
        if !(lower.starts_with("http://") || lower.starts_with("https://")) {
            return Err(SettingError::InvalidUrl(input.to_string()));
        }

        let url = normalize_base_url(input);
        let message = success_set(self.key(), &url);
        config.base_url = Some(url);
        Ok(message)
    }

    fn unset(&self, config: &mut Config) -> String {
        config.base_url = None;
        format!("✅ Unset base_url (will use default: {DEFAULT_BASE_URL})")
    }

    fn format(&self, config: &Config) -> String {
        match &config.base_url {
            Some(url) => format!("  base_url: {url}"),
            None => format!("  base_url: (unset, default: {DEFAULT_BASE_URL})"),
        }
    }
}
