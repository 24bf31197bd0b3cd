//! Settings management for CLI set/unset commands.
//!
//! Each configuration key has a handler that parses and validates its value,
//! clears it, and formats it for display:
//!
//! - Boolean settings (`reasoning`)
//! - Numeric settings with a range (`health_interval_secs`, `sidebar_width`)
//! - URL settings (`base_url`)

pub mod error;
pub mod handlers;
pub mod helpers;
pub mod registry;

pub use error::SettingError;
pub use registry::SettingRegistry;

use crate::core::config::data::Config;

/// Trait for handling a configuration setting.
///
/// Handlers edit an in-memory [`Config`]; the caller loads and saves it.
pub trait SettingHandler: Send + Sync {
    /// Returns the configuration key this handler manages.
    fn key(&self) -> &'static str;

    /// Set the configuration value from the arguments after the key.
    ///
    /// Returns a success message to display, or an error.
    fn set(&self, config: &mut Config, args: &[String]) -> Result<String, SettingError>;

    /// Unset (clear) the configuration value.
    fn unset(&self, config: &mut Config) -> String;

    /// Format the current value for display in `agentchat set` output.
    fn format(&self, config: &Config) -> String;
}
