use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Backend root used when neither the flag, the environment, nor the config
/// file names one.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api";
pub const DEFAULT_HEALTH_INTERVAL_SECS: u64 = 30;
pub const DEFAULT_SIDEBAR_WIDTH: u16 = 32;
pub const MIN_SIDEBAR_WIDTH: u16 = 28;
pub const MAX_SIDEBAR_WIDTH: u16 = 60;

/// Persisted user preferences. Every key is optional; unset keys fall back to
/// the defaults above.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct Config {
    /// Root of the agent API, including any path prefix such as `/api`
    pub base_url: Option<String>,
    /// Seconds between backend health checks
    pub health_interval_secs: Option<u64>,
    /// Initial sidebar width in columns
    pub sidebar_width: Option<u16>,
    /// Start sessions with reasoning mode enabled
    pub reasoning: Option<bool>,
}

impl Config {
    /// Resolves the backend root. An explicit override (flag or environment)
    /// wins over the file.
    pub fn resolve_base_url(&self, override_url: Option<&str>) -> String {
        override_url
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .or(self.base_url.as_deref())
            .unwrap_or(DEFAULT_BASE_URL)
            .to_string()
    }

    pub fn health_interval(&self) -> Duration {
        let secs = self
            .health_interval_secs
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_HEALTH_INTERVAL_SECS);
        Duration::from_secs(secs)
    }

    pub fn sidebar_width(&self) -> u16 {
        clamp_sidebar_width(self.sidebar_width.unwrap_or(DEFAULT_SIDEBAR_WIDTH))
    }

    pub fn reasoning(&self) -> bool {
        self.reasoning.unwrap_or(false)
    }
}

pub fn clamp_sidebar_width(width: u16) -> u16 {
    width.clamp(MIN_SIDEBAR_WIDTH, MAX_SIDEBAR_WIDTH)
}

/// Get a user-friendly display string for a path
/// Converts absolute paths to use ~ notation on Unix-like systems when possible
///
/// # Examples
/// - Unix: `/home/user/.config/agentchat/config.toml` → `~/.config/agentchat/config.toml`
/// - Windows: paths are shown unchanged
pub fn path_display<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();

    #[cfg(unix)]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let home_path = PathBuf::from(home);
            if let Ok(relative) = path.strip_prefix(&home_path) {
                return format!("~/{}", relative.display());
            }
        }
    }

    path.display().to_string()
}
