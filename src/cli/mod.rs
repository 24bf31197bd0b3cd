//! Command-line interface parsing and handling
//!
//! This module handles parsing command-line arguments and executing the appropriate commands.

pub mod catalog_list;
pub mod say;
pub mod settings;

use std::error::Error;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::info;

use crate::api::{ApiClient, ChatGateway};
use crate::cli::catalog_list::{list_agents, list_teams};
use crate::cli::say::{run_say, SayOptions};
use crate::cli::settings::{helpers::mutate_config, SettingError, SettingRegistry};
use crate::core::config::data::path_display;
use crate::core::config::Config;
use crate::ui::chat_loop::run_chat;
use crate::utils::logging::init_file_logging;

#[derive(Parser)]
#[command(name = "agentchat", version)]
#[command(about = "A terminal chat client for backend-hosted agents and agent teams")]
#[command(
    long_about = "agentchat is a full-screen terminal chat interface for agents and teams of \
agents served by a backend HTTP API. Replies stream in as they are produced, including \
reasoning steps and tool-call notices.\n\n\
Environment Variables:\n\
  AGENTCHAT_BASE_URL   Backend API base URL (defaults to http://localhost:3000/api)\n\
  RUST_LOG             Log filter used with --log (defaults to info)\n\n\
Controls:\n\
  Tab               Switch focus between the sidebar and the input\n\
  Enter             Select an agent/team (sidebar) or send the message (input)\n\
  Alt+Enter         Insert a newline in the input\n\
  a / t             Create a custom agent / team (sidebar)\n\
  d / Delete        Remove a custom agent or team (sidebar)\n\
  Ctrl+R            Toggle reasoning mode\n\
  Alt+Left/Right    Resize the sidebar\n\
  PageUp/PageDown   Scroll the conversation\n\
  Ctrl+C / Esc      Quit"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Backend API base URL
    #[arg(short = 'u', long, global = true, env = "AGENTCHAT_BASE_URL")]
    pub base_url: Option<String>,

    /// Write diagnostic logs to the specified file
    #[arg(short = 'l', long, global = true)]
    pub log: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the chat interface (default)
    Chat,
    /// Send one message without the interface and print the reply
    Say {
        /// Agent to address (built-in or listed by `agents`)
        #[arg(short = 'a', long, conflicts_with = "team")]
        agent: Option<String>,
        /// Team to address (built-in or listed by `teams`)
        #[arg(short = 't', long)]
        team: Option<String>,
        /// Ask for the reasoning process as well
        #[arg(short = 'r', long)]
        reasoning: bool,
        /// Message text
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        prompt: Vec<String>,
    },
    /// List the agents the backend provides
    Agents,
    /// List the teams the backend provides
    Teams,
    /// Check backend health; exits with status 1 when unhealthy
    Health,
    /// Set configuration values, or print them when no key is given
    Set {
        /// Configuration key to set
        key: Option<String>,
        /// Value to set for the key
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        value: Vec<String>,
    },
    /// Unset configuration values
    Unset {
        /// Configuration key to unset
        key: String,
    },
}

pub fn main() -> Result<(), Box<dyn Error>> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(async_main())
}

async fn async_main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    if let Some(path) = args.log.as_deref() {
        init_file_logging(path)?;
    }

    let command = args.command.unwrap_or(Commands::Chat);
    if let Commands::Set { key, value } = &command {
        return exit_on_setting_error(run_set(&Config::get_config_path()?, key.as_deref(), value));
    }
    if let Commands::Unset { key } = &command {
        return exit_on_setting_error(run_unset(&Config::get_config_path()?, key));
    }

    let config = Config::load()?;
    let base_url = config.resolve_base_url(args.base_url.as_deref());
    info!(base_url = %base_url, "resolved backend");

    match command {
        Commands::Chat => run_chat(base_url, config).await,
        Commands::Say {
            agent,
            team,
            reasoning,
            prompt,
        } => {
            run_say(
                &base_url,
                SayOptions {
                    agent,
                    team,
                    reasoning: reasoning || config.reasoning(),
                    prompt,
                },
            )
            .await
        }
        Commands::Agents => list_agents(&ApiClient::new(base_url)).await,
        Commands::Teams => list_teams(&ApiClient::new(base_url)).await,
        Commands::Health => {
            let healthy = ApiClient::new(base_url.as_str()).check_health().await;
            println!("{}", health_line(&base_url, healthy));
            if !healthy {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Set { .. } | Commands::Unset { .. } => Ok(()),
    }
}

fn health_line(base_url: &str, healthy: bool) -> String {
    if healthy {
        format!("✅ {base_url} is healthy")
    } else {
        format!("❌ {base_url} is unhealthy or unreachable")
    }
}

fn exit_on_setting_error(result: Result<String, SettingError>) -> Result<(), Box<dyn Error>> {
    match result {
        Ok(message) => {
            println!("{message}");
            Ok(())
        }
        Err(err) => {
            err.print();
            std::process::exit(err.exit_code());
        }
    }
}

/// Applies `set`. Without a key, or with a key but no value, prints the
/// current configuration instead.
pub fn run_set(path: &Path, key: Option<&str>, value: &[String]) -> Result<String, SettingError> {
    let registry = SettingRegistry::new();
    let Some(key) = key else {
        return describe_config(&registry, path);
    };
    let handler = registry
        .get(key)
        .ok_or_else(|| SettingError::UnknownKey(key.to_string()))?;
    if value.is_empty() {
        return describe_config(&registry, path);
    }
    mutate_config(path, |config| handler.set(config, value))
}

pub fn run_unset(path: &Path, key: &str) -> Result<String, SettingError> {
    let registry = SettingRegistry::new();
    let handler = registry
        .get(key)
        .ok_or_else(|| SettingError::UnknownKey(key.to_string()))?;
    mutate_config(path, |config| Ok(handler.unset(config)))
}

fn describe_config(registry: &SettingRegistry, path: &Path) -> Result<String, SettingError> {
    let config =
        Config::load_from_path(path).map_err(|e| SettingError::ConfigError(e.to_string()))?;
    let mut lines = vec![format!("📄 Configuration ({})", path_display(path))];
    lines.extend(registry.format_all(&config));
    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn values(items: &[&str]) -> Vec<String> {
        items.iter().map(|item| item.to_string()).collect()
    }

    #[test]
    fn parses_say_with_target_and_words() {
        let args = Args::try_parse_from([
            "agentchat", "say", "--team", "mcp-route", "-r", "what", "is", "s3",
        ])
        .expect("parse");
        match args.command {
            Some(Commands::Say {
                team,
                agent,
                reasoning,
                prompt,
            }) => {
                assert_eq!(team.as_deref(), Some("mcp-route"));
                assert!(agent.is_none());
                assert!(reasoning);
                assert_eq!(prompt, values(&["what", "is", "s3"]));
            }
            _ => panic!("expected say"),
        }
    }

    #[test]
    fn say_rejects_agent_and_team_together() {
        let parsed =
            Args::try_parse_from(["agentchat", "say", "-a", "arxiv", "-t", "mcp-route", "hi"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn global_flags_follow_subcommands() {
        let args = Args::try_parse_from([
            "agentchat",
            "health",
            "--base-url",
            "http://backend:9000/api",
            "--log",
            "/tmp/agentchat.log",
        ])
        .expect("parse");
        assert!(matches!(args.command, Some(Commands::Health)));
        assert_eq!(args.base_url.as_deref(), Some("http://backend:9000/api"));
        assert_eq!(args.log, Some(PathBuf::from("/tmp/agentchat.log")));
    }

    #[test]
    fn set_and_unset_round_trip_through_the_file() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");

        run_set(&path, Some("sidebar-width"), &values(&["40"])).expect("set");
        run_set(&path, Some("reasoning"), &values(&["on"])).expect("set");
        let config = Config::load_from_path(&path).expect("load");
        assert_eq!(config.sidebar_width, Some(40));
        assert_eq!(config.reasoning, Some(true));

        run_unset(&path, "sidebar_width").expect("unset");
        let config = Config::load_from_path(&path).expect("load");
        assert_eq!(config.sidebar_width, None);
        assert_eq!(config.reasoning, Some(true));
    }

    #[test]
    fn set_without_value_describes_config() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        let summary = run_set(&path, None, &[]).expect("describe");
        assert!(summary.starts_with("📄 Configuration ("));
        assert!(summary.contains("base_url"));
        assert!(!path.exists());
    }

    #[test]
    fn unknown_keys_and_bad_values_are_errors() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        assert_eq!(
            run_unset(&path, "theme"),
            Err(SettingError::UnknownKey("theme".to_string()))
        );
        assert!(matches!(
            run_set(&path, Some("sidebar_width"), &values(&["500"])),
            Err(SettingError::InvalidNumber { .. })
        ));
        assert!(!path.exists());
    }

    #[test]
    fn health_line_reports_both_states() {
        assert!(health_line("http://x/api", true).contains("healthy"));
        assert!(health_line("http://x/api", false).contains("unreachable"));
    }
}
