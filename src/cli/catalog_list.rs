//! Backend catalog listing
//!
//! Prints the agents and teams the backend advertises.

use std::error::Error;

use crate::api::ApiClient;
use crate::core::model::{Agent, Team};
use crate::core::session::UNKNOWN_MEMBER;

pub async fn list_agents(client: &ApiClient) -> Result<(), Box<dyn Error>> {
    let agents = client.get_agents().await?;
    for line in format_agents(&agents) {
        println!("{line}");
    }
    Ok(())
}

pub async fn list_teams(client: &ApiClient) -> Result<(), Box<dyn Error>> {
    let teams = client.get_teams().await?;
    // Member names are a nicety; list ids alone if the agent lookup fails.
    let agents = client.get_agents().await.unwrap_or_default();
    for line in format_teams(&teams, &agents) {
        println!("{line}");
    }
    Ok(())
}

pub fn format_agents(agents: &[Agent]) -> Vec<String> {
    if agents.is_empty() {
        return vec!["No agents available.".to_string()];
    }

    let mut lines = vec!["🤖 Available Agents".to_string(), String::new()];
    for agent in agents {
        lines.push(format!("  {} ({})", agent.name, agent.id));
        if !agent.role.is_empty() {
            lines.push(format!("      {}", agent.role));
        }
        if !agent.tools.is_empty() {
            lines.push(format!("      tools: {}", agent.tools.join(", ")));
        }
    }
    lines
}

pub fn format_teams(teams: &[Team], agents: &[Agent]) -> Vec<String> {
    if teams.is_empty() {
        return vec!["No teams available.".to_string()];
    }

    let mut lines = vec!["👥 Available Teams".to_string(), String::new()];
    for team in teams {
        lines.push(format!(
            "  {} ({}) · {}",
            team.name,
            team.id,
            team.mode.display_name()
        ));
        let members: Vec<&str> = team
            .agents
            .iter()
            .map(|id| {
                agents
                    .iter()
                    .find(|agent| &agent.id == id)
                    .map_or(UNKNOWN_MEMBER, |agent| agent.name.as_str())
            })
            .collect();
        if !members.is_empty() {
            lines.push(format!("      members: {}", members.join(", ")));
        }
    }
    lines
}
