//! Domain shapes shared by the session store, the API gateway, and the view.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// A single backend-driven conversational entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub instructions: String,
    #[serde(default)]
    pub tools: Vec<String>,
    #[serde(default)]
    pub is_custom: bool,
}

/// Coordination strategy for a team. The backend owns the semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TeamMode {
    #[default]
    Route,
    Coordinate,
    Collaborate,
}

impl TeamMode {
    pub const ALL: [TeamMode; 3] = [TeamMode::Route, TeamMode::Coordinate, TeamMode::Collaborate];

    pub fn as_str(self) -> &'static str {
        match self {
            TeamMode::Route => "route",
            TeamMode::Coordinate => "coordinate",
            TeamMode::Collaborate => "collaborate",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            TeamMode::Route => "Route",
            TeamMode::Coordinate => "Coordinate",
            TeamMode::Collaborate => "Collaborate",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            TeamMode::Route => "Route each query to the best-suited agent",
            TeamMode::Coordinate => "Coordinate several agents to solve a problem together",
            TeamMode::Collaborate => "Agents build on each other's answers",
        }
    }

    pub fn next(self) -> Self {
        match self {
            TeamMode::Route => TeamMode::Coordinate,
            TeamMode::Coordinate => TeamMode::Collaborate,
            TeamMode::Collaborate => TeamMode::Route,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            TeamMode::Route => TeamMode::Collaborate,
            TeamMode::Coordinate => TeamMode::Route,
            TeamMode::Collaborate => TeamMode::Coordinate,
        }
    }
}

impl std::fmt::Display for TeamMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named group of agents coordinated under one [`TeamMode`].
///
/// Member ids are not validated against known agents; the view renders a
/// missing id as `unknown`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub mode: TeamMode,
    #[serde(default)]
    pub agents: Vec<String>,
    #[serde(default)]
    pub instructions: String,
    #[serde(default)]
    pub is_custom: bool,
}

/// Field values for a user-created agent. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AgentDraft {
    pub name: String,
    pub role: String,
    pub instructions: String,
    pub tools: Vec<String>,
}

/// Field values for a user-created team. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TeamDraft {
    pub name: String,
    pub mode: TeamMode,
    pub agents: Vec<String>,
    pub instructions: String,
}

/// What the next message is addressed to. Agent and team are exclusive by
/// construction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    None,
    Agent(String),
    Team(String),
}

impl Selection {
    pub fn is_none(&self) -> bool {
        matches!(self, Selection::None)
    }

    pub fn agent_id(&self) -> Option<&str> {
        match self {
            Selection::Agent(id) => Some(id),
            _ => None,
        }
    }

    pub fn team_id(&self) -> Option<&str> {
        match self {
            Selection::Team(id) => Some(id),
            _ => None,
        }
    }

    pub fn target(&self) -> Option<ChatTarget> {
        match self {
            Selection::None => None,
            Selection::Agent(id) => Some(ChatTarget::Agent(id.clone())),
            Selection::Team(id) => Some(ChatTarget::Team(id.clone())),
        }
    }
}

/// Addressee of a chat request; selects the endpoint family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatTarget {
    Agent(String),
    Team(String),
}

impl ChatTarget {
    pub fn id(&self) -> &str {
        match self {
            ChatTarget::Agent(id) | ChatTarget::Team(id) => id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthState {
    Unknown,
    Healthy,
    Unhealthy,
}

impl HealthState {
    pub fn label(self) -> &'static str {
        match self {
            HealthState::Healthy => "System healthy",
            HealthState::Unhealthy => "System unhealthy",
            HealthState::Unknown => "Status unknown",
        }
    }
}

/// Latest backend health observation. No history is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthStatus {
    pub state: HealthState,
    pub last_checked: DateTime<Local>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn agent_wire_shape_is_camel_case_with_defaults() {
        let agent: Agent =
            serde_json::from_str(r#"{"id":"aws-docs","name":"AWS Docs"}"#).expect("agent");
        assert_eq!(agent.id, "aws-docs");
        assert!(agent.tools.is_empty());
        assert!(!agent.is_custom);

        let value = serde_json::to_value(&agent).expect("serialize");
        assert!(value.get("isCustom").is_some());
    }

    #[test]
    fn team_mode_decodes_lowercase_and_cycles() {
        let team: Team = serde_json::from_str(
            r#"{"id":"t","name":"T","mode":"collaborate","agents":["a","b"]}"#,
        )
        .expect("team");
        assert_eq!(team.mode, TeamMode::Collaborate);
        assert_eq!(team.mode.next(), TeamMode::Route);
        assert_eq!(TeamMode::Route.previous(), TeamMode::Collaborate);
    }

    #[test]
    fn selection_projects_to_target() {
        assert_eq!(Selection::None.target(), None);
        assert_eq!(
            Selection::Team("mcp-route".into()).target(),
            Some(ChatTarget::Team("mcp-route".into()))
        );
        assert_eq!(Selection::Agent("arxiv".into()).agent_id(), Some("arxiv"));
        assert_eq!(Selection::Agent("arxiv".into()).team_id(), None);
    }
}
