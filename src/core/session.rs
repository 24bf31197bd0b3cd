//! The single live chat session plus the agent/team registries.
//!
//! [`SessionStore`] is constructed explicitly and handed to the view layer;
//! every mutation is synchronous and last-writer-wins. Exactly one logical
//! writer (the event loop) touches it.

use tracing::{debug, warn};

use crate::core::catalog::{predefined_agents, predefined_teams};
use crate::core::message::{Message, MessageId, MessagePatch, NewMessage};
use crate::core::model::{Agent, AgentDraft, ChatTarget, Selection, Team, TeamDraft};

/// Display name for team members whose id matches no known agent.
pub const UNKNOWN_MEMBER: &str = "unknown";

#[derive(Debug, Clone, PartialEq)]
pub struct ChatSession {
    pub id: String,
    pub selection: Selection,
    pub messages: Vec<Message>,
    pub reasoning_enabled: bool,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self {
            id: "default".to_string(),
            selection: Selection::None,
            messages: Vec::new(),
            reasoning_enabled: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SessionStore {
    session: ChatSession,
    predefined_agents: Vec<Agent>,
    predefined_teams: Vec<Team>,
    custom_agents: Vec<Agent>,
    custom_teams: Vec<Team>,
    sending: bool,
    next_message_seq: u64,
    next_custom_seq: u64,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    /// A store seeded with the built-in agents and teams.
    pub fn new() -> Self {
        Self::with_catalog(predefined_agents(), predefined_teams())
    }

    /// A store seeded with the given predefined entities. Their `is_custom`
    /// flag is forced off.
    pub fn with_catalog(agents: Vec<Agent>, teams: Vec<Team>) -> Self {
        let predefined_agents = agents
            .into_iter()
            .map(|agent| Agent {
                is_custom: false,
                ..agent
            })
            .collect();
        let predefined_teams = teams
            .into_iter()
            .map(|team| Team {
                is_custom: false,
                ..team
            })
            .collect();

        Self {
            session: ChatSession::default(),
            predefined_agents,
            predefined_teams,
            custom_agents: Vec::new(),
            custom_teams: Vec::new(),
            sending: false,
            next_message_seq: 0,
            next_custom_seq: 0,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.session.messages
    }

    pub fn message(&self, id: &MessageId) -> Option<&Message> {
        self.session.messages.iter().find(|message| &message.id == id)
    }

    pub fn selection(&self) -> &Selection {
        &self.session.selection
    }

    pub fn reasoning_enabled(&self) -> bool {
        self.session.reasoning_enabled
    }

    pub fn set_reasoning(&mut self, enabled: bool) {
        self.session.reasoning_enabled = enabled;
    }

    pub fn is_sending(&self) -> bool {
        self.sending
    }

    pub(crate) fn set_sending(&mut self, sending: bool) {
        self.sending = sending;
    }

    // Messages

    /// Appends a message and returns its id. A missing or already-used id is
    /// replaced with a fresh one.
    pub fn add_message(&mut self, message: NewMessage) -> MessageId {
        let id = match message.id.clone() {
            Some(id) if self.message(&id).is_none() => id,
            Some(id) => {
                warn!(%id, "duplicate message id supplied; assigning a fresh one");
                self.next_message_id()
            }
            None => self.next_message_id(),
        };
        self.session.messages.push(message.into_message(id.clone()));
        id
    }

    /// Shallow-merges `patch` into the message with `id`.
    pub fn update_message(&mut self, id: &MessageId, patch: MessagePatch) -> bool {
        match self
            .session
            .messages
            .iter_mut()
            .find(|message| &message.id == id)
        {
            Some(message) => {
                patch.apply(message);
                true
            }
            None => {
                debug!(%id, "update for unknown message ignored");
                false
            }
        }
    }

    fn next_message_id(&mut self) -> MessageId {
        loop {
            self.next_message_seq += 1;
            let candidate = MessageId::new(format!(
                "{}-{}",
                chrono::Local::now().timestamp_millis(),
                self.next_message_seq
            ));
            if self.message(&candidate).is_none() {
                return candidate;
            }
        }
    }

    // Selection

    /// Selects an agent and clears any selected team. `None` clears the
    /// selection. Unknown ids are rejected without changing anything.
    pub fn set_selected_agent(&mut self, id: Option<&str>) -> bool {
        match id {
            None => {
                self.session.selection = Selection::None;
                true
            }
            Some(id) if self.find_agent(id).is_some() => {
                self.session.selection = Selection::Agent(id.to_string());
                true
            }
            Some(id) => {
                debug!(id, "cannot select unknown agent");
                false
            }
        }
    }

    /// Selects a team and clears any selected agent. `None` clears the
    /// selection. Unknown ids are rejected without changing anything.
    pub fn set_selected_team(&mut self, id: Option<&str>) -> bool {
        match id {
            None => {
                self.session.selection = Selection::None;
                true
            }
            Some(id) if self.find_team(id).is_some() => {
                self.session.selection = Selection::Team(id.to_string());
                true
            }
            Some(id) => {
                debug!(id, "cannot select unknown team");
                false
            }
        }
    }

    pub fn toggle_reasoning(&mut self) -> bool {
        self.session.reasoning_enabled = !self.session.reasoning_enabled;
        self.session.reasoning_enabled
    }

    pub fn target(&self) -> Option<ChatTarget> {
        self.session.selection.target()
    }

    pub fn selected_agent(&self) -> Option<&Agent> {
        self.session
            .selection
            .agent_id()
            .and_then(|id| self.find_agent(id))
    }

    pub fn selected_team(&self) -> Option<&Team> {
        self.session
            .selection
            .team_id()
            .and_then(|id| self.find_team(id))
    }

    /// Name of whichever entity is selected.
    pub fn selected_name(&self) -> Option<&str> {
        self.selected_agent()
            .map(|agent| agent.name.as_str())
            .or_else(|| self.selected_team().map(|team| team.name.as_str()))
    }

    // Registries

    pub fn predefined_agents(&self) -> &[Agent] {
        &self.predefined_agents
    }

    pub fn custom_agents(&self) -> &[Agent] {
        &self.custom_agents
    }

    pub fn custom_teams(&self) -> &[Team] {
        &self.custom_teams
    }

    /// Predefined agents first, then custom ones in creation order.
    pub fn all_agents(&self) -> impl Iterator<Item = &Agent> {
        self.predefined_agents.iter().chain(self.custom_agents.iter())
    }

    pub fn all_teams(&self) -> impl Iterator<Item = &Team> {
        self.predefined_teams.iter().chain(self.custom_teams.iter())
    }

    pub fn find_agent(&self, id: &str) -> Option<&Agent> {
        self.all_agents().find(|agent| agent.id == id)
    }

    pub fn find_team(&self, id: &str) -> Option<&Team> {
        self.all_teams().find(|team| team.id == id)
    }

    pub fn team_member_names(&self, team: &Team) -> Vec<String> {
        team.agents
            .iter()
            .map(|id| {
                self.find_agent(id)
                    .map(|agent| agent.name.clone())
                    .unwrap_or_else(|| UNKNOWN_MEMBER.to_string())
            })
            .collect()
    }

    pub fn add_custom_agent(&mut self, draft: AgentDraft) -> String {
        let id = self.next_custom_id("agent");
        debug!(%id, name = %draft.name, "custom agent created");
        self.custom_agents.push(Agent {
            id: id.clone(),
            name: draft.name,
            role: draft.role,
            instructions: draft.instructions,
            tools: draft.tools,
            is_custom: true,
        });
        id
    }

    pub fn add_custom_team(&mut self, draft: TeamDraft) -> String {
        let id = self.next_custom_id("team");
        debug!(%id, name = %draft.name, mode = %draft.mode, "custom team created");
        self.custom_teams.push(Team {
            id: id.clone(),
            name: draft.name,
            mode: draft.mode,
            agents: draft.agents,
            instructions: draft.instructions,
            is_custom: true,
        });
        id
    }

    /// Removes a custom agent. Predefined agents are never removed. Removing
    /// the selected agent clears the selection.
    pub fn remove_custom_agent(&mut self, id: &str) -> bool {
        let before = self.custom_agents.len();
        self.custom_agents.retain(|agent| agent.id != id);
        let removed = self.custom_agents.len() != before;
        if removed && self.session.selection.agent_id() == Some(id) {
            self.session.selection = Selection::None;
        }
        removed
    }

    /// Removes a custom team. Removing the selected team clears the selection.
    pub fn remove_custom_team(&mut self, id: &str) -> bool {
        let before = self.custom_teams.len();
        self.custom_teams.retain(|team| team.id != id);
        let removed = self.custom_teams.len() != before;
        if removed && self.session.selection.team_id() == Some(id) {
            self.session.selection = Selection::None;
        }
        removed
    }

    fn next_custom_id(&mut self, prefix: &str) -> String {
        loop {
            self.next_custom_seq += 1;
            let candidate = format!(
                "custom-{prefix}-{}-{}",
                chrono::Local::now().timestamp_millis(),
                self.next_custom_seq
            );
            if self.find_agent(&candidate).is_none() && self.find_team(&candidate).is_none() {
                return candidate;
            }
        }
    }
}
