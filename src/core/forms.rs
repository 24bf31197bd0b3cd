//! Field state for the create-agent and create-team forms.
//!
//! Forms are plain data edited by key actions; the view only renders them.

use std::fmt;

use crate::core::catalog::AVAILABLE_TOOLS;
use crate::core::model::{AgentDraft, TeamDraft, TeamMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormError {
    MissingName,
    MissingRole,
    NoMembers,
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormError::MissingName => write!(f, "Name is required"),
            FormError::MissingRole => write!(f, "Role is required"),
            FormError::NoMembers => write!(f, "Select at least one agent"),
        }
    }
}

impl std::error::Error for FormError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentField {
    Name,
    Role,
    Instructions,
    Tools,
}

impl AgentField {
    const ORDER: [AgentField; 4] = [
        AgentField::Name,
        AgentField::Role,
        AgentField::Instructions,
        AgentField::Tools,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AgentField::Name => "Name",
            AgentField::Role => "Role",
            AgentField::Instructions => "Instructions",
            AgentField::Tools => "Tools",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeamField {
    Name,
    Mode,
    Members,
    Instructions,
}

impl TeamField {
    const ORDER: [TeamField; 4] = [
        TeamField::Name,
        TeamField::Mode,
        TeamField::Members,
        TeamField::Instructions,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TeamField::Name => "Name",
            TeamField::Mode => "Mode",
            TeamField::Members => "Agents",
            TeamField::Instructions => "Instructions",
        }
    }
}

fn step<T: Copy + PartialEq>(order: &[T], current: T, forward: bool) -> T {
    let index = order.iter().position(|item| *item == current).unwrap_or(0);
    let len = order.len();
    let next = if forward {
        (index + 1) % len
    } else {
        (index + len - 1) % len
    };
    order[next]
}

fn move_cursor(cursor: usize, len: usize, delta: isize) -> usize {
    if len == 0 {
        return 0;
    }
    (cursor as isize + delta).clamp(0, len as isize - 1) as usize
}

fn toggle(list: &mut Vec<String>, id: &str) {
    if let Some(pos) = list.iter().position(|existing| existing == id) {
        list.remove(pos);
    } else {
        list.push(id.to_string());
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentForm {
    pub name: String,
    pub role: String,
    pub instructions: String,
    /// Selected tool ids, in toggle order.
    pub tools: Vec<String>,
    pub focus: AgentField,
    pub tool_cursor: usize,
    pub error: Option<FormError>,
}

impl Default for AgentForm {
    fn default() -> Self {
        Self::new()
    }
}

impl AgentForm {
    pub fn new() -> Self {
        Self {
            name: String::new(),
            role: String::new(),
            instructions: String::new(),
            tools: Vec::new(),
            focus: AgentField::Name,
            tool_cursor: 0,
            error: None,
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = step(&AgentField::ORDER, self.focus, true);
    }

    pub fn focus_previous(&mut self) {
        self.focus = step(&AgentField::ORDER, self.focus, false);
    }

    fn focused_text(&mut self) -> Option<&mut String> {
        match self.focus {
            AgentField::Name => Some(&mut self.name),
            AgentField::Role => Some(&mut self.role),
            AgentField::Instructions => Some(&mut self.instructions),
            AgentField::Tools => None,
        }
    }

    /// Types into the focused text field. On the tool list a space toggles the
    /// tool under the cursor.
    pub fn insert_char(&mut self, ch: char) {
        self.error = None;
        match self.focused_text() {
            Some(text) => text.push(ch),
            None if ch == ' ' => self.toggle_tool_at_cursor(),
            None => {}
        }
    }

    pub fn backspace(&mut self) {
        if let Some(text) = self.focused_text() {
            text.pop();
        }
    }

    pub fn move_tool_cursor(&mut self, delta: isize) {
        self.tool_cursor = move_cursor(self.tool_cursor, AVAILABLE_TOOLS.len(), delta);
    }

    pub fn toggle_tool_at_cursor(&mut self) {
        if let Some(tool) = AVAILABLE_TOOLS.get(self.tool_cursor) {
            toggle(&mut self.tools, tool.id);
        }
    }

    pub fn has_tool(&self, id: &str) -> bool {
        self.tools.iter().any(|tool| tool == id)
    }

    /// Validates the form. The failure is also kept on the form for display.
    pub fn submit(&mut self) -> Result<AgentDraft, FormError> {
        let name = self.name.trim();
        let role = self.role.trim();
        let result = if name.is_empty() {
            Err(FormError::MissingName)
        } else if role.is_empty() {
            Err(FormError::MissingRole)
        } else {
            Ok(AgentDraft {
                name: name.to_string(),
                role: role.to_string(),
                instructions: self.instructions.trim().to_string(),
                tools: self.tools.clone(),
            })
        };
        self.error = result.as_ref().err().copied();
        result
    }
}

/// One selectable team member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberOption {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamForm {
    pub name: String,
    pub mode: TeamMode,
    /// Selected agent ids, in toggle order.
    pub agents: Vec<String>,
    pub instructions: String,
    pub candidates: Vec<MemberOption>,
    pub focus: TeamField,
    pub member_cursor: usize,
    pub error: Option<FormError>,
}

impl TeamForm {
    pub fn new(candidates: Vec<MemberOption>) -> Self {
        Self {
            name: String::new(),
            mode: TeamMode::default(),
            agents: Vec::new(),
            instructions: String::new(),
            candidates,
            focus: TeamField::Name,
            member_cursor: 0,
            error: None,
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = step(&TeamField::ORDER, self.focus, true);
    }

    pub fn focus_previous(&mut self) {
        self.focus = step(&TeamField::ORDER, self.focus, false);
    }

    fn focused_text(&mut self) -> Option<&mut String> {
        match self.focus {
            TeamField::Name => Some(&mut self.name),
            TeamField::Instructions => Some(&mut self.instructions),
            TeamField::Mode | TeamField::Members => None,
        }
    }

    /// Types into the focused text field. On the member list a space toggles
    /// the agent under the cursor.
    pub fn insert_char(&mut self, ch: char) {
        self.error = None;
        let on_members = self.focus == TeamField::Members;
        match self.focused_text() {
            Some(text) => text.push(ch),
            None if on_members && ch == ' ' => self.toggle_member_at_cursor(),
            None => {}
        }
    }

    pub fn backspace(&mut self) {
        if let Some(text) = self.focused_text() {
            text.pop();
        }
    }

    pub fn cycle_mode(&mut self, forward: bool) {
        self.mode = if forward {
            self.mode.next()
        } else {
            self.mode.previous()
        };
    }

    pub fn move_member_cursor(&mut self, delta: isize) {
        self.member_cursor = move_cursor(self.member_cursor, self.candidates.len(), delta);
    }

    pub fn toggle_member_at_cursor(&mut self) {
        if let Some(candidate) = self.candidates.get(self.member_cursor) {
            let id = candidate.id.clone();
            toggle(&mut self.agents, &id);
        }
    }

    pub fn has_member(&self, id: &str) -> bool {
        self.agents.iter().any(|agent| agent == id)
    }

    pub fn submit(&mut self) -> Result<TeamDraft, FormError> {
        let name = self.name.trim();
        let result = if name.is_empty() {
            Err(FormError::MissingName)
        } else if self.agents.is_empty() {
            Err(FormError::NoMembers)
        } else {
            Ok(TeamDraft {
                name: name.to_string(),
                mode: self.mode,
                agents: self.agents.clone(),
                instructions: self.instructions.trim().to_string(),
            })
        };
        self.error = result.as_ref().err().copied();
        result
    }
}
