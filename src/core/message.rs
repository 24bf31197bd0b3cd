use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Author label for client-generated notices.
pub const SYSTEM_AUTHOR: &str = "System";
/// Author label for reasoning narration entries.
pub const REASONING_AUTHOR: &str = "Reasoning Process";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum MessageKind {
    User,
    Agent,
    Reasoning,
    Tool,
}

impl MessageKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MessageKind::User => "user",
            MessageKind::Agent => "agent",
            MessageKind::Reasoning => "reasoning",
            MessageKind::Tool => "tool",
        }
    }
}

impl TryFrom<&str> for MessageKind {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "user" => Ok(MessageKind::User),
            "agent" => Ok(MessageKind::Agent),
            "reasoning" => Ok(MessageKind::Reasoning),
            "tool" => Ok(MessageKind::Tool),
            _ => Err(format!("invalid message type: {value}")),
        }
    }
}

impl TryFrom<String> for MessageKind {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

impl From<MessageKind> for String {
    fn from(value: MessageKind) -> Self {
        value.as_str().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(String);

impl MessageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: MessageId,
    #[serde(rename = "type")]
    pub kind: MessageKind,
    pub content: String,
    pub timestamp: DateTime<Local>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_name: Option<String>,
    #[serde(default)]
    pub is_streaming: bool,
}

impl Message {
    pub fn is_user(&self) -> bool {
        self.kind == MessageKind::User
    }

    pub fn is_system(&self) -> bool {
        self.kind == MessageKind::Agent && self.agent_name.as_deref() == Some(SYSTEM_AUTHOR)
    }

    /// Display label for the author column.
    pub fn label(&self) -> &str {
        match (self.kind, self.agent_name.as_deref()) {
            (MessageKind::User, _) => "You",
            (_, Some(name)) => name,
            (MessageKind::Reasoning, None) => REASONING_AUTHOR,
            (MessageKind::Tool, None) => SYSTEM_AUTHOR,
            (MessageKind::Agent, None) => "Agent",
        }
    }

    /// Plain-text rendering used outside the terminal UI.
    pub fn to_plain_text(&self) -> String {
        format!("{}: {}", self.label(), self.content)
    }
}

/// A message about to be appended. The store assigns an id when none is given.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMessage {
    pub id: Option<MessageId>,
    pub kind: MessageKind,
    pub content: String,
    pub timestamp: DateTime<Local>,
    pub agent_name: Option<String>,
    pub is_streaming: bool,
}

impl NewMessage {
    pub fn new(kind: MessageKind, content: impl Into<String>) -> Self {
        Self {
            id: None,
            kind,
            content: content.into(),
            timestamp: Local::now(),
            agent_name: None,
            is_streaming: false,
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageKind::User, content)
    }

    pub fn agent(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(MessageKind::Agent, content).with_agent_name(name)
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::agent(SYSTEM_AUTHOR, content)
    }

    pub fn reasoning(content: impl Into<String>) -> Self {
        Self::new(MessageKind::Reasoning, content).with_agent_name(REASONING_AUTHOR)
    }

    pub fn tool_call(tool_name: &str) -> Self {
        let tool_name = if tool_name.is_empty() {
            "unknown"
        } else {
            tool_name
        };
        Self::new(MessageKind::Tool, format!("Using tool: {tool_name}"))
            .with_agent_name(SYSTEM_AUTHOR)
    }

    /// An empty agent reply that is filled in while the response streams.
    pub fn placeholder(name: impl Into<String>) -> Self {
        let mut message = Self::agent(name, "");
        message.is_streaming = true;
        message
    }

    pub fn with_id(mut self, id: MessageId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_agent_name(mut self, name: impl Into<String>) -> Self {
        self.agent_name = Some(name.into());
        self
    }

    pub(crate) fn into_message(self, id: MessageId) -> Message {
        Message {
            id,
            kind: self.kind,
            content: self.content,
            timestamp: self.timestamp,
            agent_name: self.agent_name,
            is_streaming: self.is_streaming,
        }
    }
}

/// Shallow update applied to a message by id. `None` leaves a field alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessagePatch {
    pub content: Option<String>,
    pub is_streaming: Option<bool>,
    pub agent_name: Option<String>,
}

impl MessagePatch {
    pub fn content(content: impl Into<String>, is_streaming: bool) -> Self {
        Self {
            content: Some(content.into()),
            is_streaming: Some(is_streaming),
            agent_name: None,
        }
    }

    pub fn finish_streaming() -> Self {
        Self {
            is_streaming: Some(false),
            ..Self::default()
        }
    }

    pub(crate) fn apply(self, message: &mut Message) {
        if let Some(content) = self.content {
            message.content = content;
        }
        if let Some(is_streaming) = self.is_streaming {
            message.is_streaming = is_streaming;
        }
        if let Some(agent_name) = self.agent_name {
            message.agent_name = Some(agent_name);
        }
    }
}
