use ratatui::style::{Color, Modifier, Style};

use crate::core::message::{Message, MessageKind};
use crate::core::model::HealthState;

#[derive(Debug, Clone)]
pub struct Theme {
    // Overall background color to paint the full frame
    pub background_color: Color,

    // Transcript
    pub user_prefix_style: Style,
    pub user_text_style: Style,
    pub agent_prefix_style: Style,
    pub agent_text_style: Style,
    pub reasoning_prefix_style: Style,
    pub reasoning_text_style: Style,
    pub tool_text_style: Style,
    pub system_prefix_style: Style,
    pub system_text_style: Style,
    pub timestamp_style: Style,
    pub streaming_indicator_style: Style,

    // Chrome
    pub title_style: Style,
    pub border_style: Style,
    pub focused_border_style: Style,
    pub healthy_style: Style,
    pub unhealthy_style: Style,
    pub unknown_health_style: Style,
    pub reasoning_on_style: Style,

    // Sidebar
    pub section_style: Style,
    pub selected_entry_style: Style,
    pub cursor_style: Style,
    pub custom_marker_style: Style,
    pub detail_style: Style,

    // Input and forms
    pub input_text_style: Style,
    pub input_cursor_style: Style,
    pub status_style: Style,
    pub error_style: Style,
}

impl Theme {
    pub fn dark_default() -> Self {
        Theme {
            background_color: Color::Reset,

            user_prefix_style: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            user_text_style: Style::default().fg(Color::Cyan),
            agent_prefix_style: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            agent_text_style: Style::default().fg(Color::White),
            reasoning_prefix_style: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
            reasoning_text_style: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::ITALIC),
            tool_text_style: Style::default().fg(Color::Yellow),
            system_prefix_style: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
            system_text_style: Style::default().fg(Color::DarkGray),
            timestamp_style: Style::default().fg(Color::DarkGray),
            streaming_indicator_style: Style::default().fg(Color::Yellow),

            title_style: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            border_style: Style::default().fg(Color::DarkGray),
            focused_border_style: Style::default().fg(Color::Cyan),
            healthy_style: Style::default().fg(Color::Green),
            unhealthy_style: Style::default().fg(Color::Red),
            unknown_health_style: Style::default().fg(Color::Yellow),
            reasoning_on_style: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),

            section_style: Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::BOLD),
            selected_entry_style: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            cursor_style: Style::default().add_modifier(Modifier::REVERSED),
            custom_marker_style: Style::default().fg(Color::Yellow),
            detail_style: Style::default().fg(Color::DarkGray),

            input_text_style: Style::default().fg(Color::White),
            input_cursor_style: Style::default().add_modifier(Modifier::REVERSED),
            status_style: Style::default().fg(Color::Gray),
            error_style: Style::default().fg(Color::Red),
        }
    }

    /// Author-label and body styles for a transcript entry.
    pub fn message_styles(&self, message: &Message) -> (Style, Style) {
        if message.is_system() {
            return (self.system_prefix_style, self.system_text_style);
        }
        match message.kind {
            MessageKind::User => (self.user_prefix_style, self.user_text_style),
            MessageKind::Agent => (self.agent_prefix_style, self.agent_text_style),
            MessageKind::Reasoning => (self.reasoning_prefix_style, self.reasoning_text_style),
            MessageKind::Tool => (self.system_prefix_style, self.tool_text_style),
        }
    }

    pub fn health_style(&self, state: HealthState) -> Style {
        match state {
            HealthState::Healthy => self.healthy_style,
            HealthState::Unhealthy => self.unhealthy_style,
            HealthState::Unknown => self.unknown_health_style,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark_default()
    }
}
