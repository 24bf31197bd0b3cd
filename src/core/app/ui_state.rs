use tui_textarea::TextArea;

use crate::core::config::data::clamp_sidebar_width;
use crate::core::forms::{AgentForm, TeamForm};
use crate::core::session::SessionStore;

/// Which pane receives plain keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Sidebar,
    Input,
}

/// A form drawn over the main layout. While one is open it receives all keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    CreateAgent(AgentForm),
    CreateTeam(TeamForm),
}

/// One selectable row in the sidebar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SidebarEntry {
    Agent(String),
    Team(String),
}

/// Sidebar rows in display order: agents, then teams.
pub fn sidebar_entries(store: &SessionStore) -> Vec<SidebarEntry> {
    store
        .all_agents()
        .map(|agent| SidebarEntry::Agent(agent.id.clone()))
        .chain(store.all_teams().map(|team| SidebarEntry::Team(team.id.clone())))
        .collect()
}

pub struct UiState {
    pub focus: Focus,
    pub sidebar_cursor: usize,
    sidebar_width: u16,
    /// Lines scrolled up from the bottom of the transcript. Zero follows new
    /// output.
    pub scroll_offset: u16,
    /// Largest useful `scroll_offset` for the last drawn frame.
    max_scroll_offset: u16,
    pub modal: Option<Modal>,
    /// One-line feedback shown under the input box.
    pub status: Option<String>,
    pub exit_requested: bool,
    textarea: TextArea<'static>,
}

impl UiState {
    pub fn new(sidebar_width: u16) -> Self {
        Self {
            focus: Focus::Input,
            sidebar_cursor: 0,
            sidebar_width: clamp_sidebar_width(sidebar_width),
            scroll_offset: 0,
            max_scroll_offset: u16::MAX,
            modal: None,
            status: None,
            exit_requested: false,
            textarea: TextArea::default(),
        }
    }

    pub fn sidebar_width(&self) -> u16 {
        self.sidebar_width
    }

    pub fn resize_sidebar(&mut self, delta: i16) -> u16 {
        let widened = (i32::from(self.sidebar_width) + i32::from(delta)).clamp(0, i32::from(u16::MAX));
        self.sidebar_width = clamp_sidebar_width(widened as u16);
        self.sidebar_width
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Sidebar => Focus::Input,
            Focus::Input => Focus::Sidebar,
        };
    }

    pub fn move_sidebar_cursor(&mut self, delta: isize, len: usize) {
        if len == 0 {
            self.sidebar_cursor = 0;
            return;
        }
        let cursor = self.sidebar_cursor as isize + delta;
        self.sidebar_cursor = cursor.clamp(0, len as isize - 1) as usize;
    }

    pub fn clamp_sidebar_cursor(&mut self, len: usize) {
        self.sidebar_cursor = self.sidebar_cursor.min(len.saturating_sub(1));
    }

    pub fn scroll_by(&mut self, lines: i32) {
        let offset =
            (i32::from(self.scroll_offset) + lines).clamp(0, i32::from(self.max_scroll_offset));
        self.scroll_offset = offset as u16;
    }

    /// Records how far the transcript can scroll at the current size and
    /// pulls the offset back inside that range.
    pub fn set_max_scroll_offset(&mut self, max: u16) {
        self.max_scroll_offset = max;
        self.scroll_offset = self.scroll_offset.min(max);
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll_offset = 0;
    }

    pub fn textarea(&self) -> &TextArea<'static> {
        &self.textarea
    }

    /// Current input with lines joined by `\n`.
    pub fn input_text(&self) -> String {
        self.textarea.lines().join("\n")
    }

    pub fn clear_input(&mut self) {
        self.textarea = TextArea::default();
    }

    pub fn set_input_text(&mut self, text: &str) {
        let lines: Vec<String> = if text.is_empty() {
            Vec::new()
        } else {
            text.split('\n').map(str::to_string).collect()
        };
        self.textarea = TextArea::from(lines);
        self.textarea.move_cursor(tui_textarea::CursorMove::Bottom);
        self.textarea.move_cursor(tui_textarea::CursorMove::End);
    }

    pub fn apply_textarea_edit<F>(&mut self, f: F)
    where
        F: FnOnce(&mut TextArea<'static>),
    {
        f(&mut self.textarea);
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }
}
