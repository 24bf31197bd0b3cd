//! View-facing application state.
//!
//! [`App`] bundles the session store with UI state and the latest health
//! observation. The event loop mutates it only through [`apply_action`].

use chrono::Local;

use crate::core::config::data::Config;
use crate::core::message::MessageId;
use crate::core::model::HealthStatus;
use crate::core::session::SessionStore;

pub mod actions;
pub mod ui_state;

pub use actions::{apply_action, apply_actions, AppAction, AppCommand};
pub use ui_state::{sidebar_entries, Focus, Modal, SidebarEntry, UiState};

pub struct App {
    pub store: SessionStore,
    pub ui: UiState,
    pub health: HealthStatus,
    /// Id of the stream whose messages are applied; older ids are stale.
    pub current_stream_id: u64,
    /// Placeholder receiving the reply of the current stream.
    pub pending_response: Option<MessageId>,
}

impl App {
    pub fn new(store: SessionStore, config: &Config) -> Self {
        let mut store = store;
        store.set_reasoning(config.reasoning());
        Self {
            store,
            ui: UiState::new(config.sidebar_width()),
            health: HealthStatus::unknown(Local::now()),
            current_stream_id: 0,
            pending_response: None,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.ui.exit_requested
    }

    pub fn selected_sidebar_entry(&self) -> Option<SidebarEntry> {
        sidebar_entries(&self.store)
            .into_iter()
            .nth(self.ui.sidebar_cursor)
    }

    #[cfg(test)]
    pub fn new_test_app() -> Self {
        Self::new(SessionStore::new(), &Config::default())
    }
}
