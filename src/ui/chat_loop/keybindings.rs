//! Key-to-action mapping.
//!
//! Resolution order: an open form captures every key except Ctrl+C, then the
//! global chords, then the focused pane.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tui_textarea::{Input, Key};

use crate::core::app::{App, AppAction, Focus};

const SIDEBAR_RESIZE_STEP: i16 = 2;
const PAGE_SCROLL_LINES: i32 = 10;

pub fn map_key(app: &App, key: KeyEvent) -> Vec<AppAction> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    if ctrl && key.code == KeyCode::Char('c') {
        return vec![AppAction::Quit];
    }
    if app.ui.modal.is_some() {
        return map_form_key(key, ctrl).into_iter().collect();
    }

    let global = match key.code {
        KeyCode::Esc => Some(AppAction::Quit),
        KeyCode::Char('r') if ctrl => Some(AppAction::ToggleReasoning),
        KeyCode::Tab | KeyCode::BackTab => Some(AppAction::ToggleFocus),
        KeyCode::Left if alt => Some(AppAction::ResizeSidebar {
            delta: -SIDEBAR_RESIZE_STEP,
        }),
        KeyCode::Right if alt => Some(AppAction::ResizeSidebar {
            delta: SIDEBAR_RESIZE_STEP,
        }),
        KeyCode::PageUp => Some(AppAction::ScrollTranscript {
            lines: PAGE_SCROLL_LINES,
        }),
        KeyCode::PageDown => Some(AppAction::ScrollTranscript {
            lines: -PAGE_SCROLL_LINES,
        }),
        _ => None,
    };
    if let Some(action) = global {
        return vec![action];
    }

    match app.ui.focus {
        Focus::Sidebar => map_sidebar_key(key).into_iter().collect(),
        Focus::Input => vec![map_input_key(key, alt)],
    }
}

/// Pasted text goes to the open form or, when the input has focus, into the
/// textarea. Form fields are single-line so newlines are dropped there.
pub fn map_paste(app: &App, text: &str) -> Vec<AppAction> {
    let text = sanitize_pasted_text(text);
    if text.is_empty() {
        return Vec::new();
    }
    if app.ui.modal.is_some() {
        return text
            .chars()
            .filter(|&ch| ch != '\n')
            .map(|ch| AppAction::FormTypeChar { ch })
            .collect();
    }
    match app.ui.focus {
        Focus::Input => vec![AppAction::PasteText(text)],
        Focus::Sidebar => Vec::new(),
    }
}

pub(crate) fn sanitize_pasted_text(text: &str) -> String {
    text.replace("\r\n", "\n")
        .replace('\r', "\n")
        .replace('\t', "    ")
        .chars()
        .filter(|&c| c == '\n' || !c.is_control())
        .collect()
}

fn map_form_key(key: KeyEvent, ctrl: bool) -> Option<AppAction> {
    let action = match key.code {
        KeyCode::Esc => AppAction::CloseModal,
        KeyCode::Tab => AppAction::FormNextField,
        KeyCode::BackTab => AppAction::FormPreviousField,
        KeyCode::Enter => AppAction::FormSubmit,
        KeyCode::Backspace => AppAction::FormBackspace,
        KeyCode::Up => AppAction::FormMove { delta: -1 },
        KeyCode::Down => AppAction::FormMove { delta: 1 },
        KeyCode::Left => AppAction::FormCycle { forward: false },
        KeyCode::Right => AppAction::FormCycle { forward: true },
        KeyCode::Char(ch) if !ctrl => AppAction::FormTypeChar { ch },
        _ => return None,
    };
    Some(action)
}

fn map_sidebar_key(key: KeyEvent) -> Option<AppAction> {
    let action = match key.code {
        KeyCode::Up | KeyCode::Char('k') => AppAction::SidebarMove { delta: -1 },
        KeyCode::Down | KeyCode::Char('j') => AppAction::SidebarMove { delta: 1 },
        KeyCode::Enter | KeyCode::Char(' ') => AppAction::SidebarSelect,
        KeyCode::Char('a') => AppAction::OpenAgentForm,
        KeyCode::Char('t') => AppAction::OpenTeamForm,
        KeyCode::Char('d') | KeyCode::Delete => AppAction::SidebarRemove,
        _ => return None,
    };
    Some(action)
}

fn map_input_key(key: KeyEvent, alt: bool) -> AppAction {
    match key.code {
        // Alt+Enter inserts a newline instead of sending.
        KeyCode::Enter if alt => AppAction::EditInput(Input {
            key: Key::Enter,
            ..Input::default()
        }),
        KeyCode::Enter => AppAction::SubmitInput,
        _ => AppAction::EditInput(Input::from(key)),
    }
}
