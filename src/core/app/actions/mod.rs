mod forms;
mod sidebar;
mod streaming;

use tui_textarea::Input;

use super::App;
use crate::core::chat_stream::StreamMessage;
use crate::core::model::HealthStatus;
use crate::core::send_flow::SendRequest;

pub enum AppAction {
    SubmitInput,
    EditInput(Input),
    PasteText(String),
    ToggleReasoning,
    ScrollTranscript { lines: i32 },
    ToggleFocus,
    Quit,

    SidebarMove { delta: isize },
    SidebarSelect,
    SidebarRemove,
    ResizeSidebar { delta: i16 },

    OpenAgentForm,
    OpenTeamForm,
    CloseModal,
    FormNextField,
    FormPreviousField,
    FormTypeChar { ch: char },
    FormBackspace,
    FormMove { delta: isize },
    FormCycle { forward: bool },
    FormSubmit,

    Stream {
        message: StreamMessage,
        stream_id: u64,
    },
    HealthUpdated(HealthStatus),
}

#[derive(Debug, PartialEq, Eq)]
pub enum AppCommand {
    SpawnStream(SendRequest),
}

pub fn apply_actions(
    app: &mut App,
    actions: impl IntoIterator<Item = AppAction>,
) -> Vec<AppCommand> {
    let mut commands = Vec::new();
    for action in actions {
        if let Some(cmd) = apply_action(app, action) {
            commands.push(cmd);
        }
    }
    commands
}

pub fn apply_action(app: &mut App, action: AppAction) -> Option<AppCommand> {
    match action {
        AppAction::SubmitInput
        | AppAction::Stream { .. }
        | AppAction::ToggleReasoning
        | AppAction::HealthUpdated(_) => streaming::handle_streaming_action(app, action),

        AppAction::EditInput(input) => {
            app.ui.status = None;
            app.ui.apply_textarea_edit(|textarea| {
                textarea.input(input);
            });
            None
        }
        AppAction::PasteText(text) => {
            app.ui.status = None;
            app.ui.apply_textarea_edit(|textarea| {
                textarea.insert_str(text);
            });
            None
        }
        AppAction::ScrollTranscript { lines } => {
            app.ui.scroll_by(lines);
            None
        }
        AppAction::ToggleFocus => {
            app.ui.toggle_focus();
            None
        }
        AppAction::Quit => {
            app.ui.exit_requested = true;
            None
        }

        AppAction::SidebarMove { .. }
        | AppAction::SidebarSelect
        | AppAction::SidebarRemove
        | AppAction::ResizeSidebar { .. } => sidebar::handle_sidebar_action(app, action),

        AppAction::OpenAgentForm
        | AppAction::OpenTeamForm
        | AppAction::CloseModal
        | AppAction::FormNextField
        | AppAction::FormPreviousField
        | AppAction::FormTypeChar { .. }
        | AppAction::FormBackspace
        | AppAction::FormMove { .. }
        | AppAction::FormCycle { .. }
        | AppAction::FormSubmit => forms::handle_form_action(app, action),
    }
}
