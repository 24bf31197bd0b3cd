use tracing::debug;

use super::{App, AppAction, AppCommand};
use crate::core::chat_stream::StreamMessage;
use crate::core::send_flow::{apply_chunk, begin_send, finish_send};

pub(super) fn handle_streaming_action(app: &mut App, action: AppAction) -> Option<AppCommand> {
    match action {
        AppAction::SubmitInput => submit_input(app),
        AppAction::Stream { message, stream_id } => {
            apply_stream_message(app, message, stream_id);
            None
        }
        AppAction::ToggleReasoning => {
            let enabled = app.store.toggle_reasoning();
            app.ui.set_status(if enabled {
                "Reasoning mode on"
            } else {
                "Reasoning mode off"
            });
            None
        }
        AppAction::HealthUpdated(status) => {
            app.health = status;
            None
        }
        _ => None,
    }
}

fn submit_input(app: &mut App) -> Option<AppCommand> {
    let text = app.ui.input_text();
    if text.trim().is_empty() {
        return None;
    }
    if app.store.is_sending() {
        app.ui.set_status("Wait for the current reply to finish");
        return None;
    }

    let request = begin_send(&mut app.store, &text);
    app.ui.scroll_to_bottom();
    let request = request?;

    app.ui.clear_input();
    app.ui.status = None;
    app.current_stream_id += 1;
    app.pending_response = Some(request.response_id.clone());
    Some(AppCommand::SpawnStream(request))
}

fn apply_stream_message(app: &mut App, message: StreamMessage, stream_id: u64) {
    if stream_id != app.current_stream_id {
        debug!(stream_id, current = app.current_stream_id, "dropping stale stream message");
        return;
    }
    let Some(response_id) = app.pending_response.clone() else {
        debug!(stream_id, "stream message without a pending reply");
        return;
    };

    match message {
        StreamMessage::Chunk(chunk) => apply_chunk(&mut app.store, &response_id, chunk),
        StreamMessage::Failed(reason) => {
            finish_send(&mut app.store, &response_id, Some(&reason));
            app.pending_response = None;
        }
        StreamMessage::End => {
            finish_send(&mut app.store, &response_id, None);
            app.pending_response = None;
        }
    }
}
