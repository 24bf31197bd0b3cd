//! Interactive session loop.
//!
//! The loop owns the [`App`] and is the only place it is mutated. Terminal
//! input, stream messages, and health observations arrive on channels and are
//! turned into [`AppAction`]s; any [`AppCommand`] that comes back is executed
//! here by spawning a background task.

mod keybindings;
mod lifecycle;

use std::{error::Error, sync::Arc, time::Duration};

use ratatui::crossterm::event::{self, Event, KeyEventKind};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::api::{ApiClient, ChatGateway};
use crate::core::app::{apply_actions, App, AppAction, AppCommand};
use crate::core::chat_stream::{ChatStreamService, StreamMessage};
use crate::core::config::Config;
use crate::core::health::spawn_health_monitor;
use crate::core::session::SessionStore;
use crate::ui::renderer::{max_transcript_scroll, ui};
use crate::ui::theme::Theme;

pub use keybindings::{map_key, map_paste};
pub use lifecycle::{restore_terminal, setup_terminal, ChatTerminal};

pub enum UiEvent {
    Crossterm(Event),
}

/// Translates a terminal event into actions. Key releases are ignored.
pub fn actions_for_event(app: &App, event: Event) -> Vec<AppAction> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => map_key(app, key),
        Event::Paste(text) => map_paste(app, &text),
        _ => Vec::new(),
    }
}

fn execute_commands(
    app: &App,
    commands: Vec<AppCommand>,
    stream_service: &ChatStreamService,
    cancel: &CancellationToken,
) {
    for command in commands {
        match command {
            AppCommand::SpawnStream(request) => {
                debug!(stream_id = app.current_stream_id, "spawning stream");
                stream_service.spawn_stream(request, app.current_stream_id, cancel.child_token());
            }
        }
    }
}

fn spawn_event_reader(event_tx: mpsc::UnboundedSender<UiEvent>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            if let Ok(true) = event::poll(Duration::from_millis(10)) {
                match event::read() {
                    Ok(ev) => {
                        if event_tx.send(UiEvent::Crossterm(ev)).is_err() {
                            break;
                        }
                    }
                    Err(_) => continue,
                }
            } else {
                tokio::task::yield_now().await;
            }
        }
    })
}

/// Drains whatever else is already queued so a burst of chunks costs one
/// redraw.
fn drain_stream_updates(
    rx: &mut mpsc::UnboundedReceiver<(StreamMessage, u64)>,
    actions: &mut Vec<AppAction>,
) {
    while let Ok((message, stream_id)) = rx.try_recv() {
        actions.push(AppAction::Stream { message, stream_id });
    }
}

pub async fn run_chat(base_url: String, config: Config) -> Result<(), Box<dyn Error>> {
    info!(base_url = %base_url, "starting chat session");
    let gateway: Arc<dyn ChatGateway> = Arc::new(ApiClient::new(base_url));
    let mut app = App::new(SessionStore::new(), &config);
    let theme = Theme::default();
    let cancel = CancellationToken::new();

    let (stream_service, mut stream_rx) = ChatStreamService::new(gateway.clone());
    let (health_tx, mut health_rx) = mpsc::unbounded_channel();
    let health_handle = spawn_health_monitor(
        gateway,
        config.health_interval(),
        health_tx,
        cancel.child_token(),
    );

    let mut terminal = setup_terminal()?;
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<UiEvent>();
    let event_reader_handle = spawn_event_reader(event_tx);

    let result: Result<(), Box<dyn Error>> = 'main_loop: loop {
        if app.should_quit() {
            break 'main_loop Ok(());
        }

        let area = match terminal.draw(|f| ui(f, &app, &theme)) {
            Ok(frame) => frame.area,
            Err(err) => break 'main_loop Err(err.into()),
        };
        app.ui
            .set_max_scroll_offset(max_transcript_scroll(&app, &theme, area));

        let mut actions = Vec::new();
        tokio::select! {
            Some(UiEvent::Crossterm(ev)) = event_rx.recv() => {
                actions.extend(actions_for_event(&app, ev));
            }
            Some((message, stream_id)) = stream_rx.recv() => {
                actions.push(AppAction::Stream { message, stream_id });
                drain_stream_updates(&mut stream_rx, &mut actions);
            }
            Some(status) = health_rx.recv() => {
                actions.push(AppAction::HealthUpdated(status));
            }
            else => break 'main_loop Ok(()),
        }

        let commands = apply_actions(&mut app, actions);
        execute_commands(&app, commands, &stream_service, &cancel);
    };

    cancel.cancel();
    event_reader_handle.abort();
    let _ = health_handle.await;
    restore_terminal(&mut terminal)?;
    info!("chat session ended");

    result
}
