use tracing::debug;

use super::{App, AppAction, AppCommand};
use crate::core::app::ui_state::{sidebar_entries, SidebarEntry};

pub(super) fn handle_sidebar_action(app: &mut App, action: AppAction) -> Option<AppCommand> {
    match action {
        AppAction::SidebarMove { delta } => {
            let len = sidebar_entries(&app.store).len();
            app.ui.move_sidebar_cursor(delta, len);
        }
        AppAction::SidebarSelect => select_entry(app),
        AppAction::SidebarRemove => remove_entry(app),
        AppAction::ResizeSidebar { delta } => {
            let width = app.ui.resize_sidebar(delta);
            debug!(width, "sidebar resized");
        }
        _ => {}
    }
    None
}

fn select_entry(app: &mut App) {
    let selected = match app.selected_sidebar_entry() {
        Some(SidebarEntry::Agent(id)) => app.store.set_selected_agent(Some(&id)),
        Some(SidebarEntry::Team(id)) => app.store.set_selected_team(Some(&id)),
        None => false,
    };
    if selected {
        if let Some(name) = app.store.selected_name() {
            let status = format!("Chatting with {name}");
            app.ui.set_status(status);
        }
    }
}

fn remove_entry(app: &mut App) {
    let Some(entry) = app.selected_sidebar_entry() else {
        return;
    };

    let (removed, name) = match &entry {
        SidebarEntry::Agent(id) => {
            let name = app.store.find_agent(id).map(|agent| agent.name.clone());
            (app.store.remove_custom_agent(id), name)
        }
        SidebarEntry::Team(id) => {
            let name = app.store.find_team(id).map(|team| team.name.clone());
            (app.store.remove_custom_team(id), name)
        }
    };

    if removed {
        app.ui
            .set_status(format!("Removed {}", name.unwrap_or_default()));
        let len = sidebar_entries(&app.store).len();
        app.ui.clamp_sidebar_cursor(len);
    } else {
        app.ui.set_status("Built-in agents and teams cannot be removed");
    }
}

#[cfg(test)]
mod tests {
    use crate::core::app::{apply_action, App, AppAction};
    use crate::core::model::AgentDraft;

    fn add_custom(app: &mut App, name: &str) -> String {
        app.store.add_custom_agent(AgentDraft {
            name: name.to_string(),
            role: "Helper".to_string(),
            ..Default::default()
        })
    }

    #[test]
    fn select_entry_under_cursor() {
        let mut app = App::new_test_app();
        apply_action(&mut app, AppAction::SidebarMove { delta: 2 });
        apply_action(&mut app, AppAction::SidebarSelect);

        assert_eq!(app.store.selection().team_id(), Some("mcp-route"));
        assert!(app.store.selected_agent().is_none());
        assert_eq!(app.ui.status.as_deref(), Some("Chatting with MCP Route Team"));
    }

    #[test]
    fn removing_custom_agent_clears_its_selection() {
        let mut app = App::new_test_app();
        let id = add_custom(&mut app, "Scout");
        // Predefined agents come first, so the custom one follows them.
        apply_action(&mut app, AppAction::SidebarMove { delta: 2 });
        apply_action(&mut app, AppAction::SidebarSelect);
        assert_eq!(app.store.selection().agent_id(), Some(id.as_str()));

        apply_action(&mut app, AppAction::SidebarRemove);
        assert!(app.store.find_agent(&id).is_none());
        assert!(app.store.selection().is_none());
        assert_eq!(app.ui.status.as_deref(), Some("Removed Scout"));
    }

    #[test]
    fn predefined_entries_are_not_removed() {
        let mut app = App::new_test_app();
        apply_action(&mut app, AppAction::SidebarRemove);
        assert!(app.store.find_agent("aws-docs").is_some());
        assert_eq!(
            app.ui.status.as_deref(),
            Some("Built-in agents and teams cannot be removed")
        );
    }

    #[test]
    fn removing_last_entry_clamps_cursor() {
        let mut app = App::new_test_app();
        let team_id = app.store.add_custom_team(crate::core::model::TeamDraft {
            name: "Crew".into(),
            agents: vec!["arxiv".into()],
            ..Default::default()
        });
        apply_action(&mut app, AppAction::SidebarMove { delta: 100 });
        assert_eq!(app.ui.sidebar_cursor, 5);

        apply_action(&mut app, AppAction::SidebarRemove);
        assert!(app.store.find_team(&team_id).is_none());
        assert_eq!(app.ui.sidebar_cursor, 4);
    }

    #[test]
    fn resize_is_clamped() {
        let mut app = App::new_test_app();
        apply_action(&mut app, AppAction::ResizeSidebar { delta: -50 });
        assert_eq!(app.ui.sidebar_width(), 28);
    }
}
