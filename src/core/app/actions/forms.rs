use super::{App, AppAction, AppCommand};
use crate::core::app::ui_state::{sidebar_entries, Focus, Modal, SidebarEntry};
use crate::core::forms::{AgentField, AgentForm, MemberOption, TeamField, TeamForm};

pub(super) fn handle_form_action(app: &mut App, action: AppAction) -> Option<AppCommand> {
    match action {
        AppAction::OpenAgentForm => {
            app.ui.modal = Some(Modal::CreateAgent(AgentForm::new()));
        }
        AppAction::OpenTeamForm => {
            let candidates = app
                .store
                .all_agents()
                .map(|agent| MemberOption {
                    id: agent.id.clone(),
                    name: agent.name.clone(),
                })
                .collect();
            app.ui.modal = Some(Modal::CreateTeam(TeamForm::new(candidates)));
        }
        AppAction::CloseModal => app.ui.modal = None,
        AppAction::FormSubmit => submit_form(app),
        other => {
            if let Some(modal) = app.ui.modal.as_mut() {
                edit_form(modal, other);
            }
        }
    }
    None
}

fn edit_form(modal: &mut Modal, action: AppAction) {
    match (modal, action) {
        (Modal::CreateAgent(form), AppAction::FormNextField) => form.focus_next(),
        (Modal::CreateAgent(form), AppAction::FormPreviousField) => form.focus_previous(),
        (Modal::CreateAgent(form), AppAction::FormTypeChar { ch }) => form.insert_char(ch),
        (Modal::CreateAgent(form), AppAction::FormBackspace) => form.backspace(),
        (Modal::CreateAgent(form), AppAction::FormMove { delta }) => {
            if form.focus == AgentField::Tools {
                form.move_tool_cursor(delta);
            } else if delta > 0 {
                form.focus_next();
            } else {
                form.focus_previous();
            }
        }

        (Modal::CreateTeam(form), AppAction::FormNextField) => form.focus_next(),
        (Modal::CreateTeam(form), AppAction::FormPreviousField) => form.focus_previous(),
        (Modal::CreateTeam(form), AppAction::FormTypeChar { ch }) => form.insert_char(ch),
        (Modal::CreateTeam(form), AppAction::FormBackspace) => form.backspace(),
        (Modal::CreateTeam(form), AppAction::FormMove { delta }) => {
            if form.focus == TeamField::Members {
                form.move_member_cursor(delta);
            } else if delta > 0 {
                form.focus_next();
            } else {
                form.focus_previous();
            }
        }
        (Modal::CreateTeam(form), AppAction::FormCycle { forward }) => {
            if form.focus == TeamField::Mode {
                form.cycle_mode(forward);
            }
        }
        _ => {}
    }
}

fn submit_form(app: &mut App) {
    let Some(modal) = app.ui.modal.as_mut() else {
        return;
    };

    let created = match modal {
        Modal::CreateAgent(form) => form.submit().ok().map(|draft| {
            let name = draft.name.clone();
            (SidebarEntry::Agent(app.store.add_custom_agent(draft)), name)
        }),
        Modal::CreateTeam(form) => form.submit().ok().map(|draft| {
            let name = draft.name.clone();
            (SidebarEntry::Team(app.store.add_custom_team(draft)), name)
        }),
    };

    // A failed submit leaves the form open with its error set.
    let Some((entry, name)) = created else {
        return;
    };
    app.ui.modal = None;
    app.ui.focus = Focus::Sidebar;
    if let Some(index) = sidebar_entries(&app.store)
        .iter()
        .position(|candidate| *candidate == entry)
    {
        app.ui.sidebar_cursor = index;
    }
    app.ui.set_status(format!("Created {name}"));
}
