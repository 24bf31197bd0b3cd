use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::core::app::{sidebar_entries, App, Focus, Modal, SidebarEntry};
use crate::core::catalog::AVAILABLE_TOOLS;
use crate::core::forms::{AgentField, AgentForm, TeamField, TeamForm};
use crate::ui::layout::{centered_rect, compute_layout, scroll_top, transcript_lines};
use crate::ui::theme::Theme;

const SIDEBAR_HINT: &str = "a: agent  t: team  d: delete";
const INPUT_HINT: &str = "Enter: send  Ctrl+R: reasoning  Tab: sidebar  Ctrl+C: quit";

pub fn ui(f: &mut Frame, app: &App, theme: &Theme) {
    let layout = compute_layout(
        f.area(),
        app.ui.sidebar_width(),
        app.ui.textarea().lines().len(),
    );

    render_header(f, app, theme, layout.header);
    render_sidebar(f, app, theme, layout.sidebar);
    render_transcript(f, app, theme, layout.transcript);
    render_input(f, app, theme, layout.input);
    render_status(f, app, theme, layout.status);

    match &app.ui.modal {
        Some(Modal::CreateAgent(form)) => render_agent_form(f, form, theme),
        Some(Modal::CreateTeam(form)) => render_team_form(f, form, theme),
        None => {}
    }
}

/// How many lines the transcript can scroll up from the bottom when drawn
/// into `area`.
pub fn max_transcript_scroll(app: &App, theme: &Theme, area: Rect) -> u16 {
    let layout = compute_layout(area, app.ui.sidebar_width(), app.ui.textarea().lines().len());
    let inner = transcript_block(theme).inner(layout.transcript);
    let total = transcript_lines(app.store.messages(), theme, inner.width).len();
    let hidden = total.saturating_sub(usize::from(inner.height));
    u16::try_from(hidden).unwrap_or(u16::MAX)
}

fn render_header(f: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let health = app.health;
    let mut spans = vec![
        Span::styled(
            format!(" agentchat v{} ", env!("CARGO_PKG_VERSION")),
            theme.title_style,
        ),
        Span::raw(" "),
        Span::styled("● ", theme.health_style(health.state)),
        Span::styled(health.state.label(), theme.health_style(health.state)),
        Span::styled(
            format!("  Last checked {}", health.last_checked.format("%H:%M:%S")),
            theme.timestamp_style,
        ),
    ];
    if app.store.reasoning_enabled() {
        spans.push(Span::styled("  [Reasoning mode]", theme.reasoning_on_style));
    }
    if let Some(name) = app.store.selected_name() {
        spans.push(Span::styled(format!("  → {name}"), theme.detail_style));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn border_style(app: &App, theme: &Theme, focus: Focus) -> Style {
    if app.ui.modal.is_none() && app.ui.focus == focus {
        theme.focused_border_style
    } else {
        theme.border_style
    }
}

fn render_sidebar(f: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    if area.width == 0 {
        return;
    }
    let store = &app.store;
    let entries = sidebar_entries(store);
    let mut lines: Vec<Line> = Vec::new();
    let mut cursor_line = 0usize;
    let mut in_teams = false;

    lines.push(Line::from(Span::styled("Agents", theme.section_style)));
    for (index, entry) in entries.iter().enumerate() {
        if matches!(entry, SidebarEntry::Team(_)) && !in_teams {
            in_teams = true;
            lines.push(Line::default());
            lines.push(Line::from(Span::styled("Teams", theme.section_style)));
        }

        let (name, is_custom, selected, detail) = match entry {
            SidebarEntry::Agent(id) => match store.find_agent(id) {
                Some(agent) => (
                    agent.name.as_str(),
                    agent.is_custom,
                    store.selection().agent_id() == Some(id.as_str()),
                    agent.role.clone(),
                ),
                None => continue,
            },
            SidebarEntry::Team(id) => match store.find_team(id) {
                Some(team) => (
                    team.name.as_str(),
                    team.is_custom,
                    store.selection().team_id() == Some(id.as_str()),
                    format!(
                        "{} · {}",
                        team.mode.display_name(),
                        store.team_member_names(team).join(", ")
                    ),
                ),
                None => continue,
            },
        };

        let marker = if selected { "▶ " } else { "  " };
        let mut name_style = if selected {
            theme.selected_entry_style
        } else {
            Style::default()
        };
        if index == app.ui.sidebar_cursor && app.ui.focus == Focus::Sidebar {
            name_style = name_style.patch(theme.cursor_style);
            cursor_line = lines.len();
        }
        let mut spans = vec![Span::raw(marker), Span::styled(name.to_string(), name_style)];
        if is_custom {
            spans.push(Span::styled(" *", theme.custom_marker_style));
        }
        lines.push(Line::from(spans));
        if !detail.is_empty() {
            lines.push(Line::from(Span::styled(
                format!("    {detail}"),
                theme.detail_style,
            )));
        }
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(app, theme, Focus::Sidebar))
        .title(" Agents & Teams ")
        .title_bottom(Line::from(Span::styled(SIDEBAR_HINT, theme.detail_style)));
    let inner_height = area.height.saturating_sub(2);
    let scroll = u16::try_from(cursor_line)
        .unwrap_or(u16::MAX)
        .saturating_sub(inner_height.saturating_sub(2));
    f.render_widget(
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0)),
        area,
    );
}

fn transcript_block(theme: &Theme) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style)
        .title(" Conversation ")
}

fn render_transcript(f: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let block = transcript_block(theme);
    let inner = block.inner(area);
    let lines = if app.store.messages().is_empty() {
        vec![Line::from(Span::styled(
            "Select an agent or team, then type a message.",
            theme.detail_style,
        ))]
    } else {
        transcript_lines(app.store.messages(), theme, inner.width)
    };
    let top = scroll_top(lines.len(), inner.height, app.ui.scroll_offset);
    f.render_widget(Paragraph::new(lines).block(block).scroll((top, 0)), area);
}

fn render_input(f: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let title = if app.store.is_sending() {
        " Waiting for reply… "
    } else {
        " Message "
    };
    let mut textarea = app.ui.textarea().clone();
    textarea.set_block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style(app, theme, Focus::Input))
            .title(title),
    );
    textarea.set_style(theme.input_text_style);
    textarea.set_cursor_line_style(Style::default());
    let cursor_style = if app.ui.focus == Focus::Input && app.ui.modal.is_none() {
        theme.input_cursor_style
    } else {
        Style::default()
    };
    textarea.set_cursor_style(cursor_style);
    f.render_widget(&textarea, area);
}

fn render_status(f: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let text = app.ui.status.as_deref().unwrap_or(match app.ui.focus {
        Focus::Sidebar => "↑/↓: move  Enter: select  Tab: input  Alt+←/→: resize",
        Focus::Input => INPUT_HINT,
    });
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(format!(" {text}"), theme.status_style))),
        area,
    );
}

fn field_line<'a>(label: &'a str, value: &str, focused: bool, theme: &Theme) -> Line<'a> {
    let label_style = if focused {
        theme.focused_border_style
    } else {
        theme.section_style
    };
    let cursor = if focused { "▏" } else { "" };
    Line::from(vec![
        Span::styled(format!("{label}: "), label_style),
        Span::raw(format!("{value}{cursor}")),
    ])
}

fn error_line(error: Option<String>, theme: &Theme) -> Line<'static> {
    match error {
        Some(message) => Line::from(Span::styled(message, theme.error_style)),
        None => Line::from(Span::styled(
            "Tab: next field  Space: toggle  Enter: create  Esc: cancel",
            theme.detail_style,
        )),
    }
}

fn render_modal(f: &mut Frame, title: &str, lines: Vec<Line>, theme: &Theme) {
    let height = u16::try_from(lines.len()).unwrap_or(u16::MAX).saturating_add(2);
    let area = centered_rect(64, height, f.area());
    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.focused_border_style)
                .title(title),
        ),
        area,
    );
}

fn render_agent_form(f: &mut Frame, form: &AgentForm, theme: &Theme) {
    let mut lines = vec![
        field_line(AgentField::Name.label(), &form.name, form.focus == AgentField::Name, theme),
        field_line(AgentField::Role.label(), &form.role, form.focus == AgentField::Role, theme),
        field_line(
            AgentField::Instructions.label(),
            &form.instructions,
            form.focus == AgentField::Instructions,
            theme,
        ),
        field_line(AgentField::Tools.label(), "", form.focus == AgentField::Tools, theme),
    ];
    for (index, tool) in AVAILABLE_TOOLS.iter().enumerate() {
        let check = if form.has_tool(tool.id) { "[x]" } else { "[ ]" };
        let style = if form.focus == AgentField::Tools && index == form.tool_cursor {
            theme.cursor_style
        } else {
            Style::default()
        };
        lines.push(Line::from(vec![
            Span::styled(format!("  {check} {}", tool.name), style),
            Span::styled(format!("  {}", tool.description), theme.detail_style),
        ]));
    }
    lines.push(Line::default());
    lines.push(error_line(form.error.map(|e| e.to_string()), theme));
    render_modal(f, " Create Agent ", lines, theme);
}

fn render_team_form(f: &mut Frame, form: &TeamForm, theme: &Theme) {
    let mode_focused = form.focus == TeamField::Mode;
    let mut lines = vec![
        field_line(TeamField::Name.label(), &form.name, form.focus == TeamField::Name, theme),
        field_line(
            TeamField::Mode.label(),
            &format!("◀ {} ▶", form.mode.display_name()),
            mode_focused,
            theme,
        ),
        Line::from(Span::styled(
            format!("  {}", form.mode.description()),
            theme.detail_style,
        )),
        field_line(TeamField::Members.label(), "", form.focus == TeamField::Members, theme),
    ];
    for (index, candidate) in form.candidates.iter().enumerate() {
        let check = if form.has_member(&candidate.id) {
            "[x]"
        } else {
            "[ ]"
        };
        let style = if form.focus == TeamField::Members && index == form.member_cursor {
            theme.cursor_style
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(
            format!("  {check} {}", candidate.name),
            style,
        )));
    }
    lines.push(field_line(
        TeamField::Instructions.label(),
        &form.instructions,
        form.focus == TeamField::Instructions,
        theme,
    ));
    lines.push(Line::default());
    lines.push(error_line(form.error.map(|e| e.to_string()), theme));
    render_modal(f, " Create Team ", lines, theme);
}
