//! Screen geometry and transcript line layout.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthChar;

use super::theme::Theme;
use crate::core::message::Message;

const HEADER_HEIGHT: u16 = 1;
const STATUS_HEIGHT: u16 = 1;
const MIN_TRANSCRIPT_WIDTH: u16 = 20;
const MAX_INPUT_LINES: u16 = 6;
const BODY_INDENT: &str = "  ";

/// Regions of the main screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppLayout {
    pub header: Rect,
    pub sidebar: Rect,
    pub transcript: Rect,
    pub input: Rect,
    pub status: Rect,
}

/// Splits `area` into header, sidebar, transcript, input, and status rows.
/// The sidebar gives way on terminals too narrow for both panes.
pub fn compute_layout(area: Rect, sidebar_width: u16, input_lines: usize) -> AppLayout {
    let input_height = (input_lines.max(1) as u16).min(MAX_INPUT_LINES) + 2;
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(area);

    let sidebar_width = sidebar_width.min(area.width.saturating_sub(MIN_TRANSCRIPT_WIDTH));
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(sidebar_width), Constraint::Min(0)])
        .split(rows[1]);

    let chat = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(input_height)])
        .split(columns[1]);

    AppLayout {
        header: rows[0],
        sidebar: columns[0],
        transcript: chat[0],
        input: chat[1],
        status: rows[2],
    }
}

/// A `width` x `height` rectangle centered in `area`, shrunk to fit.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Wraps `text` at word boundaries so no line is wider than `width` columns.
/// Words wider than a line are split. Explicit newlines are kept.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return text.split('\n').map(str::to_string).collect();
    }

    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut current = String::new();
        let mut current_width = 0usize;

        for word in paragraph.split(' ') {
            let word_width: usize = word
                .chars()
                .map(|ch| UnicodeWidthChar::width(ch).unwrap_or(0))
                .sum();
            let gap = usize::from(!current.is_empty());

            if current_width + gap + word_width <= width {
                if gap == 1 {
                    current.push(' ');
                }
                current.push_str(word);
                current_width += gap + word_width;
                continue;
            }

            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }

            if word_width <= width {
                current.push_str(word);
                current_width = word_width;
                continue;
            }

            // Split an over-long word across lines.
            for ch in word.chars() {
                let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
                if current_width + ch_width > width && !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                    current_width = 0;
                }
                current.push(ch);
                current_width += ch_width;
            }
        }
        lines.push(current);
    }
    lines
}

/// Renders the transcript to styled lines already wrapped to `width`.
pub fn transcript_lines(messages: &[Message], theme: &Theme, width: u16) -> Vec<Line<'static>> {
    let body_width = usize::from(width).saturating_sub(BODY_INDENT.len());
    let mut lines = Vec::new();

    for (index, message) in messages.iter().enumerate() {
        if index > 0 {
            lines.push(Line::default());
        }
        let (prefix_style, text_style) = theme.message_styles(message);

        let mut header = vec![
            Span::styled(message.label().to_string(), prefix_style),
            Span::styled(
                format!("  {}", message.timestamp.format("%H:%M:%S")),
                theme.timestamp_style,
            ),
        ];
        if message.is_streaming {
            header.push(Span::styled("  ● streaming", theme.streaming_indicator_style));
        }
        lines.push(Line::from(header));

        if message.content.is_empty() {
            if message.is_streaming {
                lines.push(Line::from(Span::styled(
                    format!("{BODY_INDENT}Thinking…"),
                    theme.timestamp_style,
                )));
            }
            continue;
        }
        for row in wrap_text(&message.content, body_width) {
            lines.push(Line::from(Span::styled(
                format!("{BODY_INDENT}{row}"),
                text_style,
            )));
        }
    }
    lines
}

/// Top row to show so the view sits `offset_from_bottom` lines above the end.
pub fn scroll_top(total_lines: usize, viewport_height: u16, offset_from_bottom: u16) -> u16 {
    let max_top = total_lines.saturating_sub(usize::from(viewport_height));
    let top = max_top.saturating_sub(usize::from(offset_from_bottom));
    u16::try_from(top).unwrap_or(u16::MAX)
}
