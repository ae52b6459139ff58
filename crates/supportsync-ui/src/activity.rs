use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use supportsync_sim::{ActivityEvent, ActivityFilter, ActivityKind};

fn kind_style(kind: ActivityKind) -> (&'static str, Color) {
    match kind {
        ActivityKind::Success => ("✓", Color::Green),
        ActivityKind::Active => ("●", Color::Blue),
        ActivityKind::Warning => ("!", Color::Yellow),
    }
}

/// Cut `s` to at most `width` display columns, marking the cut with `…`.
pub fn truncate_to_width(s: &str, width: usize) -> String {
    if s.width() <= width {
        return s.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

/// Render the newest-first activity feed, three lines per event, showing
/// only events passing `filter`.
pub fn render_activity(
    f: &mut Frame,
    area: Rect,
    events: &[ActivityEvent],
    filter: ActivityFilter,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("ACTIVITY [{}]", filter.label()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let width = inner.width as usize;
    let mut lines = Vec::new();
    for event in filter.apply(events) {
        let (icon, color) = kind_style(event.kind);
        lines.push(Line::from(vec![
            Span::styled(format!("{icon} "), Style::default().fg(color)),
            Span::styled(
                truncate_to_width(&event.title, width.saturating_sub(2)),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]));
        lines.push(Line::from(format!(
            "  {}",
            truncate_to_width(&event.description, width.saturating_sub(2))
        )));
        lines.push(Line::from(Span::styled(
            format!("  {}", event.timestamp),
            Style::default().fg(Color::DarkGray),
        )));
    }

    if lines.is_empty() {
        let placeholder = if events.is_empty() {
            "No activity yet"
        } else {
            "No matching activity"
        };
        lines.push(Line::from(Span::styled(
            placeholder,
            Style::default().fg(Color::DarkGray),
        )));
    }

    f.render_widget(Paragraph::new(lines), inner);
}
