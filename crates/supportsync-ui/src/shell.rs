use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use supportsync_core::logging::{LogLevel, LogLine};
use supportsync_sim::AlertLevel;

use crate::activity::truncate_to_width;

/// Values shown on the one-row header.
pub struct ShellView<'a> {
    pub running: bool,
    /// Elapsed simulation time, already formatted.
    pub clock: &'a str,
    pub alert: AlertLevel,
    pub status_line: &'a str,
}

fn alert_style(alert: AlertLevel) -> Style {
    match alert {
        AlertLevel::Info => Style::default().fg(Color::Green),
        AlertLevel::Warning => Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        AlertLevel::Critical => Style::default()
            .fg(Color::White)
            .bg(Color::Red)
            .add_modifier(Modifier::BOLD),
    }
}

pub fn render_top_bar(f: &mut Frame, area: Rect, view: &ShellView<'_>) {
    let (state, state_color) = if view.running {
        ("LIVE", Color::Green)
    } else {
        ("PAUSED", Color::DarkGray)
    };

    let line = Line::from(vec![
        Span::styled("SupportSync", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" | "),
        Span::styled(state, Style::default().fg(state_color)),
        Span::raw(format!(" {} | ", view.clock)),
        Span::styled(
            format!("alert: {}", view.alert.as_str()),
            alert_style(view.alert),
        ),
        Span::raw(" | "),
        Span::raw(view.status_line),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn level_color(level: LogLevel) -> Color {
    match level {
        LogLevel::Error => Color::Red,
        LogLevel::Warn => Color::Yellow,
        LogLevel::Info => Color::Green,
        LogLevel::Debug => Color::Cyan,
        LogLevel::Trace => Color::DarkGray,
    }
}

/// Newest log lines at the bottom, one per row.
pub fn render_log_tail(f: &mut Frame, area: Rect, lines: &[LogLine]) {
    let block = Block::default().borders(Borders::ALL).title("LOG");
    let inner = block.inner(area);
    f.render_widget(block, area);

    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let width = inner.width as usize;
    let skip = lines.len().saturating_sub(inner.height as usize);
    let rows: Vec<Line> = lines
        .iter()
        .skip(skip)
        .map(|l| {
            let level = format!("{:<5} ", l.level);
            let rest = width.saturating_sub(level.len());
            Line::from(vec![
                Span::styled(level, Style::default().fg(level_color(l.level))),
                Span::raw(truncate_to_width(&l.message, rest)),
            ])
        })
        .collect();

    f.render_widget(Paragraph::new(rows), inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{render, text};

    fn line(level: LogLevel, message: &str) -> LogLine {
        LogLine {
            level,
            target: "supportsync_sim".into(),
            message: message.into(),
        }
    }

    #[test]
    fn top_bar_shows_state_and_alert() {
        let view = ShellView {
            running: true,
            clock: "01:05",
            alert: AlertLevel::Warning,
            status_line: "recording started",
        };
        let buf = render(100, 1, |f, area| render_top_bar(f, area, &view));
        let t = text(&buf);
        assert!(t.contains("SupportSync | LIVE 01:05"));
        assert!(t.contains("alert: warning"));
        assert!(t.contains("recording started"));
    }

    #[test]
    fn paused_when_not_running() {
        let view = ShellView {
            running: false,
            clock: "00:00",
            alert: AlertLevel::Info,
            status_line: "",
        };
        let buf = render(60, 1, |f, area| render_top_bar(f, area, &view));
        assert!(text(&buf).contains("PAUSED"));
    }

    #[test]
    fn log_tail_keeps_newest_lines() {
        let lines: Vec<LogLine> = (0..10)
            .map(|i| line(LogLevel::Info, &format!("message {i}")))
            .collect();
        // height 5 => 3 inner rows
        let buf = render(40, 5, |f, area| render_log_tail(f, area, &lines));
        let t = text(&buf);
        assert!(t.contains("message 9"));
        assert!(t.contains("message 7"));
        assert!(!t.contains("message 6"));
    }

    #[test]
    fn log_tail_prefixes_level() {
        let lines = vec![line(LogLevel::Warn, "slow tick")];
        let buf = render(40, 3, |f, area| render_log_tail(f, area, &lines));
        assert!(text(&buf).contains("WARN  slow tick"));
    }
}
