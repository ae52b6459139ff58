use std::time::Duration;

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use supportsync_sim::format::format_delay;

/// What the voice panel is showing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RecorderView {
    #[default]
    Idle,
    Recording {
        remaining: Duration,
    },
    /// Last resolved transcript, kept until the next recording starts.
    Transcript {
        text: String,
    },
}

impl RecorderView {
    pub fn is_recording(&self) -> bool {
        matches!(self, RecorderView::Recording { .. })
    }
}

pub fn render_recorder(f: &mut Frame, area: Rect, view: &RecorderView) {
    let title_style = if view.is_recording() {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled("VOICE DOCUMENTATION", title_style));

    let hint = Line::from(Span::styled(
        "r record/cancel  s start/stop  f refresh  tab filter  q quit",
        Style::default().fg(Color::DarkGray),
    ));

    let lines = match view {
        RecorderView::Idle => vec![Line::from("Press r to record a note"), hint],
        RecorderView::Recording { remaining } => vec![
            Line::from(vec![
                Span::styled("● ", Style::default().fg(Color::Red)),
                Span::raw(format!("Recording... {}", format_delay(*remaining))),
            ]),
            hint,
        ],
        RecorderView::Transcript { text } => vec![
            Line::from(Span::styled(
                "Transcript",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(text.as_str()),
            hint,
        ],
    };

    let body = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(block);
    f.render_widget(body, area);
}
