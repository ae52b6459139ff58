//! Gauge panel: one line gauge per metric plus a trend strip.
//!
//! Falls back to gauges only when the panel is too short for trends.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, LineGauge, Paragraph},
    Frame,
};

use supportsync_sim::{GaugeReading, GaugeUnit};

const TREND_GLYPHS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Render recent values as a strip of block glyphs scaled to `[min, max]`.
pub fn trend_glyphs(history: &[f64], min: f64, max: f64) -> String {
    let span = max - min;
    history
        .iter()
        .map(|&v| {
            if !v.is_finite() || span <= 0.0 {
                return TREND_GLYPHS[0];
            }
            let ratio = ((v - min) / span).clamp(0.0, 1.0);
            let idx = (ratio * (TREND_GLYPHS.len() - 1) as f64).round() as usize;
            TREND_GLYPHS[idx]
        })
        .collect()
}

/// Colour for a reading: counts stay cyan, percentages turn yellow in the
/// bottom quarter of their range.
fn reading_color(reading: &GaugeReading) -> Color {
    match reading.unit {
        GaugeUnit::Count => Color::Cyan,
        GaugeUnit::Percent if reading.ratio() < 0.25 => Color::Yellow,
        GaugeUnit::Percent => Color::Green,
    }
}

pub fn render_gauges(f: &mut Frame, area: Rect, gauges: &[GaugeReading]) {
    let block = Block::default().borders(Borders::ALL).title("LIVE METRICS");
    let inner = block.inner(area);
    f.render_widget(block, area);

    if inner.width == 0 || inner.height == 0 || gauges.is_empty() {
        return;
    }

    // Two rows per gauge (gauge + trend) when there is room, one otherwise.
    let with_trends = inner.height as usize >= gauges.len() * 2;
    let rows_per = if with_trends { 2 } else { 1 };
    let constraints: Vec<Constraint> = gauges
        .iter()
        .map(|_| Constraint::Length(rows_per))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();
    let rows = Layout::vertical(constraints).split(inner);

    for (reading, row) in gauges.iter().zip(rows.iter()) {
        if with_trends {
            let parts = Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).split(*row);
            render_line_gauge(f, parts[0], reading);
            render_trend(f, parts[1], reading);
        } else {
            render_line_gauge(f, *row, reading);
        }
    }
}

fn render_line_gauge(f: &mut Frame, area: Rect, reading: &GaugeReading) {
    let label = format!("{:<18} {:>7}", reading.label, reading.display());
    let gauge = LineGauge::default()
        .ratio(reading.ratio())
        .label(label)
        .filled_style(Style::default().fg(reading_color(reading)))
        .unfilled_style(Style::default().fg(Color::DarkGray));
    f.render_widget(gauge, area);
}

fn render_trend(f: &mut Frame, area: Rect, reading: &GaugeReading) {
    let line = Line::from(vec![
        Span::styled(format!("{:<19}", "  trend"), Style::default().fg(Color::DarkGray)),
        Span::styled(
            trend_glyphs(&reading.history, reading.min, reading.max),
            Style::default().fg(reading_color(reading)),
        ),
    ]);
    f.render_widget(Paragraph::new(line), area);
}
