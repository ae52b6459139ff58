use ratatui::layout::{Constraint, Layout, Rect};

/// Screen regions of the dashboard.
#[derive(Debug, Clone, Copy)]
pub struct DashboardRects {
    pub top: Rect,
    pub gauges: Rect,
    pub activity: Rect,
    pub recorder: Rect,
    pub log: Rect,
}

/// Split `area` into a top bar, a gauges/activity body, and a
/// recorder/log footer of `footer_height` rows.
pub fn dashboard_layout(area: Rect, footer_height: u16) -> DashboardRects {
    let footer_height = footer_height.max(3).min(area.height.saturating_sub(2).max(3));
    let rows = Layout::vertical([
        Constraint::Length(1),             // top bar
        Constraint::Min(1),                // body
        Constraint::Length(footer_height), // footer
    ])
    .split(area);

    let body = Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(rows[1]);
    let footer = Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(rows[2]);

    DashboardRects {
        top: rows[0],
        gauges: body[0],
        activity: body[1],
        recorder: footer[0],
        log: footer[1],
    }
}
