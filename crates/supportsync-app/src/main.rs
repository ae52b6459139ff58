mod app;

use std::env;
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event as CEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use supportsync_config::SimulatorConfig;
use supportsync_core::logging;
use supportsync_ui::{
    activity::render_activity,
    gauges::render_gauges,
    layout::dashboard_layout,
    recorder::render_recorder,
    shell::{render_log_tail, render_top_bar, ShellView},
};

use app::{Action, App};

const FOOTER_HEIGHT: u16 = 7;

/// Config file named by `SUPPORTSYNC_CONFIG`, if any.
fn configured_config_path() -> Option<PathBuf> {
    env::var_os("SUPPORTSYNC_CONFIG")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).context("failed to create terminal")
}

fn restore_terminal(mut terminal: Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn main() -> Result<()> {
    let log_tail = logging::init();
    tracing::info!("SupportSync starting up");

    // Config errors surface before the terminal is taken over.
    let config_path = configured_config_path();
    let config = SimulatorConfig::load(config_path.as_deref())?;
    if let Some(path) = &config_path {
        tracing::info!(path = %path.display(), "loaded simulator config");
    }
    let app = App::new(&config, log_tail)?;

    let mut terminal = setup_terminal()?;
    let res = run(&mut terminal, app);
    restore_terminal(terminal)?;
    tracing::info!("SupportSync shutting down");
    res
}

fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, mut app: App) -> Result<()> {
    let poll_timeout = Duration::from_millis(16);
    app.scheduler.start(Instant::now());

    loop {
        let now = Instant::now();
        app.update(now);

        let log_lines = app.log_tail.recent(FOOTER_HEIGHT as usize);
        let clock = app.clock(now);
        terminal.draw(|f| {
            let rects = dashboard_layout(f.area(), FOOTER_HEIGHT);
            let view = ShellView {
                running: app.scheduler.is_running(),
                clock: &clock,
                alert: app.alert(),
                status_line: &app.status_line,
            };
            render_top_bar(f, rects.top, &view);
            render_gauges(f, rects.gauges, &app.snapshot.gauges);
            render_activity(f, rects.activity, &app.snapshot.activity, app.filter);
            render_recorder(f, rects.recorder, &app.recorder);
            render_log_tail(f, rects.log, &log_lines);
        })?;

        if event::poll(poll_timeout)? {
            if let CEvent::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press
                    && app.handle_key(key.code, Instant::now()) == Action::Quit
                {
                    app.scheduler.stop();
                    return Ok(());
                }
            }
        }
    }
}
