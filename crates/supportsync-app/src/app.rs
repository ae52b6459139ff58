use std::time::Instant;

use anyhow::Result;
use crossterm::event::KeyCode;
use supportsync_config::SimulatorConfig;
use supportsync_core::logging::LogTail;
use supportsync_sim::{format::format_clock, ActivityFilter, AlertLevel, Scheduler, SimEvent, Snapshot};
use supportsync_ui::recorder::RecorderView;

/// What a key press asked the loop to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Continue,
    Quit,
}

/// Dashboard state owned by the UI loop.
///
/// The scheduler does the simulating; this struct keeps the last published
/// snapshot and the bits of view state derived from the event stream.
pub struct App {
    pub scheduler: Scheduler,
    pub snapshot: Snapshot,
    pub recorder: RecorderView,
    pub filter: ActivityFilter,
    pub status_line: String,
    pub log_tail: LogTail,
}

impl App {
    pub fn new(config: &SimulatorConfig, log_tail: LogTail) -> Result<Self> {
        let scheduler = Scheduler::from_config(config)?;
        let snapshot = scheduler.snapshot();
        Ok(Self {
            scheduler,
            snapshot,
            recorder: RecorderView::Idle,
            filter: ActivityFilter::All,
            status_line: String::from("ready"),
            log_tail,
        })
    }

    pub fn handle_key(&mut self, code: KeyCode, now: Instant) -> Action {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return Action::Quit,
            KeyCode::Char('s') => {
                if self.scheduler.is_running() {
                    self.scheduler.stop();
                } else {
                    self.scheduler.start(now);
                }
            }
            KeyCode::Char('r') => self.scheduler.toggle_recording(now),
            KeyCode::Char('f') => self.scheduler.refresh(now),
            KeyCode::Tab => {
                self.filter = self.filter.next();
                self.status_line = format!("showing {}", self.filter.label().to_lowercase());
            }
            _ => {}
        }
        Action::Continue
    }

    /// Advance the scheduler to `now` and fold everything it published into
    /// the view state.
    pub fn update(&mut self, now: Instant) {
        self.scheduler.poll(now);
        for event in self.scheduler.drain() {
            self.apply(event);
        }
        if let Some(remaining) = self.scheduler.recording_remaining(now) {
            self.recorder = RecorderView::Recording { remaining };
        }
    }

    fn apply(&mut self, event: SimEvent) {
        match event {
            SimEvent::Started => self.status_line = "simulation running".into(),
            SimEvent::Stopped => self.status_line = "simulation paused".into(),
            SimEvent::Snapshot(snapshot) => {
                // Snapshots can only move forward.
                if snapshot.version >= self.snapshot.version {
                    self.snapshot = snapshot;
                }
            }
            SimEvent::RecordingStarted { resolves_in, .. } => {
                self.recorder = RecorderView::Recording {
                    remaining: resolves_in,
                };
                self.status_line = "recording".into();
            }
            SimEvent::RecordingCancelled { .. } => {
                self.recorder = RecorderView::Idle;
                self.status_line = "recording cancelled".into();
            }
            SimEvent::TranscriptReady { text, .. } => {
                self.recorder = RecorderView::Transcript { text };
                self.status_line = "transcript ready".into();
            }
        }
    }

    pub fn alert(&self) -> AlertLevel {
        self.snapshot.alert
    }

    pub fn clock(&self, now: Instant) -> String {
        format_clock(self.scheduler.elapsed(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn app() -> App {
        let config = SimulatorConfig {
            seed: Some(7),
            ..SimulatorConfig::default()
        };
        App::new(&config, LogTail::new(10)).unwrap()
    }

    #[test]
    fn quit_keys() {
        let mut app = app();
        let now = Instant::now();
        assert_eq!(app.handle_key(KeyCode::Char('q'), now), Action::Quit);
        assert_eq!(app.handle_key(KeyCode::Esc, now), Action::Quit);
        assert_eq!(app.handle_key(KeyCode::Char('x'), now), Action::Continue);
    }

    #[test]
    fn s_toggles_simulation() {
        let mut app = app();
        let t0 = Instant::now();
        app.handle_key(KeyCode::Char('s'), t0);
        app.update(t0);
        assert!(app.scheduler.is_running());
        assert_eq!(app.status_line, "simulation running");

        app.handle_key(KeyCode::Char('s'), t0);
        app.update(t0);
        assert!(!app.scheduler.is_running());
        assert_eq!(app.status_line, "simulation paused");
    }

    #[test]
    fn ticks_replace_snapshot() {
        let mut app = app();
        let t0 = Instant::now();
        app.handle_key(KeyCode::Char('s'), t0);
        app.update(t0);
        let before = app.snapshot.version;
        app.update(t0 + Duration::from_millis(5000));
        assert!(app.snapshot.version > before);
    }

    #[test]
    fn refresh_logs_an_event() {
        let mut app = app();
        let t0 = Instant::now();
        app.handle_key(KeyCode::Char('f'), t0);
        app.update(t0);
        assert_eq!(app.snapshot.activity[0].title, "Dashboard refreshed");
    }

    #[test]
    fn recording_resolves_to_transcript() {
        let mut app = app();
        let t0 = Instant::now();
        app.handle_key(KeyCode::Char('r'), t0);
        app.update(t0);
        assert!(app.recorder.is_recording());

        app.update(t0 + Duration::from_secs(6));
        match &app.recorder {
            RecorderView::Transcript { text } => assert!(!text.is_empty()),
            other => panic!("expected transcript, got {other:?}"),
        }
    }

    #[test]
    fn second_r_cancels() {
        let mut app = app();
        let t0 = Instant::now();
        app.handle_key(KeyCode::Char('r'), t0);
        app.handle_key(KeyCode::Char('r'), t0);
        app.update(t0 + Duration::from_secs(6));
        assert_eq!(app.recorder, RecorderView::Idle);
        assert_eq!(app.status_line, "recording cancelled");
    }

    #[test]
    fn tab_cycles_filter_without_touching_feed() {
        let mut app = app();
        let t0 = Instant::now();
        let before = app.snapshot.activity.clone();

        app.handle_key(KeyCode::Tab, t0);
        assert_eq!(app.filter, ActivityFilter::Visits);
        assert_eq!(app.status_line, "showing visits");
        app.handle_key(KeyCode::Tab, t0);
        assert_eq!(app.filter, ActivityFilter::Alerts);
        app.handle_key(KeyCode::Tab, t0);
        assert_eq!(app.filter, ActivityFilter::All);

        app.update(t0);
        assert_eq!(app.snapshot.activity, before);
    }

    #[test]
    fn clock_is_zero_while_idle() {
        let app = app();
        assert_eq!(app.clock(Instant::now()), "00:00");
    }
}
