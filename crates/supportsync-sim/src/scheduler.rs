//! Tick driver for the simulator.
//!
//! The scheduler never reads the clock. Callers hand it an [`Instant`] on
//! every call, which keeps it usable from a UI loop and from tests alike.
//! Everything it does is published on an [`EventBus`] for the consumer to
//! drain.

use std::time::{Duration, Instant};

use anyhow::Result;
use rand::{rngs::StdRng, Rng};
use supportsync_config::SimulatorConfig;
use supportsync_core::bus::EventBus;

use crate::simulator::Simulator;
use crate::snapshot::Snapshot;
use crate::voice::{RecordingHandle, VoiceRecorder};

/// Something the scheduler published.
#[derive(Debug, Clone, PartialEq)]
pub enum SimEvent {
    Started,
    Stopped,
    /// State after one or more ticks were applied.
    Snapshot(Snapshot),
    RecordingStarted {
        handle: RecordingHandle,
        resolves_in: Duration,
    },
    RecordingCancelled {
        handle: RecordingHandle,
    },
    TranscriptReady {
        handle: RecordingHandle,
        text: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Running,
}

#[derive(Debug, Clone, Copy)]
enum Clock {
    Idle,
    Running {
        started_at: Instant,
        next_gauge: Instant,
        next_activity: Instant,
    },
}

/// Next deadline after `deadline` fired at `now`.
///
/// Missed intervals are skipped rather than replayed.
fn reschedule(deadline: Instant, interval: Duration, now: Instant) -> Instant {
    let next = deadline + interval;
    if next <= now {
        now + interval
    } else {
        next
    }
}

#[derive(Debug)]
pub struct Scheduler<R: Rng = StdRng> {
    sim: Simulator<R>,
    recorder: VoiceRecorder,
    tick_interval: Duration,
    activity_interval: Duration,
    clock: Clock,
    bus: EventBus<SimEvent>,
}

impl Scheduler<StdRng> {
    pub fn from_config(config: &SimulatorConfig) -> Result<Self> {
        config.validate()?;
        let sim = Simulator::from_config(config)?;
        Ok(Self::new(
            sim,
            VoiceRecorder::from_config(&config.recording),
            config.tick_interval(),
            config.activity_interval(),
        ))
    }
}

impl<R: Rng> Scheduler<R> {
    /// Wrap `sim` with the given cadences. Zero intervals are raised to 1ms.
    pub fn new(
        sim: Simulator<R>,
        recorder: VoiceRecorder,
        tick_interval: Duration,
        activity_interval: Duration,
    ) -> Self {
        let floor = Duration::from_millis(1);
        Self {
            sim,
            recorder,
            tick_interval: tick_interval.max(floor),
            activity_interval: activity_interval.max(floor),
            clock: Clock::Idle,
            bus: EventBus::new(),
        }
    }

    pub fn state(&self) -> SchedulerState {
        match self.clock {
            Clock::Idle => SchedulerState::Idle,
            Clock::Running { .. } => SchedulerState::Running,
        }
    }

    pub fn is_running(&self) -> bool {
        self.state() == SchedulerState::Running
    }

    /// Arm both timers. Returns `false` if already running.
    pub fn start(&mut self, now: Instant) -> bool {
        if self.is_running() {
            return false;
        }
        self.clock = Clock::Running {
            started_at: now,
            next_gauge: now + self.tick_interval,
            next_activity: now + self.activity_interval,
        };
        tracing::info!(
            tick_ms = self.tick_interval.as_millis() as u64,
            activity_ms = self.activity_interval.as_millis() as u64,
            "simulation started"
        );
        self.bus.publish(SimEvent::Started);
        self.bus.publish(SimEvent::Snapshot(self.sim.snapshot()));
        true
    }

    /// Disarm the timers and cancel any recording. Returns `false` if idle.
    pub fn stop(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.clock = Clock::Idle;
        self.cancel_recording();
        tracing::info!(version = self.sim.version(), "simulation stopped");
        self.bus.publish(SimEvent::Stopped);
        true
    }

    /// Fire whatever is due at `now`. Returns the number of ticks applied.
    ///
    /// At most one snapshot is published per call, after every due tick has
    /// been applied.
    pub fn poll(&mut self, now: Instant) -> usize {
        let mut ticks = 0;

        if let Clock::Running {
            started_at,
            next_gauge,
            next_activity,
        } = &mut self.clock
        {
            if now >= *next_gauge {
                self.sim.tick_gauges();
                *next_gauge = reschedule(*next_gauge, self.tick_interval, now);
                ticks += 1;
            }
            if now >= *next_activity {
                self.sim.tick_activity(now.saturating_duration_since(*started_at));
                *next_activity = reschedule(*next_activity, self.activity_interval, now);
                ticks += 1;
            }
        }

        if let Some(transcript) = self.recorder.poll(now, self.sim.rng_mut()) {
            tracing::info!(
                generation = transcript.handle.generation(),
                "recording resolved"
            );
            self.bus.publish(SimEvent::TranscriptReady {
                handle: transcript.handle,
                text: transcript.text.to_string(),
            });
        }

        if ticks > 0 {
            self.bus.publish(SimEvent::Snapshot(self.sim.snapshot()));
            tracing::debug!(
                ticks,
                pending = self.bus.pending(),
                published = self.bus.published(),
                "poll applied ticks"
            );
        }
        ticks
    }

    /// Manual refresh; works whether or not the timers are running.
    pub fn refresh(&mut self, now: Instant) {
        let at = self.elapsed(now);
        self.sim.refresh(at);
        self.bus.publish(SimEvent::Snapshot(self.sim.snapshot()));
    }

    /// Begin a simulated recording. A recording already in flight is kept.
    pub fn start_recording(&mut self, now: Instant) -> RecordingHandle {
        let already = self.recorder.is_recording();
        let (handle, resolves_in) = self.recorder.start(now, self.sim.rng_mut());
        if !already {
            tracing::info!(
                generation = handle.generation(),
                delay_ms = resolves_in.as_millis() as u64,
                "recording started"
            );
            self.bus.publish(SimEvent::RecordingStarted {
                handle,
                resolves_in,
            });
        }
        handle
    }

    /// Discard the in-flight recording. Returns `false` if none was pending.
    pub fn cancel_recording(&mut self) -> bool {
        match self.recorder.cancel() {
            Some(handle) => {
                tracing::info!(generation = handle.generation(), "recording cancelled");
                self.bus.publish(SimEvent::RecordingCancelled { handle });
                true
            }
            None => false,
        }
    }

    /// Start a recording, or cancel the one in flight.
    pub fn toggle_recording(&mut self, now: Instant) {
        if !self.cancel_recording() {
            self.start_recording(now);
        }
    }

    pub fn is_recording(&self) -> bool {
        self.recorder.is_recording()
    }

    pub fn recording_remaining(&self, now: Instant) -> Option<Duration> {
        self.recorder.remaining(now)
    }

    /// Time since `start`, or zero while idle.
    pub fn elapsed(&self, now: Instant) -> Duration {
        match self.clock {
            Clock::Running { started_at, .. } => now.saturating_duration_since(started_at),
            Clock::Idle => Duration::ZERO,
        }
    }

    /// Remove and return everything published since the last drain.
    pub fn drain(&mut self) -> Vec<SimEvent> {
        self.bus.drain()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.sim.snapshot()
    }

    pub fn simulator(&self) -> &Simulator<R> {
        &self.sim
    }
}
