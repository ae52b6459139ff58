//! Simulated voice capture.
//!
//! A recording is a pending deadline. Polling past the deadline resolves it
//! to one catalog transcript; cancelling first drops it without a trace.
//! Each recording gets a fresh [`RecordingHandle`] so a stale handle can
//! never be mistaken for the current one.

use std::time::{Duration, Instant};

use rand::{seq::SliceRandom, Rng};
use serde::Serialize;
use supportsync_config::RecordingConfig;

use crate::catalog::TRANSCRIPTS;

/// Identity of one recording attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RecordingHandle(u64);

impl RecordingHandle {
    pub fn generation(self) -> u64 {
        self.0
    }
}

/// A resolved recording.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    pub handle: RecordingHandle,
    pub text: &'static str,
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    handle: RecordingHandle,
    resolves_at: Instant,
}

#[derive(Debug)]
pub struct VoiceRecorder {
    min_delay: Duration,
    max_delay: Duration,
    generation: u64,
    pending: Option<Pending>,
}

impl VoiceRecorder {
    /// Create a recorder resolving after a delay in `[min_delay, max_delay]`.
    /// Inverted bounds are swapped.
    pub fn new(min_delay: Duration, max_delay: Duration) -> Self {
        let (min_delay, max_delay) = if min_delay <= max_delay {
            (min_delay, max_delay)
        } else {
            (max_delay, min_delay)
        };
        Self {
            min_delay,
            max_delay,
            generation: 0,
            pending: None,
        }
    }

    pub fn from_config(config: &RecordingConfig) -> Self {
        Self::new(config.min_delay(), config.max_delay())
    }

    /// Begin recording at `now`.
    ///
    /// Returns the handle and the drawn delay. If a recording is already in
    /// flight it is left running and its handle and remaining time are
    /// returned instead.
    pub fn start<R: Rng>(&mut self, now: Instant, rng: &mut R) -> (RecordingHandle, Duration) {
        if let Some(p) = self.pending {
            return (p.handle, p.resolves_at.saturating_duration_since(now));
        }

        let delay = self.draw_delay(rng);
        self.generation += 1;
        let handle = RecordingHandle(self.generation);
        self.pending = Some(Pending {
            handle,
            resolves_at: now + delay,
        });
        (handle, delay)
    }

    fn draw_delay<R: Rng>(&self, rng: &mut R) -> Duration {
        let min = self.min_delay.as_millis() as u64;
        let max = self.max_delay.as_millis() as u64;
        if min == max {
            return self.min_delay;
        }
        Duration::from_millis(rng.gen_range(min..=max))
    }

    /// Drop the in-flight recording, if any, returning its handle.
    pub fn cancel(&mut self) -> Option<RecordingHandle> {
        self.pending.take().map(|p| p.handle)
    }

    /// Resolve the in-flight recording if its deadline has passed.
    pub fn poll<R: Rng>(&mut self, now: Instant, rng: &mut R) -> Option<Transcript> {
        let pending = self.pending?;
        if now < pending.resolves_at {
            return None;
        }
        self.pending = None;

        let text = TRANSCRIPTS.choose(rng).copied().unwrap_or(TRANSCRIPTS[0]);
        Some(Transcript {
            handle: pending.handle,
            text,
        })
    }

    pub fn is_recording(&self) -> bool {
        self.pending.is_some()
    }

    /// Whether `handle` is the recording still in flight.
    pub fn is_current(&self, handle: RecordingHandle) -> bool {
        self.pending.is_some_and(|p| p.handle == handle)
    }

    /// Time left before the in-flight recording resolves.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.pending
            .map(|p| p.resolves_at.saturating_duration_since(now))
    }
}

impl Default for VoiceRecorder {
    fn default() -> Self {
        Self::from_config(&RecordingConfig::default())
    }
}
