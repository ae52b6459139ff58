//! Simulated live metrics for the SupportSync supervisor dashboard.
//!
//! A [`Simulator`] owns a table of bounded [`Gauge`]s and a capped
//! newest-first [`ActivityLog`]. A [`Scheduler`] drives it from caller-supplied
//! instants, runs the fake voice recorder, and publishes [`SimEvent`]s
//! carrying [`Snapshot`] copies for whatever renders them.

pub mod activity;
pub mod catalog;
pub mod format;
pub mod gauge;
pub mod scheduler;
pub mod simulator;
pub mod snapshot;
pub mod voice;

pub use activity::{ActivityEvent, ActivityFilter, ActivityKind, ActivityLog};
pub use gauge::{Gauge, GaugeUnit};
pub use scheduler::{Scheduler, SchedulerState, SimEvent};
pub use simulator::Simulator;
pub use snapshot::{AlertLevel, GaugeReading, Snapshot};
pub use voice::{RecordingHandle, Transcript, VoiceRecorder};
