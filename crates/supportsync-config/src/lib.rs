//! Configuration types and loaders for SupportSync.
//!
//! This crate owns the on-disk configuration schema so the simulator and the
//! app shell share a single source of truth.

pub mod simulator;

pub use simulator::{RecordingConfig, SimulatorConfig};
