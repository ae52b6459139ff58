//! Terminal rendering for the SupportSync dashboard.
//!
//! Every function here draws from a [`supportsync_sim::Snapshot`] or other
//! plain values handed in by the app; nothing in this crate owns state.

pub mod activity;
pub mod gauges;
pub mod layout;
pub mod recorder;
pub mod shell;
