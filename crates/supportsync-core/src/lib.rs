//! Shared infrastructure for the SupportSync workspace.
//!
//! Provides the FIFO event bus the simulator publishes through and the
//! logging subsystem used by the app shell.

pub mod bus;
pub mod logging;
