//! Display formatting for gauge readings and recorder timing.
//!
//! All functions are pure.

use std::time::Duration;

use crate::gauge::GaugeUnit;

/// Format a gauge value at its display precision.
///
/// Returns values like `"12"`, `"98.5%"`. Non-finite values render as
/// `"--"` / `"--%"`.
pub fn format_value(value: f64, precision: u32, unit: GaugeUnit) -> String {
    let suffix = match unit {
        GaugeUnit::Count => "",
        GaugeUnit::Percent => "%",
    };
    if !value.is_finite() {
        return format!("--{suffix}");
    }
    format!("{:.*}{suffix}", precision as usize, value)
}

/// Format a short countdown such as `"3.2s"`.
pub fn format_delay(delay: Duration) -> String {
    format!("{:.1}s", delay.as_secs_f64())
}

/// Format elapsed simulation time as `"mm:ss"`, or `"h:mm:ss"` past an hour.
pub fn format_clock(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    let hours = secs / 3600;
    let mins = (secs % 3600) / 60;
    let s = secs % 60;
    if hours > 0 {
        format!("{hours}:{mins:02}:{s:02}")
    } else {
        format!("{mins:02}:{s:02}")
    }
}
