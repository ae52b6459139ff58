//! Bounded random-walk gauges.
//!
//! The free functions are the whole update rule; [`Gauge`] wraps them with
//! its bounds, display precision, and a short trend history.

use std::collections::VecDeque;

use anyhow::{bail, Result};
use rand::Rng;
use serde::Serialize;

use crate::catalog::GaugeSpec;

/// Highest display precision honoured when rounding.
const MAX_PRECISION: u32 = 6;

/// How a gauge value is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GaugeUnit {
    Count,
    Percent,
}

/// Round `value` to `precision` decimal places.
pub fn round_to(value: f64, precision: u32) -> f64 {
    let factor = 10f64.powi(precision.min(MAX_PRECISION) as i32);
    (value * factor).round() / factor
}

/// Smallest change visible at `precision` decimal places.
///
/// Steps are rounded to this grid, so a variance at or below it can never
/// move a gauge.
pub fn display_step(precision: u32) -> f64 {
    10f64.powi(-(precision.min(MAX_PRECISION) as i32))
}

/// Apply one step of size `delta` and pull the result back into `[min, max]`.
///
/// Non-finite `value` or `delta` leaves `value` untouched, as do inverted or
/// non-finite bounds. The sum is rounded to `precision` before clamping so
/// the bounds always win.
pub fn apply_delta(value: f64, delta: f64, min: f64, max: f64, precision: u32) -> f64 {
    if !value.is_finite() || !delta.is_finite() {
        return value;
    }
    if !(min.is_finite() && max.is_finite() && min <= max) {
        return value;
    }
    round_to(value + delta, precision).clamp(min, max)
}

/// Draw a uniform delta in `[-variance/2, +variance/2]` and apply it.
///
/// A zero, negative or non-finite `variance` draws nothing.
pub fn step<R: Rng>(
    value: f64,
    variance: f64,
    min: f64,
    max: f64,
    precision: u32,
    rng: &mut R,
) -> f64 {
    let delta = if variance.is_finite() && variance > 0.0 {
        let half = variance / 2.0;
        rng.gen_range(-half..=half)
    } else {
        0.0
    };
    apply_delta(value, delta, min, max, precision)
}

/// A named numeric metric kept within `[min, max]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Gauge {
    name: String,
    label: String,
    value: f64,
    min: f64,
    max: f64,
    precision: u32,
    unit: GaugeUnit,
    variance: f64,
    history: VecDeque<f64>,
    history_len: usize,
}

impl Gauge {
    /// Build a gauge from a catalog entry.
    ///
    /// Fails on non-finite numbers or inverted bounds. An initial value
    /// outside the bounds is clamped.
    pub fn from_spec(spec: &GaugeSpec) -> Result<Self> {
        if !(spec.min.is_finite() && spec.max.is_finite()) || spec.min > spec.max {
            bail!(
                "gauge {} has invalid bounds [{}, {}]",
                spec.name,
                spec.min,
                spec.max
            );
        }
        if !spec.initial.is_finite() {
            bail!("gauge {} has a non-finite initial value", spec.name);
        }
        if !spec.variance.is_finite() || spec.variance < 0.0 {
            bail!("gauge {} has an invalid variance {}", spec.name, spec.variance);
        }

        let value = round_to(spec.initial, spec.precision).clamp(spec.min, spec.max);
        let mut history = VecDeque::new();
        history.push_back(value);

        Ok(Self {
            name: spec.name.to_string(),
            label: spec.label.to_string(),
            value,
            min: spec.min,
            max: spec.max,
            precision: spec.precision,
            unit: spec.unit,
            variance: spec.variance,
            history,
            history_len: 1,
        })
    }

    /// Replace the step size. Ignored unless finite and non-negative.
    pub fn with_variance(mut self, variance: f64) -> Self {
        if variance.is_finite() && variance >= 0.0 {
            self.variance = variance;
        }
        self
    }

    /// Keep up to `len` recent values (at least one).
    pub fn with_history_len(mut self, len: usize) -> Self {
        self.history_len = len.max(1);
        self.trim_history();
        self
    }

    /// Advance one random step and record it in the history.
    pub fn advance<R: Rng>(&mut self, rng: &mut R) -> f64 {
        self.value = step(
            self.value,
            self.variance,
            self.min,
            self.max,
            self.precision,
            rng,
        );
        self.history.push_back(self.value);
        self.trim_history();
        self.value
    }

    fn trim_history(&mut self) {
        while self.history.len() > self.history_len {
            self.history.pop_front();
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn precision(&self) -> u32 {
        self.precision
    }

    pub fn unit(&self) -> GaugeUnit {
        self.unit
    }

    pub fn variance(&self) -> f64 {
        self.variance
    }

    /// Recent values, oldest first.
    pub fn history(&self) -> impl Iterator<Item = f64> + '_ {
        self.history.iter().copied()
    }
}
