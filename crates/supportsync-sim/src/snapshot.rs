use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::activity::ActivityEvent;
use crate::catalog::{COMPLIANCE_RATE, PENDING_REVIEWS};
use crate::format::format_value;
use crate::gauge::{Gauge, GaugeUnit};

/// Dashboard-wide alert severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Info,
    Warning,
    Critical,
}

impl AlertLevel {
    /// Grade the dashboard from compliance and review backlog.
    ///
    /// Critical below 90% compliance or above 5 pending reviews; warning
    /// below 95% or above 3. A missing reading counts as healthy.
    pub fn assess(compliance_rate: Option<f64>, pending_reviews: Option<f64>) -> Self {
        let compliance = compliance_rate.unwrap_or(100.0);
        let pending = pending_reviews.unwrap_or(0.0);
        if compliance < 90.0 || pending > 5.0 {
            AlertLevel::Critical
        } else if compliance < 95.0 || pending > 3.0 {
            AlertLevel::Warning
        } else {
            AlertLevel::Info
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AlertLevel::Info => "info",
            AlertLevel::Warning => "warning",
            AlertLevel::Critical => "critical",
        }
    }
}

/// A copied gauge value with everything needed to render it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GaugeReading {
    pub name: String,
    pub label: String,
    pub value: f64,
    pub min: f64,
    pub max: f64,
    pub precision: u32,
    pub unit: GaugeUnit,
    /// Recent values, oldest first, ending with `value`.
    pub history: Vec<f64>,
}

impl GaugeReading {
    pub fn display(&self) -> String {
        format_value(self.value, self.precision, self.unit)
    }

    /// Position of `value` within `[min, max]` as `0.0..=1.0`.
    pub fn ratio(&self) -> f64 {
        let span = self.max - self.min;
        if span <= 0.0 || !self.value.is_finite() {
            return 0.0;
        }
        ((self.value - self.min) / span).clamp(0.0, 1.0)
    }
}

impl From<&Gauge> for GaugeReading {
    fn from(gauge: &Gauge) -> Self {
        Self {
            name: gauge.name().to_string(),
            label: gauge.label().to_string(),
            value: gauge.value(),
            min: gauge.min(),
            max: gauge.max(),
            precision: gauge.precision(),
            unit: gauge.unit(),
            history: gauge.history().collect(),
        }
    }
}

/// Full simulation state at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    /// Count of state-changing operations applied so far.
    pub version: u64,
    /// Gauges in display order.
    pub gauges: Vec<GaugeReading>,
    /// Activity feed, newest first.
    pub activity: Vec<ActivityEvent>,
    pub alert: AlertLevel,
}

impl Snapshot {
    pub fn gauge(&self, name: &str) -> Option<&GaugeReading> {
        self.gauges.iter().find(|g| g.name == name)
    }

    pub fn value(&self, name: &str) -> Option<f64> {
        self.gauge(name).map(|g| g.value)
    }

    pub(crate) fn assess_alert(gauges: &[GaugeReading]) -> AlertLevel {
        let find = |name: &str| gauges.iter().find(|g| g.name == name).map(|g| g.value);
        AlertLevel::assess(find(COMPLIANCE_RATE), find(PENDING_REVIEWS))
    }

    /// Render the published wire shape:
    /// `{ gauges: {name: value}, activity: [...], trends: {name: [..]}, alert }`.
    pub fn to_json(&self) -> Value {
        let mut gauges = Map::new();
        let mut trends = Map::new();
        for g in &self.gauges {
            gauges.insert(g.name.clone(), json!(g.value));
            trends.insert(g.name.clone(), json!(g.history));
        }

        json!({
            "gauges": gauges,
            "activity": self.activity,
            "trends": trends,
            "alert": self.alert,
        })
    }
}
