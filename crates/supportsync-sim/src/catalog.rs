//! Fixed mock data the simulator draws from.

use crate::activity::{ActivityKind, ActivityTemplate};
use crate::gauge::GaugeUnit;

/// Static definition of one dashboard gauge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaugeSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub initial: f64,
    pub min: f64,
    pub max: f64,
    /// Maximum magnitude of one step.
    pub variance: f64,
    pub precision: u32,
    pub unit: GaugeUnit,
}

pub const ACTIVE_RECORDINGS: &str = "active_recordings";
pub const COMPLIANCE_RATE: &str = "compliance_rate";
pub const DOCUMENTATION_COMPLETION: &str = "documentation_completion";
pub const STAFF_UTILIZATION: &str = "staff_utilization";
pub const PENDING_REVIEWS: &str = "pending_reviews";

/// Canonical gauge table, in display order.
pub const GAUGES: [GaugeSpec; 5] = [
    GaugeSpec {
        name: ACTIVE_RECORDINGS,
        label: "Active Recordings",
        initial: 12.0,
        min: 8.0,
        max: 20.0,
        variance: 6.0,
        precision: 0,
        unit: GaugeUnit::Count,
    },
    GaugeSpec {
        name: COMPLIANCE_RATE,
        label: "Compliance Rate",
        initial: 98.5,
        min: 95.0,
        max: 100.0,
        variance: 0.5,
        precision: 1,
        unit: GaugeUnit::Percent,
    },
    GaugeSpec {
        name: DOCUMENTATION_COMPLETION,
        label: "Documentation",
        initial: 94.2,
        min: 90.0,
        max: 98.0,
        variance: 0.3,
        precision: 1,
        unit: GaugeUnit::Percent,
    },
    GaugeSpec {
        name: STAFF_UTILIZATION,
        label: "Staff Utilization",
        initial: 87.3,
        min: 80.0,
        max: 95.0,
        variance: 2.0,
        precision: 1,
        unit: GaugeUnit::Percent,
    },
    GaugeSpec {
        name: PENDING_REVIEWS,
        label: "Pending Reviews",
        initial: 3.0,
        min: 0.0,
        max: 8.0,
        variance: 2.0,
        precision: 0,
        unit: GaugeUnit::Count,
    },
];

/// Look up a gauge definition by name.
pub fn gauge_spec(name: &str) -> Option<&'static GaugeSpec> {
    GAUGES.iter().find(|spec| spec.name == name)
}

/// Templates drawn from on every activity tick.
pub const ACTIVITY_TEMPLATES: [ActivityTemplate; 3] = [
    ActivityTemplate {
        kind: ActivityKind::Success,
        title: "Visit completed successfully",
        description: "CalAIM compliance requirements met",
    },
    ActivityTemplate {
        kind: ActivityKind::Active,
        title: "New recording started",
        description: "Patient assessment in progress",
    },
    ActivityTemplate {
        kind: ActivityKind::Warning,
        title: "Documentation review needed",
        description: "Visit requires supervisor approval",
    },
];

/// Event appended by a manual dashboard refresh.
pub const REFRESH_TEMPLATE: ActivityTemplate = ActivityTemplate {
    kind: ActivityKind::Active,
    title: "Dashboard refreshed",
    description: "All data updated successfully",
};

/// Label stamped on freshly generated events.
pub const JUST_NOW: &str = "Just now";

/// Feed contents at startup, oldest first, with their display ages.
pub const SEED_ACTIVITY: [(ActivityTemplate, &str); 4] = [
    (
        ActivityTemplate {
            kind: ActivityKind::Warning,
            title: "Compliance alert",
            description: "2 visits pending documentation review",
        },
        "12 min ago",
    ),
    (
        ActivityTemplate {
            kind: ActivityKind::Success,
            title: "Photos uploaded by Lisa Park",
            description: "Community supports documentation",
        },
        "8 min ago",
    ),
    (
        ActivityTemplate {
            kind: ActivityKind::Active,
            title: "Documentation started by Mike Torres",
            description: "Enhanced care management visit",
        },
        "5 min ago",
    ),
    (
        ActivityTemplate {
            kind: ActivityKind::Success,
            title: "Visit completed by Sarah Chen",
            description: "Housing assessment completed",
        },
        "2 min ago",
    ),
];

/// Transcripts a simulated recording resolves to.
pub const TRANSCRIPTS: [&str; 5] = [
    "Patient reports improvement in housing stability since last visit.",
    "Housing condition assessment: Minor maintenance needed in bathroom.",
    "Client expressed satisfaction with current housing support services.",
    "Follow-up scheduled for next week to check on maintenance progress.",
    "All CalAIM documentation requirements completed successfully.",
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn gauge_names_are_unique() {
        let names: HashSet<_> = GAUGES.iter().map(|g| g.name).collect();
        assert_eq!(names.len(), GAUGES.len());
    }

    #[test]
    fn gauge_table_is_self_consistent() {
        for spec in &GAUGES {
            assert!(spec.min <= spec.initial && spec.initial <= spec.max, "{}", spec.name);
            assert!(spec.variance >= 0.0, "{}", spec.name);
        }
    }

    #[test]
    fn lookup_by_name() {
        assert_eq!(gauge_spec(COMPLIANCE_RATE).unwrap().initial, 98.5);
        assert!(gauge_spec("nope").is_none());
    }

    #[test]
    fn transcripts_are_non_empty() {
        assert!(TRANSCRIPTS.iter().all(|t| !t.trim().is_empty()));
    }

    #[test]
    fn templates_cover_every_kind() {
        let kinds: HashSet<_> = ACTIVITY_TEMPLATES.iter().map(|t| t.kind).collect();
        assert_eq!(kinds.len(), 3);
    }
}
