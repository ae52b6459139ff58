use std::collections::VecDeque;

use serde::Serialize;

/// Category of a simulated occurrence; drives the feed icon and colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Success,
    Active,
    Warning,
}

impl ActivityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ActivityKind::Success => "success",
            ActivityKind::Active => "active",
            ActivityKind::Warning => "warning",
        }
    }
}

/// Which events the feed shows. Warnings count as alerts, everything else
/// as visits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActivityFilter {
    #[default]
    All,
    Visits,
    Alerts,
}

impl ActivityFilter {
    pub fn matches(self, kind: ActivityKind) -> bool {
        match self {
            ActivityFilter::All => true,
            ActivityFilter::Visits => kind != ActivityKind::Warning,
            ActivityFilter::Alerts => kind == ActivityKind::Warning,
        }
    }

    /// All → Visits → Alerts → All.
    pub fn next(self) -> Self {
        match self {
            ActivityFilter::All => ActivityFilter::Visits,
            ActivityFilter::Visits => ActivityFilter::Alerts,
            ActivityFilter::Alerts => ActivityFilter::All,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ActivityFilter::All => "All",
            ActivityFilter::Visits => "Visits",
            ActivityFilter::Alerts => "Alerts",
        }
    }

    /// Matching events from a newest-first slice, order kept.
    pub fn apply(self, events: &[ActivityEvent]) -> Vec<&ActivityEvent> {
        events.iter().filter(|e| self.matches(e.kind)).collect()
    }
}

/// Catalog entry an activity event is stamped from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivityTemplate {
    pub kind: ActivityKind,
    pub title: &'static str,
    pub description: &'static str,
}

/// An immutable record in the activity feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityEvent {
    pub id: u64,
    pub kind: ActivityKind,
    pub title: String,
    pub description: String,
    /// Human-readable relative time, e.g. `"Just now"`.
    pub timestamp: String,
    /// Capture time on the simulation clock.
    pub captured_at_ms: u64,
}

impl ActivityEvent {
    pub fn from_template(
        id: u64,
        template: &ActivityTemplate,
        timestamp: &str,
        captured_at_ms: u64,
    ) -> Self {
        Self {
            id,
            kind: template.kind,
            title: template.title.to_string(),
            description: template.description.to_string(),
            timestamp: timestamp.to_string(),
            captured_at_ms,
        }
    }
}

/// Newest-first activity feed holding at most `cap` events.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityLog {
    entries: VecDeque<ActivityEvent>,
    cap: usize,
}

impl ActivityLog {
    /// Create an empty log. A zero cap is raised to one.
    pub fn new(cap: usize) -> Self {
        let cap = cap.max(1);
        Self {
            entries: VecDeque::with_capacity(cap + 1),
            cap,
        }
    }

    /// Build a log by pushing `events` in order, oldest first.
    pub fn with_events(cap: usize, events: impl IntoIterator<Item = ActivityEvent>) -> Self {
        let mut log = Self::new(cap);
        for event in events {
            log.push(event);
        }
        log
    }

    /// Prepend `event`, returning the evicted tail entry if the cap was hit.
    pub fn push(&mut self, event: ActivityEvent) -> Option<ActivityEvent> {
        self.entries.push_front(event);
        if self.entries.len() > self.cap {
            self.entries.pop_back()
        } else {
            None
        }
    }

    pub fn newest(&self) -> Option<&ActivityEvent> {
        self.entries.front()
    }

    /// Events newest first.
    pub fn iter(&self) -> impl Iterator<Item = &ActivityEvent> {
        self.entries.iter()
    }

    pub fn to_vec(&self) -> Vec<ActivityEvent> {
        self.entries.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    /// Events passing `filter`, newest first. The log itself is untouched.
    pub fn filtered(&self, filter: ActivityFilter) -> impl Iterator<Item = &ActivityEvent> {
        self.entries.iter().filter(move |e| filter.matches(e.kind))
    }

    /// Largest id present, if any.
    pub fn max_id(&self) -> Option<u64> {
        self.entries.iter().map(|e| e.id).max()
    }
}
