use std::time::Duration;

use anyhow::{bail, Result};
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use supportsync_config::SimulatorConfig;

use crate::activity::{ActivityEvent, ActivityLog, ActivityTemplate};
use crate::catalog::{self, ACTIVITY_TEMPLATES, JUST_NOW, REFRESH_TEMPLATE, SEED_ACTIVITY};
use crate::gauge::{display_step, Gauge};
use crate::snapshot::{GaugeReading, Snapshot};

/// Owner of all simulated dashboard state.
///
/// Every mutation goes through one of the tick methods, each of which
/// completes fully before returning. Consumers get [`Snapshot`] copies.
#[derive(Debug)]
pub struct Simulator<R: Rng = StdRng> {
    gauges: Vec<Gauge>,
    log: ActivityLog,
    rng: R,
    next_id: u64,
    version: u64,
}

impl Simulator<StdRng> {
    /// Build from config, seeding from `config.seed` or OS entropy.
    pub fn from_config(config: &SimulatorConfig) -> Result<Self> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::new(config, rng)
    }
}

impl<R: Rng> Simulator<R> {
    /// Build the canonical gauge table and seed feed using `rng`.
    ///
    /// Fails when `variance_by_gauge` names a gauge that does not exist, or
    /// sets a non-zero variance too small to ever move it.
    pub fn new(config: &SimulatorConfig, rng: R) -> Result<Self> {
        for (name, &variance) in &config.variance_by_gauge {
            let Some(spec) = catalog::gauge_spec(name) else {
                bail!("variance_by_gauge names unknown gauge: {name}");
            };
            let step = display_step(spec.precision);
            if variance > 0.0 && variance <= step {
                bail!(
                    "variance_by_gauge.{name} = {variance} can never move a gauge shown at \
                     {} decimal places; use 0 to freeze it or a value above {step}",
                    spec.precision
                );
            }
        }

        let mut gauges = Vec::with_capacity(catalog::GAUGES.len());
        for spec in &catalog::GAUGES {
            let mut gauge = Gauge::from_spec(spec)?.with_history_len(config.history_len);
            if let Some(&variance) = config.variance_by_gauge.get(spec.name) {
                gauge = gauge.with_variance(variance);
            }
            gauges.push(gauge);
        }

        let seed_events = SEED_ACTIVITY
            .iter()
            .enumerate()
            .map(|(i, (template, age))| ActivityEvent::from_template(i as u64 + 1, template, age, 0));
        let log = ActivityLog::with_events(config.log_cap, seed_events);

        Ok(Self::with_parts(gauges, log, rng))
    }

    /// Assemble a simulator from explicit parts.
    ///
    /// New event ids continue after the largest id already in `log`.
    pub fn with_parts(gauges: Vec<Gauge>, log: ActivityLog, rng: R) -> Self {
        let next_id = log.max_id().map_or(1, |id| id + 1);
        Self {
            gauges,
            log,
            rng,
            next_id,
            version: 0,
        }
    }

    /// Advance every gauge by one random step.
    pub fn tick_gauges(&mut self) {
        for gauge in &mut self.gauges {
            gauge.advance(&mut self.rng);
        }
        self.version += 1;
        tracing::debug!(version = self.version, gauges = self.gauges.len(), "gauge tick");
    }

    /// Append one randomly chosen catalog event captured at `at`.
    pub fn tick_activity(&mut self, at: Duration) -> ActivityEvent {
        let template = ACTIVITY_TEMPLATES
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(REFRESH_TEMPLATE);
        self.append(&template, at)
    }

    /// Manual refresh: step all gauges and log that it happened.
    pub fn refresh(&mut self, at: Duration) {
        for gauge in &mut self.gauges {
            gauge.advance(&mut self.rng);
        }
        self.append(&REFRESH_TEMPLATE, at);
        tracing::info!(version = self.version, "dashboard refreshed");
    }

    fn append(&mut self, template: &ActivityTemplate, at: Duration) -> ActivityEvent {
        let id = self.next_id;
        self.next_id += 1;
        self.version += 1;

        let captured_at_ms = u64::try_from(at.as_millis()).unwrap_or(u64::MAX);
        let event = ActivityEvent::from_template(id, template, JUST_NOW, captured_at_ms);
        if let Some(evicted) = self.log.push(event.clone()) {
            tracing::trace!(evicted = evicted.id, "activity log at capacity");
        }
        tracing::debug!(id, kind = template.kind.as_str(), "activity appended");
        event
    }

    pub fn snapshot(&self) -> Snapshot {
        let gauges: Vec<GaugeReading> = self.gauges.iter().map(GaugeReading::from).collect();
        let alert = Snapshot::assess_alert(&gauges);
        Snapshot {
            version: self.version,
            gauges,
            activity: self.log.to_vec(),
            alert,
        }
    }

    pub fn gauge(&self, name: &str) -> Option<&Gauge> {
        self.gauges.iter().find(|g| g.name() == name)
    }

    pub fn gauges(&self) -> &[Gauge] {
        &self.gauges
    }

    pub fn activity(&self) -> &ActivityLog {
        &self.log
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub(crate) fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::ActivityKind;
    use crate::catalog::{ACTIVE_RECORDINGS, COMPLIANCE_RATE, GAUGES};

    fn seeded(seed: u64) -> Simulator {
        let config = SimulatorConfig {
            seed: Some(seed),
            ..SimulatorConfig::default()
        };
        Simulator::from_config(&config).unwrap()
    }

    fn only_gauge(name: &str, variance: f64, seed: u64) -> Simulator {
        let spec = catalog::gauge_spec(name).unwrap();
        let gauge = Gauge::from_spec(spec).unwrap().with_variance(variance);
        Simulator::with_parts(vec![gauge], ActivityLog::new(5), StdRng::seed_from_u64(seed))
    }

    #[test]
    fn default_build_has_catalog_gauges_and_seed_feed() {
        let sim = seeded(1);
        assert_eq!(sim.gauges().len(), GAUGES.len());
        assert_eq!(sim.gauge(COMPLIANCE_RATE).unwrap().value(), 98.5);

        let ids: Vec<u64> = sim.activity().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![4, 3, 2, 1]);
        assert_eq!(sim.activity().newest().unwrap().timestamp, "2 min ago");
    }

    #[test]
    fn unknown_variance_override_is_rejected() {
        let mut config = SimulatorConfig::default();
        config.variance_by_gauge.insert("heart_rate".into(), 1.0);
        let err = Simulator::new(&config, StdRng::seed_from_u64(0)).unwrap_err();
        assert!(err.to_string().contains("unknown gauge: heart_rate"));
    }

    #[test]
    fn variance_too_small_to_move_is_rejected() {
        let mut config = SimulatorConfig::default();
        config.variance_by_gauge.insert(ACTIVE_RECORDINGS.into(), 0.8);
        let err = Simulator::new(&config, StdRng::seed_from_u64(3)).unwrap_err();
        assert!(err.to_string().contains("variance_by_gauge.active_recordings = 0.8"));

        let mut config = SimulatorConfig::default();
        config.variance_by_gauge.insert(COMPLIANCE_RATE.into(), 0.05);
        assert!(Simulator::new(&config, StdRng::seed_from_u64(3)).is_err());
    }

    #[test]
    fn zero_variance_override_freezes_gauge() {
        let mut config = SimulatorConfig::default();
        config.variance_by_gauge.insert(ACTIVE_RECORDINGS.into(), 0.0);
        let mut sim = Simulator::new(&config, StdRng::seed_from_u64(3)).unwrap();
        for _ in 0..50 {
            sim.tick_gauges();
        }
        assert_eq!(sim.gauge(ACTIVE_RECORDINGS).unwrap().value(), 12.0);
    }

    #[test]
    fn smallest_accepted_override_still_moves() {
        let mut config = SimulatorConfig::default();
        config.variance_by_gauge.insert(ACTIVE_RECORDINGS.into(), 1.5);
        let mut sim = Simulator::new(&config, StdRng::seed_from_u64(3)).unwrap();
        let mut moved = false;
        for _ in 0..1000 {
            sim.tick_gauges();
            moved |= sim.gauge(ACTIVE_RECORDINGS).unwrap().value() != 12.0;
        }
        assert!(moved);
    }

    #[test]
    fn variance_override_applies() {
        let mut config = SimulatorConfig::default();
        config.variance_by_gauge.insert(COMPLIANCE_RATE.into(), 0.25);
        let sim = Simulator::new(&config, StdRng::seed_from_u64(0)).unwrap();
        assert_eq!(sim.gauge(COMPLIANCE_RATE).unwrap().variance(), 0.25);
    }

    #[test]
    fn small_log_cap_truncates_seed_feed() {
        let config = SimulatorConfig {
            log_cap: 2,
            ..SimulatorConfig::default()
        };
        let sim = Simulator::new(&config, StdRng::seed_from_u64(0)).unwrap();
        let ids: Vec<u64> = sim.activity().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![4, 3]);
    }

    #[test]
    fn active_recordings_single_tick_is_integer_in_bounds() {
        for seed in 0..100 {
            let mut sim = only_gauge(ACTIVE_RECORDINGS, 6.0, seed);
            sim.tick_gauges();
            let v = sim.gauge(ACTIVE_RECORDINGS).unwrap().value();
            assert!((8.0..=20.0).contains(&v), "seed {seed}: {v}");
            assert_eq!(v.fract(), 0.0, "seed {seed}: {v}");
        }
    }

    #[test]
    fn compliance_rate_holds_bounds_for_a_thousand_ticks() {
        let mut sim = only_gauge(COMPLIANCE_RATE, 0.5, 42);
        for tick in 0..1000 {
            sim.tick_gauges();
            let v = sim.gauge(COMPLIANCE_RATE).unwrap().value();
            assert!((95.0..=100.0).contains(&v), "tick {tick}: {v}");
        }
    }

    #[test]
    fn every_gauge_stays_in_bounds_across_seeds() {
        for seed in 0..25 {
            let mut sim = seeded(seed);
            for _ in 0..200 {
                sim.tick_gauges();
                for g in sim.gauges() {
                    assert!(
                        g.min() <= g.value() && g.value() <= g.max(),
                        "seed {seed}: {} = {}",
                        g.name(),
                        g.value()
                    );
                }
            }
        }
    }

    #[test]
    fn activity_ticks_keep_cap_and_newest_first() {
        for seed in 0..20 {
            let mut sim = seeded(seed);
            for n in 0..30u64 {
                let id = sim.tick_activity(Duration::from_secs(n)).id;
                let ids: Vec<u64> = sim.activity().iter().map(|e| e.id).collect();
                assert!(ids.len() <= 5);
                assert_eq!(ids[0], id);
                assert!(ids.windows(2).all(|w| w[0] > w[1]), "{ids:?}");
            }
        }
    }

    #[test]
    fn generated_event_is_stamped_just_now() {
        let mut sim = seeded(9);
        let event = sim.tick_activity(Duration::from_millis(8000));
        assert_eq!(event.id, 5);
        assert_eq!(event.timestamp, "Just now");
        assert_eq!(event.captured_at_ms, 8000);
        assert!(ACTIVITY_TEMPLATES.iter().any(|t| t.title == event.title));
    }

    #[test]
    fn same_seed_same_snapshots() {
        let mut a = seeded(1234);
        let mut b = seeded(1234);
        for n in 0..50u64 {
            a.tick_gauges();
            b.tick_gauges();
            if n % 3 == 0 {
                a.tick_activity(Duration::from_secs(n));
                b.tick_activity(Duration::from_secs(n));
            }
            assert_eq!(a.snapshot(), b.snapshot());
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = seeded(1);
        let mut b = seeded(2);
        for _ in 0..20 {
            a.tick_gauges();
            b.tick_gauges();
        }
        assert_ne!(a.snapshot().gauges, b.snapshot().gauges);
    }

    #[test]
    fn refresh_steps_gauges_and_logs_event() {
        let mut sim = seeded(5);
        let before = sim.version();
        sim.refresh(Duration::from_secs(1));
        let newest = sim.activity().newest().unwrap();
        assert_eq!(newest.title, "Dashboard refreshed");
        assert_eq!(newest.kind, ActivityKind::Active);
        assert_eq!(sim.version(), before + 1);
        assert_eq!(sim.gauge(COMPLIANCE_RATE).unwrap().history().count(), 2);
    }

    #[test]
    fn snapshot_is_a_copy() {
        let mut sim = seeded(3);
        let snap = sim.snapshot();
        sim.tick_activity(Duration::ZERO);
        assert_eq!(snap.activity.len(), 4);
        assert_eq!(sim.snapshot().activity.len(), 5);
    }
}
