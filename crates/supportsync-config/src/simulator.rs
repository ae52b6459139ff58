use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// Simulator settings loaded from `supportsync.toml`.
///
/// Every field is optional in the file; omitted fields take the defaults of
/// [`SimulatorConfig::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulatorConfig {
    /// Gauge cadence in milliseconds.
    pub tick_interval_ms: u64,
    /// Activity cadence in milliseconds.
    pub activity_interval_ms: u64,
    /// Maximum number of activity events kept in the log.
    pub log_cap: usize,
    /// Number of recent values kept per gauge for trend display.
    pub history_len: usize,
    /// Fixed RNG seed. `None` seeds from OS entropy.
    pub seed: Option<u64>,
    /// Per-gauge maximum step size, overriding the built-in table.
    pub variance_by_gauge: BTreeMap<String, f64>,
    pub recording: RecordingConfig,
}

/// Bounds of the simulated voice-recording delay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RecordingConfig {
    pub min_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 5000,
            activity_interval_ms: 8000,
            log_cap: 5,
            history_len: 12,
            seed: None,
            variance_by_gauge: BTreeMap::new(),
            recording: RecordingConfig::default(),
        }
    }
}

impl Default for RecordingConfig {
    fn default() -> Self {
        Self {
            min_delay_ms: 2000,
            max_delay_ms: 5000,
        }
    }
}

impl SimulatorConfig {
    /// Parse and validate config TOML.
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let config: Self = toml::from_str(input).context("failed to parse simulator config TOML")?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file from disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read simulator config at {}", path.display()))?;

        Self::from_toml_str(&raw)
            .with_context(|| format!("invalid simulator config at {}", path.display()))
    }

    /// Load from `path` when given, otherwise fall back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_path(path),
            None => Ok(Self::default()),
        }
    }

    /// Validate semantic constraints that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        validate_positive("tick_interval_ms", self.tick_interval_ms)?;
        validate_positive("activity_interval_ms", self.activity_interval_ms)?;

        if self.log_cap == 0 {
            bail!("log_cap must be at least 1");
        }
        if self.history_len == 0 {
            bail!("history_len must be at least 1");
        }

        for (name, variance) in &self.variance_by_gauge {
            if name.trim().is_empty() {
                bail!("variance_by_gauge keys must not be empty");
            }
            if !variance.is_finite() || *variance < 0.0 {
                bail!("variance_by_gauge.{name} must be a finite, non-negative number");
            }
        }

        if self.recording.min_delay_ms > self.recording.max_delay_ms {
            bail!(
                "recording.min_delay_ms ({}) exceeds recording.max_delay_ms ({})",
                self.recording.min_delay_ms,
                self.recording.max_delay_ms
            );
        }

        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn activity_interval(&self) -> Duration {
        Duration::from_millis(self.activity_interval_ms)
    }
}

impl RecordingConfig {
    pub fn min_delay(&self) -> Duration {
        Duration::from_millis(self.min_delay_ms)
    }

    pub fn max_delay(&self) -> Duration {
        Duration::from_millis(self.max_delay_ms)
    }
}

fn validate_positive(field: &str, value: u64) -> Result<()> {
    if value == 0 {
        bail!("{field} must be greater than zero");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_CONFIG: &str = r#"
tick_interval_ms = 3000
activity_interval_ms = 6000
log_cap = 7
history_len = 20
seed = 42

[variance_by_gauge]
compliance_rate = 0.25
active_recordings = 4

[recording]
min_delay_ms = 1000
max_delay_ms = 1500
"#;

    #[test]
    fn parses_full_config() {
        let config = SimulatorConfig::from_toml_str(FULL_CONFIG).unwrap();
        assert_eq!(config.tick_interval(), Duration::from_secs(3));
        assert_eq!(config.activity_interval(), Duration::from_secs(6));
        assert_eq!(config.log_cap, 7);
        assert_eq!(config.history_len, 20);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.variance_by_gauge.get("compliance_rate"), Some(&0.25));
        assert_eq!(config.recording.max_delay(), Duration::from_millis(1500));
    }

    #[test]
    fn empty_file_yields_defaults() {
        let config = SimulatorConfig::from_toml_str("").unwrap();
        assert_eq!(config, SimulatorConfig::default());
        assert_eq!(config.tick_interval_ms, 5000);
        assert_eq!(config.activity_interval_ms, 8000);
        assert_eq!(config.log_cap, 5);
        assert!(config.seed.is_none());
    }

    #[test]
    fn partial_recording_section_keeps_other_default() {
        let config = SimulatorConfig::from_toml_str("[recording]\nmax_delay_ms = 9000\n").unwrap();
        assert_eq!(config.recording.min_delay_ms, 2000);
        assert_eq!(config.recording.max_delay_ms, 9000);
    }

    #[test]
    fn unknown_key_is_rejected() {
        let err = SimulatorConfig::from_toml_str("tick_interval = 10\n")
            .unwrap_err()
            .to_string();
        assert!(err.contains("failed to parse simulator config TOML"));
    }

    #[test]
    fn zero_interval_is_rejected() {
        let err = SimulatorConfig::from_toml_str("tick_interval_ms = 0\n")
            .unwrap_err()
            .to_string();
        assert!(err.contains("tick_interval_ms must be greater than zero"));
    }

    #[test]
    fn zero_log_cap_is_rejected() {
        let err = SimulatorConfig::from_toml_str("log_cap = 0\n")
            .unwrap_err()
            .to_string();
        assert!(err.contains("log_cap must be at least 1"));
    }

    #[test]
    fn negative_variance_is_rejected() {
        let err = SimulatorConfig::from_toml_str("[variance_by_gauge]\ncompliance_rate = -1.0\n")
            .unwrap_err()
            .to_string();
        assert!(err.contains("variance_by_gauge.compliance_rate"));
    }

    #[test]
    fn non_finite_variance_is_rejected() {
        let err = SimulatorConfig::from_toml_str("[variance_by_gauge]\ncompliance_rate = nan\n")
            .unwrap_err()
            .to_string();
        assert!(err.contains("finite"));
    }

    #[test]
    fn inverted_recording_delay_is_rejected() {
        let raw = "[recording]\nmin_delay_ms = 5000\nmax_delay_ms = 2000\n";
        let err = SimulatorConfig::from_toml_str(raw).unwrap_err().to_string();
        assert!(err.contains("exceeds recording.max_delay_ms"));
    }

    #[test]
    fn load_without_path_returns_defaults() {
        let config = SimulatorConfig::load(None).unwrap();
        assert_eq!(config, SimulatorConfig::default());
    }

    #[test]
    fn from_path_reports_missing_file() {
        let path = std::env::temp_dir().join("supportsync-missing-config.toml");
        let _ = std::fs::remove_file(&path);
        let err = SimulatorConfig::from_path(&path).unwrap_err().to_string();
        assert!(err.contains("failed to read simulator config"));
    }

    #[test]
    fn from_path_reads_file() {
        let path = std::env::temp_dir().join("supportsync-test-config.toml");
        std::fs::write(&path, "log_cap = 3\n").unwrap();
        let config = SimulatorConfig::from_path(&path).unwrap();
        assert_eq!(config.log_cap, 3);
        let _ = std::fs::remove_file(&path);
    }
}
