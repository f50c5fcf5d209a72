//! TOML-based scenario configuration for batch simulation runs.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::sim::horizon::Horizon;

/// Default slot count: 30 days of half-hour slots.
pub const DEFAULT_SLOTS: usize = 1440;

/// Default simulation step in minutes.
pub const DEFAULT_STEP_MINUTES: u32 = 30;

/// Top-level scenario configuration parsed from TOML.
///
/// All fields have defaults matching the baseline scenario. Load from
/// TOML with [`ScenarioConfig::from_toml_file`] or use
/// [`ScenarioConfig::baseline`] for the built-in default.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Simulation timing and randomness parameters.
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Horizon bound: fixed slot count or calendar-year boundary.
    #[serde(default)]
    pub horizon: HorizonConfig,
}

/// Simulation timing and randomness parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Master random seed; per-house generators derive from it.
    pub seed: u64,
    /// Simulation step size in minutes (must be in 1..=1440).
    pub step_minutes: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            step_minutes: DEFAULT_STEP_MINUTES,
        }
    }
}

/// Horizon bound configuration.
///
/// Exactly one of `slots` and `through_year` may be set. When neither is
/// set, the run covers [`DEFAULT_SLOTS`] steps.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HorizonConfig {
    /// Fixed number of simulation slots.
    pub slots: Option<usize>,
    /// Simulate until the calendar year rolls past this year.
    pub through_year: Option<i32>,
}

impl HorizonConfig {
    /// Resolves the configured bound into a [`Horizon`], applying the
    /// default slot count when nothing is set.
    pub fn resolve(&self) -> Horizon {
        match (self.slots, self.through_year) {
            (_, Some(year)) => Horizon::ThroughYear(year),
            (Some(slots), None) => Horizon::Slots(slots),
            (None, None) => Horizon::Slots(DEFAULT_SLOTS),
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"simulation.step_minutes"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {} — {}", self.field, self.message)
    }
}

impl ScenarioConfig {
    /// Returns the baseline scenario: half-hour steps over 30 days.
    pub fn baseline() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            horizon: HorizonConfig::default(),
        }
    }

    /// Returns the fine-grained preset: 15-minute steps over the same
    /// 30-day window.
    pub fn fine_grained() -> Self {
        Self {
            simulation: SimulationConfig {
                step_minutes: 15,
                ..SimulationConfig::default()
            },
            horizon: HorizonConfig {
                slots: Some(DEFAULT_SLOTS * 2),
                through_year: None,
            },
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["baseline", "fine_grained"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "baseline" => Ok(Self::baseline()),
            "fine_grained" => Ok(Self::fine_grained()),
            _ => Err(ConfigError {
                field: "preset".to_string(),
                message: format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            }),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "scenario".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let s = &self.simulation;
        if s.step_minutes == 0 || s.step_minutes > 1440 {
            errors.push(ConfigError {
                field: "simulation.step_minutes".into(),
                message: format!("must be in 1..=1440, got {}", s.step_minutes),
            });
        }

        let h = &self.horizon;
        if h.slots.is_some() && h.through_year.is_some() {
            errors.push(ConfigError {
                field: "horizon".into(),
                message: "`slots` and `through_year` are mutually exclusive".into(),
            });
        }
        if h.slots == Some(0) {
            errors.push(ConfigError {
                field: "horizon.slots".into(),
                message: "must be > 0".into(),
            });
        }

        errors
    }
}
