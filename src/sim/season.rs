//! Seasonal modulation: per-season device multipliers and peak-hour boosts.
//!
//! The seasonal configuration is optional, loaded once per batch, and
//! shared read-only across every house. Every lookup degrades to a 1.0
//! multiplier when no season matches or no entry exists, so an absent or
//! sparse config can never fail a simulation.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use chrono::{Datelike, NaiveDate, NaiveTime};
use serde::Deserialize;

use crate::config::ConfigError;
use crate::sim::policy::within_window;

/// Shared read-only seasonal configuration for a batch.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeasonalSchedule {
    /// Season name → definition. Kept in name order so month lookups are
    /// deterministic when a config erroneously lists a month twice.
    #[serde(default)]
    pub seasons: BTreeMap<String, Season>,
}

/// One season: its calendar months and per-device modulation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Season {
    /// Calendar months (1–12) belonging to this season.
    pub months: BTreeSet<u32>,
    /// Device → seasonal power multiplier.
    pub device_multipliers: BTreeMap<String, f64>,
    /// Device → peak-hour window and boost.
    pub time_patterns: BTreeMap<String, TimePattern>,
}

/// A peak-hour window with its multiplier.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TimePattern {
    /// `[start, end)` window; wraps past midnight when start > end.
    pub peak_hours: [NaiveTime; 2],
    /// Multiplier applied inside the window.
    pub peak_multiplier: f64,
}

impl Season {
    /// Seasonal multiplier for a device; 1.0 when the season has no entry.
    pub fn device_multiplier(&self, device: &str) -> f64 {
        self.device_multipliers.get(device).copied().unwrap_or(1.0)
    }

    /// Peak-hour multiplier for a device at `now`; 1.0 outside the window
    /// or when the season has no pattern for the device.
    pub fn peak_multiplier(&self, device: &str, now: NaiveTime) -> f64 {
        match self.time_patterns.get(device) {
            Some(p) if within_window(now, p.peak_hours[0], p.peak_hours[1]) => p.peak_multiplier,
            _ => 1.0,
        }
    }
}

impl SeasonalSchedule {
    /// Parses a seasonal configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the JSON is
    /// invalid.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "seasonal".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_json_str(&content)
    }

    /// Parses a seasonal configuration from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the JSON is invalid.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(|e| ConfigError {
            field: "seasonal".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates season definitions and returns a list of errors.
    ///
    /// Returns an empty vector if the configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let mut seen_months: BTreeMap<u32, &str> = BTreeMap::new();

        for (name, season) in &self.seasons {
            for &month in &season.months {
                if !(1..=12).contains(&month) {
                    errors.push(ConfigError {
                        field: format!("seasons.{name}.months"),
                        message: format!("month {month} is not in 1..=12"),
                    });
                } else if let Some(other) = seen_months.insert(month, name) {
                    errors.push(ConfigError {
                        field: format!("seasons.{name}.months"),
                        message: format!("month {month} already claimed by season \"{other}\""),
                    });
                }
            }
            for (device, pattern) in &season.time_patterns {
                if pattern.peak_multiplier <= 0.0 {
                    errors.push(ConfigError {
                        field: format!("seasons.{name}.time_patterns.{device}"),
                        message: "peak_multiplier must be > 0".into(),
                    });
                }
            }
        }

        errors
    }

    /// Finds the season containing the date's calendar month.
    ///
    /// Returns `None` when no season claims the month. If a month appears
    /// in several seasons (rejected by [`validate`](Self::validate)), the
    /// first season in name order wins.
    pub fn season_for(&self, date: NaiveDate) -> Option<&Season> {
        let month = date.month();
        self.seasons
            .values()
            .find(|season| season.months.contains(&month))
    }

    /// Name of the season containing the date's month, if any.
    pub fn season_name_for(&self, date: NaiveDate) -> Option<&str> {
        let month = date.month();
        self.seasons
            .iter()
            .find(|(_, season)| season.months.contains(&month))
            .map(|(name, _)| name.as_str())
    }

    /// Combined `(seasonal, peak)` multipliers for a device at a moment.
    ///
    /// `(1.0, 1.0)` when no season matches the date.
    pub fn multipliers(&self, device: &str, date: NaiveDate, now: NaiveTime) -> (f64, f64) {
        match self.season_for(date) {
            Some(season) => (
                season.device_multiplier(device),
                season.peak_multiplier(device, now),
            ),
            None => (1.0, 1.0),
        }
    }
}
