//! House configuration: the `house*.json` schema and its normalization
//! into a validated [`HouseSpec`].
//!
//! Normalization never fails: a malformed field is replaced by a
//! documented default and reported through a warning-level diagnostic, so
//! one sloppy house file cannot abort a batch. Only an unreadable or
//! syntactically invalid file is a hard per-house error.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

use crate::catalog;
use crate::sim::policy::UsagePolicy;

/// House id substituted when the config has none.
pub const DEFAULT_HOUSE_ID: &str = "unknown";

/// Start date substituted when `initial_meter_reading_date` is missing
/// or unparseable: 2025-01-01.
pub fn default_start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).unwrap_or_default()
}

/// Hard failure loading one house file. Caught at the batch boundary.
#[derive(Debug, Error)]
pub enum HouseLoadError {
    #[error("cannot read \"{path}\": {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON in \"{path}\": {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Raw house file as written on disk.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HouseFile {
    pub house_id: Option<String>,
    pub initial_meter_reading: Option<f64>,
    /// `YYYY-MM-DD`.
    pub initial_meter_reading_date: Option<String>,
    pub white_goods: BTreeMap<String, DeviceEntry>,
    pub entertainment: BTreeMap<String, DeviceEntry>,
    pub air_conditioners: BTreeMap<String, DeviceEntry>,
    pub utility_appliances: BTreeMap<String, DeviceEntry>,
    pub lighting: Option<LightingSection>,
    pub ev_charges: Option<DeviceEntry>,
}

/// Lighting is either one device object or a map of rooms that collapse
/// into one virtual `lighting` device.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LightingSection {
    Single(DeviceEntry),
    Rooms(BTreeMap<String, DeviceEntry>),
}

/// One device object inside a house file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeviceEntry {
    pub used: UsedFlag,
    pub usage: Option<String>,
    pub timing: Option<Timing>,
}

/// `used` appears both as a JSON bool and as the strings `"True"` /
/// `"False"` in house files written by hand.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum UsedFlag {
    Bool(bool),
    Text(String),
}

impl Default for UsedFlag {
    fn default() -> Self {
        Self::Bool(false)
    }
}

impl UsedFlag {
    /// True when the flag is set, under either representation.
    pub fn is_set(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::Text(s) => s.eq_ignore_ascii_case("true"),
        }
    }
}

/// Fixed-usage timing window, `HH:MM:SS` strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Timing {
    pub start: String,
    pub end: String,
}

/// One device ready for simulation.
#[derive(Debug, Clone)]
pub struct DeviceSpec {
    /// Device column name (a member of the fixed device order).
    pub name: String,
    /// Category the config placed the device in.
    pub category: String,
    /// Nominal wattage from the catalog.
    pub wattage: f64,
    /// `None` means fail-safe OFF for the whole horizon.
    pub policy: Option<UsagePolicy>,
}

/// A normalized house, immutable for the duration of a batch run.
#[derive(Debug, Clone)]
pub struct HouseSpec {
    pub house_id: String,
    pub initial_meter_reading: f64,
    pub start_date: NaiveDate,
    /// Used devices only, at most one per fixed-order device name.
    pub devices: Vec<DeviceSpec>,
}

impl HouseSpec {
    /// Loads and normalizes one house file.
    ///
    /// # Errors
    ///
    /// Returns a [`HouseLoadError`] only for unreadable files or invalid
    /// JSON; every in-schema problem is recovered with a default.
    pub fn from_json_file(path: &Path) -> Result<Self, HouseLoadError> {
        let content = fs::read_to_string(path).map_err(|source| HouseLoadError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let file: HouseFile =
            serde_json::from_str(&content).map_err(|source| HouseLoadError::Json {
                path: path.display().to_string(),
                source,
            })?;
        Ok(Self::from_file(file))
    }

    /// Normalizes a parsed house file, substituting documented defaults
    /// for anything malformed.
    pub fn from_file(file: HouseFile) -> Self {
        let house_id = file
            .house_id
            .unwrap_or_else(|| DEFAULT_HOUSE_ID.to_string());

        let initial_meter_reading = match file.initial_meter_reading {
            Some(v) if v >= 0.0 => v,
            Some(v) => {
                warn!(house = %house_id, value = v, "negative initial meter reading, using 0");
                0.0
            }
            None => 0.0,
        };

        let start_date = match &file.initial_meter_reading_date {
            Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap_or_else(|_| {
                warn!(house = %house_id, date = %s, "unparseable start date, using default");
                default_start_date()
            }),
            None => {
                warn!(house = %house_id, "missing start date, using default");
                default_start_date()
            }
        };

        let mut devices: Vec<DeviceSpec> = Vec::new();
        let mut push_device = |name: &str, category: &str, entry: &DeviceEntry| {
            if !entry.used.is_set() {
                return;
            }
            if catalog::device_index(name).is_none() {
                warn!(house = %house_id, device = name, "device not in the fixed column order, skipping");
                return;
            }
            if devices.iter().any(|d| d.name == name) {
                warn!(house = %house_id, device = name, "device configured twice, keeping the first");
                return;
            }
            devices.push(DeviceSpec {
                name: name.to_string(),
                category: category.to_string(),
                wattage: catalog::nominal_wattage(name),
                policy: parse_policy(&house_id, name, entry),
            });
        };

        let plain_sections: [(&str, &BTreeMap<String, DeviceEntry>); 4] = [
            ("white_goods", &file.white_goods),
            ("entertainment", &file.entertainment),
            ("air_conditioners", &file.air_conditioners),
            ("utility_appliances", &file.utility_appliances),
        ];
        for (category, section) in plain_sections {
            for (name, entry) in section {
                push_device(name, category, entry);
            }
        }

        if let Some(section) = &file.lighting {
            let entry = match section {
                LightingSection::Single(entry) => entry.clone(),
                LightingSection::Rooms(rooms) => collapse_lighting(rooms),
            };
            push_device("lighting", "lighting", &entry);
        }

        // EV charging only materializes as a device when in use.
        if let Some(entry) = &file.ev_charges {
            if entry.used.is_set() {
                push_device("ev_car", "ev_charges", entry);
            }
        }

        Self {
            house_id,
            initial_meter_reading,
            start_date,
            devices,
        }
    }
}

/// Collapses lighting rooms into one virtual device.
///
/// `used` is true when any room is used; the policy is `random` if any
/// used room is random, otherwise `fixed` with the last-seen timing.
fn collapse_lighting(rooms: &BTreeMap<String, DeviceEntry>) -> DeviceEntry {
    let mut used = false;
    let mut any_random = false;
    let mut last_timing = None;

    for room in rooms.values() {
        if !room.used.is_set() {
            continue;
        }
        used = true;
        match room.usage.as_deref() {
            Some(tag) if tag.eq_ignore_ascii_case("random") => any_random = true,
            _ => {}
        }
        if let Some(timing) = &room.timing {
            last_timing = Some(timing.clone());
        }
    }

    DeviceEntry {
        used: UsedFlag::Bool(used),
        usage: Some(if any_random { "random" } else { "fixed" }.to_string()),
        timing: last_timing,
    }
}

/// Parses a device's policy, warning once and falling back to OFF when
/// the tag is unknown or a fixed window is missing/unparseable.
fn parse_policy(house_id: &str, device: &str, entry: &DeviceEntry) -> Option<UsagePolicy> {
    let Some(tag) = entry.usage.as_deref() else {
        warn!(house = house_id, device, "no usage policy, device stays off");
        return None;
    };

    let timing = entry.timing.as_ref().and_then(|t| {
        let start = NaiveTime::parse_from_str(&t.start, "%H:%M:%S");
        let end = NaiveTime::parse_from_str(&t.end, "%H:%M:%S");
        match (start, end) {
            (Ok(start), Ok(end)) => Some((start, end)),
            _ => {
                warn!(house = house_id, device, "unparseable timing window, ignoring");
                None
            }
        }
    });

    let policy = UsagePolicy::parse(tag, timing);
    if policy.is_none() {
        warn!(house = house_id, device, tag, "unusable usage policy, device stays off");
    }
    policy
}
