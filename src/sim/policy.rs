//! Usage policy evaluation and per-step power draw.
//!
//! A device's policy decides whether it is ON at a given wall-clock time;
//! the power draw while ON is the nominal wattage under a ±10% uniform
//! jitter, scaled by the seasonal and peak multipliers.

use chrono::NaiveTime;
use rand::Rng;
use rand::rngs::StdRng;

/// Closed set of device usage policies.
///
/// Parsed once at config load; the simulator never dispatches on raw
/// policy strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsagePolicy {
    /// Always ON.
    Continuous,
    /// ON inside the `[start, end)` window; wraps past midnight when
    /// `start > end`.
    Fixed {
        /// Window start (inclusive).
        start: NaiveTime,
        /// Window end (exclusive).
        end: NaiveTime,
    },
    /// ON with independent probability 0.5 per timestep.
    Random,
}

impl UsagePolicy {
    /// Parses a policy tag (case-insensitive) into a policy.
    ///
    /// `"continous"` is a misspelling seen in real house files and is
    /// accepted as continuous. `fixed` requires a timing window; without
    /// one there is no valid policy. Unrecognized tags yield `None`,
    /// which the simulator treats as OFF for the whole horizon.
    pub fn parse(tag: &str, timing: Option<(NaiveTime, NaiveTime)>) -> Option<Self> {
        match tag.to_ascii_lowercase().as_str() {
            "continuous" | "continous" => Some(Self::Continuous),
            "fixed" => timing.map(|(start, end)| Self::Fixed { start, end }),
            "random" => Some(Self::Random),
            _ => None,
        }
    }

    /// Decides whether a device under this policy is ON at `now`.
    ///
    /// `Random` draws fresh from `rng` on every call; there is no memory
    /// across timesteps.
    pub fn is_on(&self, now: NaiveTime, rng: &mut StdRng) -> bool {
        match self {
            Self::Continuous => true,
            Self::Fixed { start, end } => within_window(now, *start, *end),
            Self::Random => rng.random::<f64>() < 0.5,
        }
    }
}

/// Tests whether `now` falls in the `[start, end)` window.
///
/// A window with `start > end` crosses midnight: ON when
/// `now >= start || now < end`. Shared by fixed-usage timing and the
/// seasonal peak-hour test so both agree on wraparound.
pub fn within_window(now: NaiveTime, start: NaiveTime, end: NaiveTime) -> bool {
    if start <= end {
        start <= now && now < end
    } else {
        now >= start || now < end
    }
}

/// Draws the instantaneous power for an ON device, in watts.
///
/// `base_watts * U(0.9, 1.1) * seasonal * peak`, rounded to 2 decimals
/// before any aggregation so output is deterministic modulo the RNG.
pub fn draw_power_watts(base_watts: f64, seasonal: f64, peak: f64, rng: &mut StdRng) -> f64 {
    let jitter = rng.random_range(0.9..1.1);
    round2(base_watts * jitter * seasonal * peak)
}

/// Converts an instantaneous power draw into step energy in kWh.
///
/// `step_hours` is the simulation step expressed in hours (0.5 for the
/// default 30-minute step); this is where the step size enters the
/// energy accounting, so changing the step changes every kWh figure.
pub fn energy_kwh(power_watts: f64, step_hours: f64) -> f64 {
    round4(power_watts / 1000.0 * step_hours)
}

/// Rounds to 2 decimal places (watt precision).
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Rounds to 4 decimal places (kWh precision).
pub fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}
