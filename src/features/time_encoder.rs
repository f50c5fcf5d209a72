//! Cyclic time features: seconds-of-day plus sine/cosine pairs for the
//! day, minute and second cycles.
//!
//! The encoding makes midnight and 23:59:59 numerically adjacent, which
//! a raw seconds column cannot express.

use std::f64::consts::TAU;

use chrono::{NaiveTime, Timelike};

/// Seconds in one day: the period of the day cycle.
pub const DAY_SECONDS: f64 = 86_400.0;

/// Period of the minute and second cycles.
pub const MINUTE_PERIOD: f64 = 60.0;

/// All time-derived feature values for one wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeFeatures {
    /// Seconds since midnight.
    pub time: u32,
    pub time_sin: f64,
    pub time_cos: f64,
    /// Minute within the hour.
    pub minute: u32,
    /// Second within the minute.
    pub second: u32,
    pub minute_sin: f64,
    pub minute_cos: f64,
    pub second_sin: f64,
    pub second_cos: f64,
}

/// Sine/cosine pair for a value on a cycle of the given period.
fn cyclic(value: f64, period: f64) -> (f64, f64) {
    let angle = TAU * value / period;
    (angle.sin(), angle.cos())
}

impl TimeFeatures {
    /// Encodes a wall-clock time.
    pub fn from_time(t: NaiveTime) -> Self {
        let seconds = t.num_seconds_from_midnight();
        let minute = (seconds / 60) % 60;
        let second = seconds % 60;

        let (time_sin, time_cos) = cyclic(f64::from(seconds), DAY_SECONDS);
        let (minute_sin, minute_cos) = cyclic(f64::from(minute), MINUTE_PERIOD);
        let (second_sin, second_cos) = cyclic(f64::from(second), MINUTE_PERIOD);

        Self {
            time: seconds,
            time_sin,
            time_cos,
            minute,
            second,
            minute_sin,
            minute_cos,
            second_sin,
            second_cos,
        }
    }

    /// Parses and encodes an `HH:MM:SS` string.
    ///
    /// # Errors
    ///
    /// Returns a `chrono::ParseError` if the string is not a valid time.
    pub fn parse(s: &str) -> Result<Self, chrono::ParseError> {
        NaiveTime::parse_from_str(s, "%H:%M:%S").map(Self::from_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seconds_of_day() {
        let f = TimeFeatures::parse("14:30:45").expect("time should parse");
        assert_eq!(f.time, 14 * 3600 + 30 * 60 + 45);
        assert_eq!(f.minute, 30);
        assert_eq!(f.second, 45);
    }

    #[test]
    fn midnight_is_cycle_origin() {
        let f = TimeFeatures::parse("00:00:00").expect("time should parse");
        assert_eq!(f.time, 0);
        assert!(f.time_sin.abs() < 1e-12);
        assert!((f.time_cos - 1.0).abs() < 1e-12);
    }

    #[test]
    fn noon_is_opposite_of_midnight() {
        let f = TimeFeatures::parse("12:00:00").expect("time should parse");
        assert!(f.time_sin.abs() < 1e-9);
        assert!((f.time_cos + 1.0).abs() < 1e-9);
    }

    #[test]
    fn day_cycle_wraps_at_the_boundary() {
        let start = TimeFeatures::parse("00:00:00").expect("time should parse");
        let end = TimeFeatures::parse("23:59:59").expect("time should parse");
        assert!(
            (start.time_sin - end.time_sin).abs() < 1e-3,
            "sine should be periodic across midnight"
        );
        assert!((start.time_cos - end.time_cos).abs() < 1e-3);
    }

    #[test]
    fn invalid_string_is_an_error() {
        assert!(TimeFeatures::parse("25:00:00").is_err());
        assert!(TimeFeatures::parse("noonish").is_err());
    }

    #[test]
    fn unit_circle_invariant() {
        for s in ["03:14:15", "09:26:53", "21:58:58"] {
            let f = TimeFeatures::parse(s).expect("time should parse");
            assert!((f.time_sin.powi(2) + f.time_cos.powi(2) - 1.0).abs() < 1e-12);
            assert!((f.minute_sin.powi(2) + f.minute_cos.powi(2) - 1.0).abs() < 1e-12);
            assert!((f.second_sin.powi(2) + f.second_cos.powi(2) - 1.0).abs() < 1e-12);
        }
    }
}
