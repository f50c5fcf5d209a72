//! Horizon bounds and the timestamp clock driving a house simulation.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};

/// Termination condition for one house's timestamp sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Horizon {
    /// A fixed number of simulation slots.
    Slots(usize),
    /// All slots from the start date until the calendar year rolls past
    /// this boundary year.
    ThroughYear(i32),
}

/// A simulation clock producing strictly increasing timestamps at a
/// fixed step until the horizon bound is reached.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use household_sim::sim::horizon::{Horizon, TimestampClock};
///
/// let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
/// let mut clock = TimestampClock::new(start, 30, Horizon::Slots(3));
/// let mut stamps = Vec::new();
///
/// clock.run(|ts| stamps.push(ts.to_string()));
/// assert_eq!(
///     stamps,
///     vec![
///         "2025-01-01 00:00:00",
///         "2025-01-01 00:30:00",
///         "2025-01-01 01:00:00",
///     ]
/// );
/// ```
pub struct TimestampClock {
    /// Next timestamp to emit.
    current: NaiveDateTime,
    /// Step between consecutive timestamps.
    step: Duration,
    /// Number of timestamps emitted so far.
    emitted: usize,
    /// Termination bound.
    horizon: Horizon,
}

impl TimestampClock {
    /// Creates a clock starting at midnight of `start`.
    ///
    /// # Arguments
    ///
    /// * `start` - First simulated calendar date
    /// * `step_minutes` - Step between timestamps (must be > 0)
    /// * `horizon` - Termination bound
    ///
    /// # Panics
    ///
    /// Panics if `step_minutes` is zero.
    pub fn new(start: NaiveDate, step_minutes: u32, horizon: Horizon) -> Self {
        assert!(step_minutes > 0, "step_minutes must be > 0");
        Self {
            current: start.and_hms_opt(0, 0, 0).unwrap_or_default(),
            step: Duration::minutes(i64::from(step_minutes)),
            emitted: 0,
            horizon,
        }
    }

    /// Advances the clock by one step.
    ///
    /// # Returns
    ///
    /// * `Some(timestamp)` - The next timestamp in the sequence
    /// * `None` - If the horizon bound has been reached
    pub fn tick(&mut self) -> Option<NaiveDateTime> {
        let within = match self.horizon {
            Horizon::Slots(total) => self.emitted < total,
            Horizon::ThroughYear(year) => self.current.year() <= year,
        };
        if !within {
            return None;
        }
        let ts = self.current;
        self.current += self.step;
        self.emitted += 1;
        Some(ts)
    }

    /// Runs a function for each remaining timestamp in the sequence.
    ///
    /// # Arguments
    ///
    /// * `f` - A function called with each timestamp in order
    pub fn run(&mut self, mut f: impl FnMut(NaiveDateTime)) {
        while let Some(ts) = self.tick() {
            f(ts);
        }
    }
}
