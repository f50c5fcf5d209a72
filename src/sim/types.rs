//! Core simulation record types.

use std::fmt;

use chrono::{NaiveDate, NaiveTime};

/// Complete record of one simulated timestamp for one house.
///
/// The `category_kwh` and `device_kwh` vectors are aligned to the fixed
/// column orders in [`crate::catalog`]; devices and categories a house
/// does not own carry 0.0 so every row in a batch is rectangular.
#[derive(Debug, Clone)]
pub struct SimulationRow {
    /// Owning house identifier.
    pub house_id: String,
    /// Calendar date of the slot.
    pub date: NaiveDate,
    /// Date-range bucket label, e.g. `"mar_2"`.
    pub date_range: String,
    /// Wall-clock time of the slot.
    pub time: NaiveTime,
    /// Energy per category (kWh), in [`crate::catalog::ORDERED_CATEGORIES`] order.
    pub category_kwh: Vec<f64>,
    /// Cumulative meter reading after this slot (kWh).
    pub meter_reading: f64,
    /// Total energy drawn this slot (kWh).
    pub consumed_power: f64,
    /// Energy per device (kWh), in [`crate::catalog::ORDERED_DEVICES`] order.
    pub device_kwh: Vec<f64>,
}

impl fmt::Display for SimulationRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} ({}) | consumed={:.4} kWh  meter={:.4} kWh",
            self.house_id,
            self.date,
            self.time,
            self.date_range,
            self.consumed_power,
            self.meter_reading,
        )
    }
}

impl SimulationRow {
    /// Sum of the device columns (kWh).
    pub fn device_total(&self) -> f64 {
        self.device_kwh.iter().sum()
    }

    /// Sum of the category columns (kWh).
    pub fn category_total(&self) -> f64 {
        self.category_kwh.iter().sum()
    }
}
