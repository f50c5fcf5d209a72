//! Static device catalog: nominal wattages and the fixed column orders.
//!
//! The ordered device and category lists define the batch table's column
//! layout. They are shared by the simulator, the CSV exporter, and the
//! feature schema so that every house in a batch produces the same
//! rectangular shape regardless of which devices it actually owns.

/// Nominal wattage per known device.
const DEVICE_WATTAGE: &[(&str, f64)] = &[
    ("fridge", 150.0),
    ("washing_machine", 500.0),
    ("microwave", 1100.0),
    ("dishwasher", 1200.0),
    ("tv", 100.0),
    ("wifi", 10.0),
    ("laptop", 60.0),
    ("chargers", 20.0),
    ("lighting", 80.0),
    ("fans", 50.0),
    ("ac", 2000.0),
    ("ev_car", 7000.0),
];

/// Fallback wattage for a device with no catalog entry.
pub const DEFAULT_WATTAGE: f64 = 100.0;

/// Fixed device column order for every batch table.
pub const ORDERED_DEVICES: &[&str] = &[
    "fridge",
    "washing_machine",
    "microwave",
    "dishwasher",
    "tv",
    "wifi",
    "laptop",
    "chargers",
    "lighting",
    "fans",
    "ac",
    "ev_car",
];

/// Fixed category column order for every batch table.
///
/// Also the output order of the prediction endpoint's six fields.
pub const ORDERED_CATEGORIES: &[&str] = &[
    "white_goods",
    "entertainment",
    "air_conditioners",
    "lighting",
    "ev_charges",
    "utility_appliances",
];

/// Returns the nominal wattage for a device, or [`DEFAULT_WATTAGE`] if the
/// catalog has no entry for it.
pub fn nominal_wattage(device: &str) -> f64 {
    DEVICE_WATTAGE
        .iter()
        .find(|(name, _)| *name == device)
        .map_or(DEFAULT_WATTAGE, |(_, watts)| *watts)
}

/// Returns the index of a device in the fixed column order, if present.
pub fn device_index(device: &str) -> Option<usize> {
    ORDERED_DEVICES.iter().position(|d| *d == device)
}

/// Returns the index of a category in the fixed column order, if present.
pub fn category_index(category: &str) -> Option<usize> {
    ORDERED_CATEGORIES.iter().position(|c| *c == category)
}
