//! Shared test fixtures for integration tests.

use std::fs;
use std::path::PathBuf;

use household_sim::config::ScenarioConfig;

/// House with devices across four categories, half of them on fixed
/// windows.
pub const HOUSE_ONE: &str = r#"{
    "house_id": "house1",
    "initial_meter_reading": 1520.75,
    "initial_meter_reading_date": "2025-01-01",
    "white_goods": {
        "fridge": {"used": true, "usage": "continuous"},
        "washing_machine": {"used": true, "usage": "fixed",
            "timing": {"start": "18:00:00", "end": "20:00:00"}},
        "dishwasher": {"used": false, "usage": "continuous"}
    },
    "entertainment": {
        "tv": {"used": true, "usage": "random"},
        "wifi": {"used": true, "usage": "continuous"}
    },
    "air_conditioners": {
        "ac": {"used": true, "usage": "fixed",
            "timing": {"start": "22:00:00", "end": "06:00:00"}}
    },
    "lighting": {
        "hall": {"used": true, "usage": "fixed",
            "timing": {"start": "18:00:00", "end": "23:00:00"}},
        "bedroom": {"used": true, "usage": "random"}
    },
    "ev_charges": {"used": true, "usage": "fixed",
        "timing": {"start": "23:00:00", "end": "05:00:00"}}
}"#;

/// Smaller house: no AC, no EV, lighting as a single object.
pub const HOUSE_TWO: &str = r#"{
    "house_id": "house2",
    "initial_meter_reading": 10.0,
    "initial_meter_reading_date": "2025-06-15",
    "white_goods": {
        "fridge": {"used": true, "usage": "continuous"}
    },
    "entertainment": {
        "laptop": {"used": true, "usage": "random"}
    },
    "lighting": {"used": true, "usage": "fixed",
        "timing": {"start": "19:00:00", "end": "22:30:00"}},
    "ev_charges": {"used": false, "usage": "continuous"}
}"#;

/// Creates a unique scratch directory for one integration test.
pub fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "household-sim-it-{name}-{}",
        std::process::id()
    ));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).expect("scratch dir should be creatable");
    dir
}

/// Writes one house file into the scratch directory.
pub fn write_house(dir: &PathBuf, file_name: &str, json: &str) {
    fs::write(dir.join(file_name), json).expect("house file should be writable");
}

/// Baseline scenario shortened to `slots` steps.
pub fn short_scenario(slots: usize) -> ScenarioConfig {
    let mut scenario = ScenarioConfig::baseline();
    scenario.horizon.slots = Some(slots);
    scenario
}
