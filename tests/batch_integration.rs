//! End-to-end batch simulation invariants.

mod common;

use std::fs;
use std::path::Path;

use household_sim::catalog::{ORDERED_CATEGORIES, ORDERED_DEVICES, device_index};
use household_sim::io::export::{header, write_csv};
use household_sim::runner::run_batch;
use household_sim::sim::policy::round4;
use household_sim::sim::types::SimulationRow;

fn run_two_house_batch(name: &str, slots: usize) -> Vec<SimulationRow> {
    let dir = common::scratch_dir(name);
    common::write_house(&dir, "house1.json", common::HOUSE_ONE);
    common::write_house(&dir, "house2.json", common::HOUSE_TWO);

    let result = run_batch(&dir, None, &common::short_scenario(slots));
    let _ = fs::remove_dir_all(&dir);

    assert_eq!(result.houses_simulated, 2);
    assert_eq!(result.houses_failed, 0);
    result.rows
}

#[test]
fn meter_reading_is_cumulative_and_non_decreasing() {
    let rows = run_two_house_batch("meter", 96);

    for (house, initial) in [("house1", 1520.75), ("house2", 10.0)] {
        let mut expected = initial;
        let mut prev = initial;
        for row in rows.iter().filter(|r| r.house_id == house) {
            expected = round4(expected + row.consumed_power);
            assert!(
                (row.meter_reading - expected).abs() < 1e-9,
                "{house}: meter must equal initial + cumulative consumption"
            );
            assert!(row.meter_reading >= prev, "{house}: meter must not decrease");
            prev = row.meter_reading;
        }
    }
}

#[test]
fn consumed_power_equals_category_and_device_sums() {
    for row in run_two_house_batch("sums", 96) {
        assert!(
            (row.consumed_power - row.category_total()).abs() < 1e-4,
            "category sum mismatch at {} {}",
            row.house_id,
            row.time
        );
        assert!(
            (row.consumed_power - row.device_total()).abs() < 1e-4,
            "device sum mismatch at {} {}",
            row.house_id,
            row.time
        );
    }
}

#[test]
fn rows_are_rectangular_across_houses() {
    for row in run_two_house_batch("rect", 48) {
        assert_eq!(row.device_kwh.len(), ORDERED_DEVICES.len());
        assert_eq!(row.category_kwh.len(), ORDERED_CATEGORIES.len());
    }
}

#[test]
fn missing_devices_report_exactly_zero() {
    let rows = run_two_house_batch("zero-fill", 96);
    let ac = device_index("ac").expect("ac is a fixed column");
    let ev = device_index("ev_car").expect("ev_car is a fixed column");
    let dishwasher = device_index("dishwasher").expect("dishwasher is a fixed column");

    for row in rows.iter().filter(|r| r.house_id == "house2") {
        // house2 has no AC and its EV flag is off
        assert_eq!(row.device_kwh[ac], 0.0);
        assert_eq!(row.device_kwh[ev], 0.0);
    }
    for row in rows.iter().filter(|r| r.house_id == "house1") {
        // used=false keeps the dishwasher at zero for the whole horizon
        assert_eq!(row.device_kwh[dishwasher], 0.0);
    }
}

#[test]
fn fixed_window_devices_respect_wraparound() {
    let rows = run_two_house_batch("window", 48);
    let ac = device_index("ac").expect("ac is a fixed column");

    for row in rows.iter().filter(|r| r.house_id == "house1") {
        let hour = row
            .time
            .to_string()
            .split(':')
            .next()
            .and_then(|h| h.parse::<u32>().ok())
            .expect("hour parses");
        let in_window = hour >= 22 || hour < 6;
        assert_eq!(
            row.device_kwh[ac] > 0.0,
            in_window,
            "ac at {} should be {}",
            row.time,
            if in_window { "on" } else { "off" }
        );
    }
}

#[test]
fn continuous_device_energy_stays_in_jitter_band() {
    let rows = run_two_house_batch("band", 96);
    let fridge = device_index("fridge").expect("fridge is a fixed column");

    // 150 W fridge, half-hour slots: 0.075 kWh nominal, ±10% jitter
    for row in &rows {
        let kwh = row.device_kwh[fridge];
        assert!(
            (0.0675..=0.0825).contains(&kwh),
            "fridge energy {kwh} outside the jitter band at {} {}",
            row.house_id,
            row.time
        );
    }
}

#[test]
fn batch_csv_is_rectangular_and_complete() {
    let rows = run_two_house_batch("csv", 48);

    let mut buf = Vec::new();
    write_csv(&rows, &mut buf).expect("export should succeed");
    let output = String::from_utf8(buf).expect("valid UTF-8");

    let mut lines = output.lines();
    let head = lines.next().expect("header line");
    assert_eq!(head.split(',').count(), header().len());
    for device in ORDERED_DEVICES {
        assert!(head.contains(device), "header missing device {device}");
    }
    for category in ORDERED_CATEGORIES {
        assert!(head.contains(category), "header missing category {category}");
    }
    assert_eq!(lines.count(), rows.len());
}

#[test]
fn one_bad_house_does_not_poison_the_batch() {
    let dir = common::scratch_dir("poison");
    common::write_house(&dir, "house1.json", common::HOUSE_ONE);
    common::write_house(&dir, "house2.json", "{ definitely not json");
    common::write_house(&dir, "house3.json", common::HOUSE_TWO);

    let result = run_batch(&dir, None, &common::short_scenario(24));
    let _ = fs::remove_dir_all(&dir);

    assert_eq!(result.houses_simulated, 2);
    assert_eq!(result.houses_failed, 1);
    assert_eq!(result.rows.len(), 48);
}

#[test]
fn zero_inputs_is_an_empty_non_fatal_outcome() {
    let dir = common::scratch_dir("no-inputs");
    let result = run_batch(&dir, None, &common::short_scenario(24));
    let _ = fs::remove_dir_all(&dir);

    assert!(result.is_empty());
    assert_eq!(result.houses_simulated, 0);
    assert_eq!(result.houses_failed, 0);
}

#[test]
fn malformed_fields_fall_back_to_defaults_without_losing_the_house() {
    let dir = common::scratch_dir("defaults");
    common::write_house(
        &dir,
        "house1.json",
        r#"{
            "initial_meter_reading_date": "not-a-date",
            "white_goods": {"fridge": {"used": true, "usage": "continous"}}
        }"#,
    );

    let result = run_batch(&dir, None, &common::short_scenario(24));
    let _ = fs::remove_dir_all(&dir);

    assert_eq!(result.houses_simulated, 1);
    assert_eq!(result.rows.len(), 24);
    assert!(result.rows.iter().all(|r| r.house_id == "unknown"));
    assert_eq!(result.rows[0].date.to_string(), "2025-01-01");
    // the tolerated misspelling still counts as continuous
    assert!(result.rows.iter().all(|r| r.consumed_power > 0.0));
}

#[test]
fn seasonal_config_absence_and_presence_both_simulate() {
    let dir = common::scratch_dir("seasonal");
    common::write_house(&dir, "house1.json", common::HOUSE_TWO);

    let schedule = household_sim::sim::season::SeasonalSchedule::from_json_str(
        r#"{"seasons": {"summer": {
            "months": [6, 7, 8],
            "device_multipliers": {"fridge": 2.0}
        }}}"#,
    )
    .expect("schedule should parse");

    let plain = run_batch(&dir, None, &common::short_scenario(48));
    let boosted = run_batch(&dir, Some(&schedule), &common::short_scenario(48));
    let _ = fs::remove_dir_all(&dir);

    let fridge = device_index("fridge").expect("fridge is a fixed column");
    let plain_total: f64 = plain.rows.iter().map(|r| r.device_kwh[fridge]).sum();
    let boosted_total: f64 = boosted.rows.iter().map(|r| r.device_kwh[fridge]).sum();
    // house2 starts mid-June, inside the boosted season
    assert!(
        boosted_total > plain_total * 1.5,
        "seasonal multiplier should scale fridge energy ({plain_total} -> {boosted_total})"
    );
}

#[test]
fn export_writes_a_parseable_file() {
    let rows = run_two_house_batch("file", 24);
    let dir = common::scratch_dir("file-out");
    let path = dir.join("batch.csv");

    household_sim::io::export::export_csv(&rows, Path::new(&path)).expect("file export");
    let content = fs::read_to_string(&path).expect("file should exist");
    assert_eq!(content.lines().count(), rows.len() + 1);

    let _ = fs::remove_dir_all(&dir);
}
