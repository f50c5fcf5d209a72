//! CSV export for the merged batch table.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::catalog::{ORDERED_CATEGORIES, ORDERED_DEVICES};
use crate::sim::types::SimulationRow;

/// Column layout of the batch table: identity columns, category columns,
/// meter/total columns, device columns. Every consumer of the table
/// (training preparation included) relies on this order.
pub fn header() -> Vec<&'static str> {
    let mut columns = vec!["house_id", "date", "date_range", "time"];
    columns.extend_from_slice(ORDERED_CATEGORIES);
    columns.push("meter_reading");
    columns.push("consumed_power");
    columns.extend_from_slice(ORDERED_DEVICES);
    columns
}

/// Exports batch rows to a CSV file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(rows: &[SimulationRow], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(rows, buf)
}

/// Writes batch rows as CSV to any writer.
///
/// Produces deterministic output for identical inputs.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(rows: &[SimulationRow], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    let columns = header();
    wtr.write_record(&columns)?;

    for row in rows {
        let mut record: Vec<String> = Vec::with_capacity(columns.len());
        record.push(row.house_id.clone());
        record.push(row.date.to_string());
        record.push(row.date_range.clone());
        record.push(row.time.to_string());
        for value in &row.category_kwh {
            record.push(format!("{value:.4}"));
        }
        record.push(format!("{:.4}", row.meter_reading));
        record.push(format!("{:.4}", row.consumed_power));
        for value in &row.device_kwh {
            record.push(format!("{value:.4}"));
        }
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}
