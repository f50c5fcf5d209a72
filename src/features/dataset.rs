//! Training-table shaping: batch rows → model-ready feature matrix with
//! per-category targets.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::catalog::ORDERED_CATEGORIES;
use crate::features::schema::{FEATURE_COUNT, FEATURE_ORDER, feature_vector};
use crate::sim::types::SimulationRow;

/// Model-ready table: one feature vector and one target vector per
/// simulated slot.
#[derive(Debug, Clone, Default)]
pub struct TrainingTable {
    /// Feature vectors in schema v1 column order.
    pub features: Vec<[f64; FEATURE_COUNT]>,
    /// Per-category energy targets, in the fixed category order.
    pub targets: Vec<Vec<f64>>,
}

impl TrainingTable {
    /// Shapes batch rows into the training table.
    pub fn from_rows(rows: &[SimulationRow]) -> Self {
        let mut features = Vec::with_capacity(rows.len());
        let mut targets = Vec::with_capacity(rows.len());
        for row in rows {
            features.push(feature_vector(row.date, row.time, row.consumed_power));
            targets.push(row.category_kwh.clone());
        }
        Self { features, targets }
    }

    /// Number of rows in the table.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// True when the table holds no rows.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Exports the table to a CSV file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an `io::Error` if file creation or writing fails.
    pub fn export_csv(&self, path: &Path) -> io::Result<()> {
        let file = File::create(path)?;
        let buf = io::BufWriter::new(file);
        self.write_csv(buf)
    }

    /// Writes the table as CSV: feature columns in schema order, then
    /// the target category columns.
    ///
    /// # Errors
    ///
    /// Returns an `io::Error` if writing fails.
    pub fn write_csv(&self, writer: impl Write) -> io::Result<()> {
        let mut wtr = csv::WriterBuilder::new().from_writer(writer);

        let mut columns: Vec<&str> = FEATURE_ORDER.to_vec();
        columns.extend_from_slice(ORDERED_CATEGORIES);
        wtr.write_record(&columns)?;

        for (features, targets) in self.features.iter().zip(self.targets.iter()) {
            let mut record: Vec<String> = Vec::with_capacity(columns.len());
            for value in features {
                record.push(format!("{value}"));
            }
            for value in targets {
                record.push(format!("{value:.4}"));
            }
            wtr.write_record(&record)?;
        }

        wtr.flush()?;
        Ok(())
    }
}
