//! Pre-trained linear regression model for the serving path.
//!
//! The model is a coefficient file produced offline by the trainer; the
//! serving path only needs to load it, check its shape against the
//! canonical feature schema, and apply it to one feature vector at a
//! time.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::catalog::ORDERED_CATEGORIES;
use crate::features::schema::FEATURE_COUNT;

/// Failure loading or validating a coefficient file.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("cannot read \"{path}\": {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid model JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("model shape mismatch: {0}")]
    Shape(String),
}

/// Multi-output linear model: one intercept and one weight row per
/// appliance category, weights in schema v1 feature order.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LinearModel {
    /// Per-category intercepts, in the fixed category order.
    pub intercepts: Vec<f64>,
    /// Per-category weight rows, each [`FEATURE_COUNT`] wide.
    pub weights: Vec<Vec<f64>>,
}

impl LinearModel {
    /// Loads and validates a coefficient file.
    ///
    /// # Errors
    ///
    /// Returns a [`ModelError`] for unreadable files, invalid JSON, or a
    /// coefficient shape that does not match the feature schema.
    pub fn from_json_file(path: &Path) -> Result<Self, ModelError> {
        let content = fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    /// Parses and validates a coefficient file from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns a [`ModelError`] for invalid JSON or a shape mismatch.
    pub fn from_json_str(s: &str) -> Result<Self, ModelError> {
        let model: Self = serde_json::from_str(s)?;
        model.validate()?;
        Ok(model)
    }

    /// Checks the coefficient shape against the feature schema and the
    /// fixed category order.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Shape`] describing the first mismatch.
    pub fn validate(&self) -> Result<(), ModelError> {
        let outputs = ORDERED_CATEGORIES.len();
        if self.intercepts.len() != outputs {
            return Err(ModelError::Shape(format!(
                "expected {outputs} intercepts, got {}",
                self.intercepts.len()
            )));
        }
        if self.weights.len() != outputs {
            return Err(ModelError::Shape(format!(
                "expected {outputs} weight rows, got {}",
                self.weights.len()
            )));
        }
        for (i, row) in self.weights.iter().enumerate() {
            if row.len() != FEATURE_COUNT {
                return Err(ModelError::Shape(format!(
                    "weight row {i} has {} columns, expected {FEATURE_COUNT}",
                    row.len()
                )));
            }
        }
        Ok(())
    }

    /// Applies the model to one feature vector.
    ///
    /// Returns one prediction per category, in the fixed category order.
    pub fn predict(&self, features: &[f64]) -> Vec<f64> {
        self.weights
            .iter()
            .zip(self.intercepts.iter())
            .map(|(row, intercept)| {
                intercept
                    + row
                        .iter()
                        .zip(features.iter())
                        .map(|(w, x)| w * x)
                        .sum::<f64>()
            })
            .collect()
    }

    /// All-zero model predicting just its intercepts. Test fixture.
    pub fn constant(intercepts: Vec<f64>) -> Self {
        let outputs = intercepts.len();
        Self {
            intercepts,
            weights: vec![vec![0.0; FEATURE_COUNT]; outputs],
        }
    }
}
