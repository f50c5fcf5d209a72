//! Request and response types for the prediction endpoint.

use serde::{Deserialize, Serialize};

/// Prediction request: a point in time plus the instantaneous total
/// power reading.
#[derive(Debug, Deserialize)]
pub struct PredictionRequest {
    /// Request date, `DD:MM:YYYY`.
    pub date: String,
    /// Request time, `HH:MM:SS`.
    pub time: String,
    /// Total consumed power at that moment (kWh for the slot).
    pub consumed_power: f64,
}

/// Predicted energy per appliance category.
///
/// Field order matches the fixed category order used everywhere else.
#[derive(Debug, Serialize)]
pub struct PredictionResponse {
    pub white_goods: f64,
    pub entertainment: f64,
    pub air_conditioners: f64,
    pub lighting: f64,
    pub ev_charges: f64,
    pub utility_appliances: f64,
}

impl PredictionResponse {
    /// Maps the model's output vector (fixed category order) onto the
    /// named fields. Missing positions fall back to 0.0.
    pub fn from_outputs(outputs: &[f64]) -> Self {
        let get = |i: usize| outputs.get(i).copied().unwrap_or(0.0);
        Self {
            white_goods: get(0),
            entertainment: get(1),
            air_conditioners: get(2),
            lighting: get(3),
            ev_charges: get(4),
            utility_appliances: get(5),
        }
    }
}

/// Error response body for 400-class errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}
