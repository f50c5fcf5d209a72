//! Feature shaping: the seam between simulation output and the
//! regression model.
//!
//! Everything the model consumes flows through here — the date-range
//! bucketing shared with the simulator, the cyclic time encoding, the
//! canonical column schema, and the training-table shaper.

/// Date-range bucketing shared by simulation and inference.
pub mod date_range;
/// Training-table shaping and export.
pub mod dataset;
/// The canonical feature column schema.
pub mod schema;
/// Cyclic time feature encoding.
pub mod time_encoder;
