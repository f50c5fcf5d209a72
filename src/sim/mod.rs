/// Horizon bounds and the timestamp clock.
pub mod horizon;
/// Per-house simulation engine.
pub mod house;
/// Usage policy evaluation and power draw.
pub mod policy;
/// Seasonal modulation provider.
pub mod season;
pub mod types;
