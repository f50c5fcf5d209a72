//! File output for batch simulation results.

/// CSV export of the merged batch table.
pub mod export;
