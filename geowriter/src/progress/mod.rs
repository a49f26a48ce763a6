//! Progress counters.
//!
//! Writers report every consumed element through the [`Progress`] sink
//! they were given; there is no process-wide singleton, so independent
//! pipelines (and tests) never share counts.

mod stats;

pub use stats::{Statistics, StatisticsSnapshot};

/// Concurrent per-kind element counters.
pub trait Progress: Send + Sync {
    fn add_points(&self, count: u64);
    fn add_paths(&self, count: u64);
    fn add_areas(&self, count: u64);
}
