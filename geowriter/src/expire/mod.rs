//! Expire tracking.
//!
//! Writers report the coordinates of every matched, unclipped point they
//! insert. The tracker accumulates them in a process-wide deduplicated
//! set that an external collaborator flushes at the end of the run, so
//! that only the affected tiles get regenerated.

mod sets;

pub use sets::{CoordExpireSet, TileExpireSet};

/// Records coordinates touched by processed elements.
///
/// Called concurrently from every worker; implementations own their
/// synchronisation and must never lose or duplicate an entry.
pub trait ExpireTracker: Send + Sync {
    /// Mark the WGS84 coordinate `lon`/`lat` as changed.
    fn expire(&self, lon: f64, lat: f64);
}
