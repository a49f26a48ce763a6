//! Atomic run statistics.

use crate::progress::Progress;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe element counts for one run.
///
/// # Example
///
/// ```
/// use geowriter::progress::{Progress, Statistics};
///
/// let stats = Statistics::new();
/// stats.add_points(2);
/// stats.add_areas(1);
///
/// let snapshot = stats.snapshot();
/// assert_eq!(snapshot.points, 2);
/// assert_eq!(snapshot.total(), 3);
/// ```
#[derive(Debug, Default)]
pub struct Statistics {
    points: AtomicU64,
    paths: AtomicU64,
    areas: AtomicU64,
}

/// Statistics at a point in time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatisticsSnapshot {
    pub points: u64,
    pub paths: u64,
    pub areas: u64,
}

impl StatisticsSnapshot {
    pub fn total(&self) -> u64 {
        self.points + self.paths + self.areas
    }
}

impl fmt::Display for StatisticsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "points: {}, paths: {}, areas: {}",
            self.points, self.paths, self.areas
        )
    }
}

impl Statistics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> StatisticsSnapshot {
        StatisticsSnapshot {
            points: self.points.load(Ordering::Relaxed),
            paths: self.paths.load(Ordering::Relaxed),
            areas: self.areas.load(Ordering::Relaxed),
        }
    }
}

impl Progress for Statistics {
    fn add_points(&self, count: u64) {
        self.points.fetch_add(count, Ordering::Relaxed);
    }

    fn add_paths(&self, count: u64) {
        self.paths.fetch_add(count, Ordering::Relaxed);
    }

    fn add_areas(&self, count: u64) {
        self.areas.fetch_add(count, Ordering::Relaxed);
    }
}
