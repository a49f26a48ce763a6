//! Storage backend contract.
//!
//! The writers hand every finished `(element, geometry, match)` tuple to
//! an [`Inserter`]. Concrete backends live outside this crate; a failed
//! insert is logged by the writer and the run continues. Any retry policy
//! belongs to the backend.

use crate::element::{Area, Path, Point};
use crate::geom::Geometry;
use crate::mapping::Match;
use thiserror::Error;

/// Failure reported by a storage backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InsertError {
    #[error("unknown table: {0}")]
    UnknownTable(String),

    #[error("backend rejected row: {0}")]
    Rejected(String),

    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

/// Receives final geometries, one call per match.
///
/// The writer does not pass the element's whole match list at once: an
/// element matching `n` tables that clips into `k` parts produces `n * k`
/// calls, each with a single [`Match`]. A failed call affects only that
/// row.
///
/// Called concurrently from all workers of all writers.
pub trait Inserter: Send + Sync {
    fn insert_point(&self, point: &Point, geom: &Geometry, m: &Match) -> Result<(), InsertError>;

    fn insert_path(&self, path: &Path, geom: &Geometry, m: &Match) -> Result<(), InsertError>;

    fn insert_area(&self, area: &Area, geom: &Geometry, m: &Match) -> Result<(), InsertError>;
}

/// Inserter that accepts and discards everything (dry runs).
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpInserter;

impl Inserter for NoOpInserter {
    fn insert_point(&self, _: &Point, _: &Geometry, _: &Match) -> Result<(), InsertError> {
        Ok(())
    }

    fn insert_path(&self, _: &Path, _: &Geometry, _: &Match) -> Result<(), InsertError> {
        Ok(())
    }

    fn insert_area(&self, _: &Area, _: &Geometry, _: &Match) -> Result<(), InsertError> {
        Ok(())
    }
}
