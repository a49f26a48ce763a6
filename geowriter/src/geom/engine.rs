//! Geometry engine and per-worker contexts.

use crate::coord::Srid;
use crate::geom::{validate, EngineError, GeomError, Geometry};
use geo::{Coord, MultiPolygon, Point, Polygon};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Factory for per-worker geometry contexts.
///
/// Shared by all workers of a writer. Contexts are expensive and not
/// thread safe, so each worker acquires one at start and keeps it for
/// its whole lifetime.
pub trait GeometryEngine: Send + Sync {
    /// Hand out a context producing geometries in `srid`.
    ///
    /// The context is released when the returned box is dropped.
    fn acquire(&self, srid: Srid) -> Result<Box<dyn GeometryContext>, EngineError>;
}

/// Geometry construction handle owned by exactly one worker.
///
/// Coordinates passed in are already projected into [`srid`](Self::srid).
/// Every constructor validates its input and reports invalid geometries
/// as [`GeomError`].
pub trait GeometryContext {
    fn srid(&self) -> Srid;

    fn point(&mut self, x: f64, y: f64) -> Result<Geometry, GeomError>;

    fn line_string(&mut self, coords: Vec<Coord<f64>>) -> Result<Geometry, GeomError>;

    /// Build a polygon (one input) or multipolygon (several).
    fn polygons(&mut self, polygons: Vec<Polygon<f64>>) -> Result<Geometry, GeomError>;
}

/// Context acquisition and release counts of an engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineStats {
    pub acquired: u64,
    pub released: u64,
}

impl EngineStats {
    /// Contexts currently held by workers.
    pub fn live(&self) -> u64 {
        self.acquired - self.released
    }
}

#[derive(Debug, Default)]
struct Counters {
    acquired: AtomicU64,
    released: AtomicU64,
}

/// Engine backed by the `geo` crate.
#[derive(Debug, Default, Clone)]
pub struct GeoEngine {
    counters: Arc<Counters>,
}

impl GeoEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> EngineStats {
        EngineStats {
            acquired: self.counters.acquired.load(Ordering::SeqCst),
            released: self.counters.released.load(Ordering::SeqCst),
        }
    }

    /// Acquire a concrete context without boxing.
    pub fn context(&self, srid: Srid) -> GeoContext {
        self.counters.acquired.fetch_add(1, Ordering::SeqCst);
        GeoContext {
            srid,
            counters: Arc::clone(&self.counters),
        }
    }
}

impl GeometryEngine for GeoEngine {
    fn acquire(&self, srid: Srid) -> Result<Box<dyn GeometryContext>, EngineError> {
        Ok(Box::new(self.context(srid)))
    }
}

/// Context handed out by [`GeoEngine`]. Counts its release on drop.
#[derive(Debug)]
pub struct GeoContext {
    srid: Srid,
    counters: Arc<Counters>,
}

impl GeometryContext for GeoContext {
    fn srid(&self) -> Srid {
        self.srid
    }

    fn point(&mut self, x: f64, y: f64) -> Result<Geometry, GeomError> {
        validate::check_finite(&[Coord { x, y }])?;
        Ok(Geometry::new(Point::new(x, y).into(), self.srid))
    }

    fn line_string(&mut self, coords: Vec<Coord<f64>>) -> Result<Geometry, GeomError> {
        let line = validate::line(coords)?;
        Ok(Geometry::new(line.into(), self.srid))
    }

    fn polygons(&mut self, polygons: Vec<Polygon<f64>>) -> Result<Geometry, GeomError> {
        let mut valid = polygons
            .into_iter()
            .map(validate::polygon)
            .collect::<Result<Vec<_>, _>>()?;
        let geom = match valid.len() {
            0 => return Err(GeomError::NoOuterRing),
            1 => valid.remove(0).into(),
            _ => MultiPolygon::new(valid).into(),
        };
        Ok(Geometry::new(geom, self.srid))
    }
}

impl Drop for GeoContext {
    fn drop(&mut self) {
        self.counters.released.fetch_add(1, Ordering::SeqCst);
    }
}
