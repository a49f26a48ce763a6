//! Cache contract.

use crate::element::{ElementKind, Member};

/// A WGS84 coordinate as stored in the cache.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub lon: f64,
    pub lat: f64,
}

impl Coordinate {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

/// Resolved data for a cached element.
#[derive(Debug, Clone, PartialEq)]
pub enum CachedElement {
    /// Coordinates of a point.
    Point(Coordinate),
    /// Point references of a path.
    Path(Vec<i64>),
    /// Members of an area.
    Area(Vec<Member>),
}

impl CachedElement {
    pub fn kind(&self) -> ElementKind {
        match self {
            CachedElement::Point(_) => ElementKind::Point,
            CachedElement::Path(_) => ElementKind::Path,
            CachedElement::Area(_) => ElementKind::Area,
        }
    }
}

/// Hit/miss counters of a cache.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

impl CacheStats {
    /// Hit rate (0.0 to 1.0).
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Concurrent, read-mostly element lookup.
///
/// `get` returns `None` when the element is not cached, which callers
/// treat as a recoverable per-element condition (typically an element
/// outside the imported extract).
pub trait ElementCache: Send + Sync {
    fn get(&self, id: i64, kind: ElementKind) -> Option<CachedElement>;

    /// Coordinates of point `id`.
    fn point(&self, id: i64) -> Option<Coordinate> {
        match self.get(id, ElementKind::Point)? {
            CachedElement::Point(coord) => Some(coord),
            _ => None,
        }
    }

    /// Point references of path `id`.
    fn path_refs(&self, id: i64) -> Option<Vec<i64>> {
        match self.get(id, ElementKind::Path)? {
            CachedElement::Path(refs) => Some(refs),
            _ => None,
        }
    }

    fn stats(&self) -> CacheStats {
        CacheStats::default()
    }
}
