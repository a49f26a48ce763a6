//! In-memory element cache backed by `DashMap`.

use crate::cache::{CacheStats, CachedElement, Coordinate, ElementCache};
use crate::element::{Area, ElementKind, Member, Path, Point};
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Sharded in-memory cache.
///
/// Reads from all writer workers proceed concurrently; writes take a
/// per-shard lock. Suitable for tests and extracts that fit in memory.
#[derive(Debug, Default)]
pub struct MemoryCache {
    points: DashMap<i64, Coordinate>,
    paths: DashMap<i64, Vec<i64>>,
    areas: DashMap<i64, Vec<Member>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put_point(&self, id: i64, lon: f64, lat: f64) {
        self.points.insert(id, Coordinate::new(lon, lat));
    }

    pub fn put_path(&self, id: i64, refs: Vec<i64>) {
        self.paths.insert(id, refs);
    }

    pub fn put_area(&self, id: i64, members: Vec<Member>) {
        self.areas.insert(id, members);
    }

    /// Cache a full point element (only its coordinates are kept).
    pub fn insert_point(&self, point: &Point) {
        self.put_point(point.id, point.lon, point.lat);
    }

    pub fn insert_path(&self, path: &Path) {
        self.put_path(path.id, path.refs.clone());
    }

    pub fn insert_area(&self, area: &Area) {
        self.put_area(area.id, area.members.clone());
    }

    /// Number of cached elements of `kind`.
    pub fn len(&self, kind: ElementKind) -> usize {
        match kind {
            ElementKind::Point => self.points.len(),
            ElementKind::Path => self.paths.len(),
            ElementKind::Area => self.areas.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty() && self.paths.is_empty() && self.areas.is_empty()
    }

    fn record(&self, found: bool) {
        let counter = if found { &self.hits } else { &self.misses };
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

impl ElementCache for MemoryCache {
    fn get(&self, id: i64, kind: ElementKind) -> Option<CachedElement> {
        let found = match kind {
            ElementKind::Point => self.points.get(&id).map(|c| CachedElement::Point(*c)),
            ElementKind::Path => self.paths.get(&id).map(|r| CachedElement::Path(r.clone())),
            ElementKind::Area => self.areas.get(&id).map(|m| CachedElement::Area(m.clone())),
        };
        self.record(found.is_some());
        found
    }

    fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}
