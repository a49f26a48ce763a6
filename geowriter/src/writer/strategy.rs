//! Per-kind behaviour plugged into the shared worker pool.

use crate::cache::ElementCache;
use crate::element::{Area, ElementKind, Path, Point};
use crate::geom::{build_area, build_path, build_point, GeomError, Geometry, GeometryContext};
use crate::insert::{InsertError, Inserter};
use crate::mapping::{Match, Matcher};
use crate::progress::Progress;

/// What differs between the point, path and area writers.
///
/// The pool, lifecycle and error policy live in
/// [`ElementWriter`](super::ElementWriter); a strategy only says how one
/// element of its kind is matched, built, inserted and counted.
pub trait KindStrategy: Send + Sync + 'static {
    type Element: Send + 'static;

    fn kind(&self) -> ElementKind;

    fn id(&self, element: &Self::Element) -> i64;

    fn matches(&self, matcher: &dyn Matcher, element: &Self::Element) -> Vec<Match>;

    fn build(
        &self,
        ctx: &mut dyn GeometryContext,
        cache: &dyn ElementCache,
        element: &Self::Element,
    ) -> Result<Geometry, GeomError>;

    fn insert(
        &self,
        inserter: &dyn Inserter,
        element: &Self::Element,
        geom: &Geometry,
        m: &Match,
    ) -> Result<(), InsertError>;

    fn add_progress(&self, progress: &dyn Progress, count: u64);

    /// WGS84 coordinate reported to the expire tracker.
    ///
    /// Only points expire here; the affected region of paths and areas
    /// is computed by a later stage.
    fn expire_coord(&self, _element: &Self::Element) -> Option<(f64, f64)> {
        None
    }

    /// Turn the clip result into the geometries to insert.
    fn shape(&self, _original: Geometry, parts: Vec<Geometry>) -> Vec<Geometry> {
        parts
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct PointStrategy;

impl KindStrategy for PointStrategy {
    type Element = Point;

    fn kind(&self) -> ElementKind {
        ElementKind::Point
    }

    fn id(&self, point: &Point) -> i64 {
        point.id
    }

    fn matches(&self, matcher: &dyn Matcher, point: &Point) -> Vec<Match> {
        matcher.match_point(&point.tags)
    }

    fn build(
        &self,
        ctx: &mut dyn GeometryContext,
        _cache: &dyn ElementCache,
        point: &Point,
    ) -> Result<Geometry, GeomError> {
        build_point(ctx, point)
    }

    fn insert(
        &self,
        inserter: &dyn Inserter,
        point: &Point,
        geom: &Geometry,
        m: &Match,
    ) -> Result<(), InsertError> {
        inserter.insert_point(point, geom, m)
    }

    fn add_progress(&self, progress: &dyn Progress, count: u64) {
        progress.add_points(count);
    }

    fn expire_coord(&self, point: &Point) -> Option<(f64, f64)> {
        Some((point.lon, point.lat))
    }

    /// A point inside the region is inserted unchanged.
    fn shape(&self, original: Geometry, parts: Vec<Geometry>) -> Vec<Geometry> {
        if parts.is_empty() {
            Vec::new()
        } else {
            vec![original]
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct PathStrategy;

impl KindStrategy for PathStrategy {
    type Element = Path;

    fn kind(&self) -> ElementKind {
        ElementKind::Path
    }

    fn id(&self, path: &Path) -> i64 {
        path.id
    }

    fn matches(&self, matcher: &dyn Matcher, path: &Path) -> Vec<Match> {
        matcher.match_path(&path.tags)
    }

    fn build(
        &self,
        ctx: &mut dyn GeometryContext,
        cache: &dyn ElementCache,
        path: &Path,
    ) -> Result<Geometry, GeomError> {
        build_path(ctx, cache, path)
    }

    fn insert(
        &self,
        inserter: &dyn Inserter,
        path: &Path,
        geom: &Geometry,
        m: &Match,
    ) -> Result<(), InsertError> {
        inserter.insert_path(path, geom, m)
    }

    fn add_progress(&self, progress: &dyn Progress, count: u64) {
        progress.add_paths(count);
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct AreaStrategy;

impl KindStrategy for AreaStrategy {
    type Element = Area;

    fn kind(&self) -> ElementKind {
        ElementKind::Area
    }

    fn id(&self, area: &Area) -> i64 {
        area.id
    }

    fn matches(&self, matcher: &dyn Matcher, area: &Area) -> Vec<Match> {
        matcher.match_area(&area.tags)
    }

    fn build(
        &self,
        ctx: &mut dyn GeometryContext,
        cache: &dyn ElementCache,
        area: &Area,
    ) -> Result<Geometry, GeomError> {
        build_area(ctx, cache, area)
    }

    fn insert(
        &self,
        inserter: &dyn Inserter,
        area: &Area,
        geom: &Geometry,
        m: &Match,
    ) -> Result<(), InsertError> {
        inserter.insert_area(area, geom, m)
    }

    fn add_progress(&self, progress: &dyn Progress, count: u64) {
        progress.add_areas(count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::Srid;
    use crate::geom::{GeoEngine, GeometryType};

    #[test]
    fn test_point_shape_keeps_original() {
        let mut ctx = GeoEngine::new().context(Srid::Wgs84);
        let original = ctx.point(1.0, 1.0).unwrap();
        let part = ctx.point(1.0, 1.0).unwrap();

        let shaped = PointStrategy.shape(original, vec![part]);
        assert_eq!(shaped.len(), 1);
        assert_eq!(shaped[0].geometry_type(), GeometryType::Point);

        let original = ctx.point(1.0, 1.0).unwrap();
        assert!(PointStrategy.shape(original, Vec::new()).is_empty());
    }

    #[test]
    fn test_only_points_expire() {
        let point = Point::new(1, 10.0, 20.0);
        assert_eq!(PointStrategy.expire_coord(&point), Some((10.0, 20.0)));
        assert_eq!(PathStrategy.expire_coord(&Path::new(1, vec![1, 2])), None);
        assert_eq!(AreaStrategy.expire_coord(&Area::new(1, vec![])), None);
    }

    #[test]
    fn test_kinds() {
        assert_eq!(PointStrategy.kind(), ElementKind::Point);
        assert_eq!(PathStrategy.kind(), ElementKind::Path);
        assert_eq!(AreaStrategy.kind(), ElementKind::Area);
    }
}
