//! Polygon region clipper.

use crate::clip::{ClipError, Clipper};
use crate::coord::{project, Srid};
use crate::geom::Geometry;
use geo::{
    Area, BooleanOps, BoundingRect, Intersects, LineString, MultiLineString, MultiPolygon,
    Polygon, Rect,
};
use std::panic::{catch_unwind, AssertUnwindSafe};

/// A WGS84 bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LonLatBox {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl LonLatBox {
    pub fn new(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Self {
        Self {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        }
    }

    /// Polygon of this box in `srid`.
    fn to_polygon(self, srid: Srid) -> Result<Polygon<f64>, ClipError> {
        if self.min_lon >= self.max_lon || self.min_lat >= self.max_lat {
            return Err(ClipError::InvalidBox(format!(
                "{},{},{},{} has no extent",
                self.min_lon, self.min_lat, self.max_lon, self.max_lat
            )));
        }
        let to_clip_err = |e: crate::coord::CoordError| ClipError::InvalidBox(e.to_string());
        let (x0, y0) = project(srid, self.min_lon, self.min_lat).map_err(to_clip_err)?;
        let (x1, y1) = project(srid, self.max_lon, self.max_lat).map_err(to_clip_err)?;
        Ok(Rect::new((x0, y0), (x1, y1)).to_polygon())
    }
}

/// Clips geometries to a (multi)polygon region in the writer's SRID.
#[derive(Debug, Clone)]
pub struct RegionClipper {
    region: MultiPolygon<f64>,
    bounds: Rect<f64>,
    srid: Srid,
}

impl RegionClipper {
    /// Region given in `srid` coordinates.
    pub fn new(region: MultiPolygon<f64>, srid: Srid) -> Result<Self, ClipError> {
        let bounds = region.bounding_rect().ok_or(ClipError::EmptyRegion)?;
        Ok(Self {
            region,
            bounds,
            srid,
        })
    }

    /// Region made of WGS84 boxes, projected into `srid`.
    pub fn from_boxes(boxes: &[LonLatBox], srid: Srid) -> Result<Self, ClipError> {
        let polygons = boxes
            .iter()
            .map(|b| b.to_polygon(srid))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(MultiPolygon::new(polygons), srid)
    }

    pub fn srid(&self) -> Srid {
        self.srid
    }

    fn wrap(&self, geom: geo::Geometry<f64>) -> Geometry {
        Geometry::new(geom, self.srid)
    }

    fn clip_lines(&self, lines: MultiLineString<f64>) -> Result<Vec<Geometry>, ClipError> {
        let clipped = guarded(|| self.region.clip(&lines, false))?;
        Ok(clipped
            .into_iter()
            .filter(|ls| ls.0.len() >= 2)
            .map(|ls: LineString<f64>| self.wrap(ls.into()))
            .collect())
    }

    fn clip_polygons(&self, polygons: MultiPolygon<f64>) -> Result<Vec<Geometry>, ClipError> {
        let clipped = guarded(|| self.region.intersection(&polygons))?;
        Ok(clipped
            .into_iter()
            .filter(|p| p.unsigned_area() > 0.0)
            .map(|p| self.wrap(p.into()))
            .collect())
    }
}

/// Run a boolean operation, turning a panic inside `geo` into an error.
fn guarded<T>(op: impl FnOnce() -> T) -> Result<T, ClipError> {
    catch_unwind(AssertUnwindSafe(op)).map_err(|payload| {
        let msg = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "boolean operation panicked".to_string());
        ClipError::Intersection(msg)
    })
}

impl Clipper for RegionClipper {
    fn clip(&self, geom: &Geometry) -> Result<Vec<Geometry>, ClipError> {
        if geom.srid() != self.srid {
            return Err(ClipError::SridMismatch {
                geometry: geom.srid().code(),
                region: self.srid.code(),
            });
        }
        match geom.bounding_rect() {
            Some(rect) if rect.intersects(&self.bounds) => {}
            _ => return Ok(Vec::new()),
        }

        match geom.as_geo() {
            geo::Geometry::Point(p) => Ok(if self.region.intersects(p) {
                vec![self.wrap((*p).into())]
            } else {
                Vec::new()
            }),
            geo::Geometry::LineString(ls) => {
                self.clip_lines(MultiLineString::new(vec![ls.clone()]))
            }
            geo::Geometry::MultiLineString(mls) => self.clip_lines(mls.clone()),
            geo::Geometry::Polygon(p) => self.clip_polygons(MultiPolygon::new(vec![p.clone()])),
            geo::Geometry::MultiPolygon(mp) => self.clip_polygons(mp.clone()),
            _ => Err(ClipError::Unsupported),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::{GeoEngine, GeometryContext, GeometryType};
    use geo::Coord;

    fn unit_box_clipper() -> RegionClipper {
        RegionClipper::from_boxes(&[LonLatBox::new(0.0, 0.0, 10.0, 10.0)], Srid::Wgs84).unwrap()
    }

    fn square(x: f64, y: f64, size: f64) -> Polygon<f64> {
        Rect::new((x, y), (x + size, y + size)).to_polygon()
    }

    #[test]
    fn test_point_inside_and_outside() {
        let clipper = unit_box_clipper();
        let mut ctx = GeoEngine::new().context(Srid::Wgs84);

        let inside = ctx.point(5.0, 5.0).unwrap();
        assert_eq!(clipper.clip(&inside).unwrap().len(), 1);

        let outside = ctx.point(50.0, 5.0).unwrap();
        assert!(clipper.clip(&outside).unwrap().is_empty());
    }

    #[test]
    fn test_line_crossing_region_is_cut() {
        let clipper = unit_box_clipper();
        let mut ctx = GeoEngine::new().context(Srid::Wgs84);
        let line = ctx
            .line_string(vec![Coord { x: -5.0, y: 5.0 }, Coord { x: 15.0, y: 5.0 }])
            .unwrap();

        let parts = clipper.clip(&line).unwrap();
        assert_eq!(parts.len(), 1);
        let rect = parts[0].bounding_rect().unwrap();
        assert!((rect.min().x - 0.0).abs() < 1e-9);
        assert!((rect.max().x - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_line_leaving_and_reentering_gives_two_parts() {
        let clipper = RegionClipper::from_boxes(
            &[
                LonLatBox::new(0.0, 0.0, 10.0, 10.0),
                LonLatBox::new(20.0, 0.0, 30.0, 10.0),
            ],
            Srid::Wgs84,
        )
        .unwrap();
        let mut ctx = GeoEngine::new().context(Srid::Wgs84);
        let line = ctx
            .line_string(vec![Coord { x: 5.0, y: 5.0 }, Coord { x: 25.0, y: 5.0 }])
            .unwrap();

        let parts = clipper.clip(&line).unwrap();
        assert_eq!(parts.len(), 2);
        assert!(parts
            .iter()
            .all(|p| p.geometry_type() == GeometryType::LineString));
    }

    #[test]
    fn test_polygon_partially_inside() {
        let clipper = unit_box_clipper();
        let mut ctx = GeoEngine::new().context(Srid::Wgs84);
        let poly = ctx.polygons(vec![square(5.0, 5.0, 10.0)]).unwrap();

        let parts = clipper.clip(&poly).unwrap();
        assert_eq!(parts.len(), 1);
        match parts[0].as_geo() {
            geo::Geometry::Polygon(p) => assert!((p.unsigned_area() - 25.0).abs() < 1e-9),
            other => panic!("expected polygon, got {:?}", other),
        }
    }

    #[test]
    fn test_geometry_outside_bounds_yields_nothing() {
        let clipper = unit_box_clipper();
        let mut ctx = GeoEngine::new().context(Srid::Wgs84);
        let poly = ctx.polygons(vec![square(50.0, 50.0, 1.0)]).unwrap();
        assert!(clipper.clip(&poly).unwrap().is_empty());
    }

    #[test]
    fn test_srid_mismatch() {
        let clipper = unit_box_clipper();
        let mut ctx = GeoEngine::new().context(Srid::WebMercator);
        let point = ctx.point(5.0, 5.0).unwrap();
        assert_eq!(
            clipper.clip(&point).unwrap_err(),
            ClipError::SridMismatch {
                geometry: 3857,
                region: 4326
            }
        );
    }

    #[test]
    fn test_boxes_are_projected() {
        let clipper =
            RegionClipper::from_boxes(&[LonLatBox::new(0.0, 0.0, 10.0, 10.0)], Srid::WebMercator)
                .unwrap();
        let mut ctx = GeoEngine::new().context(Srid::WebMercator);
        let (x, y) = project(Srid::WebMercator, 5.0, 5.0).unwrap();
        let point = ctx.point(x, y).unwrap();
        assert_eq!(clipper.clip(&point).unwrap().len(), 1);
    }

    #[test]
    fn test_invalid_boxes() {
        assert!(matches!(
            RegionClipper::from_boxes(&[LonLatBox::new(10.0, 0.0, 0.0, 10.0)], Srid::Wgs84),
            Err(ClipError::InvalidBox(_))
        ));
        assert_eq!(
            RegionClipper::from_boxes(&[], Srid::Wgs84).unwrap_err(),
            ClipError::EmptyRegion
        );
    }

    #[test]
    fn test_guarded_converts_panic() {
        let result: Result<(), ClipError> = guarded(|| panic!("sweep failed"));
        assert_eq!(
            result.unwrap_err(),
            ClipError::Intersection("sweep failed".to_string())
        );
    }
}
