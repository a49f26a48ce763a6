//! Owned geometry values.

use crate::coord::Srid;
use geo::BoundingRect;

/// Geometry type discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryType {
    Point,
    LineString,
    Polygon,
    MultiLineString,
    MultiPolygon,
    Other,
}

/// A validated geometry in a known SRID.
///
/// Each value exclusively owns its coordinates and is released when
/// dropped. It is deliberately not `Clone`: a clipped part or an
/// inserted row always refers to exactly one owner.
#[derive(Debug, PartialEq)]
pub struct Geometry {
    inner: geo::Geometry<f64>,
    srid: Srid,
}

impl Geometry {
    pub(crate) fn new(inner: geo::Geometry<f64>, srid: Srid) -> Self {
        Self { inner, srid }
    }

    pub fn srid(&self) -> Srid {
        self.srid
    }

    pub fn geometry_type(&self) -> GeometryType {
        match &self.inner {
            geo::Geometry::Point(_) => GeometryType::Point,
            geo::Geometry::LineString(_) => GeometryType::LineString,
            geo::Geometry::Polygon(_) => GeometryType::Polygon,
            geo::Geometry::MultiLineString(_) => GeometryType::MultiLineString,
            geo::Geometry::MultiPolygon(_) => GeometryType::MultiPolygon,
            _ => GeometryType::Other,
        }
    }

    /// Borrow the underlying `geo` geometry.
    pub fn as_geo(&self) -> &geo::Geometry<f64> {
        &self.inner
    }

    pub fn into_geo(self) -> geo::Geometry<f64> {
        self.inner
    }

    pub fn bounding_rect(&self) -> Option<geo::Rect<f64>> {
        self.inner.bounding_rect()
    }
}
