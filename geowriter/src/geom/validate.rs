//! Validity checks applied by the geometry engine.

use crate::geom::GeomError;
use geo::line_intersection::{line_intersection, LineIntersection};
use geo::{Area, Coord, Line, LineString, Polygon};

pub(crate) fn check_finite(coords: &[Coord<f64>]) -> Result<(), GeomError> {
    if coords.iter().all(|c| c.x.is_finite() && c.y.is_finite()) {
        Ok(())
    } else {
        Err(GeomError::NonFinite)
    }
}

/// Drop consecutive duplicate vertices.
pub(crate) fn dedup(mut coords: Vec<Coord<f64>>) -> Vec<Coord<f64>> {
    coords.dedup();
    coords
}

pub(crate) fn line(coords: Vec<Coord<f64>>) -> Result<LineString<f64>, GeomError> {
    check_finite(&coords)?;
    let coords = dedup(coords);
    if coords.len() < 2 {
        return Err(GeomError::TooFewPoints(coords.len()));
    }
    Ok(LineString::new(coords))
}

pub(crate) fn ring(ring: LineString<f64>) -> Result<LineString<f64>, GeomError> {
    check_finite(&ring.0)?;
    let ring = LineString::new(dedup(ring.0));
    if !ring.is_closed() {
        return Err(GeomError::UnclosedRing);
    }
    if ring.0.len() < 4 {
        return Err(GeomError::InvalidRing("fewer than four vertices"));
    }
    // Crossing rings can cancel out to zero net area.
    if self_intersects(&ring) {
        return Err(GeomError::SelfIntersection);
    }
    if Polygon::new(ring.clone(), vec![]).unsigned_area() == 0.0 {
        return Err(GeomError::InvalidRing("zero area"));
    }
    Ok(ring)
}

pub(crate) fn polygon(polygon: Polygon<f64>) -> Result<Polygon<f64>, GeomError> {
    let (exterior, interiors) = polygon.into_inner();
    let exterior = ring(exterior)?;
    let interiors = interiors
        .into_iter()
        .map(ring)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Polygon::new(exterior, interiors))
}

/// Whether any two segments of a closed ring cross or overlap.
///
/// Neighbouring segments may share their common vertex but must not fold
/// back onto each other. Candidate pairs are found with a sweep over the
/// segments' x extents.
pub(crate) fn self_intersects(ring: &LineString<f64>) -> bool {
    let segments: Vec<Line<f64>> = ring.lines().collect();
    let n = segments.len();
    if n < 3 {
        return false;
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|a, b| min_x(&segments[*a]).total_cmp(&min_x(&segments[*b])));

    for (pos, &i) in order.iter().enumerate() {
        let a = segments[i];
        let a_max_x = a.start.x.max(a.end.x);
        for &j in &order[pos + 1..] {
            let b = segments[j];
            if min_x(&b) > a_max_x {
                break;
            }
            let adjacent = i.abs_diff(j) == 1 || i.abs_diff(j) == n - 1;
            match line_intersection(a, b) {
                None => {}
                Some(LineIntersection::Collinear { .. }) => return true,
                Some(LineIntersection::SinglePoint { .. }) if !adjacent => return true,
                Some(LineIntersection::SinglePoint { .. }) => {}
            }
        }
    }
    false
}

fn min_x(line: &Line<f64>) -> f64 {
    line.start.x.min(line.end.x)
}
