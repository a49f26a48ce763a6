//! Element to geometry builders.
//!
//! Each builder resolves what the element references, projects the
//! coordinates into the context's SRID and lets the context validate
//! and construct the result.

use crate::cache::ElementCache;
use crate::coord::{project, Srid};
use crate::element::{Area, ElementKind, Path, Point};
use crate::geom::rings::merge_rings;
use crate::geom::{GeomError, Geometry, GeometryContext};
use geo::{Area as _, Contains, Coord, InteriorPoint, LineString, Polygon};

/// Build a point geometry from the element's own coordinates.
pub fn build_point(ctx: &mut dyn GeometryContext, point: &Point) -> Result<Geometry, GeomError> {
    let (x, y) = project(ctx.srid(), point.lon, point.lat)?;
    ctx.point(x, y)
}

/// Build a line string from the path's cached point references.
pub fn build_path(
    ctx: &mut dyn GeometryContext,
    cache: &dyn ElementCache,
    path: &Path,
) -> Result<Geometry, GeomError> {
    if path.refs.len() < 2 {
        return Err(GeomError::TooFewPoints(path.refs.len()));
    }
    let coords = resolve_coords(ctx.srid(), cache, &path.refs)?;
    ctx.line_string(coords)
}

/// Build a (multi)polygon from the area's member paths.
///
/// Members with role `outer` or an empty role form outer rings, `inner`
/// members form holes. Point members and other roles are ignored. Each
/// hole is assigned to the smallest outer ring containing it; holes
/// outside every outer ring are dropped.
pub fn build_area(
    ctx: &mut dyn GeometryContext,
    cache: &dyn ElementCache,
    area: &Area,
) -> Result<Geometry, GeomError> {
    let mut outer_parts = Vec::new();
    let mut inner_parts = Vec::new();

    for member in area.members.iter().filter(|m| m.kind == ElementKind::Path) {
        let parts = match member.role.as_str() {
            "outer" | "" => &mut outer_parts,
            "inner" => &mut inner_parts,
            _ => continue,
        };
        let refs = cache
            .path_refs(member.id)
            .ok_or(GeomError::MissingReference {
                kind: ElementKind::Path,
                id: member.id,
            })?;
        parts.push(refs);
    }

    let srid = ctx.srid();
    let outers = rings_to_lines(srid, cache, merge_rings(outer_parts)?)?;
    if outers.is_empty() {
        return Err(GeomError::NoOuterRing);
    }
    let inners = rings_to_lines(srid, cache, merge_rings(inner_parts)?)?;

    let shells: Vec<Polygon<f64>> = outers
        .into_iter()
        .map(|ring| Polygon::new(ring, vec![]))
        .collect();
    let mut holes: Vec<Vec<LineString<f64>>> = vec![Vec::new(); shells.len()];

    for hole in inners {
        let Some(probe) = Polygon::new(hole.clone(), vec![]).interior_point() else {
            continue;
        };
        let owner = shells
            .iter()
            .enumerate()
            .filter(|(_, shell)| shell.contains(&probe))
            .min_by(|(_, a), (_, b)| a.unsigned_area().total_cmp(&b.unsigned_area()))
            .map(|(idx, _)| idx);
        if let Some(idx) = owner {
            holes[idx].push(hole);
        }
    }

    let polygons = shells
        .into_iter()
        .zip(holes)
        .map(|(shell, holes)| Polygon::new(shell.into_inner().0, holes))
        .collect();
    ctx.polygons(polygons)
}

fn rings_to_lines(
    srid: Srid,
    cache: &dyn ElementCache,
    rings: Vec<Vec<i64>>,
) -> Result<Vec<LineString<f64>>, GeomError> {
    rings
        .iter()
        .map(|refs| resolve_coords(srid, cache, refs).map(LineString::new))
        .collect()
}

/// Look up and project every referenced point.
fn resolve_coords(
    srid: Srid,
    cache: &dyn ElementCache,
    refs: &[i64],
) -> Result<Vec<Coord<f64>>, GeomError> {
    refs.iter()
        .map(|&id| {
            let coord = cache.point(id).ok_or(GeomError::MissingReference {
                kind: ElementKind::Point,
                id,
            })?;
            let (x, y) = project(srid, coord.lon, coord.lat)?;
            Ok(Coord { x, y })
        })
        .collect()
}
