//! Coordinate validation, projection and tile math.
//!
//! Input coordinates are WGS84 longitude/latitude. Writers project them
//! into their target [`Srid`] before building geometries, and the expire
//! tracker maps them onto slippy-map tiles.

mod types;

pub use types::{
    CoordError, Srid, TileCoord, MAX_GEO_LAT, MAX_LAT, MAX_LON, MAX_ZOOM, MIN_GEO_LAT, MIN_LAT,
    MIN_LON, MIN_ZOOM,
};

use std::f64::consts::PI;

/// Earth radius used by spherical web mercator, in metres.
const EARTH_RADIUS: f64 = 6_378_137.0;

/// Check that `lon`/`lat` are finite and within geographic bounds.
#[inline]
pub fn validate_lon_lat(lon: f64, lat: f64) -> Result<(), CoordError> {
    if !lon.is_finite() || !(MIN_LON..=MAX_LON).contains(&lon) {
        return Err(CoordError::InvalidLongitude(lon));
    }
    if !lat.is_finite() || !(MIN_GEO_LAT..=MAX_GEO_LAT).contains(&lat) {
        return Err(CoordError::InvalidLatitude(lat));
    }
    Ok(())
}

/// Project a WGS84 coordinate into `srid`, returning `(x, y)`.
///
/// Web mercator clamps latitude to the projection's limits, so polar
/// points land on the edge of the map instead of at infinity.
pub fn project(srid: Srid, lon: f64, lat: f64) -> Result<(f64, f64), CoordError> {
    validate_lon_lat(lon, lat)?;
    match srid {
        Srid::Wgs84 => Ok((lon, lat)),
        Srid::WebMercator => {
            let lat = lat.clamp(MIN_LAT, MAX_LAT);
            let x = lon.to_radians() * EARTH_RADIUS;
            let y = (PI / 4.0 + lat.to_radians() / 2.0).tan().ln() * EARTH_RADIUS;
            Ok((x, y))
        }
    }
}

/// Converts geographic coordinates to tile coordinates.
///
/// Latitude must lie within the web mercator range; longitude 180 maps
/// onto the last column.
#[inline]
pub fn to_tile_coords(lat: f64, lon: f64, zoom: u8) -> Result<TileCoord, CoordError> {
    if !(MIN_LAT..=MAX_LAT).contains(&lat) {
        return Err(CoordError::InvalidLatitude(lat));
    }
    if !(MIN_LON..=MAX_LON).contains(&lon) {
        return Err(CoordError::InvalidLongitude(lon));
    }
    if zoom > MAX_ZOOM {
        return Err(CoordError::InvalidZoom(zoom));
    }

    let n = 2.0_f64.powi(zoom as i32);
    let max_index = (n as u32).saturating_sub(1);

    let col = (((lon + 180.0) / 360.0 * n) as u32).min(max_index);

    let lat_rad = lat * PI / 180.0;
    let row = (((1.0 - lat_rad.tan().asinh() / PI) / 2.0 * n) as u32).min(max_index);

    Ok(TileCoord { zoom, col, row })
}

/// Latitude/longitude of a tile's northwest corner.
#[inline]
pub fn tile_to_lat_lon(tile: &TileCoord) -> (f64, f64) {
    let n = 2.0_f64.powi(tile.zoom as i32);

    let lon = tile.col as f64 / n * 360.0 - 180.0;

    let y = tile.row as f64 / n;
    let lat_rad = (PI * (1.0 - 2.0 * y)).sinh().atan();
    let lat = lat_rad * 180.0 / PI;

    (lat, lon)
}
