//! Coordinate type definitions

use thiserror::Error;

/// Web Mercator valid latitude range
pub const MIN_LAT: f64 = -85.05112878;
pub const MAX_LAT: f64 = 85.05112878;

/// Valid longitude range
pub const MIN_LON: f64 = -180.0;
pub const MAX_LON: f64 = 180.0;

/// Geographic latitude range accepted on input
pub const MIN_GEO_LAT: f64 = -90.0;
pub const MAX_GEO_LAT: f64 = 90.0;

/// Zoom levels accepted for expire tiles
pub const MIN_ZOOM: u8 = 0;
pub const MAX_ZOOM: u8 = 18;

/// Tile coordinates in the Slippy Map system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileCoord {
    /// Zoom level (0-18)
    pub zoom: u8,
    /// X coordinate (east-west), 0 at west
    pub col: u32,
    /// Y coordinate (north-south), 0 at north
    pub row: u32,
}

impl TileCoord {
    pub fn new(zoom: u8, col: u32, row: u32) -> Self {
        Self { zoom, col, row }
    }
}

impl std::fmt::Display for TileCoord {
    /// `z/x/y`, the format of expire tile lists.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.zoom, self.col, self.row)
    }
}

/// Spatial reference systems the writers can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Srid {
    /// Geographic lon/lat (EPSG:4326)
    Wgs84,
    /// Spherical web mercator in metres (EPSG:3857)
    #[default]
    WebMercator,
}

impl Srid {
    /// EPSG code.
    pub fn code(&self) -> i32 {
        match self {
            Srid::Wgs84 => 4326,
            Srid::WebMercator => 3857,
        }
    }
}

impl TryFrom<i32> for Srid {
    type Error = CoordError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            4326 => Ok(Srid::Wgs84),
            3857 | 900913 => Ok(Srid::WebMercator),
            other => Err(CoordError::UnsupportedSrid(other)),
        }
    }
}

impl std::fmt::Display for Srid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EPSG:{}", self.code())
    }
}

/// Errors that can occur during coordinate conversion.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordError {
    #[error("Invalid latitude: {0} (must be between -90 and 90)")]
    InvalidLatitude(f64),

    #[error("Invalid longitude: {0} (must be between -180 and 180)")]
    InvalidLongitude(f64),

    #[error("Invalid zoom level: {0} (must be between 0 and 18)")]
    InvalidZoom(u8),

    #[error("Unsupported SRID: {0} (expected 4326 or 3857)")]
    UnsupportedSrid(i32),
}
