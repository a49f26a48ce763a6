//! `DashSet` backed expire sets.

use crate::coord::{to_tile_coords, CoordError, TileCoord, MAX_LAT, MAX_ZOOM, MIN_LAT};
use crate::expire::ExpireTracker;
use dashmap::DashSet;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Distinct coordinates, compared by bit pattern.
#[derive(Debug, Default)]
pub struct CoordExpireSet {
    entries: DashSet<(u64, u64)>,
}

impl CoordExpireSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        self.entries.contains(&key(lon, lat))
    }

    /// All coordinates, sorted by longitude then latitude.
    pub fn entries(&self) -> Vec<(f64, f64)> {
        let mut out: Vec<(f64, f64)> = self
            .entries
            .iter()
            .map(|e| (f64::from_bits(e.0), f64::from_bits(e.1)))
            .collect();
        out.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1)));
        out
    }

    /// Write one `lon,lat` line per entry.
    pub fn write_list(&self, path: &Path) -> io::Result<usize> {
        let entries = self.entries();
        let mut out = BufWriter::new(File::create(path)?);
        for (lon, lat) in &entries {
            writeln!(out, "{},{}", lon, lat)?;
        }
        out.flush()?;
        Ok(entries.len())
    }
}

/// `-0.0` and `0.0` are the same coordinate.
fn key(lon: f64, lat: f64) -> (u64, u64) {
    ((lon + 0.0).to_bits(), (lat + 0.0).to_bits())
}

impl ExpireTracker for CoordExpireSet {
    fn expire(&self, lon: f64, lat: f64) {
        self.entries.insert(key(lon, lat));
    }
}

/// Distinct slippy-map tiles at a fixed zoom level.
#[derive(Debug)]
pub struct TileExpireSet {
    zoom: u8,
    tiles: DashSet<TileCoord>,
}

impl TileExpireSet {
    pub fn new(zoom: u8) -> Result<Self, CoordError> {
        if zoom > MAX_ZOOM {
            return Err(CoordError::InvalidZoom(zoom));
        }
        Ok(Self {
            zoom,
            tiles: DashSet::new(),
        })
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn contains(&self, tile: &TileCoord) -> bool {
        self.tiles.contains(tile)
    }

    /// All tiles in `z/x/y` order.
    pub fn entries(&self) -> Vec<TileCoord> {
        let mut out: Vec<TileCoord> = self.tiles.iter().map(|t| *t).collect();
        out.sort();
        out
    }

    /// Write one `z/x/y` line per tile.
    pub fn write_list(&self, path: &Path) -> io::Result<usize> {
        let tiles = self.entries();
        let mut out = BufWriter::new(File::create(path)?);
        for tile in &tiles {
            writeln!(out, "{}", tile)?;
        }
        out.flush()?;
        Ok(tiles.len())
    }
}

impl ExpireTracker for TileExpireSet {
    fn expire(&self, lon: f64, lat: f64) {
        // Polar points belong to the edge tiles.
        let lat = lat.clamp(MIN_LAT, MAX_LAT);
        if let Ok(tile) = to_tile_coords(lat, lon, self.zoom) {
            self.tiles.insert(tile);
        }
    }
}
