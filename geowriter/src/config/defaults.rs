//! Default values for writer configuration.

use crate::coord::Srid;

pub const DEFAULT_SRID: Srid = Srid::WebMercator;

pub const DEFAULT_QUEUE_CAPACITY: usize = 256;

/// Zoom level of expire tiles.
pub const DEFAULT_EXPIRE_ZOOM: u8 = 14;

pub const DEFAULT_LOG_DIR: &str = "logs";

pub const DEFAULT_LOG_FILE: &str = "geowriter.log";

/// Get the number of available CPU cores.
pub fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
}
