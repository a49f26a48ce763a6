//! GeoWriter - concurrent geometry writers for map data imports
//!
//! Points, paths and areas read from a map extract are classified by
//! their tags, turned into geometries (resolving referenced elements
//! through a cache), optionally clipped to a region, recorded for tile
//! expiry and handed to a storage backend. Each element kind has its own
//! pool of worker threads; see [`writer`].
//!
//! # Example
//!
//! ```
//! use geowriter::cache::MemoryCache;
//! use geowriter::coord::Srid;
//! use geowriter::element::Point;
//! use geowriter::expire::CoordExpireSet;
//! use geowriter::geom::GeoEngine;
//! use geowriter::insert::NoOpInserter;
//! use geowriter::log::NoOpLogger;
//! use geowriter::mapping::TagMapping;
//! use geowriter::progress::Statistics;
//! use geowriter::writer::{element_queue, PointWriter, WriterServices};
//! use std::sync::Arc;
//!
//! let mapping = TagMapping::parse("[poi]\ntype = point\namenity = restaurant, cafe\n")?;
//! let expire = Arc::new(CoordExpireSet::new());
//! let services = WriterServices::new(
//!     Arc::new(MemoryCache::new()),
//!     Arc::new(NoOpInserter),
//!     Arc::new(Statistics::new()),
//!     Arc::new(mapping),
//!     Arc::new(GeoEngine::new()),
//!     Arc::new(NoOpLogger),
//! )
//! .with_expire(expire.clone());
//!
//! let (tx, rx) = element_queue(16);
//! let mut writer = PointWriter::points(rx, services, Srid::WebMercator, 2);
//! writer.start()?;
//!
//! tx.send(Point::new(1, 10.0, 20.0).with_tag("amenity", "restaurant"))?;
//! tx.close();
//!
//! let summary = writer.await_done()?;
//! assert_eq!(summary.inserted, 1);
//! assert_eq!(expire.len(), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cache;
pub mod clip;
pub mod config;
pub mod coord;
pub mod element;
pub mod expire;
pub mod geom;
pub mod insert;
pub mod log;
pub mod logging;
pub mod mapping;
pub mod progress;
pub mod writer;

/// Version of the GeoWriter library.
///
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
