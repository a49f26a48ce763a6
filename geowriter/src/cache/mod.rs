//! Lookup of previously cached elements.
//!
//! Path and area geometries depend on elements that were read earlier
//! in the import: point coordinates for paths, member paths for areas.
//! The [`ElementCache`] contract resolves those by id and kind. Writers
//! call it concurrently from every worker without external locking, so
//! implementations own their synchronisation.

mod memory;
mod r#trait;

pub use memory::MemoryCache;
pub use r#trait::{CacheStats, CachedElement, Coordinate, ElementCache};
