//! Raw map elements as delivered by the reader.
//!
//! Three kinds flow through the writers:
//!
//! - [`Point`]: a single location
//! - [`Path`]: an ordered chain of point references
//! - [`Area`]: a composite of member paths/points with roles
//!
//! Paths and areas only carry references; coordinates are resolved
//! through the [`crate::cache::ElementCache`] when the geometry is built.

mod types;

pub use types::{Area, ElementKind, Member, Path, Point, Tags};
