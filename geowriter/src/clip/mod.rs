//! Clipping geometries to a configured region.
//!
//! When a writer has no [`Clipper`] configured, clipping is skipped and
//! the built geometry is used as is. With a clipper, a geometry that lies
//! entirely outside the region yields no parts and no error; that is the
//! normal "not in scope" outcome.

mod region;

pub use region::{LonLatBox, RegionClipper};

use crate::geom::Geometry;
use thiserror::Error;

/// Failure to compute a clip. Recoverable: the element is skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClipError {
    #[error("clip region is empty")]
    EmptyRegion,

    #[error("invalid clip box: {0}")]
    InvalidBox(String),

    #[error("geometry is in {geometry} but clip region is in {region}")]
    SridMismatch { geometry: i32, region: i32 },

    #[error("unsupported geometry type for clipping")]
    Unsupported,

    #[error("intersection failed: {0}")]
    Intersection(String),
}

/// Clips a geometry into the parts that fall inside a region.
pub trait Clipper: Send + Sync {
    /// Zero or more parts of `geom`. Each part is an independent
    /// insertable geometry.
    fn clip(&self, geom: &Geometry) -> Result<Vec<Geometry>, ClipError>;
}
