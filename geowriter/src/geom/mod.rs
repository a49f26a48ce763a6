//! Geometry construction.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────┐   acquire(srid)   ┌──────────────────────────┐
//! │  GeometryEngine (shared) │ ────────────────► │ GeometryContext (worker) │
//! └──────────────────────────┘                   │ point / line / polygons  │
//!                                                └────────────┬─────────────┘
//!                                                             │ owned
//!                                                             ▼
//!                                                      ┌─────────────┐
//!                                                      │  Geometry   │
//!                                                      └─────────────┘
//! ```
//!
//! The engine is shared by all workers; each worker acquires exactly one
//! [`GeometryContext`] at start and drops it on exit. Contexts are not
//! `Send` and never cross threads. The [`build`] functions resolve an
//! element's references through the cache and hand projected coordinates
//! to the context, which validates them and returns an owned [`Geometry`].

pub mod build;
mod engine;
mod error;
mod geometry;
mod rings;
mod validate;

pub use build::{build_area, build_path, build_point};
pub use engine::{EngineStats, GeoContext, GeoEngine, GeometryContext, GeometryEngine};
pub use error::{EngineError, GeomError, Severity};
pub use geometry::{Geometry, GeometryType};
