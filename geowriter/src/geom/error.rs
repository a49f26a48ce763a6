//! Geometry error types.

use crate::coord::CoordError;
use crate::element::ElementKind;
use crate::log::LogLevel;
use thiserror::Error;

/// How loudly a recoverable geometry error is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Expected in normal imports, e.g. references outside the extract.
    Low,
    /// Broken input data or invalid geometry.
    High,
}

impl Severity {
    pub fn log_level(&self) -> LogLevel {
        match self {
            Severity::Low => LogLevel::Debug,
            Severity::High => LogLevel::Warn,
        }
    }
}

/// Recoverable per-element geometry failure.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeomError {
    #[error("missing {kind} {id} in cache")]
    MissingReference { kind: ElementKind, id: i64 },

    #[error("invalid coordinate: {0}")]
    InvalidCoordinate(#[from] CoordError),

    #[error("coordinate is not finite")]
    NonFinite,

    #[error("need at least two distinct points, got {0}")]
    TooFewPoints(usize),

    #[error("ring is not closed")]
    UnclosedRing,

    #[error("invalid ring: {0}")]
    InvalidRing(&'static str),

    #[error("ring is self-intersecting")]
    SelfIntersection,

    #[error("area has no outer ring")]
    NoOuterRing,
}

impl GeomError {
    pub fn severity(&self) -> Severity {
        match self {
            GeomError::MissingReference { .. } => Severity::Low,
            _ => Severity::High,
        }
    }
}

/// The engine could not hand out a context. Fatal for the worker.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("geometry engine unavailable: {0}")]
    Unavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_reference_is_low_severity() {
        let err = GeomError::MissingReference {
            kind: ElementKind::Point,
            id: 42,
        };
        assert_eq!(err.severity(), Severity::Low);
        assert_eq!(err.severity().log_level(), LogLevel::Debug);
        assert_eq!(err.to_string(), "missing point 42 in cache");
    }

    #[test]
    fn test_invalid_geometry_is_high_severity() {
        assert_eq!(GeomError::SelfIntersection.severity(), Severity::High);
        assert_eq!(GeomError::TooFewPoints(1).severity(), Severity::High);
        let coord: GeomError = CoordError::InvalidLatitude(95.0).into();
        assert_eq!(coord.severity(), Severity::High);
        assert_eq!(Severity::High.log_level(), LogLevel::Warn);
    }
}
