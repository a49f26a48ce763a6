//! Resource-fatal writer errors.

use crate::geom::EngineError;
use std::sync::Arc;
use thiserror::Error;

/// Failures that stop a writer as a whole.
///
/// Per-element problems never surface here; workers log them and move
/// on to the next element. Cloneable so a finished writer can report the
/// same outcome on every `await_done` call.
#[derive(Debug, Clone, Error)]
pub enum WriterError {
    #[error("writer already started")]
    AlreadyStarted,

    #[error("writer not started")]
    NotStarted,

    #[error("worker count must be at least 1")]
    NoWorkers,

    #[error("failed to spawn worker thread: {0}")]
    Spawn(Arc<std::io::Error>),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("worker {0} panicked")]
    WorkerPanicked(String),
}

impl From<std::io::Error> for WriterError {
    fn from(err: std::io::Error) -> Self {
        WriterError::Spawn(Arc::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_error_message_not_repeated() {
        let err: WriterError = EngineError::Unavailable("pool exhausted".into()).into();
        assert_eq!(
            err.to_string(),
            "geometry engine unavailable: pool exhausted"
        );
    }

    #[test]
    fn test_spawn_error_from_io() {
        let err: WriterError = std::io::Error::new(std::io::ErrorKind::Other, "no threads").into();
        assert!(matches!(err, WriterError::Spawn(_)));
        assert_eq!(err.to_string(), "failed to spawn worker thread: no threads");
    }
}
