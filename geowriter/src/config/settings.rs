//! Configuration structs, one per INI section.

use super::defaults::*;
use crate::clip::LonLatBox;
use crate::coord::Srid;
use std::path::PathBuf;

/// Full writer configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WriterConfig {
    pub writer: WriterSettings,
    /// Clip boxes; empty disables clipping.
    pub limit_to: Vec<LonLatBox>,
    /// `None` disables expire tracking.
    pub expire: Option<ExpireSettings>,
    pub mapping: MappingSettings,
    pub logging: LoggingSettings,
}

/// `[writer]`
#[derive(Debug, Clone, PartialEq)]
pub struct WriterSettings {
    /// Worker threads per element kind
    pub workers: usize,
    pub srid: Srid,
    /// Undelivered elements buffered per queue
    pub queue_capacity: usize,
}

/// `[expire]`
#[derive(Debug, Clone, PartialEq)]
pub struct ExpireSettings {
    pub zoom: u8,
    /// Where the tile list is written at the end of the run
    pub output: Option<PathBuf>,
}

/// `[mapping]`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MappingSettings {
    pub file: Option<PathBuf>,
}

/// `[logging]`
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    pub directory: PathBuf,
    pub file: String,
}

impl Default for WriterSettings {
    fn default() -> Self {
        Self {
            workers: num_cpus(),
            srid: DEFAULT_SRID,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }
}

impl Default for ExpireSettings {
    fn default() -> Self {
        Self {
            zoom: DEFAULT_EXPIRE_ZOOM,
            output: None,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(DEFAULT_LOG_DIR),
            file: DEFAULT_LOG_FILE.to_string(),
        }
    }
}
