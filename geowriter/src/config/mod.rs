//! Writer configuration.
//!
//! Loaded from an INI file; missing keys and sections fall back to the
//! defaults in [`defaults`](self::defaults).
//!
//! ```ini
//! [writer]
//! workers = 8
//! srid = 3857
//! queue_capacity = 256
//!
//! [limit_to]
//! bbox = 5.8,47.2,15.1,55.1
//!
//! [expire]
//! zoom = 14
//! output = expire_tiles.list
//!
//! [mapping]
//! file = mapping.ini
//!
//! [logging]
//! directory = logs
//! file = geowriter.log
//! ```

pub mod defaults;
mod file;
mod parser;
mod settings;

pub use defaults::num_cpus;
pub use file::ConfigFileError;
pub use settings::{ExpireSettings, LoggingSettings, MappingSettings, WriterConfig, WriterSettings};
