//! Loading `WriterConfig` from an INI file and turning it into
//! pipeline components.

use ini::Ini;
use std::path::Path;
use thiserror::Error;

use super::settings::WriterConfig;
use crate::clip::{ClipError, RegionClipper};
use crate::coord::CoordError;
use crate::expire::TileExpireSet;
use crate::mapping::{MappingError, TagMapping};

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] ini::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {section}.{key} = '{value}' - {reason}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: String,
    },
}

impl WriterConfig {
    /// Load configuration from a specific path.
    ///
    /// If the file doesn't exist, returns defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigFileError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path)?;
        super::parser::parse_ini(&ini)
    }

    /// Parse configuration from INI text.
    pub fn parse(content: &str) -> Result<Self, ConfigFileError> {
        let ini = Ini::load_from_str(content).map_err(ini::Error::Parse)?;
        super::parser::parse_ini(&ini)
    }

    /// Clipper for `[limit_to]`, if any boxes are configured.
    pub fn region_clipper(&self) -> Result<Option<RegionClipper>, ClipError> {
        if self.limit_to.is_empty() {
            return Ok(None);
        }
        RegionClipper::from_boxes(&self.limit_to, self.writer.srid).map(Some)
    }

    /// Tile expire set for `[expire]`, if the section is present.
    pub fn tile_expire(&self) -> Result<Option<TileExpireSet>, CoordError> {
        self.expire
            .as_ref()
            .map(|e| TileExpireSet::new(e.zoom))
            .transpose()
    }

    /// Tag mapping named in `[mapping]`, resolved against `base` when
    /// the configured path is relative.
    pub fn tag_mapping(&self, base: &Path) -> Result<Option<TagMapping>, MappingError> {
        let Some(file) = &self.mapping.file else {
            return Ok(None);
        };
        TagMapping::load_from(&base.join(file)).map(Some)
    }
}
