//! INI parsing logic for converting `Ini` → `WriterConfig`.
//!
//! The single place where INI key names are mapped to struct fields.

use ini::Ini;
use std::path::PathBuf;

use super::file::ConfigFileError;
use super::settings::{ExpireSettings, WriterConfig};
use crate::clip::LonLatBox;
use crate::coord::{validate_lon_lat, Srid, MAX_ZOOM};

fn invalid(section: &str, key: &str, value: &str, reason: impl Into<String>) -> ConfigFileError {
    ConfigFileError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// Parse an `Ini` object into a `WriterConfig`.
///
/// Starts from `WriterConfig::default()` and overlays any values found in the INI.
pub(super) fn parse_ini(ini: &Ini) -> Result<WriterConfig, ConfigFileError> {
    let mut config = WriterConfig::default();

    // [writer] section
    if let Some(section) = ini.section(Some("writer")) {
        if let Some(v) = section.get("workers") {
            let workers: usize = v
                .trim()
                .parse()
                .map_err(|_| invalid("writer", "workers", v, "must be a positive integer"))?;
            if workers == 0 {
                return Err(invalid("writer", "workers", v, "must be at least 1"));
            }
            config.writer.workers = workers;
        }
        if let Some(v) = section.get("srid") {
            config.writer.srid = v
                .trim()
                .parse::<i32>()
                .ok()
                .and_then(|code| Srid::try_from(code).ok())
                .ok_or_else(|| invalid("writer", "srid", v, "must be 4326 or 3857"))?;
        }
        if let Some(v) = section.get("queue_capacity") {
            let capacity: usize = v.trim().parse().map_err(|_| {
                invalid("writer", "queue_capacity", v, "must be a positive integer")
            })?;
            if capacity == 0 {
                return Err(invalid("writer", "queue_capacity", v, "must be at least 1"));
            }
            config.writer.queue_capacity = capacity;
        }
    }

    // [limit_to] section
    if let Some(section) = ini.section(Some("limit_to")) {
        if let Some(v) = section.get("bbox") {
            config.limit_to =
                parse_boxes(v).map_err(|reason| invalid("limit_to", "bbox", v, reason))?;
        }
    }

    // [expire] section
    if let Some(section) = ini.section(Some("expire")) {
        let mut expire = ExpireSettings::default();
        if let Some(v) = section.get("zoom") {
            let zoom: u8 = v
                .trim()
                .parse()
                .map_err(|_| invalid("expire", "zoom", v, "must be an integer 0-18"))?;
            if zoom > MAX_ZOOM {
                return Err(invalid("expire", "zoom", v, "must be an integer 0-18"));
            }
            expire.zoom = zoom;
        }
        if let Some(v) = section.get("output") {
            let v = v.trim();
            if !v.is_empty() {
                expire.output = Some(PathBuf::from(v));
            }
        }
        config.expire = Some(expire);
    }

    // [mapping] section
    if let Some(section) = ini.section(Some("mapping")) {
        if let Some(v) = section.get("file") {
            let v = v.trim();
            if !v.is_empty() {
                config.mapping.file = Some(PathBuf::from(v));
            }
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = section.get("directory") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.directory = PathBuf::from(v);
            }
        }
        if let Some(v) = section.get("file") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.file = v.to_string();
            }
        }
    }

    Ok(config)
}

/// Parse `minlon,minlat,maxlon,maxlat` boxes separated by `;`.
fn parse_boxes(value: &str) -> Result<Vec<LonLatBox>, String> {
    let mut boxes = Vec::new();
    for part in value.split(';').map(str::trim).filter(|p| !p.is_empty()) {
        let numbers = part
            .split(',')
            .map(|n| n.trim().parse::<f64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| format!("'{}' is not a list of numbers", part))?;
        let (min_lon, min_lat, max_lon, max_lat) = match numbers.as_slice() {
            &[a, b, c, d] => (a, b, c, d),
            _ => return Err(format!("'{}' must have four values", part)),
        };
        validate_lon_lat(min_lon, min_lat).map_err(|e| e.to_string())?;
        validate_lon_lat(max_lon, max_lat).map_err(|e| e.to_string())?;
        if min_lon >= max_lon || min_lat >= max_lat {
            return Err(format!("'{}' has no extent", part));
        }
        boxes.push(LonLatBox::new(min_lon, min_lat, max_lon, max_lat));
    }
    if boxes.is_empty() {
        return Err("no boxes given".to_string());
    }
    Ok(boxes)
}
