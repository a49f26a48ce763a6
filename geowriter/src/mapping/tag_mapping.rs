//! INI driven tag mapping.

use crate::element::Tags;
use crate::mapping::{Match, Matcher};
use ini::Ini;
use std::collections::BTreeSet;
use std::path::Path;
use thiserror::Error;

/// Wildcard accepting any tag value.
const ANY_VALUE: &str = "*";

/// Key of the per-table geometry type.
const TYPE_KEY: &str = "type";

/// Errors loading a tag mapping.
#[derive(Debug, Error)]
pub enum MappingError {
    #[error("Failed to read mapping file: {0}")]
    ReadError(#[from] ini::Error),

    #[error("Table '{table}' has invalid type '{value}' (expected point, linestring or polygon)")]
    InvalidTableType { table: String, value: String },

    #[error("Table '{0}' is missing a type")]
    MissingTableType(String),

    #[error("Table '{0}' has no tag filters")]
    EmptyTable(String),

    #[error("Table '{0}' is defined more than once")]
    DuplicateTable(String),
}

/// Geometry type stored by a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    Point,
    LineString,
    Polygon,
}

impl std::str::FromStr for TableKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "point" => Ok(TableKind::Point),
            "linestring" => Ok(TableKind::LineString),
            "polygon" => Ok(TableKind::Polygon),
            _ => Err(()),
        }
    }
}

/// Accepted values for one tag key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueFilter {
    Any,
    OneOf(BTreeSet<String>),
}

impl ValueFilter {
    fn parse(raw: &str) -> Self {
        let values: BTreeSet<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(String::from)
            .collect();
        if values.contains(ANY_VALUE) {
            ValueFilter::Any
        } else {
            ValueFilter::OneOf(values)
        }
    }

    fn accepts(&self, value: &str) -> bool {
        match self {
            ValueFilter::Any => true,
            ValueFilter::OneOf(values) => values.contains(value),
        }
    }
}

/// One destination table and its tag filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSpec {
    pub name: String,
    pub kind: TableKind,
    /// Filters in file order.
    pub filters: Vec<(String, ValueFilter)>,
}

impl TableSpec {
    pub fn new(name: impl Into<String>, kind: TableKind) -> Self {
        Self {
            name: name.into(),
            kind,
            filters: Vec::new(),
        }
    }

    /// Accept `values` (comma separated, `*` for any) for `key`.
    pub fn with_filter(mut self, key: impl Into<String>, values: &str) -> Self {
        self.filters.push((key.into(), ValueFilter::parse(values)));
        self
    }

    /// First tag (in key order) accepted by this table.
    fn classify(&self, tags: &Tags) -> Option<Match> {
        tags.iter().find_map(|(key, value)| {
            self.filters
                .iter()
                .any(|(k, filter)| k == key && filter.accepts(value))
                .then(|| Match::new(self.name.clone(), key.clone(), value.clone()))
        })
    }
}

/// Configuration driven [`Matcher`].
#[derive(Debug, Clone, Default)]
pub struct TagMapping {
    tables: Vec<TableSpec>,
}

impl TagMapping {
    pub fn new(tables: Vec<TableSpec>) -> Self {
        Self { tables }
    }

    /// Load a mapping file. Every section is a table.
    pub fn load_from(path: &Path) -> Result<Self, MappingError> {
        let ini = Ini::load_from_file(path)?;
        Self::from_ini(&ini)
    }

    /// Parse a mapping from INI text.
    pub fn parse(content: &str) -> Result<Self, MappingError> {
        let ini = Ini::load_from_str(content)
            .map_err(|e| MappingError::ReadError(ini::Error::Parse(e)))?;
        Self::from_ini(&ini)
    }

    fn from_ini(ini: &Ini) -> Result<Self, MappingError> {
        let mut tables: Vec<TableSpec> = Vec::new();

        for (section, props) in ini.iter() {
            let Some(name) = section else {
                continue;
            };
            if tables.iter().any(|t| t.name == name) {
                return Err(MappingError::DuplicateTable(name.to_string()));
            }

            let raw_kind = props
                .get(TYPE_KEY)
                .ok_or_else(|| MappingError::MissingTableType(name.to_string()))?;
            let kind = raw_kind
                .parse::<TableKind>()
                .map_err(|_| MappingError::InvalidTableType {
                    table: name.to_string(),
                    value: raw_kind.to_string(),
                })?;

            let mut table = TableSpec::new(name, kind);
            for (key, value) in props.iter().filter(|(k, _)| *k != TYPE_KEY) {
                table = table.with_filter(key, value);
            }
            if table.filters.is_empty() {
                return Err(MappingError::EmptyTable(name.to_string()));
            }
            tables.push(table);
        }

        Ok(Self { tables })
    }

    pub fn tables(&self) -> &[TableSpec] {
        &self.tables
    }

    fn match_kind(&self, kind: TableKind, tags: &Tags) -> Vec<Match> {
        if tags.is_empty() {
            return Vec::new();
        }
        self.tables
            .iter()
            .filter(|t| t.kind == kind)
            .filter_map(|t| t.classify(tags))
            .collect()
    }
}

impl Matcher for TagMapping {
    fn match_point(&self, tags: &Tags) -> Vec<Match> {
        self.match_kind(TableKind::Point, tags)
    }

    fn match_path(&self, tags: &Tags) -> Vec<Match> {
        self.match_kind(TableKind::LineString, tags)
    }

    fn match_area(&self, tags: &Tags) -> Vec<Match> {
        self.match_kind(TableKind::Polygon, tags)
    }
}
