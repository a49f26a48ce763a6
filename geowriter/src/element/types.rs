//! Element type definitions.

use std::collections::BTreeMap;
use std::fmt;

/// Tag set of an element. Keys are unique and iterate in sorted order.
pub type Tags = BTreeMap<String, String>;

/// The three element kinds of the source dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementKind {
    Point,
    Path,
    Area,
}

impl ElementKind {
    /// Lower-case name used in log messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementKind::Point => "point",
            ElementKind::Path => "path",
            ElementKind::Area => "area",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single location.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub id: i64,
    pub tags: Tags,
    /// Longitude in degrees (WGS84).
    pub lon: f64,
    /// Latitude in degrees (WGS84).
    pub lat: f64,
}

impl Point {
    pub fn new(id: i64, lon: f64, lat: f64) -> Self {
        Self {
            id,
            tags: Tags::new(),
            lon,
            lat,
        }
    }

    /// Add a tag, replacing any previous value for `key`.
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }
}

/// An ordered chain of point references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    pub id: i64,
    pub tags: Tags,
    pub refs: Vec<i64>,
}

impl Path {
    pub fn new(id: i64, refs: Vec<i64>) -> Self {
        Self {
            id,
            tags: Tags::new(),
            refs,
        }
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    /// True when the first and last reference are the same point.
    pub fn is_closed(&self) -> bool {
        self.refs.len() >= 4 && self.refs.first() == self.refs.last()
    }
}

/// Member of an [`Area`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub id: i64,
    pub kind: ElementKind,
    pub role: String,
}

impl Member {
    pub fn new(id: i64, kind: ElementKind, role: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            role: role.into(),
        }
    }
}

/// A composite of member paths and points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Area {
    pub id: i64,
    pub tags: Tags,
    pub members: Vec<Member>,
}

impl Area {
    pub fn new(id: i64, members: Vec<Member>) -> Self {
        Self {
            id,
            tags: Tags::new(),
            members,
        }
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }
}
