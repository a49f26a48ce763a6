//! Tag based classification of elements into tables.
//!
//! A [`Matcher`] maps an element's tags onto zero or more [`Match`]es.
//! Each match names a destination table and carries the classification
//! (the tag that selected it). The writers compute matches once per
//! element and insert one row per match.
//!
//! [`TagMapping`] is the configuration driven implementation, loaded
//! from an INI file:
//!
//! ```ini
//! [poi]
//! type = point
//! amenity = restaurant, cafe
//! shop = *
//!
//! [roads]
//! type = linestring
//! highway = *
//! ```

mod matcher;
mod tag_mapping;

pub use matcher::{Classification, Match, Matcher};
pub use tag_mapping::{MappingError, TableKind, TableSpec, TagMapping, ValueFilter};
