//! Matcher contract and match types.

use crate::element::Tags;
use std::fmt;

/// Why an element was selected for a table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Classification {
    /// Tag key that matched.
    pub key: String,
    /// Tag value that matched.
    pub value: String,
}

/// One destination row for an element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Match {
    pub table: String,
    pub classification: Classification,
}

impl Match {
    pub fn new(
        table: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            table: table.into(),
            classification: Classification {
                key: key.into(),
                value: value.into(),
            },
        }
    }
}

impl fmt::Display for Match {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}={})",
            self.table, self.classification.key, self.classification.value
        )
    }
}

/// Maps tag sets onto table matches.
///
/// Pure: the result depends only on `tags` and static configuration.
/// An empty result means no rule applies and is not an error.
pub trait Matcher: Send + Sync {
    fn match_point(&self, tags: &Tags) -> Vec<Match>;
    fn match_path(&self, tags: &Tags) -> Vec<Match>;
    fn match_area(&self, tags: &Tags) -> Vec<Match>;
}
