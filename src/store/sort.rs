// file: src/store/sort.rs
// description: stable ordering of document sequences by date or popularity

use crate::error::LibraryError;
use crate::models::Document;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Order as returned by the current filter or search.
    #[default]
    Relevance,
    Date,
    Popularity,
}

impl SortMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::Relevance => "relevance",
            SortMode::Date => "date",
            SortMode::Popularity => "popularity",
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortMode {
    type Err = LibraryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "relevance" => Ok(SortMode::Relevance),
            "date" => Ok(SortMode::Date),
            "popularity" => Ok(SortMode::Popularity),
            other => Err(LibraryError::Validation(format!(
                "Unknown sort mode '{}' (expected relevance, date or popularity)",
                other
            ))),
        }
    }
}

/// Returns a new sequence; ties keep their input order.
pub fn sort(mode: SortMode, documents: &[Document]) -> Vec<Document> {
    let mut sorted = documents.to_vec();
    match mode {
        SortMode::Relevance => {}
        SortMode::Date => {
            // None < Some, so reversing puts undated documents last.
            sorted.sort_by(|a, b| b.date_added_at().cmp(&a.date_added_at()));
        }
        SortMode::Popularity => {
            sorted.sort_by(|a, b| b.popularity_score().total_cmp(&a.popularity_score()));
        }
    }
    sorted
}
