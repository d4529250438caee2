// file: src/models/document.rs
// description: core document model, identifiers and create/update payload
// reference: internal data structures

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Genre stamped on documents written through the form.
pub const MANUAL_ENTRY_GENRE: &str = "Manual Entry";

/// Opaque document identifier. The backend hands out strings, the offline
/// dataset uses numbers; both compare by their textual form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocumentId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<i64> for DocumentId {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

impl Serialize for DocumentId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for DocumentId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Int(i64),
            Float(f64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => DocumentId(s),
            RawId::Int(n) => DocumentId(n.to_string()),
            RawId::Float(n) => DocumentId(n.to_string()),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(rename = "_id", alias = "id")]
    pub id: DocumentId,
    pub title: String,
    pub content: String,
    #[serde(default, deserialize_with = "dedup_topics")]
    pub topics: Vec<i64>,
    #[serde(default)]
    pub topic_names: Vec<String>,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub doi: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default, alias = "dateAdded", alias = "date")]
    pub date_added: Option<String>,
    #[serde(default)]
    pub popularity: Option<f64>,
}

fn dedup_topics<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<i64>, D::Error> {
    let raw: Option<Vec<i64>> = Option::deserialize(deserializer)?;
    Ok(dedup_preserving_order(raw.unwrap_or_default()))
}

pub(crate) fn dedup_preserving_order(topics: Vec<i64>) -> Vec<i64> {
    let mut seen = std::collections::HashSet::new();
    topics.into_iter().filter(|t| seen.insert(*t)).collect()
}

impl Document {
    pub fn has_topic(&self, topic_id: i64) -> bool {
        self.topics.contains(&topic_id)
    }

    pub fn popularity_score(&self) -> f64 {
        self.popularity.unwrap_or(0.0)
    }

    /// Parsed `date_added`. Accepts RFC 3339, naive ISO datetimes (UTC
    /// assumed) and bare dates.
    pub fn date_added_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(self.date_added.as_deref()?)
    }

    /// Case-insensitive substring match on title, content and genre.
    /// `needle` must already be lowercase.
    pub fn matches_text(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.content.to_lowercase().contains(needle)
            || self
                .genre
                .as_deref()
                .is_some_and(|g| g.to_lowercase().contains(needle))
    }
}

pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Body of `POST /api/documents` and `PUT /api/documents/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentPayload {
    pub title: String,
    pub content: String,
    pub authors: Vec<String>,
    pub year: Option<i32>,
    pub doi: Option<String>,
    pub genre: String,
    pub topics: Vec<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_backend_document_deserializes() {
        let doc: Document = serde_json::from_value(json!({
            "_id": "65a1f0c2e4b0a1b2c3d4e5f6",
            "story_id": 0,
            "title": "Sleep spindles",
            "content": "Body",
            "genre": "Manual Entry",
            "topics": [3, 1, 3],
            "topic_names": ["sleep"],
            "authors": ["Lee"],
            "year": 2024,
            "doi": null,
            "date_added": "2024-05-01T10:20:30.123456",
            "popularity": 0
        }))
        .unwrap();

        assert_eq!(doc.id, DocumentId::new("65a1f0c2e4b0a1b2c3d4e5f6"));
        assert_eq!(doc.topics, vec![3, 1]);
        assert_eq!(doc.year, Some(2024));
        assert!(doc.date_added_at().is_some());
    }

    #[test]
    fn test_numeric_id_and_legacy_fields() {
        let doc: Document = serde_json::from_value(json!({
            "id": 4,
            "title": "Stroke",
            "content": "Recovery",
            "tags": ["Stroke"],
            "date": "2024-11-30"
        }))
        .unwrap();

        assert_eq!(doc.id.as_str(), "4");
        assert!(doc.topics.is_empty());
        assert_eq!(doc.popularity_score(), 0.0);
        assert_eq!(
            doc.date_added_at().unwrap().date_naive(),
            NaiveDate::from_ymd_opt(2024, 11, 30).unwrap()
        );
    }

    #[test]
    fn test_unparsable_date_is_none() {
        assert!(parse_timestamp("yesterday").is_none());
        assert!(parse_timestamp("2025-01-01T00:00:00Z").is_some());
    }

    #[test]
    fn test_matches_text_ignores_authors() {
        let doc: Document = serde_json::from_value(json!({
            "_id": "a",
            "title": "EEG Review",
            "content": "signal processing",
            "genre": "Survey",
            "authors": ["Zed"]
        }))
        .unwrap();

        assert!(doc.matches_text("eeg"));
        assert!(doc.matches_text("processing"));
        assert!(doc.matches_text("survey"));
        assert!(!doc.matches_text("zed"));
    }
}
