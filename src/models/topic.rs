// file: src/models/topic.rs
// description: topic taxonomy entry produced by the backend topic model

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    pub topic_id: i64,
    pub name: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub count: u32,
}

impl Topic {
    pub fn new(topic_id: i64, name: impl Into<String>, keywords: &[&str]) -> Self {
        Self {
            topic_id,
            name: name.into(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            count: 0,
        }
    }

    /// First keyword when there is one, otherwise the model's name.
    pub fn display_name(&self) -> &str {
        self.keywords
            .first()
            .map(String::as_str)
            .filter(|k| !k.is_empty())
            .unwrap_or(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_prefers_first_keyword() {
        let topic = Topic::new(2, "2_seizure_eeg_epilepsy", &["seizure", "eeg"]);
        assert_eq!(topic.display_name(), "seizure");
    }

    #[test]
    fn test_display_name_falls_back_to_name() {
        let topic = Topic::new(7, "Imaging", &[]);
        assert_eq!(topic.display_name(), "Imaging");
    }
}
