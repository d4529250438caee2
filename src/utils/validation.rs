// file: src/utils/validation.rs
// description: input validation and text normalization helpers
// reference: input validation patterns

use crate::error::{LibraryError, Result};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref NON_ALPHANUMERIC: Regex = Regex::new(r"[^A-Za-z0-9]")
        .expect("NON_ALPHANUMERIC regex is valid");
}

pub struct Validator;

impl Validator {
    /// Fails with `message` when `value` is blank after trimming.
    pub fn require_text(value: &str, message: &str) -> Result<()> {
        if value.trim().is_empty() {
            return Err(LibraryError::Validation(message.to_string()));
        }
        Ok(())
    }

    pub fn validate_url(url: &str) -> Result<()> {
        if url.trim().is_empty() {
            return Err(LibraryError::Validation("URL is empty".to_string()));
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(LibraryError::Validation(format!(
                "Invalid URL format: {}",
                url
            )));
        }
        Ok(())
    }

    /// Comma-separated author text to an ordered list, blanks dropped.
    pub fn split_authors(text: &str) -> Vec<String> {
        text.split(',')
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Leading integer of the year field; anything unparsable is unset.
    pub fn parse_year(text: &str) -> Option<i32> {
        let trimmed = text.trim();
        let end = trimmed
            .char_indices()
            .find(|(i, c)| !(c.is_ascii_digit() || (*i == 0 && (*c == '-' || *c == '+'))))
            .map(|(i, _)| i)
            .unwrap_or(trimmed.len());
        trimmed[..end].parse().ok()
    }

    pub fn optional_text(text: &str) -> Option<String> {
        let trimmed = text.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }

    pub fn sanitize_filename(title: &str) -> String {
        NON_ALPHANUMERIC.replace_all(title, "_").into_owned()
    }

    pub fn truncate_text(text: &str, max_chars: usize) -> String {
        if text.chars().count() <= max_chars {
            text.to_string()
        } else {
            let cut: String = text.chars().take(max_chars).collect();
            format!("{}...", cut.trim_end())
        }
    }
}
