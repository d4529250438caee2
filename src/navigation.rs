// file: src/navigation.rs
// description: typed navigation targets and the edit/id/filter parameter contract
// reference: https://docs.rs/url (via reqwest::Url)

use crate::error::{LibraryError, Result};
use crate::models::DocumentId;
use reqwest::Url;
use std::fmt;

const LISTING_PAGE: &str = "index.html";
const VIEWER_PAGE: &str = "viewer.html";
const EDITOR_PAGE: &str = "create.html";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Listing { filter: Option<i64> },
    Viewer(DocumentId),
    Editor(Option<DocumentId>),
}

impl Route {
    pub fn listing() -> Self {
        Route::Listing { filter: None }
    }

    pub fn to_href(&self) -> String {
        match self {
            Route::Listing { filter: None } => LISTING_PAGE.to_string(),
            Route::Listing {
                filter: Some(topic),
            } => format!("{}#filter={}", LISTING_PAGE, topic),
            Route::Viewer(id) => {
                format!("{}?id={}", VIEWER_PAGE, urlencoding::encode(id.as_str()))
            }
            Route::Editor(None) => EDITOR_PAGE.to_string(),
            Route::Editor(Some(id)) => {
                format!("{}?edit={}", EDITOR_PAGE, urlencoding::encode(id.as_str()))
            }
        }
    }

    /// Reads a relative href such as `viewer.html?id=42` or
    /// `index.html#filter=3`.
    pub fn parse(href: &str) -> Result<Self> {
        let base = Url::parse("nav://doclib/")
            .map_err(|e| LibraryError::Validation(format!("Invalid navigation base: {}", e)))?;
        let url = base
            .join(href.trim())
            .map_err(|e| LibraryError::Validation(format!("Invalid link '{}': {}", href, e)))?;

        let param = |name: &str| {
            url.query_pairs()
                .find(|(key, value)| key == name && !value.is_empty())
                .map(|(_, value)| DocumentId::new(value.into_owned()))
        };

        let page = url.path().trim_start_matches('/');
        match page {
            "" | LISTING_PAGE => Ok(Route::Listing {
                filter: url.fragment().and_then(parse_filter_fragment),
            }),
            VIEWER_PAGE => param("id").map(Route::Viewer).ok_or_else(|| {
                LibraryError::Validation(format!("Viewer link without an id: {}", href))
            }),
            EDITOR_PAGE => Ok(Route::Editor(param("edit"))),
            other => Err(LibraryError::Validation(format!("Unknown page: {}", other))),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_href())
    }
}

fn parse_filter_fragment(fragment: &str) -> Option<i64> {
    fragment
        .split('&')
        .find_map(|pair| pair.strip_prefix("filter="))
        .and_then(|value| value.trim().parse().ok())
}
