// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{LibraryError, Result};
use crate::store::SortMode;
use crate::utils::Validator;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub api: ApiConfig,
    pub browser: BrowserConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub list_limit: usize,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BrowserConfig {
    pub debounce_ms: u64,
    #[serde(default)]
    pub default_sort: SortMode,
    pub suggest_count: usize,
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl BrowserConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder.add_source(config::File::from(Path::new("config/default.toml")));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("DOCLIB")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| LibraryError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| LibraryError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            api: ApiConfig {
                base_url: "http://localhost:8000".to_string(),
                list_limit: 1000,
                timeout_secs: 30,
            },
            browser: BrowserConfig {
                debounce_ms: 300,
                default_sort: SortMode::Relevance,
                suggest_count: 5,
            },
        }
    }

    fn validate(&self) -> Result<()> {
        Validator::validate_url(&self.api.base_url)
            .map_err(|e| LibraryError::Config(e.to_string()))?;

        if self.api.list_limit == 0 {
            return Err(LibraryError::Config(
                "list_limit must be greater than 0".to_string(),
            ));
        }

        if self.api.timeout_secs == 0 {
            return Err(LibraryError::Config(
                "timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.browser.suggest_count == 0 {
            return Err(LibraryError::Config(
                "suggest_count must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
