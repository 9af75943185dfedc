//! `AppConfig` struct and TOML read/write.

use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::store::{read_toml_or_default, write_toml};

/// Environment variable overriding `tmdb.api_key`.
pub const API_KEY_ENV: &str = "TMDB_API_KEY";

/// Environment variable overriding `tmdb.base_url`.
pub const BASE_URL_ENV: &str = "TMDB_BASE_URL";

/// Top-level application configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// TMDB connection settings.
    #[serde(default)]
    pub tmdb: TmdbConfig,
}

/// TMDB connection configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct TmdbConfig {
    /// v3 API key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// API base URL (defaults to the public TMDB v3 endpoint).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Response language, e.g. "en-US". Empty uses the server default.
    #[serde(default)]
    pub language: String,
}

impl AppConfig {
    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        read_toml_or_default(path)
    }

    /// Saves config to a TOML file, creating parent directories if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation or file write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        write_toml(path, self)
    }

    /// Applies environment overrides through `lookup`.
    ///
    /// Blank values are ignored.
    #[must_use]
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let present = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        if let Some(key) = present(API_KEY_ENV) {
            self.tmdb.api_key = Some(key);
        }
        if let Some(url) = present(BASE_URL_ENV) {
            self.tmdb.base_url = Some(url);
        }
        self
    }
}
