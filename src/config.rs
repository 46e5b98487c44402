//! Client configuration.
//!
//! Sources, lowest precedence first: built-in defaults, the JSON file at
//! `<config dir>/travel-mate/config.json`, `TRAVEL_MATE_*` environment variables,
//! then command-line flags (applied by the CLI).

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::history::DEFAULT_PAGE_SIZE;
use crate::utils::{default_token_path, get_config_dir};

pub const DEFAULT_ASSISTANT_URL: &str = "http://localhost:5000/api/gemini";
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

const CONFIG_FILENAME: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the chat and history endpoints
    pub assistant_url: String,
    /// Base URL of the user endpoints
    pub api_url: String,
    pub page_size: u32,
    pub token_file: Option<PathBuf>,
    pub places_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            assistant_url: DEFAULT_ASSISTANT_URL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            token_file: None,
            places_file: None,
        }
    }
}

impl Config {
    /// Defaults, overlaid with the config file and the process environment.
    pub fn load() -> Result<Self> {
        let path = get_config_dir()?.join(CONFIG_FILENAME);
        let mut config = Self::load_from(&path)?;
        config.apply_env(|key| env::var(key).ok());
        Ok(config)
    }

    /// Read a config file; a missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    /// Override fields from `TRAVEL_MATE_*` variables provided by `lookup`.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(url) = lookup("TRAVEL_MATE_ASSISTANT_URL") {
            self.assistant_url = url;
        }
        if let Some(url) = lookup("TRAVEL_MATE_API_URL") {
            self.api_url = url;
        }
        if let Some(path) = lookup("TRAVEL_MATE_TOKEN_FILE") {
            self.token_file = Some(PathBuf::from(path));
        }
        if let Some(path) = lookup("TRAVEL_MATE_PLACES_FILE") {
            self.places_file = Some(PathBuf::from(path));
        }
    }

    /// Token file to read credentials from.
    pub fn token_path(&self) -> Result<PathBuf> {
        match &self.token_file {
            Some(path) => Ok(path.clone()),
            None => default_token_path(),
        }
    }
}
