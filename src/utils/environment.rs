use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

const APP_DIR: &str = "travel-mate";

/// Per-user configuration directory (`~/.config/travel-mate` on Linux)
pub fn get_config_dir() -> Result<PathBuf> {
    let base = match dirs::config_dir() {
        Some(dir) => dir,
        None => home_dir()?.join(".config"),
    };
    Ok(base.join(APP_DIR))
}

/// Per-user cache directory, used for the TUI log file
pub fn get_cache_dir() -> Result<PathBuf> {
    let base = match dirs::cache_dir() {
        Some(dir) => dir,
        None => home_dir()?.join(".cache"),
    };
    Ok(base.join(APP_DIR))
}

/// Where the login flow stores the session token
pub fn default_token_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("token"))
}

fn home_dir() -> Result<PathBuf> {
    let home = env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home))
}
