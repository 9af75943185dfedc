//! Config directory resolution.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Resolves the directory holding `config.toml` and `state.toml`.
///
/// - If `dir` is `Some`, returns it unchanged.
/// - Otherwise returns `~/.config/moviegallery`.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined (when `dir` is `None`).
pub fn resolve_config_dir(dir: Option<&Path>) -> Result<PathBuf> {
    if let Some(d) = dir {
        return Ok(d.to_path_buf());
    }

    let home = std::env::var("HOME").context("HOME environment variable is not set")?;
    Ok(PathBuf::from(home).join(".config").join("moviegallery"))
}

/// Path of the TOML config file inside `config_dir`.
#[must_use]
pub fn config_file(config_dir: &Path) -> PathBuf {
    config_dir.join("config.toml")
}

/// Path of the saved pagination state inside `config_dir`.
#[must_use]
pub fn state_file(config_dir: &Path) -> PathBuf {
    config_dir.join("state.toml")
}
