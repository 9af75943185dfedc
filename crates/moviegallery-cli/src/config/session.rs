//! Saved pagination state between invocations.

use std::path::Path;

use anyhow::Result;
use moviegallery_api::gallery::PaginationState;

use super::store::{read_toml_or_default, write_toml};

/// Loads the last pagination state. Returns default if the file does not exist.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed, or
/// holds a page outside `1..=total_pages`.
pub fn load_state(path: &Path) -> Result<PaginationState> {
    read_toml_or_default(path)
}

/// Saves pagination state, creating parent directories if needed.
///
/// # Errors
///
/// Returns an error if directory creation, serialization or the write fails.
pub fn save_state(path: &Path, state: &PaginationState) -> Result<()> {
    write_toml(path, state)
}
