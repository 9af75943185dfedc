//! Application configuration module.
//!
//! Manages the TOML config file (TMDB key, base URL, language) and the
//! pagination state saved between runs.

#[allow(clippy::module_inception)]
mod config;
mod paths;
mod session;
mod store;

#[allow(clippy::module_name_repetitions)]
pub use config::{API_KEY_ENV, AppConfig};
pub use paths::{config_file, resolve_config_dir, state_file};
pub use session::{load_state, save_state};
