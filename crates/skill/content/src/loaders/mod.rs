//! Content loaders for reading combat data from files.
//!
//! Every loader turns one RON/TOML file into the corresponding `skill-core`
//! type (or a [`crate::scenario`] format type) and attaches the file path to
//! any error.

pub mod abilities;
pub mod config;
pub mod factory;
pub mod scenario;

pub use abilities::AbilityLoader;
pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use scenario::ScenarioLoader;

use std::path::Path;

use anyhow::Context;

pub type LoadResult<T> = anyhow::Result<T>;

pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}
