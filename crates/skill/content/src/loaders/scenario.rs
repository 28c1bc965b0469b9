//! Headless scenario loader.

use std::path::Path;

use crate::loaders::{LoadResult, read_file};
use crate::scenario::Scenario;

/// Loader for scenarios from TOML files.
pub struct ScenarioLoader;

impl ScenarioLoader {
    pub fn load(path: &Path) -> LoadResult<Scenario> {
        let content = read_file(path)?;
        Self::from_str(&content).map_err(|e| anyhow::anyhow!("{}: {}", path.display(), e))
    }

    /// Parse a scenario and check its timing is usable.
    pub fn from_str(content: &str) -> LoadResult<Scenario> {
        let scenario: Scenario = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse scenario TOML: {}", e))?;

        if scenario.timestep <= 0.0 {
            anyhow::bail!("scenario '{}' has a non-positive timestep", scenario.name);
        }
        if scenario.duration < 0.0 {
            anyhow::bail!("scenario '{}' has a negative duration", scenario.name);
        }
        Ok(scenario)
    }
}
