//! Combat tuning loader.

use std::path::Path;

use skill_core::CombatConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for combat configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys keep their [`CombatConfig::default`] values.
    pub fn load(path: &Path) -> LoadResult<CombatConfig> {
        let content = read_file(path)?;
        let config: CombatConfig = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if config.max_ability_slots > CombatConfig::MAX_ABILITY_SLOTS {
            tracing::warn!(
                requested = config.max_ability_slots,
                cap = CombatConfig::MAX_ABILITY_SLOTS,
                "max_ability_slots above compile-time cap; clamping"
            );
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "replica_damage_factor = 0.5\nrng_seed = 99").unwrap();

        let config = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(config.replica_damage_factor, 0.5);
        assert_eq!(config.rng_seed, 99);
        assert_eq!(config.max_ability_slots, CombatConfig::DEFAULT_ABILITY_SLOTS);
        assert_eq!(config.min_cooldown_multiplier, CombatConfig::DEFAULT_MIN_COOLDOWN_MULTIPLIER);
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = ConfigLoader::load(Path::new("/nonexistent/config.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/config.toml"));
    }
}
