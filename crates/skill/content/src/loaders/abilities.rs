//! Ability catalog loader.

use std::path::Path;

use serde::{Deserialize, Serialize};
use skill_core::{AbilityCatalog, AbilityDefinition};

use crate::loaders::{LoadResult, read_file};

/// Ability list structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbilityFile {
    pub abilities: Vec<AbilityDefinition>,
}

/// Loader for ability definitions from RON files.
pub struct AbilityLoader;

impl AbilityLoader {
    /// Load and validate an ability catalog from a RON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file containing an [`AbilityFile`]
    pub fn load(path: &Path) -> LoadResult<AbilityCatalog> {
        let content = read_file(path)?;
        Self::from_str(&content)
            .map_err(|e| anyhow::anyhow!("{}: {}", path.display(), e))
    }

    /// Parse and validate an ability catalog from RON text.
    ///
    /// Definitions without an explicit id receive one here, in declaration
    /// order.
    pub fn from_str(content: &str) -> LoadResult<AbilityCatalog> {
        let file: AbilityFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse ability RON: {}", e))?;
        let catalog = AbilityCatalog::new(file.abilities)
            .map_err(|e| anyhow::anyhow!("Invalid ability catalog: {}", e))?;
        tracing::debug!(abilities = catalog.len(), "ability catalog loaded");
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skill_core::{Behavior, DeliveryTags, SpreadPattern, TraitTags};

    const TWO_ABILITIES: &str = r#"(
        abilities: [
            (
                name: "Arrow",
                delivery: "PROJECTILE",
                traits: "SINGLE_TARGET | PIERCE",
                base_damage: 10.0,
                base_cooldown: 1.0,
                base_range: 8.0,
                pattern: Fan(spread_degrees: 10.0),
                behavior: Projectile((speed: 14.0, pierce_depth: 2)),
            ),
            (
                name: "Frost Nova",
                delivery: "AREA",
                base_damage: 15.0,
                base_cooldown: 4.0,
                base_range: 3.0,
                behavior: AreaInstant((anchor: Caster)),
            ),
        ],
    )"#;

    #[test]
    fn parses_definitions_and_assigns_ids() {
        let catalog = AbilityLoader::from_str(TWO_ABILITIES).unwrap();
        assert_eq!(catalog.len(), 2);

        let arrow = catalog.by_name("Arrow").unwrap();
        assert_eq!(arrow.delivery, DeliveryTags::PROJECTILE);
        assert!(arrow.traits.contains(TraitTags::PIERCE));
        assert_eq!(arrow.max_level, 5);
        assert_eq!(arrow.base_count, 1);
        assert_eq!(arrow.pattern, SpreadPattern::Fan { spread_degrees: 10.0 });
        match arrow.behavior {
            Behavior::Projectile(params) => {
                assert_eq!(params.speed, 14.0);
                assert_eq!(params.pierce_depth, 2);
                assert_eq!(params.lifetime, 2.0);
            }
            other => panic!("unexpected behavior {other:?}"),
        }

        let nova = catalog.resolve("Frost Nova").unwrap();
        assert_ne!(nova, catalog.resolve("Arrow").unwrap());
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let content = r#"(
            abilities: [
                (name: "Arrow", base_damage: 1.0, base_cooldown: 1.0, base_range: 1.0,
                 behavior: Projectile((speed: 12.0))),
                (name: "Arrow", base_damage: 1.0, base_cooldown: 1.0, base_range: 1.0,
                 behavior: Projectile((speed: 12.0))),
            ],
        )"#;
        let err = AbilityLoader::from_str(content).unwrap_err();
        assert!(err.to_string().contains("Arrow"));
    }

    #[test]
    fn malformed_ron_reports_a_parse_error() {
        let err = AbilityLoader::from_str("(abilities: [ (name: ").unwrap_err();
        assert!(err.to_string().contains("Failed to parse ability RON"));
    }
}
