//! Immutable table of ability definitions keyed by [`AbilityId`].

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

use crate::ability::AbilityDefinition;
use crate::error::{CombatError, ErrorSeverity};
use crate::state::AbilityId;

/// Rejected content while building a catalog.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum CatalogError {
    #[error("ability name '{0}' is defined more than once")]
    DuplicateName(String),

    #[error("{0} is assigned to more than one definition")]
    DuplicateId(AbilityId),

    #[error("ability '{name}' is invalid: {reason}")]
    InvalidDefinition { name: String, reason: &'static str },

    #[error("catalog cannot hold more than {0} definitions")]
    TooManyDefinitions(usize),
}

impl CombatError for CatalogError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateName(_) => "CATALOG_DUPLICATE_NAME",
            Self::DuplicateId(_) => "CATALOG_DUPLICATE_ID",
            Self::InvalidDefinition { .. } => "CATALOG_INVALID_DEFINITION",
            Self::TooManyDefinitions(_) => "CATALOG_TOO_MANY_DEFINITIONS",
        }
    }
}

/// All ability definitions known to a session.
///
/// Names are resolved to ids here, once; runtime code only ever handles ids.
#[derive(Clone, Debug, Default)]
pub struct AbilityCatalog {
    definitions: BTreeMap<AbilityId, Arc<AbilityDefinition>>,
    names: HashMap<String, AbilityId>,
}

impl AbilityCatalog {
    /// Builds a catalog, assigning ids to definitions authored without one.
    ///
    /// Explicit ids are kept; the rest receive the lowest free ids in
    /// declaration order.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] on duplicate names or ids, or on a definition
    /// whose numbers cannot produce a valid cast.
    pub fn new(definitions: impl IntoIterator<Item = AbilityDefinition>) -> Result<Self, CatalogError> {
        let definitions: Vec<AbilityDefinition> = definitions.into_iter().collect();
        if definitions.len() >= u16::MAX as usize {
            return Err(CatalogError::TooManyDefinitions(u16::MAX as usize - 1));
        }

        let mut taken = BTreeSet::new();
        for def in &definitions {
            if def.id != AbilityId::UNASSIGNED && !taken.insert(def.id) {
                return Err(CatalogError::DuplicateId(def.id));
            }
        }

        let mut catalog = Self::default();
        let mut next = 1u16;
        for mut def in definitions {
            validate(&def)?;
            if def.id == AbilityId::UNASSIGNED {
                while taken.contains(&AbilityId(next)) {
                    next += 1;
                }
                def.id = AbilityId(next);
                taken.insert(def.id);
            }
            if catalog.names.insert(def.name.clone(), def.id).is_some() {
                return Err(CatalogError::DuplicateName(def.name));
            }
            catalog.definitions.insert(def.id, Arc::new(def));
        }

        Ok(catalog)
    }

    /// Definition for `id`, if registered.
    pub fn get(&self, id: AbilityId) -> Option<&Arc<AbilityDefinition>> {
        self.definitions.get(&id)
    }

    /// Resolves an authored name to its id.
    pub fn resolve(&self, name: &str) -> Option<AbilityId> {
        self.names.get(name).copied()
    }

    /// Looks up a definition by its authored name.
    pub fn by_name(&self, name: &str) -> Option<&Arc<AbilityDefinition>> {
        self.resolve(name).and_then(|id| self.get(id))
    }

    /// Definitions in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<AbilityDefinition>> {
        self.definitions.values()
    }

    /// Registered ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = AbilityId> + '_ {
        self.definitions.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

fn validate(def: &AbilityDefinition) -> Result<(), CatalogError> {
    let invalid = |reason| CatalogError::InvalidDefinition {
        name: def.name.clone(),
        reason,
    };

    if def.name.trim().is_empty() {
        return Err(invalid("name must not be empty"));
    }
    if def.max_level == 0 {
        return Err(invalid("max_level must be at least 1"));
    }
    if def.base_count == 0 {
        return Err(invalid("base_count must be at least 1"));
    }
    if def.base_cooldown < 0.0 {
        return Err(invalid("base_cooldown must not be negative"));
    }
    if def.base_range < 0.0 {
        return Err(invalid("base_range must not be negative"));
    }
    if def.multicast_delay.is_some_and(|delay| delay < 0.0) {
        return Err(invalid("multicast_delay must not be negative"));
    }
    def.behavior.validate().map_err(invalid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ability::definition::fixtures;

    fn unassigned(mut def: AbilityDefinition) -> AbilityDefinition {
        def.id = AbilityId::UNASSIGNED;
        def
    }

    #[test]
    fn assigns_ids_in_declaration_order() {
        let catalog = AbilityCatalog::new([
            unassigned(fixtures::arrow()),
            unassigned(fixtures::explosion()),
        ])
        .unwrap();

        assert_eq!(catalog.resolve("Arrow"), Some(AbilityId(1)));
        assert_eq!(catalog.resolve("Explosion"), Some(AbilityId(2)));
        assert_eq!(catalog.get(AbilityId(2)).unwrap().name, "Explosion");
    }

    #[test]
    fn explicit_ids_are_kept_and_skipped() {
        let mut explosion = fixtures::explosion();
        explosion.id = AbilityId(1);
        let catalog = AbilityCatalog::new([unassigned(fixtures::arrow()), explosion]).unwrap();

        assert_eq!(catalog.resolve("Explosion"), Some(AbilityId(1)));
        assert_eq!(catalog.resolve("Arrow"), Some(AbilityId(2)));
    }

    #[test]
    fn rejects_duplicate_names() {
        let result = AbilityCatalog::new([
            unassigned(fixtures::arrow()),
            unassigned(fixtures::arrow()),
        ]);
        assert_eq!(result.unwrap_err(), CatalogError::DuplicateName("Arrow".into()));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let mut other = fixtures::explosion();
        other.id = fixtures::arrow().id;
        let result = AbilityCatalog::new([fixtures::arrow(), other]);
        assert!(matches!(result, Err(CatalogError::DuplicateId(_))));
    }

    #[test]
    fn rejects_zero_base_count() {
        let mut arrow = fixtures::arrow();
        arrow.base_count = 0;
        let err = AbilityCatalog::new([arrow]).unwrap_err();
        assert_eq!(err.error_code(), "CATALOG_INVALID_DEFINITION");
    }

    #[test]
    fn unknown_name_resolves_to_none() {
        let catalog = AbilityCatalog::new([fixtures::arrow()]).unwrap();
        assert!(catalog.resolve("Meteor").is_none());
    }
}
