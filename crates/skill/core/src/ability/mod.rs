//! Ability templates, the shared catalog and per-owner instances.
mod catalog;
pub(crate) mod definition;
mod instance;
mod tags;

pub use catalog::{AbilityCatalog, CatalogError};
pub use definition::AbilityDefinition;
pub use instance::{AbilityInstance, Multipliers, ScopedExtras};
pub use tags::{DeliveryTags, TraitTags};
