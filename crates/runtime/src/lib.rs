//! Headless host for the combat-skill core.
//!
//! This crate provides a deterministic world that implements the `skill-core`
//! oracles and a fixed-step driver around it. Consumers build a
//! [`Simulation`] from loaded content, step it, and read back a
//! [`SimulationReport`].
//!
//! Modules are organized by responsibility:
//! - [`world`] holds entities, status effects and spawned visuals
//! - [`oracle`] provides the per-owner attribute and loadout adapters
//! - [`simulation`] hosts the driver, its builder and the report
//! - [`events`] records what happened during a run
pub mod error;
pub mod events;
pub mod oracle;
pub mod simulation;
pub mod world;

pub use error::{Result, RuntimeError};
pub use events::{CombatEvent, CombatLog, DamageCause};
pub use oracle::{Attributes, Loadouts, OwnerAttributes};
pub use simulation::{Simulation, SimulationBuilder, SimulationReport, StepOutcome};
pub use world::{ActiveStatus, Body, StatusSlot, Visual, World, WorldStep};
