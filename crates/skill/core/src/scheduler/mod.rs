//! Autonomous casting against the nearest valid target.
mod autocast;

pub use autocast::{AutoCaster, CastRequest, CastSlot};
