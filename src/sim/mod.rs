//! Deterministic arcade simulation
//!
//! The whole game lives in the [`World`] and the pure-ish [`step`]
//! function. Given the same config, seed and sequence of `(input, time)`
//! pairs, two runs produce identical worlds and identical event streams.
//! The host owns the clock and the input devices; the engine owns
//! everything else.

pub mod collision;
pub mod schedule;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Rect, overlaps};
pub use schedule::{Effect, Schedule};
pub use state::{
    Enemy, EntityId, Outcome, Pickup, PickupKind, Player, Projectile, ProjectileOwner, World,
};
pub use tick::{StepInput, step, swarm_drift};
