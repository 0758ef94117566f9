//! Engine-to-host event protocol
//!
//! The simulation never draws or plays anything itself. Each step appends
//! events to the world's buffer in a deterministic order; the host drains
//! them with [`crate::sim::World::drain_events`] and translates them into
//! rendering, audio and HUD updates. The engine does not care whether any
//! of them are acted upon.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::{EntityId, Outcome, PickupKind};

/// What kind of entity an `EntityCreated` refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Enemy,
    PlayerProjectile,
    EnemyProjectile,
    Pickup(PickupKind),
}

/// Audio cues the engine requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundId {
    PlayerFired,
    PlayerHit,
    PickupRegular,
    PickupRare,
    GameLost,
}

/// Background themes, switched while a pickup effect is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Theme {
    Default,
    RegularPickup,
    RarePickup,
}

/// One effect request emitted during a simulation step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    EntityCreated {
        kind: EntityKind,
        id: EntityId,
        pos: Vec2,
        size: Vec2,
    },
    EntityMoved {
        id: EntityId,
        pos: Vec2,
    },
    EntityDestroyed {
        id: EntityId,
    },
    Sound(SoundId),
    BackgroundChanged(Theme),
    ScoreChanged(u32),
    LifeChanged(u32),
    GameEnded {
        outcome: Outcome,
        final_score: u32,
    },
}
