//! Starswarm - a fixed-shooter arcade simulation engine
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, per-frame step)
//! - `config`: Runtime configuration with construction-time validation
//! - `events`: Render/audio/score sink protocol emitted by the engine
//! - `highscores`: In-memory leaderboard fed by `GameEnded` events
//!
//! The engine owns all world state and knows nothing about drawing or
//! audio playback. A host drives it by calling [`sim::step`] once per
//! frame with the current time and a snapshot of held inputs, then drains
//! the emitted [`events::GameEvent`]s into its render/audio layer.

pub mod config;
pub mod events;
pub mod highscores;
pub mod sim;

pub use config::{Config, ConfigError};
pub use events::{EntityKind, GameEvent, SoundId, Theme};
pub use highscores::HighScores;

/// Ruleset constants that are not configuration
pub mod consts {
    /// Horizontal swarm drift amplitude (world units)
    pub const DRIFT_AMPLITUDE_X: f32 = 40.0;
    /// Constant rightward bias added to the horizontal drift
    pub const DRIFT_BIAS_X: f32 = 50.0;
    /// Vertical swarm drift amplitude (world units)
    pub const DRIFT_AMPLITUDE_Y: f32 = 30.0;

    /// Vertical position where new enemy rows appear
    pub const ROW_SPAWN_Y: f32 = 100.0;
    /// Existing enemies shift down by this fraction of their height per new row
    pub const ROW_SHIFT_FACTOR: f32 = 1.2;

    /// Player projectiles climb this fraction of playfield height per step
    pub const PLAYER_SHOT_SPEED_DIVISOR: f32 = 80.0;
    /// Enemy projectiles fall this fraction of playfield height per step
    pub const ENEMY_SHOT_SPEED_DIVISOR: f32 = 200.0;
    /// Enemy projectiles despawn this far above the bottom edge
    pub const ENEMY_SHOT_FLOOR_MARGIN: f32 = 30.0;

    /// Pickup fall speed (world units per step)
    pub const PICKUP_FALL_SPEED: f32 = 3.0;

    /// Delay between removals in the rare-pickup enemy cascade
    pub const CASCADE_STEP_MS: f64 = 50.0;
}
