//! Runtime configuration
//!
//! Every tunable the engine recognizes lives here. A `Config` is validated
//! once at world construction; the engine never starts a step loop with
//! out-of-range values.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rejected configuration, with the offending field named
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be positive")]
    NonPositive(&'static str),
    #[error("{0} must be a probability in [0, 1]")]
    NotAProbability(&'static str),
    #[error("{0} must have positive width and height")]
    DegenerateSize(&'static str),
}

/// Game configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Playfield dimensions (world units)
    pub playfield_width: f32,
    pub playfield_height: f32,

    /// Player horizontal speed, world units per step
    pub player_speed: f32,
    /// Cooldown value assigned after the player fires
    pub player_fire_cooldown: f32,
    /// Amount every fire cooldown (player and enemy) decreases per step
    pub cooldown_step: f32,
    /// Enemy cooldowns are re-randomized uniformly in `[0, enemy_cooldown_base)`
    pub enemy_cooldown_base: f32,

    pub enemies_per_row: usize,
    pub max_enemy_rows: usize,

    /// Row spawn intervals: the base cadence plus the two pickup overrides
    pub row_spawn_interval_ms: f64,
    pub row_spawn_slow_ms: f64,
    pub row_spawn_fast_ms: f64,

    /// How long each pickup's interval override lasts
    pub pickup_duration_regular_ms: f64,
    pub pickup_duration_rare_ms: f64,
    /// Independent per-step spawn probabilities
    pub pickup_chance_regular: f64,
    pub pickup_chance_rare: f64,

    pub starting_lives: u32,
    /// Ruleset knob: clearing the enemy set while running wins the game
    pub victory_on_clear: bool,

    /// Entity bounding-box sizes
    pub player_size: Vec2,
    pub enemy_size: Vec2,
    pub projectile_size: Vec2,
    pub pickup_size: Vec2,
}

impl Config {
    /// Build a config with sizes and speed derived from the playfield,
    /// matching the classic proportions (player is 1/10th of a narrow
    /// field, 1/20th of a wide one; enemies are 70% of the player).
    pub fn for_playfield(width: f32, height: f32) -> Self {
        let player_w = width / if width > 1000.0 { 20.0 } else { 10.0 };
        let enemy_w = player_w * 0.7;
        Self {
            playfield_width: width,
            playfield_height: height,
            player_speed: width / 200.0,
            player_fire_cooldown: 6.0,
            cooldown_step: 0.5,
            enemy_cooldown_base: 300.0,
            enemies_per_row: 8,
            max_enemy_rows: 6,
            row_spawn_interval_ms: 3000.0,
            row_spawn_slow_ms: 7000.0,
            row_spawn_fast_ms: 1500.0,
            pickup_duration_regular_ms: 7000.0,
            pickup_duration_rare_ms: 3000.0,
            pickup_chance_regular: 0.002,
            pickup_chance_rare: 0.001,
            starting_lives: 3,
            victory_on_clear: false,
            player_size: Vec2::new(player_w, player_w * 1.185),
            enemy_size: Vec2::new(enemy_w, enemy_w),
            projectile_size: Vec2::new(9.25, 25.0),
            pickup_size: Vec2::new(40.0, 40.0),
        }
    }

    /// Parse a config from JSON, e.g. a settings file shipped by the host
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive_f32(value: f32, name: &'static str) -> Result<(), ConfigError> {
            if value > 0.0 && value.is_finite() {
                Ok(())
            } else {
                Err(ConfigError::NonPositive(name))
            }
        }
        fn positive_f64(value: f64, name: &'static str) -> Result<(), ConfigError> {
            if value > 0.0 && value.is_finite() {
                Ok(())
            } else {
                Err(ConfigError::NonPositive(name))
            }
        }
        fn chance(value: f64, name: &'static str) -> Result<(), ConfigError> {
            if (0.0..=1.0).contains(&value) {
                Ok(())
            } else {
                Err(ConfigError::NotAProbability(name))
            }
        }
        fn size(value: Vec2, name: &'static str) -> Result<(), ConfigError> {
            if value.x > 0.0 && value.y > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::DegenerateSize(name))
            }
        }

        positive_f32(self.playfield_width, "playfield_width")?;
        positive_f32(self.playfield_height, "playfield_height")?;
        positive_f32(self.player_speed, "player_speed")?;
        positive_f32(self.player_fire_cooldown, "player_fire_cooldown")?;
        positive_f32(self.cooldown_step, "cooldown_step")?;
        positive_f32(self.enemy_cooldown_base, "enemy_cooldown_base")?;
        if self.enemies_per_row == 0 {
            return Err(ConfigError::NonPositive("enemies_per_row"));
        }
        if self.max_enemy_rows == 0 {
            return Err(ConfigError::NonPositive("max_enemy_rows"));
        }
        positive_f64(self.row_spawn_interval_ms, "row_spawn_interval_ms")?;
        positive_f64(self.row_spawn_slow_ms, "row_spawn_slow_ms")?;
        positive_f64(self.row_spawn_fast_ms, "row_spawn_fast_ms")?;
        positive_f64(self.pickup_duration_regular_ms, "pickup_duration_regular_ms")?;
        positive_f64(self.pickup_duration_rare_ms, "pickup_duration_rare_ms")?;
        chance(self.pickup_chance_regular, "pickup_chance_regular")?;
        chance(self.pickup_chance_rare, "pickup_chance_rare")?;
        if self.starting_lives == 0 {
            return Err(ConfigError::NonPositive("starting_lives"));
        }
        size(self.player_size, "player_size")?;
        size(self.enemy_size, "enemy_size")?;
        size(self.projectile_size, "projectile_size")?;
        size(self.pickup_size, "pickup_size")?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::for_playfield(1000.0, 800.0)
    }
}
