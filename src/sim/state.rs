//! World state and entity types
//!
//! The `World` owns every live entity plus the RNG, the deferred-effect
//! queue and the per-step event buffer. Nothing outside a simulation step
//! mutates it. Entity collections keep insertion order so side effects
//! emit deterministically; removal is by id and idempotent.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::schedule::Schedule;
use super::spawn;
use crate::config::{Config, ConfigError};
use crate::events::{EntityKind, GameEvent, SoundId, Theme};

/// Monotonically allocated entity identity; ids are never reused.
pub type EntityId = u32;

/// Terminal state of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Running,
    Won,
    Lost,
}

/// Pickup variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickupKind {
    Regular,
    Rare,
}

/// The player ship. Created once, never destroyed; running out of lives
/// ends the game instead.
#[derive(Debug, Clone)]
pub struct Player {
    pub id: EntityId,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    /// Firing is permitted only when this is exactly zero
    pub cooldown: f32,
    pub lives: u32,
    /// Kill counter, doubling as the score
    pub kills: u32,
}

impl Player {
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }
}

/// One swarm member. `base` is the stored position; the shared drift is
/// added on top each step and never written back.
#[derive(Debug, Clone)]
pub struct Enemy {
    pub id: EntityId,
    pub base: Vec2,
    pub size: Vec2,
    /// Fires when this reaches zero or below, then re-randomizes
    pub cooldown: f32,
    /// Paid out by a rare-pickup bounty and awaiting its staggered
    /// removal; inert to projectiles from that moment on
    pub doomed: bool,
}

impl Enemy {
    pub fn rect(&self, drift: Vec2) -> Rect {
        Rect::from_pos_size(self.base + drift, self.size)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectileOwner {
    Player,
    Enemy,
}

#[derive(Debug, Clone)]
pub struct Projectile {
    pub id: EntityId,
    pub pos: Vec2,
    pub size: Vec2,
    pub owner: ProjectileOwner,
}

impl Projectile {
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }
}

#[derive(Debug, Clone)]
pub struct Pickup {
    pub id: EntityId,
    pub pos: Vec2,
    pub size: Vec2,
    pub kind: PickupKind,
}

impl Pickup {
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }
}

/// Complete simulation state
#[derive(Debug)]
pub struct World {
    pub config: Config,
    /// Run seed, kept for logging and reproduction
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub outcome: Outcome,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub player_shots: Vec<Projectile>,
    pub enemy_shots: Vec<Projectile>,
    pub pickups: Vec<Pickup>,
    /// Gate closed while a pickup effect is active
    pub enemy_fire_enabled: bool,
    /// Currently active row-spawn cadence (pickups override it)
    pub row_spawn_interval_ms: f64,
    /// Absolute time of the next row spawn; established on the first step
    pub(crate) next_row_spawn_at_ms: Option<f64>,
    pub(crate) schedule: Schedule,
    /// Bumped on restart so stale deferred effects become no-ops
    pub(crate) generation: u32,
    events: Vec<GameEvent>,
    next_id: EntityId,
}

impl World {
    /// Validate the config and build the starting world: the player
    /// centered at the bottom plus the initial enemy row.
    pub fn new(config: Config, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::construct(config, seed, 0))
    }

    fn construct(config: Config, seed: u64, generation: u32) -> Self {
        let player = Player {
            id: 1,
            pos: Vec2::new(
                config.playfield_width / 2.0,
                config.playfield_height - config.player_size.y,
            ),
            size: config.player_size,
            speed: config.player_speed,
            cooldown: 0.0,
            lives: config.starting_lives,
            kills: 0,
        };
        let mut world = Self {
            row_spawn_interval_ms: config.row_spawn_interval_ms,
            config,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            outcome: Outcome::Running,
            player,
            enemies: Vec::new(),
            player_shots: Vec::new(),
            enemy_shots: Vec::new(),
            pickups: Vec::new(),
            enemy_fire_enabled: true,
            next_row_spawn_at_ms: None,
            schedule: Schedule::new(),
            generation,
            events: Vec::new(),
            next_id: 2,
        };
        world.emit(GameEvent::EntityCreated {
            kind: EntityKind::Player,
            id: world.player.id,
            pos: world.player.pos,
            size: world.player.size,
        });
        world.emit(GameEvent::LifeChanged(world.player.lives));
        world.emit(GameEvent::ScoreChanged(0));
        spawn::spawn_enemy_row(&mut world);
        log::info!("world created with seed {seed}");
        world
    }

    /// Rebuild the world for a fresh run. The generation counter bumps so
    /// any deferred effect scheduled before the restart is dead on
    /// arrival.
    pub fn restart(&mut self, seed: u64) {
        let generation = self.generation + 1;
        log::info!("restarting (generation {generation})");
        *self = Self::construct(self.config.clone(), seed, generation);
    }

    pub(crate) fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Hand the accumulated events of the step(s) since the last drain to
    /// the host, in emission order.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Current score shown to the score sink
    pub fn score(&self) -> u32 {
        self.player.kills
    }

    /// Remove an enemy by id. Missing ids are a silent no-op, which makes
    /// double-destruction within a step harmless.
    pub fn destroy_enemy(&mut self, id: EntityId) {
        if let Some(index) = self.enemies.iter().position(|e| e.id == id) {
            self.enemies.remove(index);
            self.emit(GameEvent::EntityDestroyed { id });
        }
    }

    pub fn destroy_player_shot(&mut self, id: EntityId) {
        if let Some(index) = self.player_shots.iter().position(|s| s.id == id) {
            self.player_shots.remove(index);
            self.emit(GameEvent::EntityDestroyed { id });
        }
    }

    pub fn destroy_enemy_shot(&mut self, id: EntityId) {
        if let Some(index) = self.enemy_shots.iter().position(|s| s.id == id) {
            self.enemy_shots.remove(index);
            self.emit(GameEvent::EntityDestroyed { id });
        }
    }

    pub fn destroy_pickup(&mut self, id: EntityId) {
        if let Some(index) = self.pickups.iter().position(|p| p.id == id) {
            self.pickups.remove(index);
            self.emit(GameEvent::EntityDestroyed { id });
        }
    }

    /// Full reset of enemy fire: clears every live enemy projectile
    pub(crate) fn clear_enemy_shots(&mut self) {
        let ids: Vec<EntityId> = self.enemy_shots.iter().map(|s| s.id).collect();
        for id in ids {
            self.destroy_enemy_shot(id);
        }
    }

    /// Switch the active row-spawn cadence and reschedule the pending
    /// spawn immediately under the new interval.
    pub(crate) fn set_spawn_interval(&mut self, now_ms: f64, interval_ms: f64) {
        self.row_spawn_interval_ms = interval_ms;
        self.next_row_spawn_at_ms = Some(now_ms + interval_ms);
    }

    /// Transition to Lost. Only the first terminal transition in a run
    /// takes effect.
    pub(crate) fn set_lost(&mut self) {
        if self.outcome != Outcome::Running {
            return;
        }
        self.outcome = Outcome::Lost;
        let final_score = self.score();
        log::info!("game lost with score {final_score}");
        self.emit(GameEvent::Sound(SoundId::GameLost));
        self.emit(GameEvent::GameEnded {
            outcome: Outcome::Lost,
            final_score,
        });
    }

    /// Transition to Won (enemy-exhaustion rulesets only)
    pub(crate) fn set_won(&mut self) {
        if self.outcome != Outcome::Running {
            return;
        }
        self.outcome = Outcome::Won;
        let final_score = self.score();
        log::info!("game won with score {final_score}");
        self.emit(GameEvent::GameEnded {
            outcome: Outcome::Won,
            final_score,
        });
    }

    /// Restore state after a pickup effect expires
    pub(crate) fn end_pickup_effect(&mut self, now_ms: f64) {
        self.enemy_fire_enabled = true;
        self.set_spawn_interval(now_ms, self.config.row_spawn_interval_ms);
        self.emit(GameEvent::BackgroundChanged(Theme::Default));
        log::debug!("pickup effect expired, base interval restored");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet_config() -> Config {
        let mut config = Config::for_playfield(1000.0, 800.0);
        config.pickup_chance_regular = 0.0;
        config.pickup_chance_rare = 0.0;
        config
    }

    #[test]
    fn new_world_has_player_and_one_row() {
        let world = World::new(quiet_config(), 7).unwrap();
        assert_eq!(world.outcome, Outcome::Running);
        assert_eq!(world.enemies.len(), 8);
        assert_eq!(world.player.lives, 3);
        assert_eq!(world.score(), 0);
    }

    #[test]
    fn construction_emits_created_events() {
        let mut world = World::new(quiet_config(), 7).unwrap();
        let events = world.drain_events();
        let created = events
            .iter()
            .filter(|e| matches!(e, GameEvent::EntityCreated { .. }))
            .count();
        // Player + 8 enemies
        assert_eq!(created, 9);
        assert!(events.contains(&GameEvent::LifeChanged(3)));
        assert!(world.drain_events().is_empty());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut config = quiet_config();
        config.playfield_height = -1.0;
        assert!(World::new(config, 0).is_err());
    }

    #[test]
    fn destroying_a_missing_id_is_a_no_op() {
        let mut world = World::new(quiet_config(), 7).unwrap();
        world.drain_events();

        let id = world.enemies[0].id;
        world.destroy_enemy(id);
        assert_eq!(world.enemies.len(), 7);
        // Second destruction of the same id changes nothing.
        world.destroy_enemy(id);
        assert_eq!(world.enemies.len(), 7);
        let destroyed = world
            .drain_events()
            .iter()
            .filter(|e| matches!(e, GameEvent::EntityDestroyed { .. }))
            .count();
        assert_eq!(destroyed, 1);
    }

    #[test]
    fn entity_ids_are_never_reused() {
        let mut world = World::new(quiet_config(), 7).unwrap();
        let first_row: Vec<EntityId> = world.enemies.iter().map(|e| e.id).collect();
        for id in &first_row {
            world.destroy_enemy(*id);
        }
        spawn::spawn_enemy_row(&mut world);
        for enemy in &world.enemies {
            assert!(!first_row.contains(&enemy.id));
        }
    }

    #[test]
    fn restart_bumps_generation_and_resets_state() {
        let mut world = World::new(quiet_config(), 7).unwrap();
        world.player.kills = 12;
        world.enemy_fire_enabled = false;
        world
            .schedule
            .push(0.0, world.generation, super::super::schedule::Effect::RestoreSpawnInterval);

        world.restart(8);
        assert_eq!(world.generation, 1);
        assert_eq!(world.score(), 0);
        assert!(world.enemy_fire_enabled);
        assert_eq!(world.enemies.len(), 8);
        assert!(world.schedule.is_empty());
    }
}
