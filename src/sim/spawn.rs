//! Time- and chance-driven entity creation
//!
//! Row spawning is the escalation mechanic: every new row pushes the
//! existing swarm one notch closer to the loss line. Pickups appear with
//! small independent per-step probabilities. All randomness comes from
//! the world-owned RNG so runs replay from a seed.

use glam::Vec2;
use rand::Rng;

use super::state::{Enemy, Pickup, PickupKind, Projectile, ProjectileOwner, World};
use crate::consts;
use crate::events::{EntityKind, GameEvent, SoundId};

/// Create one full row of enemies at the top rank, evenly spaced across
/// the playfield, each with an independent random fire cooldown.
pub fn spawn_enemy_row(world: &mut World) {
    let per_row = world.config.enemies_per_row;
    let spacing = world.config.playfield_width / per_row as f32;
    for i in 0..per_row {
        let base = Vec2::new(i as f32 * spacing, consts::ROW_SPAWN_Y);
        let cooldown = world
            .rng
            .random_range(0.0..world.config.enemy_cooldown_base)
            .floor();
        let id = world.next_entity_id();
        let size = world.config.enemy_size;
        world.enemies.push(Enemy {
            id,
            base,
            size,
            cooldown,
            doomed: false,
        });
        world.emit(GameEvent::EntityCreated {
            kind: EntityKind::Enemy,
            id,
            pos: base,
            size,
        });
    }
    log::debug!("enemy row spawned ({} alive)", world.enemies.len());
}

/// Row timer fired: if a full row still fits under the cap, spawn it and
/// shift every pre-existing enemy one rank down.
pub fn spawn_row_and_advance(world: &mut World) {
    let per_row = world.config.enemies_per_row;
    let cap = world.config.max_enemy_rows * per_row;
    if world.enemies.len() + per_row > cap {
        return;
    }
    let pre_existing = world.enemies.len();
    spawn_enemy_row(world);
    let shift = world.config.enemy_size.y * consts::ROW_SHIFT_FACTOR;
    for enemy in &mut world.enemies[..pre_existing] {
        enemy.base.y += shift;
    }
}

/// Fire a player projectile from the ship's horizontal center.
pub fn spawn_player_shot(world: &mut World) {
    let size = world.config.projectile_size;
    let pos = Vec2::new(
        world.player.pos.x + world.player.size.x / 2.0 - size.x / 2.0,
        world.player.pos.y,
    );
    let id = world.next_entity_id();
    world.player_shots.push(Projectile {
        id,
        pos,
        size,
        owner: ProjectileOwner::Player,
    });
    world.emit(GameEvent::EntityCreated {
        kind: EntityKind::PlayerProjectile,
        id,
        pos,
        size,
    });
    world.emit(GameEvent::Sound(SoundId::PlayerFired));
}

/// Drop an enemy projectile from just below an enemy's drifted position.
pub fn spawn_enemy_shot(world: &mut World, pos: Vec2) {
    let size = world.config.projectile_size;
    let id = world.next_entity_id();
    world.enemy_shots.push(Projectile {
        id,
        pos,
        size,
        owner: ProjectileOwner::Enemy,
    });
    world.emit(GameEvent::EntityCreated {
        kind: EntityKind::EnemyProjectile,
        id,
        pos,
        size,
    });
}

/// Roll the independent per-step pickup chances.
pub fn maybe_spawn_pickups(world: &mut World) {
    if world.rng.random_bool(world.config.pickup_chance_regular) {
        spawn_pickup(world, PickupKind::Regular);
    }
    if world.rng.random_bool(world.config.pickup_chance_rare) {
        spawn_pickup(world, PickupKind::Rare);
    }
}

fn spawn_pickup(world: &mut World, kind: PickupKind) {
    let x = world.rng.random_range(0.0..world.config.playfield_width);
    let pos = Vec2::new(x, 0.0);
    let size = world.config.pickup_size;
    let id = world.next_entity_id();
    world.pickups.push(Pickup {
        id,
        pos,
        size,
        kind,
    });
    world.emit(GameEvent::EntityCreated {
        kind: EntityKind::Pickup(kind),
        id,
        pos,
        size,
    });
    log::debug!("{kind:?} pickup dropped at x={x:.1}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn quiet_config() -> Config {
        let mut config = Config::for_playfield(1000.0, 800.0);
        config.pickup_chance_regular = 0.0;
        config.pickup_chance_rare = 0.0;
        config
    }

    #[test]
    fn row_members_are_evenly_spaced_at_the_top_rank() {
        let world = World::new(quiet_config(), 1).unwrap();
        for (i, enemy) in world.enemies.iter().enumerate() {
            assert_eq!(enemy.base.x, i as f32 * 125.0);
            assert_eq!(enemy.base.y, consts::ROW_SPAWN_Y);
            assert!(enemy.cooldown >= 0.0 && enemy.cooldown < 300.0);
        }
    }

    #[test]
    fn new_row_shifts_existing_enemies_down() {
        let mut world = World::new(quiet_config(), 1).unwrap();
        spawn_row_and_advance(&mut world);
        assert_eq!(world.enemies.len(), 16);
        let shift = world.config.enemy_size.y * consts::ROW_SHIFT_FACTOR;
        for enemy in &world.enemies[..8] {
            assert_eq!(enemy.base.y, consts::ROW_SPAWN_Y + shift);
        }
        for enemy in &world.enemies[8..] {
            assert_eq!(enemy.base.y, consts::ROW_SPAWN_Y);
        }
    }

    #[test]
    fn row_spawn_respects_the_cap() {
        let mut config = quiet_config();
        config.max_enemy_rows = 2;
        let mut world = World::new(config, 1).unwrap();
        for _ in 0..5 {
            spawn_row_and_advance(&mut world);
        }
        assert_eq!(world.enemies.len(), 16);

        // A partially destroyed top row does not open room for a full one.
        let id = world.enemies[0].id;
        world.destroy_enemy(id);
        spawn_row_and_advance(&mut world);
        assert_eq!(world.enemies.len(), 15);
    }

    #[test]
    fn certain_pickup_chances_spawn_both_kinds() {
        let mut config = quiet_config();
        config.pickup_chance_regular = 1.0;
        config.pickup_chance_rare = 1.0;
        let mut world = World::new(config, 1).unwrap();
        maybe_spawn_pickups(&mut world);
        assert_eq!(world.pickups.len(), 2);
        assert_eq!(world.pickups[0].kind, PickupKind::Regular);
        assert_eq!(world.pickups[1].kind, PickupKind::Rare);
        for pickup in &world.pickups {
            assert_eq!(pickup.pos.y, 0.0);
            assert!(pickup.pos.x >= 0.0 && pickup.pos.x < 1000.0);
        }
    }

    #[test]
    fn player_shot_spawns_at_ship_center() {
        let mut world = World::new(quiet_config(), 1).unwrap();
        spawn_player_shot(&mut world);
        let shot = &world.player_shots[0];
        let expected_x =
            world.player.pos.x + world.player.size.x / 2.0 - world.config.projectile_size.x / 2.0;
        assert_eq!(shot.pos.x, expected_x);
        assert_eq!(shot.pos.y, world.player.pos.y);
        assert_eq!(shot.owner, ProjectileOwner::Player);
    }
}
