//! Per-frame simulation step
//!
//! The frame driver calls [`step`] once per frame with the current
//! absolute time in milliseconds and a snapshot of the held inputs. All
//! timing (swarm drift, row spawns, deferred effects) derives from that
//! absolute time rather than a frame count, so the engine is correct at
//! any cadence. Once the outcome leaves `Running`, `step` is a no-op.

use glam::Vec2;
use rand::Rng;

use super::collision::overlaps;
use super::schedule::Effect;
use super::spawn;
use super::state::{EntityId, Outcome, PickupKind, World};
use crate::consts;
use crate::events::{GameEvent, SoundId, Theme};

/// Snapshot of held inputs for one step. The flags are independent:
/// left and right held together cancel out.
#[derive(Debug, Clone, Copy, Default)]
pub struct StepInput {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}

/// The shared oscillatory drift added to every enemy's base position.
/// Re-derived from absolute time each step; never accumulated.
///
/// The phase stays in f64 until after the trig: hosts pass arbitrary
/// absolute clocks (often epoch milliseconds), and an f32 phase at that
/// magnitude has whole-minute granularity, which would freeze the weave.
pub fn swarm_drift(now_ms: f64) -> Vec2 {
    let t = now_ms / 1000.0;
    Vec2::new(
        t.sin() as f32 * consts::DRIFT_AMPLITUDE_X + consts::DRIFT_BIAS_X,
        t.cos() as f32 * consts::DRIFT_AMPLITUDE_Y,
    )
}

/// Advance the world by one frame.
pub fn step(world: &mut World, input: &StepInput, now_ms: f64) {
    if world.outcome != Outcome::Running {
        return;
    }

    if world.next_row_spawn_at_ms.is_none() {
        world.next_row_spawn_at_ms = Some(now_ms + world.row_spawn_interval_ms);
    }

    apply_deferred_effects(world, now_ms);
    spawn::maybe_spawn_pickups(world);
    update_row_spawn(world, now_ms);
    update_player(world, input);
    update_player_shots(world, now_ms);
    update_enemies(world, now_ms);
    if world.outcome != Outcome::Running {
        // Loss line crossed: the rest of the step is frozen.
        return;
    }
    update_enemy_shots(world);
    if world.outcome != Outcome::Running {
        return;
    }
    update_pickups(world, now_ms);
    if world.config.victory_on_clear && world.enemies.is_empty() {
        world.set_won();
    }
}

/// Drain the deferred-effect queue for everything due this step.
fn apply_deferred_effects(world: &mut World, now_ms: f64) {
    for effect in world.schedule.drain_due(now_ms, world.generation) {
        match effect {
            Effect::RestoreSpawnInterval => world.end_pickup_effect(now_ms),
            Effect::RemoveOneSwarmEnemy { remaining } => {
                if let Some(id) = world.enemies.iter().find(|e| e.doomed).map(|e| e.id) {
                    world.destroy_enemy(id);
                }
                if remaining > 1 && world.enemies.iter().any(|e| e.doomed) {
                    world.schedule.push(
                        now_ms + consts::CASCADE_STEP_MS,
                        world.generation,
                        Effect::RemoveOneSwarmEnemy {
                            remaining: remaining - 1,
                        },
                    );
                }
            }
        }
    }
}

fn update_row_spawn(world: &mut World, now_ms: f64) {
    if let Some(due) = world.next_row_spawn_at_ms
        && now_ms >= due
    {
        spawn::spawn_row_and_advance(world);
        world.next_row_spawn_at_ms = Some(now_ms + world.row_spawn_interval_ms);
    }
}

fn update_player(world: &mut World, input: &StepInput) {
    let player = &mut world.player;
    if input.left {
        player.pos.x -= player.speed;
    }
    if input.right {
        player.pos.x += player.speed;
    }
    // Hard clamp, not a bounce.
    player.pos.x = player
        .pos
        .x
        .clamp(0.0, world.config.playfield_width - player.size.x);

    if player.cooldown > 0.0 {
        player.cooldown = (player.cooldown - world.config.cooldown_step).max(0.0);
    }
    let fires = input.fire && player.cooldown == 0.0;
    if fires {
        player.cooldown = world.config.player_fire_cooldown;
    }
    let moved = GameEvent::EntityMoved {
        id: player.id,
        pos: player.pos,
    };
    if fires {
        spawn::spawn_player_shot(world);
    }
    world.emit(moved);
}

fn update_player_shots(world: &mut World, now_ms: f64) {
    let climb = world.config.playfield_height / consts::PLAYER_SHOT_SPEED_DIVISOR;
    for shot in &mut world.player_shots {
        shot.pos.y -= climb;
    }
    let gone: Vec<EntityId> = world
        .player_shots
        .iter()
        .filter(|s| s.pos.y < 0.0)
        .map(|s| s.id)
        .collect();
    for id in gone {
        world.destroy_player_shot(id);
    }
    for i in 0..world.player_shots.len() {
        let (id, pos) = (world.player_shots[i].id, world.player_shots[i].pos);
        world.emit(GameEvent::EntityMoved { id, pos });
    }

    // Each projectile destroys at most one enemy per step: first live
    // match in insertion order wins, and an enemy claimed by an earlier
    // projectile is invisible to later ones.
    let drift = swarm_drift(now_ms);
    let mut hits: Vec<(EntityId, EntityId)> = Vec::new();
    let mut claimed: Vec<EntityId> = Vec::new();
    for shot in &world.player_shots {
        let shot_rect = shot.rect();
        for enemy in &world.enemies {
            if enemy.doomed || claimed.contains(&enemy.id) {
                continue;
            }
            if overlaps(enemy.rect(drift), shot_rect) {
                claimed.push(enemy.id);
                hits.push((shot.id, enemy.id));
                break;
            }
        }
    }
    for (shot_id, enemy_id) in hits {
        world.destroy_player_shot(shot_id);
        world.destroy_enemy(enemy_id);
        world.player.kills += 1;
        let score = world.score();
        world.emit(GameEvent::ScoreChanged(score));
        log::debug!("enemy {enemy_id} destroyed, score {score}");
    }
}

fn update_enemies(world: &mut World, now_ms: f64) {
    let drift = swarm_drift(now_ms);
    let loss_line = world.config.playfield_height - 2.0 * world.config.enemy_size.y;
    let muzzle = Vec2::new(
        world.config.enemy_size.x / 2.0,
        world.config.enemy_size.y,
    );
    let mut volleys: Vec<Vec2> = Vec::new();

    for i in 0..world.enemies.len() {
        let id = world.enemies[i].id;
        let pos = world.enemies[i].base + drift;
        world.emit(GameEvent::EntityMoved { id, pos });

        if world.enemies[i].base.y > loss_line {
            world.set_lost();
        }

        if world.enemies[i].cooldown <= 0.0 {
            if world.enemy_fire_enabled && !world.enemies[i].doomed && world.outcome == Outcome::Running
            {
                volleys.push(pos + muzzle);
            }
            let base = world.config.enemy_cooldown_base;
            world.enemies[i].cooldown = world.rng.random_range(0.0..base).floor();
        }
        // May dip below zero before the next trigger; "<= 0 fires" is
        // robust against that drift.
        world.enemies[i].cooldown -= world.config.cooldown_step;
    }

    if world.outcome == Outcome::Running {
        for pos in volleys {
            spawn::spawn_enemy_shot(world, pos);
        }
    }
}

fn update_enemy_shots(world: &mut World) {
    let fall = world.config.playfield_height / consts::ENEMY_SHOT_SPEED_DIVISOR;
    let floor = world.config.playfield_height - consts::ENEMY_SHOT_FLOOR_MARGIN;
    for shot in &mut world.enemy_shots {
        shot.pos.y += fall;
    }
    let gone: Vec<EntityId> = world
        .enemy_shots
        .iter()
        .filter(|s| s.pos.y > floor)
        .map(|s| s.id)
        .collect();
    for id in gone {
        world.destroy_enemy_shot(id);
    }
    for i in 0..world.enemy_shots.len() {
        let (id, pos) = (world.enemy_shots[i].id, world.enemy_shots[i].pos);
        world.emit(GameEvent::EntityMoved { id, pos });
    }

    let player_rect = world.player.rect();
    let hits: Vec<EntityId> = world
        .enemy_shots
        .iter()
        .filter(|s| overlaps(player_rect, s.rect()))
        .map(|s| s.id)
        .collect();
    for id in hits {
        // Destroy before decrementing: the projectile can never be
        // counted against the player twice.
        world.destroy_enemy_shot(id);
        world.player.lives = world.player.lives.saturating_sub(1);
        let lives = world.player.lives;
        world.emit(GameEvent::LifeChanged(lives));
        world.emit(GameEvent::Sound(SoundId::PlayerHit));
        log::debug!("player hit, {lives} lives left");
        if lives == 0 {
            world.set_lost();
            return;
        }
    }
}

fn update_pickups(world: &mut World, now_ms: f64) {
    for pickup in &mut world.pickups {
        pickup.pos.y += consts::PICKUP_FALL_SPEED;
    }
    let floor = world.config.playfield_height - world.config.pickup_size.y;
    let gone: Vec<EntityId> = world
        .pickups
        .iter()
        .filter(|p| p.pos.y > floor)
        .map(|p| p.id)
        .collect();
    for id in gone {
        world.destroy_pickup(id);
    }
    for i in 0..world.pickups.len() {
        let (id, pos) = (world.pickups[i].id, world.pickups[i].pos);
        world.emit(GameEvent::EntityMoved { id, pos });
    }

    let player_rect = world.player.rect();
    let collected: Vec<(EntityId, PickupKind)> = world
        .pickups
        .iter()
        .filter(|p| overlaps(player_rect, p.rect()))
        .map(|p| (p.id, p.kind))
        .collect();
    for (id, kind) in collected {
        collect_pickup(world, id, kind, now_ms);
    }
}

/// Apply a collected pickup: both kinds clear the enemy barrage and close
/// the fire gate, then override the row-spawn cadence for a while.
fn collect_pickup(world: &mut World, id: EntityId, kind: PickupKind, now_ms: f64) {
    world.clear_enemy_shots();
    world.enemy_fire_enabled = false;
    world.destroy_pickup(id);

    match kind {
        PickupKind::Regular => {
            world.emit(GameEvent::Sound(SoundId::PickupRegular));
            world.emit(GameEvent::BackgroundChanged(Theme::RegularPickup));
            world.set_spawn_interval(now_ms, world.config.row_spawn_slow_ms);
            world.schedule.push(
                now_ms + world.config.pickup_duration_regular_ms,
                world.generation,
                Effect::RestoreSpawnInterval,
            );
            log::debug!("regular pickup collected, rows slowed");
        }
        PickupKind::Rare => {
            world.emit(GameEvent::Sound(SoundId::PickupRare));
            world.emit(GameEvent::BackgroundChanged(Theme::RarePickup));
            world.set_spawn_interval(now_ms, world.config.row_spawn_fast_ms);
            world.schedule.push(
                now_ms + world.config.pickup_duration_rare_ms,
                world.generation,
                Effect::RestoreSpawnInterval,
            );
            // Bounty for every enemy alive right now, then remove them
            // one by one so the clear reads as a cascade. Marking them
            // doomed keeps a paid-out enemy from scoring twice and keeps
            // the cascade off any row that spawns in the meantime.
            let bounty = world.enemies.len() as u32;
            if bounty > 0 {
                for enemy in &mut world.enemies {
                    enemy.doomed = true;
                }
                world.player.kills += bounty;
                let score = world.score();
                world.emit(GameEvent::ScoreChanged(score));
                world.schedule.push(
                    now_ms + consts::CASCADE_STEP_MS,
                    world.generation,
                    Effect::RemoveOneSwarmEnemy { remaining: bounty },
                );
            }
            log::debug!("rare pickup collected, +{bounty} score");
        }
    }
}
