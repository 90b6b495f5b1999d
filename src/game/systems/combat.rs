//! Collision / Combat
//!
//! Two passes per tick, in this order:
//! 1. Bullets advance and resolve hits against walls, then tanks.
//! 2. Enemy AI re-rolls headings, arms its trigger and resolves ramming
//!    contact with the player.
//!
//! Running bullets first means an enemy killed by a bullet this tick is
//! already gone when contact damage is checked.
//!
//! Damage to the player follows one rule for both bullets and contact:
//! `Invincible` blocks it; a hit that would leave no lives spawns a large
//! explosion and queues the player's removal after the death delay so the
//! animation can play out.

use rand::Rng;

use crate::config::GameConfig;
use crate::game::collision::{blocking_wall, in_bounds, is_valid_position, overlaps};
use crate::game::components::*;
use crate::game::entity::Entity;
use crate::game::event::{EnemyDeathCause, EnemyDestroyedEvent, Events, PlayerHitEvent};
use crate::game::prefabs::{spawn_explosion, spawn_powerup};
use crate::game::session::Session;
use crate::game::world::World;

pub fn update(
    world: &mut World,
    session: &Session,
    config: &GameConfig,
    events: &mut Events,
    now: f64,
    frames: f32,
    rng: &mut impl Rng,
) {
    update_bullets(world, session, config, events, now, frames, rng);
    update_enemies(world, session, config, events, now, frames, rng);
}

/// Enemy tanks currently alive, in insertion order
fn enemies(world: &World, session: &Session) -> Vec<Entity> {
    world
        .entities_with::<Tank>()
        .into_iter()
        .filter(|e| !session.is_player(*e))
        .collect()
}

// =============================================================================
// Bullet pass
// =============================================================================

fn update_bullets(
    world: &mut World,
    session: &Session,
    config: &GameConfig,
    events: &mut Events,
    now: f64,
    frames: f32,
    rng: &mut impl Rng,
) {
    for bullet_id in world.entities_with::<Bullet>() {
        let (Some(bullet), Some(movement), Some(pos)) = (
            world.get::<Bullet>(bullet_id).copied(),
            world.get::<Movement>(bullet_id).copied(),
            world.get::<Position>(bullet_id).copied(),
        ) else {
            continue;
        };

        let (dx, dy) = movement.direction.delta();
        let step = movement.speed * frames;
        let next = pos.with_origin(pos.x + dx * step, pos.y + dy * step);

        if !in_bounds(world, &next) {
            world.remove_entity(bullet_id);
            continue;
        }

        if let Some(wall_id) = blocking_wall(world, &next, |wall| wall.kind.blocks_bullets()) {
            if world.get::<Wall>(wall_id).is_some_and(|w| w.kind == WallKind::Brick) {
                world.remove_entity(wall_id);
            }
            world.remove_entity(bullet_id);
            continue;
        }

        let hit = if session.is_player(bullet.owner) {
            hit_enemy(world, session, config, events, bullet_id, &next, now, rng)
        } else {
            hit_player(world, session, config, events, bullet_id, &bullet, &next, now)
        };

        if !hit {
            if let Some(pos) = world.get_mut::<Position>(bullet_id) {
                *pos = next;
            }
        }
    }
}

/// Player bullet vs. every enemy. First overlap in insertion order wins.
#[allow(clippy::too_many_arguments)]
fn hit_enemy(
    world: &mut World,
    session: &Session,
    config: &GameConfig,
    events: &mut Events,
    bullet_id: Entity,
    bullet_pos: &Position,
    now: f64,
    rng: &mut impl Rng,
) -> bool {
    let target = enemies(world, session).into_iter().find_map(|enemy| {
        world
            .get::<Position>(enemy)
            .filter(|enemy_pos| overlaps(bullet_pos, enemy_pos))
            .map(|enemy_pos| (enemy, *enemy_pos))
    });
    let Some((enemy, enemy_pos)) = target else {
        return false;
    };

    destroy_enemy(world, config, events, enemy, &enemy_pos, EnemyDeathCause::Bullet, now, rng);
    world.remove_entity(bullet_id);
    if let Some(score) = world.get_mut::<Score>(session.player) {
        score.add(config.score.enemy_kill);
    }
    true
}

/// Enemy bullet vs. the player.
#[allow(clippy::too_many_arguments)]
fn hit_player(
    world: &mut World,
    session: &Session,
    config: &GameConfig,
    events: &mut Events,
    bullet_id: Entity,
    bullet: &Bullet,
    bullet_pos: &Position,
    now: f64,
) -> bool {
    if world.has::<Invincible>(session.player) {
        return false;
    }
    let Some(player_pos) = world.get::<Position>(session.player).copied() else {
        return false;
    };
    if !overlaps(bullet_pos, &player_pos) {
        return false;
    }

    world.remove_entity(bullet_id);
    damage_player(world, session, config, events, bullet_id, bullet.damage, now);
    true
}

// =============================================================================
// Enemy pass
// =============================================================================

fn update_enemies(
    world: &mut World,
    session: &Session,
    config: &GameConfig,
    events: &mut Events,
    now: f64,
    frames: f32,
    rng: &mut impl Rng,
) {
    let enemy_cfg = &config.enemy;

    for enemy in enemies(world, session) {
        let (Some(mut turn), Some(mut movement), Some(pos)) = (
            world.get::<DirectionChange>(enemy).copied(),
            world.get::<Movement>(enemy).copied(),
            world.get::<Position>(enemy).copied(),
        ) else {
            continue;
        };

        if now - turn.last_change > turn.cooldown {
            movement.direction = Direction::random(rng);
            turn.last_change = now;
            turn.cooldown = rng.gen_range(enemy_cfg.direction_change_min_ms..=enemy_cfg.direction_change_max_ms);
        }

        // Blocked ahead: pick a new heading instead of grinding into the wall
        let (dx, dy) = movement.direction.delta();
        let step = movement.speed * frames;
        let ahead = pos.with_origin(pos.x + dx * step, pos.y + dy * step);
        if !is_valid_position(world, &ahead) {
            movement.direction = Direction::random(rng);
            turn.last_change = now;
        }

        if let Some(m) = world.get_mut::<Movement>(enemy) {
            *m = movement;
        }
        if let Some(t) = world.get_mut::<DirectionChange>(enemy) {
            *t = turn;
        }
        if let Some(tank) = world.get_mut::<Tank>(enemy) {
            if now - tank.last_shot > tank.shoot_cooldown {
                tank.is_shooting = true;
            }
        }

        let rammed = world
            .get::<Position>(session.player)
            .is_some_and(|player_pos| overlaps(player_pos, &pos));
        if rammed {
            damage_player(world, session, config, events, enemy, 1, now);
            destroy_enemy(world, config, events, enemy, &pos, EnemyDeathCause::Contact, now, rng);
        }
    }
}

// =============================================================================
// Shared outcomes
// =============================================================================

/// Explode and remove an enemy. Bullet kills may drop a powerup.
#[allow(clippy::too_many_arguments)]
fn destroy_enemy(
    world: &mut World,
    config: &GameConfig,
    events: &mut Events,
    enemy: Entity,
    enemy_pos: &Position,
    cause: EnemyDeathCause,
    now: f64,
    rng: &mut impl Rng,
) {
    spawn_explosion(world, config, enemy, enemy_pos, true, now);

    let dropped_powerup =
        cause == EnemyDeathCause::Bullet && rng.gen_bool(config.powerup.drop_chance);
    if dropped_powerup {
        spawn_powerup(world, config, enemy_pos, now, rng);
    }

    world.remove_entity(enemy);
    events.enemy_destroyed.send(EnemyDestroyedEvent { enemy, cause, dropped_powerup });
}

/// Apply `amount` damage to the player unless invincible or already dying.
fn damage_player(
    world: &mut World,
    session: &Session,
    config: &GameConfig,
    events: &mut Events,
    source: Entity,
    amount: i32,
    now: f64,
) {
    let player = session.player;
    if world.has::<Invincible>(player) {
        return;
    }
    let (Some(health), Some(pos)) = (
        world.get::<Health>(player).copied(),
        world.get::<Position>(player).copied(),
    ) else {
        return;
    };
    // Lethal hit already landed; removal is pending
    if health.is_dead() {
        return;
    }

    let lethal = health.current <= amount;
    spawn_explosion(world, config, player, &pos, lethal, now);
    if lethal {
        world.schedule_removal(player, now + config.effects.death_delay_ms);
        log::info!("player destroyed, removal at {:.0}ms", now + config.effects.death_delay_ms);
    }

    let remaining = match world.get_mut::<Health>(player) {
        Some(health) => {
            health.damage(amount);
            health.current
        }
        None => 0,
    };
    events.player_hit.send(PlayerHitEvent { source, remaining, lethal });
}
