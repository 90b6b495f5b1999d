//! Entity Prefabs
//!
//! Helpers that spawn a fully-formed entity of each kind. Systems call
//! these instead of assembling component bundles inline.

use rand::Rng;

use super::components::*;
use super::entity::Entity;
use super::world::World;
use crate::config::GameConfig;

/// Spawn the player tank at the bottom-center of the arena, facing up.
pub fn spawn_player(world: &mut World, config: &GameConfig) -> Entity {
    let tile = config.arena.tile_size;
    let x = config.arena.width() / 2.0 - tile / 2.0;
    let y = (config.arena.grid_height - 1) as f32 * tile;

    world.spawn((
        Position::new(x, y, tile, tile),
        Movement::new(config.player.speed, Direction::Up),
        Tank::new(config.player.color, config.player.shoot_cooldown_ms),
        Health::new(config.player.max_health),
        Score::default(),
    ))
}

/// Spawn an enemy tank with randomized speed, heading and timers.
pub fn spawn_enemy(
    world: &mut World,
    config: &GameConfig,
    x: f32,
    y: f32,
    now: f64,
    rng: &mut impl Rng,
) -> Entity {
    let enemy = &config.enemy;
    let tile = config.arena.tile_size;
    let speed = rng.gen_range(enemy.speed_min..=enemy.speed_max);
    let change_cooldown = rng.gen_range(enemy.direction_change_min_ms..=enemy.direction_change_max_ms);
    let shoot_cooldown = rng.gen_range(enemy.shoot_cooldown_min_ms..=enemy.shoot_cooldown_max_ms);

    let mut tank = Tank::new(enemy.color, shoot_cooldown);
    tank.last_shot = now;

    world.spawn((
        Position::new(x, y, tile, tile),
        Movement::moving(speed, Direction::random(rng)),
        DirectionChange { cooldown: change_cooldown, last_change: now },
        tank,
        Health::new(enemy.max_health),
    ))
}

/// Spawn a bullet flush against the shooter's facing edge.
pub fn spawn_bullet(
    world: &mut World,
    config: &GameConfig,
    shooter: &Position,
    direction: Direction,
    owner: Entity,
    from_player: bool,
) -> Entity {
    let size = config.bullet.size;
    let (cx, cy) = shooter.center();
    let (x, y) = match direction {
        Direction::Up => (cx - size / 2.0, shooter.y - size),
        Direction::Down => (cx - size / 2.0, shooter.bottom()),
        Direction::Left => (shooter.x - size, cy - size / 2.0),
        Direction::Right => (shooter.right(), cy - size / 2.0),
    };
    let speed = if from_player {
        config.bullet.player_speed
    } else {
        config.bullet.enemy_speed
    };

    world.spawn((
        Position::new(x, y, size, size),
        Movement::moving(speed, direction),
        Bullet { owner, damage: config.bullet.damage },
    ))
}

/// Spawn an explosion half the size of `source`, centered on it.
pub fn spawn_explosion(
    world: &mut World,
    config: &GameConfig,
    owner: Entity,
    source: &Position,
    large: bool,
    now: f64,
) -> Entity {
    let (w, h) = (source.width / 2.0, source.height / 2.0);
    let (cx, cy) = source.center();
    let max_frames = if large {
        config.effects.large_explosion_frames
    } else {
        config.effects.small_explosion_frames
    };

    world.spawn((
        Position::new(cx - w / 2.0, cy - h / 2.0, w, h),
        Explosion {
            frame: 0,
            max_frames,
            frame_time: config.effects.explosion_frame_ms,
            last_frame_update: now,
            owner,
        },
    ))
}

/// Drop a random powerup on the tile `at` occupies.
pub fn spawn_powerup(
    world: &mut World,
    config: &GameConfig,
    at: &Position,
    now: f64,
    rng: &mut impl Rng,
) -> Entity {
    let tile = config.arena.tile_size;
    world.spawn((
        Position::new(at.x, at.y, tile, tile),
        Powerup {
            kind: PowerupKind::random(rng),
            duration: config.powerup.lifetime_ms,
            spawned_at: now,
        },
    ))
}
