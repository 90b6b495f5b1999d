//! Enemy Spawning / Level Progression
//!
//! Enemies arrive on a fixed cadence at one of three spawn points along the
//! top row, up to a concurrent cap and a per-level quota. When the quota is
//! spent and the field has been clear for two spawn intervals, the level
//! advances: bonus points, a new layout, and a fresh quota.

use rand::Rng;

use crate::config::GameConfig;
use crate::game::collision::is_occupied;
use crate::game::components::{Position, Score, Tank};
use crate::game::event::{EnemySpawnedEvent, Events, LevelAdvancedEvent};
use crate::game::level::{generate_level, spawn_tiles};
use crate::game::prefabs::spawn_enemy;
use crate::game::session::Session;
use crate::game::world::World;

/// Spawn cadence state carried between ticks
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemySpawner {
    /// Time of the last spawn attempt (or level start)
    pub last_spawn: f64,
    /// Enemies spawned since the level began
    pub spawned_this_level: u32,
}

impl EnemySpawner {
    pub fn new(now: f64) -> Self {
        Self {
            last_spawn: now,
            spawned_this_level: 0,
        }
    }

    /// Top-left corners of the spawn tiles
    pub fn spawn_points(config: &GameConfig) -> [(f32, f32); 3] {
        spawn_tiles(config)
    }

    pub fn update(
        &mut self,
        world: &mut World,
        session: &mut Session,
        config: &GameConfig,
        events: &mut Events,
        now: f64,
        rng: &mut impl Rng,
    ) {
        let interval = config.enemy.spawn_interval_ms;
        let enemies = world
            .iter::<Tank>()
            .filter(|(e, _)| !session.is_player(*e))
            .count();

        if enemies == 0 && now - self.last_spawn > interval * 2.0 {
            self.advance_level(world, session, config, events, now, rng);
            return;
        }

        let quota = config.enemy.quota(session.level);
        if now - self.last_spawn > interval
            && enemies < config.enemy.max_concurrent
            && self.spawned_this_level < quota
        {
            self.last_spawn = now;
            self.try_spawn(world, config, events, now, rng);
        }
    }

    fn try_spawn(
        &mut self,
        world: &mut World,
        config: &GameConfig,
        events: &mut Events,
        now: f64,
        rng: &mut impl Rng,
    ) {
        let points = Self::spawn_points(config);
        let index = rng.gen_range(0..points.len());
        let (x, y) = points[index];
        let tile = config.arena.tile_size;

        if is_occupied(world, &Position::new(x, y, tile, tile), None) {
            log::trace!("spawn point {} occupied", index);
            return;
        }

        let enemy = spawn_enemy(world, config, x, y, now, rng);
        self.spawned_this_level += 1;
        events.enemy_spawned.send(EnemySpawnedEvent { enemy, spawn_point: index });
        log::debug!("spawned enemy {} at point {}", enemy, index);
    }

    fn advance_level(
        &mut self,
        world: &mut World,
        session: &mut Session,
        config: &GameConfig,
        events: &mut Events,
        now: f64,
        rng: &mut impl Rng,
    ) {
        let level = session.advance_level();
        if let Some(score) = world.get_mut::<Score>(session.player) {
            score.add(config.score.level_clear);
        }
        generate_level(world, session, config, rng);

        self.last_spawn = now;
        self.spawned_this_level = 0;
        events.level_advanced.send(LevelAdvancedEvent { level });
        log::info!("advanced to level {}", level);
    }
}
