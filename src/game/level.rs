//! Level Generation
//!
//! Each level is a fresh random layout: a steel border on the left, right
//! and top edges (the bottom stays open behind the player's spawn), plus a
//! scatter of brick, water, bush and steel tiles.

use std::collections::HashSet;

use rand::Rng;

use super::components::{Position, Wall, WallKind};
use super::session::Session;
use super::world::World;
use crate::config::GameConfig;

/// Pick an interior tile kind: mostly brick, the rest split down a
/// water / bush / steel chain of coin flips.
fn random_wall_kind(brick_weight: f64, rng: &mut impl Rng) -> WallKind {
    if rng.gen_bool(brick_weight) {
        WallKind::Brick
    } else if rng.gen_bool(0.5) {
        WallKind::Water
    } else if rng.gen_bool(0.5) {
        WallKind::Bush
    } else {
        WallKind::Steel
    }
}

/// Top-left corners of the three enemy spawn tiles along the top row.
/// Interior obstacles never land on these.
pub fn spawn_tiles(config: &GameConfig) -> [(f32, f32); 3] {
    let tile = config.arena.tile_size;
    let grid_w = config.arena.grid_width as f32;
    [
        (tile, tile),
        ((grid_w - 2.0) * tile, tile),
        ((grid_w / 2.0).floor() * tile, tile),
    ]
}

/// Replace all walls with a new layout for `session.level`.
/// Returns the number of interior obstacles placed.
pub fn generate_level(
    world: &mut World,
    session: &Session,
    config: &GameConfig,
    rng: &mut impl Rng,
) -> usize {
    for wall in world.entities_with::<Wall>() {
        world.remove_entity(wall);
    }

    let tile = config.arena.tile_size;
    let (grid_w, grid_h) = (config.arena.grid_width, config.arena.grid_height);

    for x in 0..grid_w {
        for y in 0..grid_h {
            if x == 0 || x == grid_w - 1 || y == 0 {
                world.spawn((
                    Position::new(x as f32 * tile, y as f32 * tile, tile, tile),
                    Wall { kind: WallKind::Steel },
                ));
            }
        }
    }

    // Keep-clear zone around wherever the player is now
    let player_origin = world
        .get::<Position>(session.player)
        .map(|p| (p.x, p.y));
    let safe = tile * config.level.safe_radius_tiles;
    let spawns = spawn_tiles(config);

    let mut used: HashSet<(u32, u32)> = HashSet::new();
    let mut placed = 0;
    for _ in 0..config.level.attempts(session.level) {
        let x = rng.gen_range(1..grid_w - 1);
        let y = rng.gen_range(1..grid_h - 2);
        let (px, py) = (x as f32 * tile, y as f32 * tile);

        if let Some((player_x, player_y)) = player_origin {
            if (px - player_x).abs() < safe && (py - player_y).abs() < safe {
                continue;
            }
        }
        if spawns.contains(&(px, py)) {
            continue;
        }
        if !used.insert((x, y)) {
            continue;
        }

        let kind = random_wall_kind(config.level.brick_weight, rng);
        world.spawn((Position::new(px, py, tile, tile), Wall { kind }));
        placed += 1;
    }

    log::info!("generated level {} with {} obstacles", session.level, placed);
    placed
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn setup() -> (World, Session, GameConfig) {
        let config = GameConfig::default();
        let mut world = World::new(config.arena.width(), config.arena.height());
        let player = world.spawn((Position::new(304.0, 448.0, 32.0, 32.0),));
        (world, Session::new(player), config)
    }

    fn border_count(world: &World) -> usize {
        world
            .iter::<Wall>()
            .filter(|(e, w)| {
                let p = world.get::<Position>(*e).unwrap();
                w.kind == WallKind::Steel && (p.x == 0.0 || p.x == 608.0 || p.y == 0.0)
            })
            .count()
    }

    #[test]
    fn test_border_surrounds_top_and_sides() {
        let (mut world, session, config) = setup();
        let mut rng = SmallRng::seed_from_u64(7);
        generate_level(&mut world, &session, &config, &mut rng);

        // 20 across the top + 14 down each side below the corners
        assert_eq!(border_count(&world), 20 + 14 * 2);

        // Bottom row stays open between the side walls
        assert!(world.iter::<Wall>().all(|(e, _)| {
            let p = world.get::<Position>(e).unwrap();
            p.y < 14.0 * 32.0 || p.x == 0.0 || p.x == 608.0
        }));
    }

    #[test]
    fn test_obstacles_avoid_player() {
        let (mut world, session, config) = setup();
        let mut rng = SmallRng::seed_from_u64(11);
        let placed = generate_level(&mut world, &session, &config, &mut rng);
        assert!(placed > 0);
        assert!(placed <= config.level.attempts(0) as usize);

        for (e, _) in world.iter::<Wall>() {
            let p = world.get::<Position>(e).unwrap();
            let near = (p.x - 304.0).abs() < 64.0 && (p.y - 448.0).abs() < 64.0;
            assert!(!near, "wall at ({}, {}) too close to player", p.x, p.y);
        }
    }

    #[test]
    fn test_spawn_tiles_stay_clear() {
        let (mut world, session, mut config) = setup();
        // Enough attempts to cover every interior tile many times over
        config.level.base_obstacles = 5000;
        let spawns = spawn_tiles(&config);

        for seed in 0..5 {
            let mut rng = SmallRng::seed_from_u64(seed);
            generate_level(&mut world, &session, &config, &mut rng);
            for (e, _) in world.iter::<Wall>() {
                let p = world.get::<Position>(e).unwrap();
                assert!(!spawns.contains(&(p.x, p.y)), "wall on spawn tile ({}, {})", p.x, p.y);
            }
        }
    }

    #[test]
    fn test_regeneration_replaces_walls() {
        let (mut world, session, config) = setup();
        let mut rng = SmallRng::seed_from_u64(3);
        generate_level(&mut world, &session, &config, &mut rng);
        let first = world.entities_with::<Wall>();

        let placed = generate_level(&mut world, &session, &config, &mut rng);
        assert!(first.iter().all(|e| !world.is_alive(*e)));
        assert_eq!(world.count::<Wall>(), 48 + placed);
        assert!(world.is_alive(session.player));
    }

    #[test]
    fn test_brick_weight_extremes() {
        let mut rng = SmallRng::seed_from_u64(1);
        for _ in 0..50 {
            assert_eq!(random_wall_kind(1.0, &mut rng), WallKind::Brick);
            assert_ne!(random_wall_kind(0.0, &mut rng), WallKind::Brick);
        }
    }
}
