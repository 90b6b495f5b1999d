//! Game start: the player tank, a fresh session, and the first level.

use rand::Rng;

use super::level::generate_level;
use super::prefabs::spawn_player;
use super::session::Session;
use super::world::World;
use crate::config::GameConfig;

/// Spawn the player into `world` and lay out level 0.
///
/// The returned session names the player entity; the caller wires input
/// into that entity's `Movement` and `Tank` each tick.
pub fn start_game(world: &mut World, config: &GameConfig, rng: &mut impl Rng) -> Session {
    let player = spawn_player(world, config);
    let session = Session::new(player);
    generate_level(world, &session, config, rng);

    log::info!(
        "game started: player {} on a {}x{} grid",
        player,
        config.arena.grid_width,
        config.arena.grid_height
    );
    session
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::components::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_fresh_game() {
        let config = GameConfig::default();
        let mut world = World::new(config.arena.width(), config.arena.height());
        let mut rng = SmallRng::seed_from_u64(99);
        let session = start_game(&mut world, &config, &mut rng);

        assert_eq!(session.level, 0);
        assert_eq!(world.count::<Tank>(), 1);
        let player = session.player;
        assert!(world.has::<Tank>(player));
        assert_eq!(world.get::<Health>(player), Some(&Health { current: 3, max: 3 }));
        assert_eq!(world.get::<Score>(player).unwrap().value, 0);

        let steel_border = world
            .iter::<Wall>()
            .filter(|(e, w)| {
                let p = world.get::<Position>(*e).unwrap();
                w.kind == WallKind::Steel && (p.x == 0.0 || p.x == 608.0 || p.y == 0.0)
            })
            .count();
        assert_eq!(steel_border, 48);
    }
}
