//! Frame composition
//!
//! Draws a `GameRuntime` in fixed layers, bottom to top:
//! walls, explosions, powerups, player, enemies, bullets. The HUD strip
//! and any status overlay go on top without screen shake.

use super::canvas::Canvas;
use super::overlay;
use super::palette::{rgb, BACKGROUND};
use super::sprites::{self, TankOverlay};
use crate::game::components::{Bullet, Explosion, Invincible, Movement, Position, Powerup, Tank, Wall};
use crate::game::runtime::{GameRuntime, GameStatus};
use crate::game::world::World;
use crate::game::Entity;

/// Stateless scene painter. The tick rate lives in the runtime's
/// `FrameClock`; drawing happens once per host frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct Renderer;

impl Renderer {
    pub fn draw(&self, canvas: &mut dyn Canvas, runtime: &GameRuntime, now: f64) {
        let world = &runtime.world;
        let player = runtime.session.player;
        let (width, height) = (world.width(), world.height());

        canvas.clear(BACKGROUND);

        let shake = screen_shake(world, player);
        if let Some((dx, dy)) = shake {
            canvas.push_offset(dx, dy);
        }
        draw_world(canvas, runtime, now);
        if shake.is_some() {
            canvas.pop_offset();
        }

        let hud = runtime.hud();
        match runtime.status {
            GameStatus::Title => overlay::draw_title(canvas, width, height),
            GameStatus::Playing => overlay::draw_hud(canvas, &hud, width, height),
            GameStatus::Paused => {
                overlay::draw_hud(canvas, &hud, width, height);
                overlay::draw_paused(canvas, width, height);
            }
            GameStatus::GameOver => {
                overlay::draw_hud(canvas, &hud, width, height);
                overlay::draw_game_over(canvas, &hud, width, height);
            }
        }
    }
}

/// Strongest shake among the player's own explosions
fn screen_shake(world: &World, player: Entity) -> Option<(f32, f32)> {
    world
        .iter::<Explosion>()
        .filter(|(_, explosion)| explosion.owner == player && !player.is_null())
        .filter_map(|(entity, explosion)| sprites::shake_offset(explosion, entity.id()))
        .max_by(|a, b| (a.0.abs() + a.1.abs()).total_cmp(&(b.0.abs() + b.1.abs())))
}

fn draw_world(canvas: &mut dyn Canvas, runtime: &GameRuntime, now: f64) {
    let world = &runtime.world;
    let player = runtime.session.player;

    for (entity, wall) in world.iter::<Wall>() {
        if let Some(pos) = world.get::<Position>(entity) {
            sprites::draw_wall(canvas, pos, wall.kind, entity.id());
        }
    }

    for (entity, explosion) in world.iter::<Explosion>() {
        if let Some(pos) = world.get::<Position>(entity) {
            let player_owned = explosion.owner == player;
            sprites::draw_explosion(canvas, pos, explosion, player_owned, entity.id());
        }
    }

    for (entity, powerup) in world.iter::<Powerup>() {
        if let Some(pos) = world.get::<Position>(entity) {
            sprites::draw_powerup(canvas, pos, powerup.kind);
        }
    }

    if let Some(tank) = world.get::<Tank>(player) {
        let overlay = TankOverlay {
            shielded: world.has::<Invincible>(player),
            boosted: tank.shoot_cooldown < runtime.config.player.shoot_cooldown_ms,
        };
        draw_tank(canvas, world, player, tank, overlay, now);
    }

    for (entity, tank) in world.iter::<Tank>() {
        if entity != player {
            draw_tank(canvas, world, entity, tank, TankOverlay::default(), now);
        }
    }

    for (entity, _) in world.iter::<Bullet>() {
        if let Some(pos) = world.get::<Position>(entity) {
            sprites::draw_bullet(canvas, pos);
        }
    }
}

fn draw_tank(
    canvas: &mut dyn Canvas,
    world: &World,
    entity: Entity,
    tank: &Tank,
    overlay: TankOverlay,
    now: f64,
) {
    let (Some(pos), Some(movement)) = (world.get::<Position>(entity), world.get::<Movement>(entity)) else {
        return;
    };
    sprites::draw_tank(canvas, pos, movement.direction, rgb(tank.color), overlay, now);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::game::prefabs::{spawn_bullet, spawn_enemy, spawn_explosion, spawn_powerup};
    use crate::render::canvas::recording::{DrawOp, RecordingCanvas};
    use crate::game::components::Direction;
    use crate::render::palette::{BULLET, POWERUP_BG, STEEL};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn playing() -> GameRuntime {
        let mut runtime = GameRuntime::new(GameConfig::default(), 5);
        runtime.start(0.0);
        runtime
    }

    fn fill_index(canvas: &RecordingCanvas, wanted: macroquad::prelude::Color) -> usize {
        canvas
            .position(|op| matches!(op, DrawOp::FillRect { color, .. } if *color == wanted))
            .unwrap()
    }

    #[test]
    fn test_layer_order() {
        let mut runtime = playing();
        let config = runtime.config.clone();
        let player = runtime.session.player;
        let mut rng = SmallRng::seed_from_u64(1);
        let tile = Position::new(96.0, 96.0, 32.0, 32.0);

        let enemy = spawn_enemy(&mut runtime.world, &config, 96.0, 96.0, 0.0, &mut rng);
        spawn_explosion(&mut runtime.world, &config, enemy, &tile, true, 0.0);
        spawn_powerup(&mut runtime.world, &config, &tile, 0.0, &mut rng);
        spawn_bullet(&mut runtime.world, &config, &tile, Direction::Up, player, true);

        let mut canvas = RecordingCanvas::new();
        Renderer.draw(&mut canvas, &runtime, 0.0);

        let wall = fill_index(&canvas, STEEL);
        let explosion = canvas.position(|op| matches!(op, DrawOp::Gradient { .. })).unwrap();
        let powerup = fill_index(&canvas, POWERUP_BG);
        let player_body = fill_index(&canvas, rgb(config.player.color));
        let enemy_body = fill_index(&canvas, rgb(config.enemy.color));
        let bullet = fill_index(&canvas, BULLET);

        assert!(wall < explosion);
        assert!(explosion < powerup);
        assert!(powerup < player_body);
        assert!(player_body < enemy_body);
        assert!(enemy_body < bullet);
    }

    #[test]
    fn test_player_explosion_shakes_scene_not_hud() {
        let mut runtime = playing();
        let config = runtime.config.clone();
        let player = runtime.session.player;
        let pos = *runtime.world.get::<Position>(player).unwrap();
        spawn_explosion(&mut runtime.world, &config, player, &pos, true, 0.0);

        let mut canvas = RecordingCanvas::new();
        Renderer.draw(&mut canvas, &runtime, 0.0);

        let push = canvas.position(|op| matches!(op, DrawOp::PushOffset(..))).unwrap();
        let pop = canvas.position(|op| *op == DrawOp::PopOffset).unwrap();
        let hud = canvas.position(|op| matches!(op, DrawOp::Text(t) if t.starts_with("SCORE"))).unwrap();
        assert!(push < pop);
        assert!(pop < hud);
    }

    #[test]
    fn test_enemy_explosion_does_not_shake() {
        let mut runtime = playing();
        let config = runtime.config.clone();
        let tile = Position::new(96.0, 96.0, 32.0, 32.0);
        spawn_explosion(&mut runtime.world, &config, Entity::NULL, &tile, true, 0.0);

        let mut canvas = RecordingCanvas::new();
        Renderer.draw(&mut canvas, &runtime, 0.0);
        assert!(!canvas.ops.iter().any(|op| matches!(op, DrawOp::PushOffset(..))));
    }

    #[test]
    fn test_frames_are_deterministic() {
        let runtime = playing();
        let renderer = Renderer;
        let mut a = RecordingCanvas::new();
        let mut b = RecordingCanvas::new();
        renderer.draw(&mut a, &runtime, 0.0);
        renderer.draw(&mut b, &runtime, 0.0);
        assert_eq!(a.ops, b.ops);
    }

    #[test]
    fn test_overlay_follows_status() {
        let mut runtime = GameRuntime::new(GameConfig::default(), 5);
        let mut canvas = RecordingCanvas::new();
        Renderer.draw(&mut canvas, &runtime, 0.0);
        assert!(canvas.texts().contains(&"TANK BATTLE"));

        runtime.start(0.0);
        runtime.pause(10.0);
        let mut canvas = RecordingCanvas::new();
        Renderer.draw(&mut canvas, &runtime, 10.0);
        assert!(canvas.texts().contains(&"PAUSED"));
    }
}
