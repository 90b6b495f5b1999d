//! Shooting
//!
//! Turns an armed trigger (`Tank::is_shooting`) into a bullet once the
//! tank's cooldown allows it. The trigger is cleared on every shot, so
//! holding fire only produces one bullet per re-arm.

use crate::config::GameConfig;
use crate::game::components::{Movement, Position, Tank};
use crate::game::prefabs::spawn_bullet;
use crate::game::session::Session;
use crate::game::world::World;

pub fn update(world: &mut World, session: &Session, config: &GameConfig, now: f64) {
    for entity in world.entities_with::<Tank>() {
        let Some(tank) = world.get::<Tank>(entity).copied() else {
            continue;
        };
        if !tank.is_shooting || !tank.can_fire(now) {
            continue;
        }
        let (Some(pos), Some(movement)) = (
            world.get::<Position>(entity).copied(),
            world.get::<Movement>(entity).copied(),
        ) else {
            continue;
        };

        spawn_bullet(
            world,
            config,
            &pos,
            movement.direction,
            entity,
            session.is_player(entity),
        );

        if let Some(tank) = world.get_mut::<Tank>(entity) {
            tank.is_shooting = false;
            tank.last_shot = now;
        }
    }
}
