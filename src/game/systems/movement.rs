//! Movement
//!
//! Displaces every moving tank along its heading. The x and y steps are
//! validated separately so a blocked axis never cancels the other one.
//! Bullets are advanced by the combat system instead, which needs the
//! candidate position before deciding whether the bullet survives.

use crate::game::collision::is_valid_position;
use crate::game::components::{Bullet, Movement, Position};
use crate::game::world::World;

/// Step every moving entity. `frames` is elapsed time in reference frames
/// (1.0 at the target rate).
pub fn update(world: &mut World, frames: f32) {
    for entity in world.entities_with::<Movement>() {
        if world.has::<Bullet>(entity) {
            continue;
        }
        let Some(movement) = world.get::<Movement>(entity).copied() else {
            continue;
        };
        if !movement.moving {
            continue;
        }
        let Some(start) = world.get::<Position>(entity).copied() else {
            log::trace!("movement: {} has no position", entity);
            continue;
        };

        let (dx, dy) = movement.direction.delta();
        let step = movement.speed * frames;
        let next = try_step(world, &start, dx * step, dy * step);

        if next != start {
            if let Some(pos) = world.get_mut::<Position>(entity) {
                *pos = next;
            }
        }
    }
}

/// Apply an (x, y) displacement one axis at a time, keeping each axis
/// only if the box stays valid there.
pub fn try_step(world: &World, start: &Position, dx: f32, dy: f32) -> Position {
    let mut next = *start;

    let along_x = next.with_origin(next.x + dx, next.y);
    if dx != 0.0 && is_valid_position(world, &along_x) {
        next = along_x;
    }
    let along_y = next.with_origin(next.x, next.y + dy);
    if dy != 0.0 && is_valid_position(world, &along_y) {
        next = along_y;
    }
    next
}
