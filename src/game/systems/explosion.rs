//! Explosion animation clock. Drawing is the renderer's job; this only
//! advances frame counters and removes finished explosions.

use crate::game::components::Explosion;
use crate::game::world::World;

pub fn update(world: &mut World, now: f64) {
    for entity in world.entities_with::<Explosion>() {
        let finished = match world.get_mut::<Explosion>(entity) {
            Some(explosion) if now - explosion.last_frame_update > explosion.frame_time => {
                explosion.frame += 1;
                explosion.last_frame_update = now;
                explosion.frame >= explosion.max_frames
            }
            _ => false,
        };
        if finished {
            world.remove_entity(entity);
        }
    }
}
