//! Player control wiring
//!
//! Copies the held movement and fire actions into the player's `Movement`
//! and `Tank` once per tick. A player whose lethal hit already landed no
//! longer responds.

use super::{Action, InputState};
use crate::game::components::{Direction, Health, Movement, Tank};
use crate::game::session::Session;
use crate::game::world::World;

fn held_direction(input: &InputState) -> Option<Direction> {
    Action::MOVES
        .into_iter()
        .zip([Direction::Up, Direction::Down, Direction::Left, Direction::Right])
        .find(|(action, _)| input.action_down(*action))
        .map(|(_, direction)| direction)
}

pub fn apply_player_input(world: &mut World, session: &Session, input: &InputState) {
    let player = session.player;
    let alive = world.get::<Health>(player).is_some_and(|h| !h.is_dead());
    let direction = if alive { held_direction(input) } else { None };
    let firing = alive && input.action_down(Action::Fire);

    if let Some(movement) = world.get_mut::<Movement>(player) {
        movement.moving = direction.is_some();
        if let Some(direction) = direction {
            movement.direction = direction;
        }
    }
    if firing {
        if let Some(tank) = world.get_mut::<Tank>(player) {
            tank.is_shooting = true;
        }
    }
}
