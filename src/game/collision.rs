//! Box Collision
//!
//! Everything in the arena is an axis-aligned box. Overlap is strict:
//! boxes that only share an edge do not collide, so tiles laid side by side
//! never touch and a tank can slide flush along a wall.

use super::components::{Position, Wall};
use super::entity::Entity;
use super::world::World;

/// Strict AABB overlap test.
pub fn overlaps(a: &Position, b: &Position) -> bool {
    a.x < b.x + b.width && a.x + a.width > b.x && a.y < b.y + b.height && a.y + a.height > b.y
}

/// Is the box fully inside the playfield `[0, width] x [0, height]`?
pub fn in_bounds(world: &World, pos: &Position) -> bool {
    pos.x >= 0.0 && pos.y >= 0.0 && pos.right() <= world.width() && pos.bottom() <= world.height()
}

/// Can a tank occupy this box?
/// False when out of bounds or overlapping any wall except bush.
pub fn is_valid_position(world: &World, pos: &Position) -> bool {
    if !in_bounds(world, pos) {
        return false;
    }
    blocking_wall(world, pos, |wall| wall.kind.blocks_movement()).is_none()
}

/// First wall (in insertion order) overlapping `pos` that passes `filter`.
pub fn blocking_wall(
    world: &World,
    pos: &Position,
    filter: impl Fn(&Wall) -> bool,
) -> Option<Entity> {
    world
        .iter::<Wall>()
        .filter(|(_, wall)| filter(wall))
        .find(|(entity, _)| {
            world
                .get::<Position>(*entity)
                .is_some_and(|wall_pos| overlaps(pos, wall_pos))
        })
        .map(|(entity, _)| entity)
}

/// Does `pos` overlap any positioned entity other than `except`?
pub fn is_occupied(world: &World, pos: &Position, except: Option<Entity>) -> bool {
    world
        .iter::<Position>()
        .any(|(entity, other)| Some(entity) != except && overlaps(pos, other))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::components::WallKind;

    fn tile(x: f32, y: f32) -> Position {
        Position::new(x, y, 32.0, 32.0)
    }

    #[test]
    fn test_overlap_is_symmetric() {
        let cases = [
            (tile(0.0, 0.0), tile(16.0, 16.0)),
            (tile(0.0, 0.0), tile(32.0, 0.0)),
            (tile(0.0, 0.0), Position::new(31.0, 31.0, 2.0, 2.0)),
            (tile(100.0, 0.0), tile(0.0, 100.0)),
        ];
        for (a, b) in cases {
            assert_eq!(overlaps(&a, &b), overlaps(&b, &a));
        }
    }

    #[test]
    fn test_box_overlaps_itself() {
        let a = tile(40.0, 40.0);
        assert!(overlaps(&a, &a));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        assert!(!overlaps(&tile(0.0, 0.0), &tile(32.0, 0.0)));
        assert!(!overlaps(&tile(0.0, 0.0), &tile(0.0, 32.0)));
        assert!(overlaps(&tile(0.0, 0.0), &tile(31.5, 0.0)));
    }

    #[test]
    fn test_valid_position_respects_wall_kinds() {
        let mut world = World::new(320.0, 320.0);
        world.spawn((tile(64.0, 64.0), Wall { kind: WallKind::Bush }));
        world.spawn((tile(128.0, 64.0), Wall { kind: WallKind::Water }));
        world.spawn((tile(192.0, 64.0), Wall { kind: WallKind::Brick }));

        // Bush only: free
        assert!(is_valid_position(&world, &tile(70.0, 70.0)));
        // Water and brick block
        assert!(!is_valid_position(&world, &tile(130.0, 70.0)));
        assert!(!is_valid_position(&world, &tile(190.0, 70.0)));
        // Open floor
        assert!(is_valid_position(&world, &tile(0.0, 200.0)));
    }

    #[test]
    fn test_bounds_are_inclusive_of_far_edge() {
        let world = World::new(320.0, 320.0);
        assert!(is_valid_position(&world, &tile(288.0, 288.0)));
        assert!(!is_valid_position(&world, &tile(289.0, 0.0)));
        assert!(!is_valid_position(&world, &tile(-1.0, 0.0)));
        assert!(!is_valid_position(&world, &tile(0.0, 289.0)));
    }

    #[test]
    fn test_is_occupied_skips_self() {
        let mut world = World::new(320.0, 320.0);
        let e = world.spawn((tile(0.0, 0.0),));
        assert!(is_occupied(&world, &tile(10.0, 10.0), None));
        assert!(!is_occupied(&world, &tile(10.0, 10.0), Some(e)));
    }
}
