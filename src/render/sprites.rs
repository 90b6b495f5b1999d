//! Sprite painters
//!
//! One function per thing on the field. Everything is built from flat
//! shapes; nothing is loaded from disk. Painters that need scatter (bush
//! leaves, explosion sparks) derive it from a hash of the entity id so a
//! sprite looks the same every frame.

use std::f32::consts::{PI, TAU};

use macroquad::prelude::Color;

use super::canvas::Canvas;
use super::palette::*;
use crate::game::components::{Direction, Explosion, Position, PowerupKind, WallKind};

/// Stable pseudo-random value in [0, 1) for (seed, salt)
pub fn hash01(seed: u32, salt: u32) -> f32 {
    let mut x = seed.wrapping_mul(0x9E37_79B9) ^ salt.wrapping_mul(0x85EB_CA6B);
    x ^= x >> 16;
    x = x.wrapping_mul(0x7FEB_352D);
    x ^= x >> 15;
    x = x.wrapping_mul(0x846C_A68B);
    x ^= x >> 16;
    (x >> 8) as f32 / (1u32 << 24) as f32
}

// =============================================================================
// Terrain
// =============================================================================

pub fn draw_wall(canvas: &mut dyn Canvas, pos: &Position, kind: WallKind, seed: u32) {
    let Position { x, y, width: w, height: h } = *pos;
    match kind {
        WallKind::Brick => {
            canvas.fill_rect(x, y, w, h, BRICK);
            let (cw, ch) = (w / 4.0, h / 4.0);
            for i in 0..4 {
                for j in 0..4 {
                    if (i + j) % 2 == 0 {
                        canvas.fill_rect(x + i as f32 * cw, y + j as f32 * ch, cw, ch, BRICK_MORTAR);
                    }
                }
            }
        }
        WallKind::Steel => {
            canvas.fill_rect(x, y, w, h, STEEL);
            canvas.fill_rect(x + w / 4.0, y + h / 4.0, w / 2.0, h / 2.0, STEEL_PLATE);
        }
        WallKind::Water => {
            canvas.fill_rect(x, y, w, h, WATER);
            for i in 0..4 {
                canvas.fill_rect(x, y + i as f32 * (h / 4.0), w, h / 8.0, WATER_RIPPLE);
            }
        }
        WallKind::Bush => {
            canvas.fill_rect(x, y, w, h, BUSH);
            for i in 0..8 {
                let lx = x + hash01(seed, i * 2) * w;
                let ly = y + hash01(seed, i * 2 + 1) * h;
                canvas.fill_circle(lx, ly, w / 8.0, BUSH_LEAF);
            }
        }
    }
}

// =============================================================================
// Tanks and bullets
// =============================================================================

/// Barrel rectangle sticking out of the facing side
fn barrel_rect(pos: &Position, direction: Direction) -> (f32, f32, f32, f32) {
    let Position { x, y, width: w, height: h } = *pos;
    match direction {
        Direction::Up => (x + w / 2.0 - w / 8.0, y - h / 3.0, w / 4.0, h / 2.0),
        Direction::Down => (x + w / 2.0 - w / 8.0, y + h - h / 6.0, w / 4.0, h / 2.0),
        Direction::Left => (x - w / 3.0, y + h / 2.0 - h / 8.0, w / 2.0, h / 4.0),
        Direction::Right => (x + w - w / 6.0, y + h / 2.0 - h / 8.0, w / 2.0, h / 4.0),
    }
}

/// Visual extras on the player's tank
#[derive(Debug, Clone, Copy, Default)]
pub struct TankOverlay {
    pub shielded: bool,
    /// Fire rate boosted by a star
    pub boosted: bool,
}

pub fn draw_tank(
    canvas: &mut dyn Canvas,
    pos: &Position,
    direction: Direction,
    body: Color,
    overlay: TankOverlay,
    now: f64,
) {
    let Position { x, y, width: w, height: h } = *pos;
    let (cx, cy) = pos.center();

    canvas.fill_rect(x, y, w, h, body);

    if overlay.shielded {
        canvas.stroke_circle(cx, cy, w * 0.75, 2.0, SHIELD);
        let pulse = (now / 100.0).sin() as f32 * 2.0 + w * 0.6;
        canvas.stroke_circle(cx, cy, pulse, 2.0, SHIELD);
    }
    if overlay.boosted {
        canvas.stroke_rect(x - 2.0, y - 2.0, w + 4.0, h + 4.0, 2.0, STAR);
    }

    let (bx, by, bw, bh) = barrel_rect(pos, direction);
    canvas.fill_rect(bx, by, bw, bh, BARREL);
    canvas.fill_rect(x + w / 4.0, y + h / 4.0, w / 2.0, h / 2.0, HATCH);
}

pub fn draw_bullet(canvas: &mut dyn Canvas, pos: &Position) {
    canvas.fill_rect(pos.x, pos.y, pos.width, pos.height, BULLET);
}

// =============================================================================
// Powerups
// =============================================================================

/// Five-point star outline centered on (cx, cy)
fn star_points(cx: f32, cy: f32, outer: f32, inner: f32) -> Vec<(f32, f32)> {
    const SPIKES: usize = 5;
    (0..SPIKES * 2)
        .map(|i| {
            let radius = if i % 2 == 0 { outer } else { inner };
            let angle = PI * i as f32 / SPIKES as f32 - PI / 2.0;
            (cx + angle.cos() * radius, cy + angle.sin() * radius)
        })
        .collect()
}

pub fn draw_powerup(canvas: &mut dyn Canvas, pos: &Position, kind: PowerupKind) {
    let Position { x, y, width: w, height: h } = *pos;
    let (cx, cy) = pos.center();

    canvas.fill_rect(x, y, w, h, POWERUP_BG);
    match kind {
        PowerupKind::Helmet => {
            canvas.fill_rect(x + 4.0, y + 4.0, w - 8.0, h - 8.0, HELMET);
            canvas.fill_circle(cx, cy, w / 4.0, HELMET_DOME);
        }
        PowerupKind::Star => {
            canvas.fill_rect(x + 4.0, y + 4.0, w - 8.0, h - 8.0, STAR);
            canvas.fill_polygon(&star_points(cx, cy, w / 3.0, w / 6.0), STAR_SHAPE);
        }
        PowerupKind::Tank => {
            canvas.fill_rect(x + 4.0, y + 4.0, w - 8.0, h - 8.0, EXTRA_LIFE);
            canvas.fill_rect(x + w / 4.0, y + h / 3.0, w / 2.0, h / 2.0, EXTRA_LIFE_TANK);
            canvas.fill_rect(cx - 2.0, y + h / 6.0, 4.0, h / 3.0, EXTRA_LIFE_TANK);
        }
    }
}

// =============================================================================
// Explosions
// =============================================================================

const PLAYER_FIRE: [(f32, Color); 4] = [
    (0.0, FIRE_WHITE),
    (0.3, FIRE_YELLOW),
    (0.6, FIRE_ORANGE),
    (1.0, FIRE_RED),
];

const ENEMY_FIRE: [(f32, Color); 3] = [(0.0, FIRE_YELLOW), (0.7, FIRE_ORANGE), (1.0, FIRE_RED)];

/// Player explosions shake the screen for their first few frames
pub const SHAKE_FRAMES: u32 = 5;

/// Screen offset for a player explosion, if it is still shaking
pub fn shake_offset(explosion: &Explosion, seed: u32) -> Option<(f32, f32)> {
    if explosion.frame >= SHAKE_FRAMES {
        return None;
    }
    let amount = (SHAKE_FRAMES - explosion.frame) as f32 * 2.0;
    let salt = explosion.frame * 2;
    Some((
        hash01(seed, salt) * amount - amount / 2.0,
        hash01(seed, salt + 1) * amount - amount / 2.0,
    ))
}

pub fn draw_explosion(
    canvas: &mut dyn Canvas,
    pos: &Position,
    explosion: &Explosion,
    player_owned: bool,
    seed: u32,
) {
    let (cx, cy) = pos.center();
    let progress = explosion.frame as f32 / explosion.max_frames.max(1) as f32;
    let size = if player_owned {
        pos.width * (1.0 + progress)
    } else {
        pos.width * (1.0 + progress * 0.5)
    };
    let radius = size / 2.0 * (1.0 - progress * 0.3);

    let (stops, sparks, spread, spark_min, spark_range): (&[(f32, Color)], u32, f32, f32, f32) =
        if player_owned {
            (&PLAYER_FIRE, 5, 0.8, 2.0, 4.0)
        } else {
            (&ENEMY_FIRE, 3, 0.6, 1.0, 3.0)
        };
    canvas.fill_radial_gradient(cx, cy, radius, stops);

    if player_owned && explosion.frame * 2 < explosion.max_frames {
        let ring = with_alpha(FIRE_WHITE, (1.0 - progress * 2.0).max(0.0));
        canvas.stroke_circle(cx, cy, size / 2.0 + explosion.frame as f32 * 4.0, 3.0, ring);
    }

    for j in 0..sparks {
        let salt = explosion.frame * 16 + j * 4;
        let angle = hash01(seed, salt) * TAU;
        let distance = hash01(seed, salt + 1) * size * spread;
        let spark = (hash01(seed, salt + 2) * spark_range + spark_min) * (1.0 - progress);
        let color = if player_owned {
            [FIRE_RED, FIRE_ORANGE, FIRE_YELLOW][(hash01(seed, salt + 3) * 3.0) as usize % 3]
        } else {
            FIRE_ORANGE
        };
        canvas.fill_circle(cx + angle.cos() * distance, cy + angle.sin() * distance, spark, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::entity::Entity;
    use crate::render::canvas::recording::{DrawOp, RecordingCanvas};

    fn explosion(frame: u32, max_frames: u32) -> Explosion {
        Explosion {
            frame,
            max_frames,
            frame_time: 80.0,
            last_frame_update: 0.0,
            owner: Entity::NULL,
        }
    }

    #[test]
    fn test_hash_is_stable_and_in_range() {
        for salt in 0..100 {
            let v = hash01(42, salt);
            assert!((0.0..1.0).contains(&v));
            assert_eq!(v, hash01(42, salt));
        }
        assert_ne!(hash01(1, 0), hash01(2, 0));
    }

    #[test]
    fn test_bush_draws_same_leaves_each_frame() {
        let pos = Position::new(32.0, 32.0, 32.0, 32.0);
        let mut a = RecordingCanvas::new();
        let mut b = RecordingCanvas::new();
        draw_wall(&mut a, &pos, WallKind::Bush, 7);
        draw_wall(&mut b, &pos, WallKind::Bush, 7);
        assert_eq!(a.ops, b.ops);
        assert_eq!(a.ops.len(), 9);
    }

    #[test]
    fn test_barrel_follows_direction() {
        let pos = Position::new(0.0, 0.0, 32.0, 32.0);
        let mut canvas = RecordingCanvas::new();
        draw_tank(&mut canvas, &pos, Direction::Left, BRICK, TankOverlay::default(), 0.0);
        let barrel = canvas
            .ops
            .iter()
            .find(|op| matches!(op, DrawOp::FillRect { color, .. } if *color == BARREL))
            .unwrap();
        assert!(matches!(barrel, DrawOp::FillRect { x, .. } if *x < 0.0));
    }

    #[test]
    fn test_shield_rings_only_when_shielded() {
        let pos = Position::new(0.0, 0.0, 32.0, 32.0);
        let mut plain = RecordingCanvas::new();
        let mut shielded = RecordingCanvas::new();
        draw_tank(&mut plain, &pos, Direction::Up, BRICK, TankOverlay::default(), 0.0);
        let overlay = TankOverlay { shielded: true, boosted: false };
        draw_tank(&mut shielded, &pos, Direction::Up, BRICK, overlay, 0.0);

        let rings = |c: &RecordingCanvas| c.ops.iter().filter(|op| matches!(op, DrawOp::StrokeCircle { .. })).count();
        assert_eq!(rings(&plain), 0);
        assert_eq!(rings(&shielded), 2);
    }

    #[test]
    fn test_star_has_ten_points() {
        let pos = Position::new(0.0, 0.0, 32.0, 32.0);
        let mut canvas = RecordingCanvas::new();
        draw_powerup(&mut canvas, &pos, PowerupKind::Star);
        assert!(canvas.ops.contains(&DrawOp::Polygon { points: 10, color: STAR_SHAPE }));
    }

    #[test]
    fn test_player_explosion_styles() {
        let pos = Position::new(8.0, 8.0, 16.0, 16.0);
        let mut player = RecordingCanvas::new();
        let mut enemy = RecordingCanvas::new();
        draw_explosion(&mut player, &pos, &explosion(1, 12), true, 3);
        draw_explosion(&mut enemy, &pos, &explosion(1, 12), false, 3);

        assert!(matches!(player.ops[0], DrawOp::Gradient { inner, .. } if inner == FIRE_WHITE));
        assert!(matches!(enemy.ops[0], DrawOp::Gradient { inner, .. } if inner == FIRE_YELLOW));
        // Gradient + shockwave + 5 sparks vs gradient + 3 sparks
        assert_eq!(player.ops.len(), 7);
        assert_eq!(enemy.ops.len(), 4);
    }

    #[test]
    fn test_shake_fades_out() {
        assert!(shake_offset(&explosion(0, 12), 1).is_some());
        let (dx, dy) = shake_offset(&explosion(4, 12), 1).unwrap();
        assert!(dx.abs() <= 1.0 && dy.abs() <= 1.0);
        assert!(shake_offset(&explosion(5, 12), 1).is_none());
    }
}
