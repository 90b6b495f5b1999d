//! Game Components
//!
//! Plain data attached to entities. Systems read and write these; they
//! carry no behavior beyond small helpers.
//!
//! Timestamps are milliseconds on the host clock passed into each tick.

use serde::{Deserialize, Serialize};

use super::entity::Entity;

// ============================================================================
// Spatial
// ============================================================================

/// Axis-aligned box in world pixel space. Top-left origin, y grows down.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Position {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Same size, moved to a new origin.
    pub fn with_origin(&self, x: f32, y: f32) -> Self {
        Self { x, y, ..*self }
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// Facing / travel direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// Unit step along this direction
    pub fn delta(self) -> (f32, f32) {
        match self {
            Direction::Up => (0.0, -1.0),
            Direction::Down => (0.0, 1.0),
            Direction::Left => (-1.0, 0.0),
            Direction::Right => (1.0, 0.0),
        }
    }

    pub fn random(rng: &mut impl rand::Rng) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

/// Drives displacement for anything that moves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Movement {
    /// Pixels per reference frame (1/60 s)
    pub speed: f32,
    pub direction: Direction,
    pub moving: bool,
}

impl Movement {
    /// Stationary, facing `direction`
    pub fn new(speed: f32, direction: Direction) -> Self {
        Self { speed, direction, moving: false }
    }

    /// Already travelling along `direction`
    pub fn moving(speed: f32, direction: Direction) -> Self {
        Self { speed, direction, moving: true }
    }
}

/// AI direction re-roll timer (enemy tanks only)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionChange {
    pub cooldown: f64,
    pub last_change: f64,
}

// ============================================================================
// Combat
// ============================================================================

/// A combat unit. Player and enemies both carry one; the session's player
/// reference tells them apart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tank {
    /// 0xRRGGBB body color
    pub color: u32,
    pub last_shot: f64,
    pub shoot_cooldown: f64,
    /// Set by input / AI, cleared by the shooting system when it fires
    pub is_shooting: bool,
}

impl Tank {
    pub fn new(color: u32, shoot_cooldown: f64) -> Self {
        Self {
            color,
            last_shot: 0.0,
            shoot_cooldown,
            is_shooting: false,
        }
    }

    /// Has the cooldown elapsed since the last shot?
    pub fn can_fire(&self, now: f64) -> bool {
        now - self.last_shot >= self.shoot_cooldown
    }
}

/// Health component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    pub current: i32,
    pub max: i32,
}

impl Health {
    pub fn new(max: i32) -> Self {
        Self { current: max, max }
    }

    pub fn damage(&mut self, amount: i32) {
        self.current = (self.current - amount).max(0);
    }

    /// Heal, clamped to max
    pub fn heal(&mut self, amount: i32) {
        self.current = (self.current + amount).min(self.max);
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0
    }
}

/// Points accumulator (player only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Score {
    pub value: u32,
}

impl Score {
    pub fn add(&mut self, points: u32) {
        self.value = self.value.saturating_add(points);
    }
}

/// A projectile in flight
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bullet {
    /// Entity that fired it
    pub owner: Entity,
    pub damage: i32,
}

// ============================================================================
// Pickups
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerupKind {
    /// Temporary invincibility
    Helmet,
    /// Halves the shoot cooldown
    Star,
    /// One extra life
    Tank,
}

impl PowerupKind {
    pub const ALL: [PowerupKind; 3] = [PowerupKind::Helmet, PowerupKind::Star, PowerupKind::Tank];

    pub fn random(rng: &mut impl rand::Rng) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    pub fn label(&self) -> &'static str {
        match self {
            PowerupKind::Helmet => "helmet",
            PowerupKind::Star => "star",
            PowerupKind::Tank => "tank",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Powerup {
    pub kind: PowerupKind,
    /// Lifetime on the ground
    pub duration: f64,
    pub spawned_at: f64,
}

/// Damage immunity window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Invincible {
    pub duration: f64,
    pub spawned_at: f64,
}

impl Invincible {
    pub fn expired(&self, now: f64) -> bool {
        now - self.spawned_at > self.duration
    }
}

// ============================================================================
// Effects
// ============================================================================

/// Frame-counted explosion animation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Explosion {
    pub frame: u32,
    pub max_frames: u32,
    pub frame_time: f64,
    pub last_frame_update: f64,
    /// Entity that blew up; selects the visual style
    pub owner: Entity,
}

// ============================================================================
// Terrain
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WallKind {
    /// Destructible, blocks movement and bullets
    Brick,
    /// Indestructible, blocks movement and bullets
    Steel,
    /// Blocks movement, bullets pass over
    Water,
    /// Blocks nothing, drawn over tanks
    Bush,
}

impl WallKind {
    pub fn blocks_movement(self) -> bool {
        !matches!(self, WallKind::Bush)
    }

    pub fn blocks_bullets(self) -> bool {
        matches!(self, WallKind::Brick | WallKind::Steel)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wall {
    pub kind: WallKind,
}
