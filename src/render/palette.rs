//! Palette - colors for every sprite and overlay
//!
//! Values are the classic arcade tones; tank body colors come from config
//! and go through `rgb`.

use macroquad::prelude::Color;

/// 0xRRGGBB to an opaque color
pub fn rgb(hex: u32) -> Color {
    Color::new(
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
        1.0,
    )
}

/// Same color with a new alpha
pub fn with_alpha(color: Color, alpha: f32) -> Color {
    Color::new(color.r, color.g, color.b, alpha)
}

// =============================================================================
// Arena
// =============================================================================

/// Playfield background
pub const BACKGROUND: Color = Color::new(0.0, 0.0, 0.0, 1.0); // #000000

// =============================================================================
// Terrain
// =============================================================================

/// Brick base
pub const BRICK: Color = Color::new(0.698, 0.365, 0.0, 1.0); // #B25D00

/// Brick checker
pub const BRICK_MORTAR: Color = Color::new(0.545, 0.271, 0.075, 1.0); // #8B4513

/// Steel base
pub const STEEL: Color = Color::new(0.502, 0.502, 0.502, 1.0); // #808080

/// Steel center plate
pub const STEEL_PLATE: Color = Color::new(0.663, 0.663, 0.663, 1.0); // #A9A9A9

/// Water base
pub const WATER: Color = Color::new(0.0, 0.467, 0.745, 1.0); // #0077BE

/// Water ripple bands
pub const WATER_RIPPLE: Color = Color::new(0.0, 0.631, 0.871, 1.0); // #00A1DE

/// Bush base
pub const BUSH: Color = Color::new(0.133, 0.545, 0.133, 1.0); // #228B22

/// Bush leaf dots
pub const BUSH_LEAF: Color = Color::new(0.196, 0.804, 0.196, 1.0); // #32CD32

// =============================================================================
// Tanks
// =============================================================================

/// Gun barrel
pub const BARREL: Color = Color::new(0.2, 0.2, 0.2, 1.0); // #333333

/// Body hatch
pub const HATCH: Color = Color::new(0.133, 0.133, 0.133, 1.0); // #222222

/// Invincibility ring
pub const SHIELD: Color = Color::new(0.255, 0.412, 0.882, 1.0); // #4169E1

/// Bullets
pub const BULLET: Color = Color::new(1.0, 1.0, 0.0, 1.0); // #FFFF00

// =============================================================================
// Powerups
// =============================================================================

/// Pickup backdrop
pub const POWERUP_BG: Color = Color::new(0.0, 0.0, 0.0, 1.0); // #000000

/// Helmet plate
pub const HELMET: Color = Color::new(0.255, 0.412, 0.882, 1.0); // #4169E1

/// Helmet dome
pub const HELMET_DOME: Color = Color::new(0.529, 0.808, 0.98, 1.0); // #87CEFA

/// Star plate
pub const STAR: Color = Color::new(1.0, 0.843, 0.0, 1.0); // #FFD700

/// Star shape
pub const STAR_SHAPE: Color = Color::new(1.0, 1.0, 0.0, 1.0); // #FFFF00

/// Extra life plate
pub const EXTRA_LIFE: Color = Color::new(0.196, 0.804, 0.196, 1.0); // #32CD32

/// Extra life tank icon
pub const EXTRA_LIFE_TANK: Color = Color::new(0.0, 1.0, 0.0, 1.0); // #00FF00

// =============================================================================
// Explosions
// =============================================================================

/// Player explosion core
pub const FIRE_WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0); // #FFFFFF

/// Inner flame
pub const FIRE_YELLOW: Color = Color::new(1.0, 1.0, 0.0, 1.0); // #FFFF00

/// Mid flame
pub const FIRE_ORANGE: Color = Color::new(1.0, 0.647, 0.0, 1.0); // #FFA500

/// Outer flame
pub const FIRE_RED: Color = Color::new(1.0, 0.271, 0.0, 1.0); // #FF4500

// =============================================================================
// HUD
// =============================================================================

/// HUD strip background
pub const HUD_BG: Color = Color::new(0.106, 0.106, 0.129, 1.0); // #1B1B21

/// HUD text
pub const HUD_TEXT: Color = Color::new(0.8, 0.8, 0.851, 1.0); // #CCCCD9

/// Overlay headline
pub const TITLE_TEXT: Color = Color::new(1.0, 1.0, 1.0, 1.0); // #FFFFFF

/// Game over headline
pub const GAME_OVER_TEXT: Color = Color::new(0.937, 0.267, 0.267, 1.0); // #EF4444

/// Overlay hints
pub const HINT_TEXT: Color = Color::new(0.612, 0.639, 0.686, 1.0); // #9CA3AF
