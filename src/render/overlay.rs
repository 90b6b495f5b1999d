//! HUD strip and full-screen overlays (title, pause, game over)

use super::canvas::Canvas;
use super::palette::*;
use crate::game::runtime::HudSnapshot;

/// Height of the strip below the playfield
pub const HUD_HEIGHT: f32 = 32.0;

const HUD_FONT: f32 = 20.0;
const TITLE_FONT: f32 = 48.0;
const BODY_FONT: f32 = 18.0;
const LINE: f32 = 24.0;

fn centered(canvas: &mut dyn Canvas, text: &str, width: f32, y: f32, size: f32, color: macroquad::prelude::Color) {
    let x = (width - canvas.text_width(text, size)) / 2.0;
    canvas.text(text, x, y, size, color);
}

/// Score, level and lives under a playfield of `width` x `top` pixels
pub fn draw_hud(canvas: &mut dyn Canvas, hud: &HudSnapshot, width: f32, top: f32) {
    canvas.fill_rect(0.0, top, width, HUD_HEIGHT, HUD_BG);
    let baseline = top + HUD_HEIGHT / 2.0 + HUD_FONT / 3.0;

    canvas.text(&format!("SCORE {}", hud.score), 8.0, baseline, HUD_FONT, HUD_TEXT);
    centered(canvas, &format!("L{}", hud.level), width, baseline, HUD_FONT, HUD_TEXT);

    let lives = format!("LIVES {}", hud.lives.max(0));
    let x = width - canvas.text_width(&lives, HUD_FONT) - 8.0;
    canvas.text(&lives, x, baseline, HUD_FONT, HUD_TEXT);
}

fn dim(canvas: &mut dyn Canvas, width: f32, height: f32) {
    canvas.fill_rect(0.0, 0.0, width, height, with_alpha(BACKGROUND, 0.7));
}

pub fn draw_title(canvas: &mut dyn Canvas, width: f32, height: f32) {
    dim(canvas, width, height);
    let mut y = height * 0.3;
    centered(canvas, "TANK BATTLE", width, y, TITLE_FONT, TITLE_TEXT);

    y += LINE * 2.0;
    for line in [
        "WASD / ARROWS  move",
        "SPACE  fire",
        "P / ESC  pause",
    ] {
        centered(canvas, line, width, y, BODY_FONT, HUD_TEXT);
        y += LINE;
    }

    y += LINE / 2.0;
    for (line, color) in [
        ("HELMET  temporary shield", HELMET),
        ("STAR  faster fire", STAR),
        ("TANK  extra life", EXTRA_LIFE),
    ] {
        centered(canvas, line, width, y, BODY_FONT, color);
        y += LINE;
    }

    centered(canvas, "PRESS ENTER TO START", width, y + LINE, BODY_FONT, HINT_TEXT);
}

pub fn draw_paused(canvas: &mut dyn Canvas, width: f32, height: f32) {
    dim(canvas, width, height);
    centered(canvas, "PAUSED", width, height / 2.0, TITLE_FONT, TITLE_TEXT);
    centered(canvas, "PRESS P TO RESUME", width, height / 2.0 + LINE * 1.5, BODY_FONT, HINT_TEXT);
}

pub fn draw_game_over(canvas: &mut dyn Canvas, hud: &HudSnapshot, width: f32, height: f32) {
    dim(canvas, width, height);
    let mut y = height * 0.4;
    centered(canvas, "GAME OVER", width, y, TITLE_FONT, GAME_OVER_TEXT);
    y += LINE * 2.0;
    centered(canvas, &format!("FINAL SCORE: {}", hud.score), width, y, BODY_FONT, HUD_TEXT);
    y += LINE;
    centered(canvas, &format!("LEVEL REACHED: {}", hud.level), width, y, BODY_FONT, HUD_TEXT);
    y += LINE * 2.0;
    centered(canvas, "PRESS ENTER TO PLAY AGAIN", width, y, BODY_FONT, HINT_TEXT);
}
