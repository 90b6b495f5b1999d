//! Tank Battle
//!
//! Top-down tank arena on a tile grid: drive, shoot brick walls, clear
//! waves of enemy tanks and pick up the powerups they drop. Built on a
//! small type-keyed ECS; see `game` for the simulation and `render` for
//! the flat-shape drawing.

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod config;
mod game;
mod input;
mod render;

use config::GameConfig;
use game::GameRuntime;
use input::InputState;
use macroquad::prelude::*;
use render::overlay::HUD_HEIGHT;
use render::{MacroquadCanvas, Renderer};

fn window_conf() -> Conf {
    let arena = GameConfig::default().arena;
    Conf {
        window_title: format!("Tank Battle v{}", VERSION),
        window_width: arena.width() as i32,
        window_height: (arena.height() + HUD_HEIGHT) as i32,
        window_resizable: false,
        high_dpi: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    #[cfg(not(target_arch = "wasm32"))]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = GameConfig::load_or_default();
    let seed = (macroquad::miniquad::date::now() * 1000.0) as u64;
    let mut runtime = GameRuntime::new(config, seed);
    let mut input = InputState::new();
    let mut canvas = MacroquadCanvas::new(Vec2::ZERO);

    log::info!("Tank Battle v{} (seed {}, {} fps)", VERSION, seed, runtime.config.arena.target_fps);
    prevent_quit();

    loop {
        if is_quit_requested() {
            input.keys.detach();
            log::info!("quit requested, final score {}", runtime.hud().score);
            break;
        }

        let now = get_time() * 1000.0;
        input.poll();
        runtime.frame(now, &input);
        Renderer.draw(&mut canvas, &runtime, runtime.game_time(now));
        input.end_frame();

        next_frame().await;
    }
}
