//! Rendering
//!
//! Flat-shape drawing of the arena through the `Canvas` trait. No textures
//! or fonts are loaded; everything is rectangles, circles and text.

pub mod canvas;
pub mod overlay;
pub mod palette;
pub mod scene;
pub mod sprites;

pub use canvas::{Canvas, MacroquadCanvas};
pub use scene::Renderer;
