//! Drawing surface
//!
//! The renderer draws through the `Canvas` trait so the same scene code
//! runs against macroquad in the game and a recorder in tests.
//! Coordinates are world pixels; `push_offset` shifts everything drawn
//! until the matching `pop_offset`.

use macroquad::prelude::*;

/// 2D drawing capability the renderer needs
pub trait Canvas {
    /// Fill the whole surface
    fn clear(&mut self, color: Color);
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color);
    fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, thickness: f32, color: Color);
    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Color);
    fn stroke_circle(&mut self, cx: f32, cy: f32, radius: f32, thickness: f32, color: Color);
    /// Disc shaded from `stops[0]` at the center to the last stop at
    /// `radius`. Stops are (offset in 0..=1, color), ascending.
    fn fill_radial_gradient(&mut self, cx: f32, cy: f32, radius: f32, stops: &[(f32, Color)]);
    /// Filled polygon, drawn as a fan around the vertex centroid
    /// (fine for convex and star shapes)
    fn fill_polygon(&mut self, points: &[(f32, f32)], color: Color);
    fn text(&mut self, text: &str, x: f32, y: f32, size: f32, color: Color);
    fn text_width(&self, text: &str, size: f32) -> f32;
    fn push_offset(&mut self, dx: f32, dy: f32);
    fn pop_offset(&mut self);
}

/// Color at `t` along a gradient's stops
pub fn gradient_color(stops: &[(f32, Color)], t: f32) -> Color {
    let Some(&(first_at, first)) = stops.first() else {
        return BLANK;
    };
    if t <= first_at {
        return first;
    }
    for pair in stops.windows(2) {
        let ((a_at, a), (b_at, b)) = (pair[0], pair[1]);
        if t <= b_at {
            let span = (b_at - a_at).max(f32::EPSILON);
            let k = (t - a_at) / span;
            return Color::new(
                a.r + (b.r - a.r) * k,
                a.g + (b.g - a.g) * k,
                a.b + (b.b - a.b) * k,
                a.a + (b.a - a.a) * k,
            );
        }
    }
    stops[stops.len() - 1].1
}

/// Rings used to approximate a radial gradient
const GRADIENT_RINGS: usize = 12;

/// Canvas backed by macroquad's immediate-mode shapes.
pub struct MacroquadCanvas {
    /// Screen position of world (0, 0)
    origin: Vec2,
    /// Active offsets, summed on top of `origin`
    offsets: Vec<Vec2>,
}

impl MacroquadCanvas {
    pub fn new(origin: Vec2) -> Self {
        Self { origin, offsets: Vec::new() }
    }

    fn shift(&self) -> Vec2 {
        self.offsets.iter().fold(self.origin, |acc, o| acc + *o)
    }
}

impl Canvas for MacroquadCanvas {
    fn clear(&mut self, color: Color) {
        clear_background(color);
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        let s = self.shift();
        draw_rectangle(x + s.x, y + s.y, w, h, color);
    }

    fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, thickness: f32, color: Color) {
        let s = self.shift();
        draw_rectangle_lines(x + s.x, y + s.y, w, h, thickness, color);
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Color) {
        let s = self.shift();
        draw_circle(cx + s.x, cy + s.y, radius, color);
    }

    fn stroke_circle(&mut self, cx: f32, cy: f32, radius: f32, thickness: f32, color: Color) {
        let s = self.shift();
        draw_circle_lines(cx + s.x, cy + s.y, radius, thickness, color);
    }

    fn fill_radial_gradient(&mut self, cx: f32, cy: f32, radius: f32, stops: &[(f32, Color)]) {
        let s = self.shift();
        // Outermost ring first so inner rings paint over it
        for ring in (1..=GRADIENT_RINGS).rev() {
            let t = ring as f32 / GRADIENT_RINGS as f32;
            draw_circle(cx + s.x, cy + s.y, radius * t, gradient_color(stops, t));
        }
    }

    fn fill_polygon(&mut self, points: &[(f32, f32)], color: Color) {
        if points.len() < 3 {
            return;
        }
        let s = self.shift();
        let n = points.len() as f32;
        let (sx, sy) = points.iter().fold((0.0, 0.0), |(ax, ay), (x, y)| (ax + x, ay + y));
        let center = vec2(sx / n, sy / n) + s;

        for i in 0..points.len() {
            let (ax, ay) = points[i];
            let (bx, by) = points[(i + 1) % points.len()];
            draw_triangle(center, vec2(ax, ay) + s, vec2(bx, by) + s, color);
        }
    }

    fn text(&mut self, text: &str, x: f32, y: f32, size: f32, color: Color) {
        let s = self.shift();
        draw_text(text, x + s.x, y + s.y, size, color);
    }

    fn text_width(&self, text: &str, size: f32) -> f32 {
        measure_text(text, None, size as u16, 1.0).width
    }

    fn push_offset(&mut self, dx: f32, dy: f32) {
        self.offsets.push(vec2(dx, dy));
    }

    fn pop_offset(&mut self) {
        self.offsets.pop();
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gradient_interpolates_between_stops() {
        let stops = [(0.0, Color::new(0.0, 0.0, 0.0, 1.0)), (1.0, Color::new(1.0, 1.0, 1.0, 1.0))];
        let mid = gradient_color(&stops, 0.5);
        assert!((mid.r - 0.5).abs() < 1e-6);
        assert_eq!(gradient_color(&stops, -1.0), stops[0].1);
        assert_eq!(gradient_color(&stops, 2.0), stops[1].1);
    }

    #[test]
    fn test_gradient_empty_is_blank() {
        assert_eq!(gradient_color(&[], 0.5), BLANK);
    }
}
