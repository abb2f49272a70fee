//! Drawing primitives the host front-end implements
//!
//! The core never touches a canvas directly; screens describe what to draw
//! through the [`Renderer`] trait and the front-end maps the calls onto
//! whatever surface it owns. World coordinates are y-up with the origin at
//! the bottom-left corner.

use glam::Vec2;

/// An opaque RGB color handle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// CSS color string for canvas fill styles
    pub fn css(&self) -> String {
        format!("rgb({},{},{})", self.r, self.g, self.b)
    }
}

pub const BLACK: Color = Color::rgb(0, 0, 0);
pub const WHITE: Color = Color::rgb(255, 255, 255);
pub const RED: Color = Color::rgb(255, 0, 0);
pub const YELLOW: Color = Color::rgb(255, 255, 0);
pub const BLUE: Color = Color::rgb(0, 0, 255);
pub const GREEN: Color = Color::rgb(0, 255, 0);
pub const ORANGE: Color = Color::rgb(255, 165, 0);
pub const PURPLE: Color = Color::rgb(128, 0, 128);
pub const PINK: Color = Color::rgb(255, 192, 203);
pub const GOLD: Color = Color::rgb(255, 215, 0);
pub const AVOCADO: Color = Color::rgb(86, 130, 3);
pub const BROWN: Color = Color::rgb(150, 75, 0);

/// Menu screen background
pub const MENU_BG: Color = Color::rgb(255, 212, 28);
/// Game screen background
pub const GAME_BG: Color = GOLD;
/// Choice button fill
pub const BUTTON_FILL: Color = Color::rgb(255, 212, 28);

/// Firework palette; particle colors are drawn uniformly from here
pub const FIREWORK_COLORS: [Color; 9] = [
    RED, YELLOW, BLUE, GREEN, ORANGE, PURPLE, PINK, WHITE, GOLD,
];

/// Horizontal text anchoring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Left,
    Center,
    Right,
}

/// An axis-aligned rectangle described by its center
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub center: Vec2,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(center: Vec2, width: f32, height: f32) -> Self {
        Self {
            center,
            width,
            height,
        }
    }

    /// Hit test with exclusive bounds: points exactly on an edge miss
    pub fn contains(&self, p: Vec2) -> bool {
        let hw = self.width / 2.0;
        let hh = self.height / 2.0;
        p.x > self.center.x - hw
            && p.x < self.center.x + hw
            && p.y > self.center.y - hh
            && p.y < self.center.y + hh
    }
}

/// Draw primitives consumed by the screens
pub trait Renderer {
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn draw_text(&mut self, text: &str, pos: Vec2, color: Color, size: f32, anchor: TextAnchor);
    /// Draw a textured sprite centered at `center`; `texture` is an asset path
    fn draw_sprite(&mut self, texture: &str, center: Vec2, size: Vec2);
}
