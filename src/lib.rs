//! Beat the Owl - a rock-paper-scissors arcade game
//!
//! Core modules:
//! - `sim`: Deterministic game logic (round resolution, phase machine, particles)
//! - `ui`: Screens and the view controller that switches between them
//! - `render`: Drawing primitives the host front-end implements
//! - `audio`: Procedural sound effects (Web Audio)
//! - `assets`: Owl expression textures
//! - `settings`: User preferences

pub mod assets;
pub mod audio;
pub mod render;
pub mod settings;
pub mod sim;
pub mod ui;

pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    use std::ops::Range;

    /// Logical screen size (world coordinates, y-up)
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;
    pub const SCREEN_TITLE: &str = "Beat the Owl!";

    /// Click-blocked window after a draw (seconds)
    pub const DRAW_COOLDOWN_SECS: f32 = 0.2;
    /// Delay before a finished game returns to the menu (seconds)
    pub const RETURN_TO_MENU_SECS: f32 = 3.0;

    /// Particles per firework burst
    pub const BURST_COUNT: usize = 70;
    /// Launch speed range shared by both corner bursts
    pub const BURST_SPEED: Range<f32> = 2.5..5.5;
    /// Launch angles from the bottom-left corner (degrees, y-up)
    pub const LEFT_BURST_ANGLES: Range<f32> = 35.0..55.0;
    /// Launch angles from the bottom-right corner (degrees, y-up)
    pub const RIGHT_BURST_ANGLES: Range<f32> = 125.0..145.0;

    /// Particle radius at spawn
    pub const PARTICLE_RADIUS: Range<f32> = 3.0..6.0;
    /// Particle lifetime at spawn (seconds)
    pub const PARTICLE_LIFETIME: Range<f32> = 1.0..2.0;
    /// Radius shrink per update tick
    pub const PARTICLE_RADIUS_DECAY: f32 = 0.05;
    /// Default cap on live particles
    pub const MAX_PARTICLES: usize = 512;

    /// Win sound plays louder than the rest
    pub const WIN_SOUND_VOLUME: f32 = 1.5;
    pub const LOSE_SOUND_VOLUME: f32 = 1.0;

    /// Number of win/lose owl expression variants
    pub const EXPRESSION_VARIANTS: u8 = 4;
}

/// Convert polar (speed, theta) to a cartesian velocity
#[inline]
pub fn polar_to_cartesian(speed: f32, theta: f32) -> Vec2 {
    Vec2::new(speed * theta.cos(), speed * theta.sin())
}
