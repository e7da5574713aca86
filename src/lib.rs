//! Gato Luz - a cat-vs-light canvas arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (hazard motion, collision, game state)
//! - `render`: Canvas2D rendering (wasm32 only)
//! - `menu`: Host game directory and back-to-menu overlay

pub mod menu;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod render;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Logical play-field size (the canvas is 800x600)
    pub const GAME_WIDTH: f32 = 800.0;
    pub const GAME_HEIGHT: f32 = 600.0;

    /// Cat collision radius
    pub const CAT_RADIUS: f32 = 30.0;
    /// Light hazard radius
    pub const LIGHT_RADIUS: f32 = 60.0;

    /// Progress gained per tick while scratching
    pub const SCRATCH_RATE: f32 = 0.4;
    /// Subtracted from the radii sum in the overlap test (grazing contact is forgiven)
    pub const TOUCH_TOLERANCE: f32 = 20.0;

    /// Per-axis light speed before level scaling
    pub const BASE_LIGHT_SPEED: f32 = 2.0;
    /// Lights spawn this far inside the left or right edge
    pub const EDGE_MARGIN: f32 = 50.0;

    /// Scratch particle lifespan in ticks
    pub const PARTICLE_LIFE: u32 = 20;
    /// A particle spawns every Nth tick while scratching
    pub const PARTICLE_SPAWN_INTERVAL: u64 = 5;
    /// The displayed progress value refreshes every Nth tick
    pub const PROGRESS_DISPLAY_INTERVAL: u64 = 10;

    /// Light speed multiplier for a level
    #[inline]
    pub fn speed_multiplier(level: u32) -> f32 {
        1.0 + level as f32 * 0.2
    }

    /// Progress needed to complete a level
    #[inline]
    pub fn progress_threshold(level: u32) -> f32 {
        100.0 + level as f32 * 50.0
    }
}

/// Center of the play field; the cat's collision anchor
#[inline]
pub fn field_center() -> Vec2 {
    Vec2::new(consts::GAME_WIDTH / 2.0, consts::GAME_HEIGHT / 2.0)
}
