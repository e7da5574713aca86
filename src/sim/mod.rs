//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per scheduled callback, per-tick rates only
//! - Seeded RNG only, passed in explicitly
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::light_touches_cat;
pub use state::{GamePhase, GameState, Light, Particle};
pub use tick::{InputState, advance};
