//! Game state and core simulation types
//!
//! One session is active at a time; everything here is reset by
//! [`GameState::start_level`] and discarded on restart.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    /// Waiting on the start screen
    #[default]
    Menu,
    /// Active gameplay
    Playing,
    /// Level threshold reached, waiting for "next level"
    LevelComplete,
    /// Caught scratching, waiting for "retry"
    GameOver,
}

/// A roaming light hazard
#[derive(Debug, Clone)]
pub struct Light {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Warning indicator: overlapping the cat this tick (set whether or not
    /// the player is scratching)
    pub touching: bool,
}

impl Light {
    /// Spawn a light at a random edge position with random velocity signs,
    /// speed scaled for the given level.
    pub fn spawn(level: u32, rng: &mut Pcg32) -> Self {
        let speed = BASE_LIGHT_SPEED * speed_multiplier(level);
        let x = if rng.random_bool(0.5) {
            EDGE_MARGIN
        } else {
            GAME_WIDTH - EDGE_MARGIN
        };
        let y = rng.random_range(0.0..GAME_HEIGHT);
        let vx = if rng.random_bool(0.5) { speed } else { -speed };
        let vy = if rng.random_bool(0.5) { speed } else { -speed };
        Self {
            pos: Vec2::new(x, y),
            vel: Vec2::new(vx, vy),
            radius: LIGHT_RADIUS,
            touching: false,
        }
    }

    /// Advance one tick: move, then reflect off the play-field bounds.
    ///
    /// The reflection only negates the velocity sign; the position is not
    /// clamped back inside, so a light past an edge flips its sign again on
    /// every tick it remains outside. Intentional - the wobble at the walls
    /// is part of the game's feel.
    pub fn advance(&mut self) {
        self.pos += self.vel;
        if self.pos.x < 0.0 || self.pos.x > GAME_WIDTH {
            self.vel.x = -self.vel.x;
        }
        if self.pos.y < 0.0 || self.pos.y > GAME_HEIGHT {
            self.vel.y = -self.vel.y;
        }
    }
}

/// A scratch particle. Purely cosmetic: never read by collision or scoring.
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub pos: Vec2,
    pub life: u32,
}

/// Complete game state for one session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Current phase
    pub phase: GamePhase,
    /// Current level (1-based); also the number of lights
    pub level: u32,
    /// Authoritative progress, used for the win check every tick
    pub progress: f32,
    /// Render-throttled copy of `progress`, refreshed every
    /// `PROGRESS_DISPLAY_INTERVAL`-th tick
    pub displayed_progress: f32,
    /// Progress needed to complete the level
    pub threshold: f32,
    /// Tick counter; drives the particle and display throttles. Not reset
    /// between levels.
    pub frame: u64,
    /// Active light hazards (one per level number)
    pub lights: Vec<Light>,
    /// Scratch particles
    pub particles: Vec<Particle>,
    /// Shake offset applied to the cat glyph while scratching
    pub cat_jitter: Vec2,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Fresh session on the menu screen
    pub fn new() -> Self {
        Self {
            phase: GamePhase::Menu,
            level: 1,
            progress: 0.0,
            displayed_progress: 0.0,
            threshold: 100.0,
            frame: 0,
            lights: Vec::new(),
            particles: Vec::new(),
            cat_jitter: Vec2::ZERO,
        }
    }

    /// Reset the session for the given level and begin playing.
    ///
    /// Spawns exactly `level` lights at randomized edge positions, resets
    /// progress, and sets the completion threshold. Always succeeds.
    pub fn start_level(&mut self, level: u32, rng: &mut Pcg32) {
        self.lights = (0..level).map(|_| Light::spawn(level, rng)).collect();
        self.level = level;
        self.progress = 0.0;
        self.displayed_progress = 0.0;
        self.threshold = progress_threshold(level);
        self.particles.clear();
        self.cat_jitter = Vec2::ZERO;
        self.phase = GamePhase::Playing;
        log::info!(
            "level {} started: {} lights, threshold {}",
            level,
            self.lights.len(),
            self.threshold
        );
    }

    /// Menu -> Playing
    pub fn start_game(&mut self, rng: &mut Pcg32) {
        if self.phase == GamePhase::Menu {
            self.start_level(1, rng);
        }
    }

    /// LevelComplete -> Playing at the next level
    pub fn next_level(&mut self, rng: &mut Pcg32) {
        if self.phase == GamePhase::LevelComplete {
            self.start_level(self.level + 1, rng);
        }
    }

    /// GameOver -> Playing, restarting the same level from scratch
    pub fn retry(&mut self, rng: &mut Pcg32) {
        if self.phase == GamePhase::GameOver {
            self.start_level(self.level, rng);
        }
    }

    /// Discrete confirm input for the non-playing phases. No-op while
    /// Playing; there is no terminal state, so the loop restarts forever.
    pub fn confirm(&mut self, rng: &mut Pcg32) {
        match self.phase {
            GamePhase::Menu => self.start_game(rng),
            GamePhase::LevelComplete => self.next_level(rng),
            GamePhase::GameOver => self.retry(rng),
            GamePhase::Playing => {}
        }
    }

    /// Displayed completion percentage for the HUD, clamped to 100
    pub fn display_percent(&self) -> f32 {
        (self.displayed_progress / self.threshold * 100.0).min(100.0)
    }
}
