//! Per-tick simulation step
//!
//! One call to [`advance`] is one tick, nominally aligned to the display
//! refresh. All rates are per-tick; there is no dt. The step is pure state
//! mutation - rendering reads the resulting state separately, so the whole
//! game can be driven headless in tests.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::collision::light_touches_cat;
use super::state::{GamePhase, GameState, Particle};
use crate::consts::*;
use crate::field_center;

/// Shared input state for a tick
///
/// Updated by the input adapter between ticks; `advance` and the phase
/// transitions clear `scratching` as a safety reset.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputState {
    /// The action flag: the player is scratching this tick
    pub scratching: bool,
    /// One-shot confirm for the non-playing phases (start / retry / next
    /// level). Consumed once per frame by the host, never by `advance`.
    pub confirm: bool,
}

/// Advance the game by one tick. Only meaningful while Playing.
///
/// Ordering within the tick matters and is load-bearing: progress accrual and
/// the win check run before the lights move, so a tick that both completes
/// the level and would register a hit resolves as a win (the flag is already
/// disengaged when the collision check runs).
pub fn advance(state: &mut GameState, input: &mut InputState, rng: &mut Pcg32) {
    if state.phase != GamePhase::Playing {
        return;
    }

    let anchor = field_center();
    // The glyph sits a little below the anchor and shakes while scratching
    state.cat_jitter = if input.scratching {
        Vec2::new(
            (rng.random::<f32>() - 0.5) * 10.0,
            (rng.random::<f32>() - 0.5) * 5.0,
        )
    } else {
        Vec2::ZERO
    };
    let cat_pos = anchor + Vec2::new(0.0, 10.0) + state.cat_jitter;

    if input.scratching {
        state.progress += SCRATCH_RATE;

        if state.frame % PARTICLE_SPAWN_INTERVAL == 0 {
            state.particles.push(Particle {
                pos: cat_pos
                    + Vec2::new(
                        (rng.random::<f32>() - 0.5) * 60.0,
                        (rng.random::<f32>() - 0.5) * 40.0,
                    ),
                life: PARTICLE_LIFE,
            });
        }

        if state.progress >= state.threshold {
            state.phase = GamePhase::LevelComplete;
            input.scratching = false;
            log::info!("level {} complete", state.level);
        }
    }

    // Throttled HUD copy; the authoritative value above updates every tick
    if state.frame % PROGRESS_DISPLAY_INTERVAL == 0 {
        state.displayed_progress = state.progress;
    }

    // Particles age every tick, scratching or not
    for particle in state.particles.iter_mut() {
        particle.life = particle.life.saturating_sub(1);
    }
    state.particles.retain(|p| p.life > 0);

    // Move lights and look for contact. The warning flag is set regardless of
    // engagement; a hit needs contact AND the action flag in the same tick.
    let mut hit = false;
    for light in state.lights.iter_mut() {
        light.advance();
        light.touching = light_touches_cat(light, anchor);
        if light.touching && input.scratching {
            hit = true;
        }
    }
    if hit {
        state.phase = GamePhase::GameOver;
        input.scratching = false;
        log::info!("caught in the light at level {}", state.level);
    }

    state.frame += 1;
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(1234)
    }

    /// A playing level-1 session whose light is parked far from the cat
    fn quiet_session(rng: &mut Pcg32) -> GameState {
        let mut state = GameState::new();
        state.start_level(1, rng);
        state.lights[0].pos = Vec2::new(10.0, 10.0);
        state.lights[0].vel = Vec2::ZERO;
        state
    }

    /// A playing level-1 session whose light sits on top of the cat
    fn overlapping_session(rng: &mut Pcg32) -> GameState {
        let mut state = GameState::new();
        state.start_level(1, rng);
        state.lights[0].pos = field_center();
        state.lights[0].vel = Vec2::ZERO;
        state
    }

    #[test]
    fn scratching_accrues_progress_at_fixed_rate() {
        // Scenario C: 250 engaged ticks at 0.4/tick with no overlap
        let mut rng = rng();
        let mut state = quiet_session(&mut rng);
        state.threshold = 100.0;

        let mut input = InputState::default();
        for _ in 0..250 {
            input.scratching = true;
            advance(&mut state, &mut input, &mut rng);
        }
        assert!((state.progress - 100.0).abs() < 1e-3);
        assert_eq!(state.phase, GamePhase::LevelComplete);
        assert!(!input.scratching);
    }

    #[test]
    fn overlap_while_scratching_ends_the_run_same_tick() {
        // Scenario D
        let mut rng = rng();
        let mut state = overlapping_session(&mut rng);
        let mut input = InputState {
            scratching: true,
            confirm: false,
        };
        advance(&mut state, &mut input, &mut rng);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(!input.scratching, "game over must disengage the flag");
    }

    #[test]
    fn overlap_without_scratching_only_warns() {
        let mut rng = rng();
        let mut state = overlapping_session(&mut rng);
        let mut input = InputState::default();
        for _ in 0..30 {
            advance(&mut state, &mut input, &mut rng);
        }
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.lights[0].touching, "warning outline must still show");
        assert_eq!(state.progress, 0.0);
    }

    #[test]
    fn win_lands_within_one_tick_of_threshold() {
        let mut rng = rng();
        let mut state = quiet_session(&mut rng);
        state.progress = state.threshold - 0.1;

        let mut input = InputState {
            scratching: true,
            confirm: false,
        };
        advance(&mut state, &mut input, &mut rng);
        assert_eq!(state.phase, GamePhase::LevelComplete);
        assert!(!input.scratching, "level complete must disengage the flag");
    }

    #[test]
    fn same_tick_win_preempts_hit() {
        // Threshold reached on the same tick the light overlaps: the win
        // check runs first and disengages the flag, so no hit registers.
        let mut rng = rng();
        let mut state = overlapping_session(&mut rng);
        state.progress = state.threshold - 0.1;

        let mut input = InputState {
            scratching: true,
            confirm: false,
        };
        advance(&mut state, &mut input, &mut rng);
        assert_eq!(state.phase, GamePhase::LevelComplete);
    }

    #[test]
    fn progress_frozen_while_not_scratching() {
        let mut rng = rng();
        let mut state = quiet_session(&mut rng);
        let mut input = InputState::default();
        for _ in 0..100 {
            advance(&mut state, &mut input, &mut rng);
        }
        assert_eq!(state.progress, 0.0);
        assert!(state.particles.is_empty());
    }

    #[test]
    fn displayed_progress_lags_behind_authoritative() {
        let mut rng = rng();
        let mut state = quiet_session(&mut rng);
        let mut input = InputState::default();

        // Tick 0 refreshes the display right after the first accrual
        input.scratching = true;
        advance(&mut state, &mut input, &mut rng);
        assert!((state.displayed_progress - SCRATCH_RATE).abs() < 1e-5);

        // Ticks 1..=9: authoritative moves, displayed holds
        for _ in 0..9 {
            input.scratching = true;
            advance(&mut state, &mut input, &mut rng);
        }
        assert!((state.displayed_progress - SCRATCH_RATE).abs() < 1e-5);
        assert!((state.progress - SCRATCH_RATE * 10.0).abs() < 1e-4);

        // Tick 10 catches the display up
        input.scratching = true;
        advance(&mut state, &mut input, &mut rng);
        assert!((state.displayed_progress - SCRATCH_RATE * 11.0).abs() < 1e-4);
    }

    #[test]
    fn particles_spawn_throttled_and_expire() {
        let mut rng = rng();
        let mut state = quiet_session(&mut rng);
        let mut input = InputState::default();

        // 11 engaged ticks spawn on frames 0, 5 and 10
        for _ in 0..11 {
            input.scratching = true;
            advance(&mut state, &mut input, &mut rng);
        }
        assert_eq!(state.particles.len(), 3);

        // Left alone, every particle dies within its lifespan
        input.scratching = false;
        for _ in 0..PARTICLE_LIFE {
            advance(&mut state, &mut input, &mut rng);
        }
        assert!(state.particles.is_empty());
    }

    #[test]
    fn non_playing_phases_do_not_tick() {
        let mut rng = rng();
        let mut state = GameState::new();
        let mut input = InputState {
            scratching: true,
            confirm: false,
        };
        advance(&mut state, &mut input, &mut rng);
        assert_eq!(state.frame, 0);
        assert_eq!(state.progress, 0.0);
        assert_eq!(state.phase, GamePhase::Menu);
    }

    #[test]
    fn seeded_layouts_are_reproducible() {
        let mut rng_a = Pcg32::seed_from_u64(99);
        let mut rng_b = Pcg32::seed_from_u64(99);
        let mut a = GameState::new();
        let mut b = GameState::new();
        a.start_level(5, &mut rng_a);
        b.start_level(5, &mut rng_b);
        for (la, lb) in a.lights.iter().zip(b.lights.iter()) {
            assert_eq!(la.pos, lb.pos);
            assert_eq!(la.vel, lb.vel);
        }
    }

    proptest! {
        /// Progress never decreases while Playing, whatever the player does
        /// with the action flag.
        #[test]
        fn progress_is_monotone(pattern in proptest::collection::vec(any::<bool>(), 1..400)) {
            let mut rng = Pcg32::seed_from_u64(42);
            let mut state = quiet_session(&mut rng);
            let mut input = InputState::default();

            let mut last = state.progress;
            for engaged in pattern {
                if state.phase != GamePhase::Playing {
                    break;
                }
                input.scratching = engaged;
                advance(&mut state, &mut input, &mut rng);
                prop_assert!(state.progress >= last);
                last = state.progress;
            }
        }
    }
}
