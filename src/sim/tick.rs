//! Per-tick simulation pipeline
//!
//! Speed → player → scroll → particles → spawn → collision/score. A game-over
//! state only decays camera shake.

use rand::Rng;

use super::state::{GameEvent, GameState};
use super::{collision, particles, physics, spawn};
use crate::consts::*;

/// Held inputs that persist across ticks
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Jump button is down (softens gravity during ascent)
    pub jump_held: bool,
}

/// Advance the game state by `dt` seconds.
///
/// `dt` is clamped to `MAX_DT`; non-positive or NaN `dt` leaves the state untouched.
pub fn tick<R: Rng>(
    state: &mut GameState,
    input: &TickInput,
    dt: f32,
    rng: &mut R,
) -> Vec<GameEvent> {
    let mut events = Vec::new();

    // Also rejects NaN
    if !(dt > 0.0) {
        return events;
    }
    let dt = dt.min(MAX_DT);

    state.camera_shake = (state.camera_shake - CAMERA_SHAKE_DECAY * dt).max(0.0);

    if state.is_game_over {
        return events;
    }

    physics::advance_speed(state, dt);

    if physics::integrate_player(state, input.jump_held, dt) {
        events.push(GameEvent::Landed);
    }

    let distance_before = state.distance;
    physics::scroll_world(state, dt);

    particles::age(state, dt);
    particles::emit_trail(state, dt, rng);

    spawn::maybe_spawn(state, rng);

    collision::resolve(state, distance_before, rng, &mut events);

    events
}
