//! Player integration, world scrolling, and the player movement commands
//!
//! Semi-implicit Euler: velocity picks up acceleration first, then position
//! integrates the new velocity. Positive y is up.

use rand::Rng;

use super::particles;
use super::state::{GameEvent, GameState, ParticleColor};
use crate::consts::*;

/// Raise scroll speed toward the cap
pub fn advance_speed(state: &mut GameState, dt: f32) {
    state.current_speed = (state.current_speed + SPEED_ACCELERATION * dt).min(MAX_SPEED);
}

/// Advance the player one step; returns true if the player landed this step
pub fn integrate_player(state: &mut GameState, jump_held: bool, dt: f32) -> bool {
    let was_grounded = state.is_grounded;

    let ascending = state.velocity_y > 0.0;
    let gravity = if jump_held && !was_grounded && ascending {
        GRAVITY * HOLD_GRAVITY_SCALE
    } else {
        GRAVITY
    };

    let mut vy = state.velocity_y + gravity * dt;
    let mut y = state.player_y + vy * dt;
    let mut grounded = false;

    if y <= GROUND_Y {
        y = GROUND_Y;
        vy = 0.0;
        grounded = true;
    }

    state.player_y = y;
    state.velocity_y = vy;
    state.is_grounded = grounded;

    grounded && !was_grounded
}

/// Scroll obstacles and orbs left and drop those past the despawn line.
///
/// Returns the distance scrolled.
pub fn scroll_world(state: &mut GameState, dt: f32) -> f32 {
    let dx = state.current_speed * dt;

    for obstacle in state.obstacles.iter_mut() {
        obstacle.x -= dx;
    }
    state.obstacles.retain(|o| o.x >= DESPAWN_X);

    for orb in state.orbs.iter_mut() {
        orb.x -= dx;
    }
    state.orbs.retain(|o| o.x >= DESPAWN_X);

    state.distance += dx;
    dx
}

/// Start a jump if grounded and running
pub fn jump<R: Rng>(state: &mut GameState, rng: &mut R) -> Option<GameEvent> {
    if state.is_game_over || !state.is_grounded {
        return None;
    }

    state.velocity_y = JUMP_VELOCITY;
    state.is_grounded = false;
    let feet = state.player_center().with_y(state.player_y);
    particles::burst(state, feet, JUMP_BURST_COUNT, ParticleColor::White, rng);
    Some(GameEvent::Jumped)
}

/// Variable jump height: releasing early while rising fast halves the ascent
pub fn release_jump(state: &mut GameState) -> bool {
    if state.is_game_over || state.velocity_y <= JUMP_CUT_THRESHOLD {
        return false;
    }
    state.velocity_y *= JUMP_CUT_FACTOR;
    true
}

/// Push an airborne player toward the ground
pub fn fast_fall(state: &mut GameState) -> bool {
    if state.is_game_over || state.is_grounded {
        return false;
    }
    state.velocity_y -= FAST_FALL_IMPULSE;
    true
}
