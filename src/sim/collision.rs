//! Collision detection and scoring
//!
//! Obstacles use an exact box overlap against the inset player hitbox. Orbs use
//! a cheap axial distance check instead of a circle test; it is tuned for feel.

use glam::Vec2;
use rand::Rng;

use super::aabb::Aabb;
use super::particles;
use super::state::{GameEvent, GameState, Obstacle, Orb, ParticleColor};
use crate::consts::*;

/// First obstacle (in spawn order) overlapping the hitbox
pub fn first_obstacle_hit<'a>(hitbox: &Aabb, obstacles: &'a [Obstacle]) -> Option<&'a Obstacle> {
    obstacles.iter().find(|o| hitbox.overlaps(&o.bounds()))
}

/// Whether the orb is within pickup reach of the hitbox center
pub fn orb_in_reach(hitbox: &Aabb, orb: &Orb) -> bool {
    let center = hitbox.center();
    (center.x - orb.x).abs() < ORB_PICKUP_RADIUS && (center.y - orb.y).abs() < ORB_PICKUP_RADIUS
}

/// Passive score for scrolling from `before` to `after` total distance
pub fn distance_points(before: f32, after: f32) -> u64 {
    let whole = |d: f32| (d / DISTANCE_PER_POINT).floor().max(0.0) as u64;
    whole(after).saturating_sub(whole(before))
}

/// Resolve crashes, orb pickups and scoring for the post-movement state
pub fn resolve<R: Rng>(
    state: &mut GameState,
    distance_before: f32,
    rng: &mut R,
    events: &mut Vec<GameEvent>,
) {
    state.score = state
        .score
        .saturating_add(distance_points(distance_before, state.distance));

    let hitbox = state.player_hitbox();

    // Stop at the first hit so a crash is only triggered once
    if let Some(obstacle_id) = first_obstacle_hit(&hitbox, &state.obstacles).map(|o| o.id) {
        state.is_game_over = true;
        state.camera_shake = CAMERA_SHAKE_MAX;
        let origin = state.player_center();
        particles::burst(state, origin, CRASH_BURST_COUNT, ParticleColor::Magenta, rng);
        events.push(GameEvent::Crashed {
            obstacle_id,
            score: state.score,
        });
    }

    let (collected, remaining): (Vec<Orb>, Vec<Orb>) = std::mem::take(&mut state.orbs)
        .into_iter()
        .partition(|orb| orb_in_reach(&hitbox, orb));
    state.orbs = remaining;

    for orb in collected {
        state.score = state.score.saturating_add(ORB_BONUS);
        state.orbs_collected += 1;
        particles::burst(
            state,
            Vec2::new(orb.x, orb.y),
            ORB_BURST_COUNT,
            ParticleColor::Gold,
            rng,
        );
        log::debug!("Collected orb #{} (score {})", orb.id, state.score);
        events.push(GameEvent::OrbCollected {
            orb_id: orb.id,
            bonus: ORB_BONUS,
        });
    }
}
