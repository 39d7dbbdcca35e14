//! Procedural obstacle/orb spawning at the spawn horizon
//!
//! A hard gap gate (growing with speed) bounds spacing from below; past the
//! gate, spawning is a per-tick coin flip so pacing is not periodic.

use rand::Rng;

use super::state::{GameState, Obstacle, ObstacleKind, Orb};
use crate::consts::*;

/// Minimum distance between the spawn horizon and the last obstacle
pub fn min_gap(speed: f32) -> f32 {
    MIN_SPAWN_GAP + speed * SPAWN_GAP_PER_SPEED
}

/// Whether the last obstacle has cleared the gap needed at this speed
pub fn gap_open(state: &GameState) -> bool {
    match state.obstacles.last() {
        Some(last) => SPAWN_X - last.x > min_gap(state.current_speed),
        None => true,
    }
}

/// Maybe spawn an obstacle (and an orb above it); returns the obstacle ID
pub fn maybe_spawn<R: Rng>(state: &mut GameState, rng: &mut R) -> Option<u64> {
    if !gap_open(state) || rng.random::<f32>() >= SPAWN_CHANCE {
        return None;
    }

    let kind = ObstacleKind::ALL[rng.random_range(0..ObstacleKind::ALL.len())];
    let (min_w, max_w) = kind.width_range();
    let (min_h, max_h) = kind.height_range();
    let obstacle = Obstacle {
        id: state.next_entity_id(),
        x: SPAWN_X,
        width: rng.random_range(min_w..max_w),
        height: rng.random_range(min_h..max_h),
        kind,
    };
    let obstacle_id = obstacle.id;

    if rng.random_bool(ORB_SPAWN_CHANCE) {
        let orb = Orb {
            id: state.next_entity_id(),
            x: obstacle.x + obstacle.width / 2.0,
            y: obstacle.top() + ORB_HOVER,
        };
        state.orbs.push(orb);
    }

    log::debug!(
        "Spawned {:?} #{} ({:.0}x{:.0}) at speed {:.0}",
        obstacle.kind,
        obstacle.id,
        obstacle.width,
        obstacle.height,
        state.current_speed
    );
    state.obstacles.push(obstacle);

    Some(obstacle_id)
}
