//! Visual feedback particles
//!
//! Particles share the simulation's `dt` but never feed back into collision
//! or scoring. Two emitters: a low-rate trail while airborne and instant
//! bursts (jump, crash, orb pickup).

use glam::Vec2;
use rand::Rng;

use super::state::{GameState, Particle, ParticleColor};
use crate::consts::*;

/// Move, fade and cull existing particles
pub fn age(state: &mut GameState, dt: f32) {
    for particle in state.particles.iter_mut() {
        particle.pos += particle.vel * dt;
        particle.life -= PARTICLE_DECAY * dt;
    }
    state
        .particles
        .retain(|p| p.life > 0.0 && p.pos.x >= DESPAWN_X);
}

/// Emit trail particles at a fixed interval while airborne
pub fn emit_trail<R: Rng>(state: &mut GameState, dt: f32, rng: &mut R) {
    if state.is_grounded {
        state.trail_timer = 0.0;
        return;
    }

    state.trail_timer += dt;
    while state.trail_timer >= TRAIL_INTERVAL {
        state.trail_timer -= TRAIL_INTERVAL;
        let origin = state.player_center();
        let vel = Vec2::new(
            -TRAIL_SPEED,
            (rng.random::<f32>() - 0.5) * TRAIL_JITTER,
        );
        push(state, origin, vel, TRAIL_SIZE, ParticleColor::Magenta);
    }
}

/// Spawn `count` particles flying out of `origin` in random directions
pub fn burst<R: Rng>(
    state: &mut GameState,
    origin: Vec2,
    count: usize,
    color: ParticleColor,
    rng: &mut R,
) {
    for _ in 0..count {
        let angle = rng.random_range(0.0..std::f32::consts::TAU);
        let speed = rng.random_range(BURST_SPEED_MIN..BURST_SPEED_MAX);
        let vel = Vec2::from_angle(angle) * speed;
        push(state, origin, vel, BURST_SIZE, color);
    }
}

fn push(state: &mut GameState, pos: Vec2, vel: Vec2, size: f32, color: ParticleColor) {
    if state.particles.len() >= MAX_PARTICLES {
        // Remove oldest particles to make room
        let excess = state.particles.len() + 1 - MAX_PARTICLES;
        state.particles.drain(..excess);
    }
    let id = state.next_entity_id();
    state.particles.push(Particle {
        id,
        pos,
        vel,
        life: 1.0,
        size,
        color,
    });
}
