//! Neon Runner - A side-scrolling reflex game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, particles)
//! - `engine`: Run state machine and command surface for input/render hosts
//! - `snapshot`: Atomic publish/observe cell for game state snapshots
//! - `autopilot`: Attract-mode controller that plays using the public commands

pub mod autopilot;
pub mod engine;
pub mod sim;
pub mod snapshot;

pub use autopilot::Autopilot;
pub use engine::Engine;
pub use snapshot::StateObserver;

/// Game configuration constants
///
/// World units: x grows to the right, y grows upward from the ground line.
pub mod consts {
    /// Largest step the integrator will take (frame hitches, resume from pause)
    pub const MAX_DT: f32 = 0.1;

    /// Ground reference; a grounded player rests exactly here
    pub const GROUND_Y: f32 = 0.0;

    /// Player left edge (fixed, the world scrolls past)
    pub const PLAYER_X: f32 = 200.0;
    pub const PLAYER_SIZE: f32 = 60.0;
    /// Inward padding applied to every side of the player hitbox
    pub const PLAYER_HITBOX_INSET: f32 = 10.0;

    /// Vertical acceleration (units/s², negative pulls toward the ground)
    pub const GRAVITY: f32 = -3200.0;
    /// Gravity multiplier while jump is held during ascent (floaty feel)
    pub const HOLD_GRAVITY_SCALE: f32 = 0.7;
    /// Upward velocity applied on jump
    pub const JUMP_VELOCITY: f32 = 1000.0;
    /// Releasing jump above this upward speed cuts the jump short
    pub const JUMP_CUT_THRESHOLD: f32 = 300.0;
    pub const JUMP_CUT_FACTOR: f32 = 0.5;
    /// Downward velocity added by a fast-fall command
    pub const FAST_FALL_IMPULSE: f32 = 800.0;

    /// World scroll speed (units/s)
    pub const START_SPEED: f32 = 600.0;
    pub const MAX_SPEED: f32 = 1500.0;
    /// Scroll speed gained per second
    pub const SPEED_ACCELERATION: f32 = 15.0;

    /// Spawn horizon, ahead of the visible play area
    pub const SPAWN_X: f32 = 2500.0;
    /// Entities left of this are dropped
    pub const DESPAWN_X: f32 = -200.0;

    /// Per-tick spawn probability once the gap gate is open
    pub const SPAWN_CHANCE: f32 = 0.02;
    /// Minimum distance between consecutive obstacles at zero speed
    pub const MIN_SPAWN_GAP: f32 = 500.0;
    /// Extra gap per unit of scroll speed
    pub const SPAWN_GAP_PER_SPEED: f32 = 0.4;

    /// Obstacle dimension ranges (min, max)
    pub const SPIKE_WIDTH: (f32, f32) = (40.0, 55.0);
    pub const SPIKE_HEIGHT: (f32, f32) = (50.0, 90.0);
    pub const BLOCK_WIDTH: (f32, f32) = (70.0, 100.0);
    pub const BLOCK_HEIGHT: (f32, f32) = (60.0, 120.0);
    pub const FLOATING_WIDTH: (f32, f32) = (50.0, 70.0);
    pub const FLOATING_HEIGHT: (f32, f32) = (40.0, 60.0);
    /// Gap between the ground and the underside of a floating obstacle
    pub const FLOAT_ELEVATION: f32 = 110.0;

    /// Chance that a new obstacle carries an orb above it
    pub const ORB_SPAWN_CHANCE: f64 = 0.5;
    /// Orb height above the top of its obstacle
    pub const ORB_HOVER: f32 = 100.0;
    /// Axial pickup distance between player center and orb
    pub const ORB_PICKUP_RADIUS: f32 = 60.0;
    pub const ORB_BONUS: u64 = 500;

    /// World units scrolled per passive score point
    pub const DISTANCE_PER_POINT: f32 = 10.0;

    pub const CAMERA_SHAKE_MAX: f32 = 1.0;
    /// Camera shake lost per second
    pub const CAMERA_SHAKE_DECAY: f32 = 5.0;

    /// Particle life lost per second (life starts at 1.0)
    pub const PARTICLE_DECAY: f32 = 2.0;
    /// Seconds between trail particles while airborne
    pub const TRAIL_INTERVAL: f32 = 0.05;
    pub const TRAIL_SPEED: f32 = 200.0;
    pub const TRAIL_JITTER: f32 = 50.0;
    pub const TRAIL_SIZE: f32 = 4.0;
    pub const BURST_SIZE: f32 = 8.0;
    pub const BURST_SPEED_MIN: f32 = 80.0;
    pub const BURST_SPEED_MAX: f32 = 300.0;
    pub const JUMP_BURST_COUNT: usize = 5;
    pub const ORB_BURST_COUNT: usize = 10;
    pub const CRASH_BURST_COUNT: usize = 20;
    pub const MAX_PARTICLES: usize = 256;
}
