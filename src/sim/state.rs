//! Game state and core simulation types
//!
//! A `GameState` is one complete snapshot of the run. The engine never edits a
//! published snapshot; it clones, advances the clone, and publishes that.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use crate::consts::*;

/// Obstacle variants
///
/// The kind decides where the obstacle sits vertically and therefore its hitbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Narrow hazard resting on the ground
    Spike,
    /// Wide hazard resting on the ground
    Block,
    /// Hazard hovering above the ground; can be run under
    Floating,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 3] = [
        ObstacleKind::Spike,
        ObstacleKind::Block,
        ObstacleKind::Floating,
    ];

    /// (min, max) width for freshly spawned obstacles of this kind
    pub fn width_range(self) -> (f32, f32) {
        match self {
            ObstacleKind::Spike => SPIKE_WIDTH,
            ObstacleKind::Block => BLOCK_WIDTH,
            ObstacleKind::Floating => FLOATING_WIDTH,
        }
    }

    /// (min, max) height for freshly spawned obstacles of this kind
    pub fn height_range(self) -> (f32, f32) {
        match self {
            ObstacleKind::Spike => SPIKE_HEIGHT,
            ObstacleKind::Block => BLOCK_HEIGHT,
            ObstacleKind::Floating => FLOATING_HEIGHT,
        }
    }

    /// Y of the obstacle's underside
    pub fn base_y(self) -> f32 {
        match self {
            ObstacleKind::Spike | ObstacleKind::Block => GROUND_Y,
            ObstacleKind::Floating => GROUND_Y + FLOAT_ELEVATION,
        }
    }

    /// Whether the obstacle rests on the ground (must be jumped over)
    pub fn is_grounded(self) -> bool {
        !matches!(self, ObstacleKind::Floating)
    }
}

/// An obstacle scrolling toward the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u64,
    /// Left edge
    pub x: f32,
    pub width: f32,
    pub height: f32,
    pub kind: ObstacleKind,
}

impl Obstacle {
    /// Collision box; spans from the kind's base up by `height`
    pub fn bounds(&self) -> Aabb {
        Aabb::from_min_size(
            Vec2::new(self.x, self.kind.base_y()),
            Vec2::new(self.width, self.height),
        )
    }

    /// Y of the obstacle's top edge
    pub fn top(&self) -> f32 {
        self.kind.base_y() + self.height
    }
}

/// A collectible orb (removed from the state once picked up)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Orb {
    pub id: u64,
    /// Center
    pub x: f32,
    pub y: f32,
}

/// Particle palette (render-only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleColor {
    /// Jump dust
    White,
    /// Trail and crash sparks
    Magenta,
    /// Orb pickup sparkle
    Gold,
}

/// A particle for visual effects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub id: u64,
    pub pos: Vec2,
    pub vel: Vec2,
    /// 0-1, decreases over time
    pub life: f32,
    pub size: f32,
    pub color: ParticleColor,
}

/// Feedback events for audio/haptics hosts (never read by the simulation)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Jumped,
    Landed,
    OrbCollected { orb_id: u64, bonus: u64 },
    Crashed { obstacle_id: u64, score: u64 },
}

/// Complete game state snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Bottom edge of the player (GROUND_Y when grounded)
    pub player_y: f32,
    /// Vertical velocity, positive is upward
    pub velocity_y: f32,
    pub is_grounded: bool,
    /// Spawn order, which is also left-to-right order
    pub obstacles: Vec<Obstacle>,
    pub orbs: Vec<Orb>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    pub is_game_over: bool,
    pub score: u64,
    /// World scroll speed (units/s)
    pub current_speed: f32,
    /// Last processed timestamp (ns), for render-side animation phase
    pub world_tick: u64,
    /// 0 to CAMERA_SHAKE_MAX
    pub camera_shake: f32,
    /// Total world units scrolled this run
    pub distance: f32,
    pub orbs_collected: u32,
    /// Seconds accumulated toward the next trail particle
    pub trail_timer: f32,
    /// Next entity ID
    next_id: u64,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Fresh run: grounded at rest, empty world, starting speed
    pub fn new() -> Self {
        Self {
            player_y: GROUND_Y,
            velocity_y: 0.0,
            is_grounded: true,
            obstacles: Vec::new(),
            orbs: Vec::new(),
            particles: Vec::new(),
            is_game_over: false,
            score: 0,
            current_speed: START_SPEED,
            world_tick: 0,
            camera_shake: 0.0,
            distance: 0.0,
            orbs_collected: 0,
            trail_timer: 0.0,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Nominal (visual) player square
    pub fn player_rect(&self) -> Aabb {
        Aabb::from_min_size(
            Vec2::new(PLAYER_X, self.player_y),
            Vec2::splat(PLAYER_SIZE),
        )
    }

    /// Forgiving collision box, inset from the visual square
    pub fn player_hitbox(&self) -> Aabb {
        self.player_rect().inset(PLAYER_HITBOX_INSET)
    }

    /// Center of the player square (origin for bursts)
    pub fn player_center(&self) -> Vec2 {
        self.player_rect().center()
    }
}
