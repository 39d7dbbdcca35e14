//! Attract-mode controller
//!
//! Plays the game through the same commands an input host would send. It only
//! reads snapshots, so it can never see or touch anything a player cannot.

use rand::Rng;

use crate::engine::Engine;
use crate::sim::GameState;

/// Seconds of warning before a ground obstacle reaches the player
const REACTION_TIME: f32 = 0.2;
/// Obstacles taller than this get a full (held) jump
const TALL_OBSTACLE: f32 = 90.0;
const SHORT_HOLD: f32 = 0.12;
const FULL_HOLD: f32 = 0.35;
/// Horizontal margin (seconds of travel) kept clear before diving
const DIVE_CLEARANCE: f32 = 0.1;

/// A command the autopilot wants issued
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    JumpStart,
    JumpEnd,
    FastFall,
}

impl Command {
    pub fn apply<R: Rng>(self, engine: &mut Engine<R>) {
        match self {
            Command::JumpStart => engine.jump_start(),
            Command::JumpEnd => engine.jump_end(),
            Command::FastFall => engine.fast_fall(),
        }
    }
}

/// Simple reflex player
#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    holding: bool,
    hold_left: f32,
    dived: bool,
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pick at most one command for this frame
    pub fn decide(&mut self, state: &GameState, dt: f32) -> Option<Command> {
        if state.is_game_over {
            *self = Self::default();
            return None;
        }

        let hitbox = state.player_hitbox();
        let ahead: Vec<_> = state
            .obstacles
            .iter()
            .filter(|o| o.x + o.width > hitbox.min.x)
            .collect();

        if state.is_grounded {
            self.holding = false;
            self.dived = false;

            let reach = hitbox.max.x + state.current_speed * REACTION_TIME;
            // Run under floating obstacles, jump the rest
            let threat = ahead
                .iter()
                .filter(|o| o.x < reach)
                .find(|o| o.kind.is_grounded())?;

            self.holding = true;
            self.hold_left = if threat.height > TALL_OBSTACLE {
                FULL_HOLD
            } else {
                SHORT_HOLD
            };
            return Some(Command::JumpStart);
        }

        if self.holding {
            self.hold_left -= dt;
            if self.hold_left <= 0.0 {
                self.holding = false;
                return Some(Command::JumpEnd);
            }
            return None;
        }

        let clearance = hitbox.max.x + state.current_speed * DIVE_CLEARANCE;
        let column_clear = ahead.iter().all(|o| o.x > clearance);
        if !self.dived && state.velocity_y < 0.0 && column_clear {
            self.dived = true;
            return Some(Command::FastFall);
        }

        None
    }

    /// Decide and send the command to `engine`
    pub fn drive<R: Rng>(&mut self, engine: &mut Engine<R>, dt: f32) {
        let state = engine.snapshot();
        if let Some(command) = self.decide(&state, dt) {
            log::trace!("Autopilot: {:?}", command);
            command.apply(engine);
        }
    }
}
