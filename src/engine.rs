//! Run state machine and command surface
//!
//! The engine owns the only writable copy of the game: each command or tick
//! clones the current snapshot, advances the clone, and publishes it whole.
//! States are Running (`!is_game_over`) and GameOver.

use std::sync::Arc;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::MAX_DT;
use crate::sim::{GameEvent, GameState, TickInput, physics, tick};
use crate::snapshot::{StateCell, StateObserver};

/// Undrained feedback events kept before the oldest are dropped
pub const MAX_PENDING_EVENTS: usize = 64;

const NANOS_PER_SEC: f64 = 1_000_000_000.0;

/// The game engine
pub struct Engine<R = Pcg32> {
    cell: Arc<StateCell>,
    rng: R,
    /// Timestamp of the previous tick; `None` until the first tick after start/reset
    last_nanos: Option<u64>,
    jump_held: bool,
    events: Vec<GameEvent>,
}

impl Engine<Pcg32> {
    /// Engine with a seeded PCG generator
    pub fn new(seed: u64) -> Self {
        log::info!("Engine created (seed {})", seed);
        Self::with_rng(Pcg32::seed_from_u64(seed))
    }
}

impl<R: Rng> Engine<R> {
    /// Engine drawing all randomness from `rng`
    pub fn with_rng(rng: R) -> Self {
        Self::from_state(GameState::new(), rng)
    }

    pub(crate) fn from_state(state: GameState, rng: R) -> Self {
        Self {
            cell: Arc::new(StateCell::new(state)),
            rng,
            last_nanos: None,
            jump_held: false,
            events: Vec::new(),
        }
    }

    /// Current snapshot
    pub fn snapshot(&self) -> Arc<GameState> {
        self.cell.load().0
    }

    /// Read-only observer for a renderer or debug view
    pub fn observe(&self) -> StateObserver {
        StateObserver::new(Arc::clone(&self.cell))
    }

    pub fn is_jump_held(&self) -> bool {
        self.jump_held
    }

    /// Drain queued feedback events (oldest first)
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Press jump. Jumps when grounded; restarts the run after a game over.
    pub fn jump_start(&mut self) {
        let current = self.snapshot();
        if current.is_game_over {
            self.reset();
            return;
        }

        let mut next = GameState::clone(&current);
        if let Some(event) = physics::jump(&mut next, &mut self.rng) {
            log::debug!("Jump at score {}", next.score);
            self.jump_held = true;
            self.push_event(event);
            self.cell.publish(next);
        }
    }

    /// Release jump; cuts the jump short if still rising fast
    pub fn jump_end(&mut self) {
        self.jump_held = false;
        let mut next = GameState::clone(&self.snapshot());
        if physics::release_jump(&mut next) {
            self.cell.publish(next);
        }
    }

    /// Drop faster while airborne
    pub fn fast_fall(&mut self) {
        let mut next = GameState::clone(&self.snapshot());
        if physics::fast_fall(&mut next) {
            self.cell.publish(next);
        }
    }

    /// Start a fresh run
    pub fn reset(&mut self) {
        let previous = self.snapshot();
        log::info!(
            "Run reset (previous score {}, orbs {})",
            previous.score,
            previous.orbs_collected
        );
        self.last_nanos = None;
        self.jump_held = false;
        self.cell.publish(GameState::new());
    }

    /// Advance to `nanos` (monotonic clock).
    ///
    /// The first call after construction or reset only records the baseline.
    /// Timestamps that do not move forward are ignored.
    pub fn tick(&mut self, nanos: u64) {
        let Some(last) = self.last_nanos else {
            self.last_nanos = Some(nanos);
            return;
        };
        if nanos <= last {
            if nanos < last {
                log::trace!("Ignoring timestamp {} older than {}", nanos, last);
            }
            return;
        }
        self.last_nanos = Some(nanos);

        let dt = ((nanos - last) as f64 / NANOS_PER_SEC).min(MAX_DT as f64) as f32;

        let current = self.snapshot();
        let was_running = !current.is_game_over;
        let mut next = GameState::clone(&current);
        let input = TickInput {
            jump_held: self.jump_held,
        };
        let events = tick(&mut next, &input, dt, &mut self.rng);

        if was_running {
            next.world_tick = nanos;
            if next.is_game_over {
                log::info!(
                    "Game over: score {}, distance {:.0}, orbs {}, speed {:.0}",
                    next.score,
                    next.distance,
                    next.orbs_collected,
                    next.current_speed
                );
            }
        }

        for event in events {
            self.push_event(event);
        }
        // Settled game over: nothing left to show
        if next != *current {
            self.cell.publish(next);
        }
    }

    fn push_event(&mut self, event: GameEvent) {
        if self.events.len() >= MAX_PENDING_EVENTS {
            self.events.remove(0);
        }
        self.events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::{Obstacle, ObstacleKind, Orb};
    use proptest::prelude::{Just, Strategy, any, prop};
    use proptest::test_runner::TestCaseError;
    use proptest::{prop_assert, prop_assert_eq, prop_oneof, proptest};

    const FRAME: u64 = 16_666_667;
    const T0: u64 = 1_000_000_000;

    fn colliding_state() -> GameState {
        let mut state = GameState::new();
        let id = state.next_entity_id();
        state.obstacles.push(Obstacle {
            id,
            x: PLAYER_X,
            width: PLAYER_SIZE,
            height: PLAYER_SIZE,
            kind: ObstacleKind::Block,
        });
        state
    }

    #[test]
    fn test_first_tick_only_sets_baseline() {
        let mut engine = Engine::new(1);
        engine.tick(T0);
        assert_eq!(*engine.snapshot(), GameState::new());

        engine.tick(T0 + FRAME);
        let state = engine.snapshot();
        assert!(state.distance > 0.0);
        assert_eq!(state.world_tick, T0 + FRAME);
    }

    #[test]
    fn test_stale_timestamps_are_ignored() {
        let mut engine = Engine::new(1);
        engine.tick(T0);
        engine.tick(T0 + FRAME);
        let before = engine.snapshot();

        engine.tick(T0);
        engine.tick(T0 + FRAME);
        assert_eq!(*engine.snapshot(), *before);
    }

    #[test]
    fn test_long_pause_is_clamped() {
        let mut engine = Engine::new(1);
        engine.tick(T0);
        engine.tick(T0 + 30 * 1_000_000_000);
        let state = engine.snapshot();
        assert!((state.distance - START_SPEED * MAX_DT).abs() < 1.0);
    }

    #[test]
    fn test_jump_arc_returns_to_ground() {
        let mut engine = Engine::new(2024);
        engine.tick(T0);
        engine.jump_start();
        assert!(engine.is_jump_held());

        let mut heights = Vec::new();
        for frame in 1..=60 {
            engine.tick(T0 + frame * FRAME);
            heights.push(engine.snapshot().player_y);
        }

        let peak_idx = heights
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i)
            .unwrap_or(0);
        assert!(heights[peak_idx] > 100.0);
        assert!(peak_idx > 0 && peak_idx < heights.len() - 1);
        assert!(heights[..peak_idx].windows(2).all(|w| w[0] <= w[1]));
        assert!(heights[peak_idx..].windows(2).all(|w| w[0] >= w[1]));

        let state = engine.snapshot();
        assert!(state.is_grounded);
        assert_eq!(state.player_y, GROUND_Y);
        assert!(!state.is_game_over);
        assert!(engine.take_events().contains(&GameEvent::Landed));
    }

    #[test]
    fn test_collision_ends_run() {
        let mut engine = Engine::from_state(colliding_state(), Pcg32::seed_from_u64(1));
        engine.tick(T0);
        engine.tick(T0 + FRAME);

        let state = engine.snapshot();
        assert!(state.is_game_over);
        assert_eq!(state.camera_shake, CAMERA_SHAKE_MAX);
        assert!(
            engine
                .take_events()
                .iter()
                .any(|e| matches!(e, GameEvent::Crashed { .. }))
        );
    }

    #[test]
    fn test_orb_pickup_scores_bonus_plus_distance() {
        let mut with_orb = GameState::new();
        let center = with_orb.player_center();
        let id = with_orb.next_entity_id();
        with_orb.orbs.push(Orb {
            id,
            x: center.x,
            y: center.y,
        });

        let mut engine = Engine::from_state(with_orb, Pcg32::seed_from_u64(8));
        let mut baseline = Engine::new(8);
        for e in [&mut engine, &mut baseline] {
            e.tick(T0);
            e.tick(T0 + FRAME);
        }

        let state = engine.snapshot();
        let passive = baseline.snapshot().score;
        assert!(state.orbs.is_empty());
        assert_eq!(state.score, ORB_BONUS + passive);
        assert_eq!(passive, crate::sim::distance_points(0.0, state.distance));
    }

    #[test]
    fn test_jump_after_game_over_restarts() {
        let mut engine = Engine::from_state(colliding_state(), Pcg32::seed_from_u64(1));
        engine.tick(T0);
        engine.tick(T0 + FRAME);
        assert!(engine.snapshot().is_game_over);

        engine.jump_start();
        let state = engine.snapshot();
        assert_eq!(*state, GameState::new());
        assert!(!engine.is_jump_held());

        // Baseline was reset too: the next tick does not advance
        engine.tick(T0 + 100 * FRAME);
        assert_eq!(*engine.snapshot(), GameState::new());
    }

    #[test]
    fn test_commands_ignored_when_inapplicable() {
        let mut engine = Engine::new(5);
        let mut observer = engine.observe();
        observer.poll();

        engine.fast_fall();
        engine.jump_end();
        assert!(observer.poll().is_none());

        engine.jump_start();
        let airborne = engine.snapshot();
        assert!(!airborne.is_grounded);
        engine.jump_start();
        assert_eq!(engine.snapshot().velocity_y, airborne.velocity_y);
    }

    #[test]
    fn test_jump_end_cuts_ascent() {
        let mut engine = Engine::new(5);
        engine.tick(T0);
        engine.jump_start();
        engine.tick(T0 + FRAME);
        let rising = engine.snapshot().velocity_y;

        engine.jump_end();
        assert!(!engine.is_jump_held());
        assert_eq!(engine.snapshot().velocity_y, rising * JUMP_CUT_FACTOR);
    }

    #[test]
    fn test_fast_fall_while_airborne() {
        let mut engine = Engine::new(5);
        engine.tick(T0);
        engine.jump_start();
        engine.tick(T0 + FRAME);
        let vy = engine.snapshot().velocity_y;

        engine.fast_fall();
        assert_eq!(engine.snapshot().velocity_y, vy - FAST_FALL_IMPULSE);
    }

    #[test]
    fn test_reset_matches_fresh_engine() {
        let mut engine = Engine::new(3);
        engine.tick(T0);
        engine.jump_start();
        for frame in 1..200 {
            engine.tick(T0 + frame * FRAME);
        }
        engine.reset();
        assert_eq!(*engine.snapshot(), *Engine::new(99).snapshot());
    }

    #[test]
    fn test_first_tick_after_reset_is_a_new_baseline() {
        let mut engine = Engine::new(0);
        engine.tick(T0);
        engine.reset();

        // Older than anything seen before, but no baseline exists yet
        engine.tick(T0 - 5 * FRAME);
        assert_eq!(*engine.snapshot(), GameState::new());

        engine.tick(T0);
        let state = engine.snapshot();
        assert!(state.distance > 0.0);
        assert_eq!(state.world_tick, T0);
    }

    #[test]
    fn test_settled_game_over_publishes_nothing() {
        let mut engine = Engine::from_state(colliding_state(), Pcg32::seed_from_u64(1));
        let mut observer = engine.observe();
        engine.tick(T0);
        engine.tick(T0 + FRAME);
        assert!(observer.poll().is_some_and(|s| s.is_game_over));

        // Shake decays to zero well within a second
        let mut now = T0 + FRAME;
        for _ in 0..60 {
            now += FRAME;
            engine.tick(now);
        }
        assert_eq!(engine.snapshot().camera_shake, 0.0);
        observer.poll();

        engine.tick(now + FRAME);
        engine.tick(now + 2 * FRAME);
        assert!(observer.poll().is_none());
    }

    #[test]
    fn test_pending_events_are_bounded() {
        let mut engine = Engine::new(3);
        for _ in 0..(MAX_PENDING_EVENTS * 2) {
            engine.jump_start();
            engine.reset();
        }
        assert_eq!(engine.take_events().len(), MAX_PENDING_EVENTS);
        assert!(engine.take_events().is_empty());
    }

    #[derive(Debug, Clone)]
    enum Action {
        Advance(u64),
        Rewind(u64),
        JumpStart,
        JumpEnd,
        FastFall,
        Reset,
    }

    fn action() -> impl Strategy<Value = Action> {
        prop_oneof![
            12 => (0u64..150_000_000).prop_map(Action::Advance),
            1 => (0u64..50_000_000).prop_map(Action::Rewind),
            3 => Just(Action::JumpStart),
            3 => Just(Action::JumpEnd),
            2 => Just(Action::FastFall),
            1 => Just(Action::Reset),
        ]
    }

    fn check_invariants(state: &GameState) -> Result<(), TestCaseError> {
        prop_assert!(state.player_y.is_finite() && state.velocity_y.is_finite());
        prop_assert!(state.player_y >= GROUND_Y);
        if state.is_grounded {
            prop_assert_eq!(state.player_y, GROUND_Y);
            prop_assert_eq!(state.velocity_y, 0.0);
        }
        prop_assert!(state.current_speed >= START_SPEED && state.current_speed <= MAX_SPEED);
        prop_assert!(state.camera_shake >= 0.0 && state.camera_shake <= CAMERA_SHAKE_MAX);

        prop_assert!(state.obstacles.iter().all(|o| o.x >= DESPAWN_X));
        prop_assert!(state.obstacles.windows(2).all(|w| w[0].x < w[1].x));
        prop_assert!(state.orbs.iter().all(|o| o.x >= DESPAWN_X));
        prop_assert!(
            state
                .particles
                .iter()
                .all(|p| p.life > 0.0 && p.life <= 1.0 && p.pos.x >= DESPAWN_X)
        );
        prop_assert!(state.particles.len() <= MAX_PARTICLES);

        let mut ids: Vec<u64> = state
            .obstacles
            .iter()
            .map(|o| o.id)
            .chain(state.orbs.iter().map(|o| o.id))
            .chain(state.particles.iter().map(|p| p.id))
            .collect();
        let total = ids.len();
        ids.sort_unstable();
        ids.dedup();
        prop_assert_eq!(ids.len(), total);
        Ok(())
    }

    proptest! {
        #[test]
        fn prop_invariants_hold(
            seed in any::<u64>(),
            actions in prop::collection::vec(action(), 1..400),
        ) {
            let mut engine = Engine::new(seed);
            let mut now = T0;
            engine.tick(now);

            for action in actions {
                let before = engine.snapshot();
                match action {
                    Action::Advance(d) => {
                        now += d;
                        engine.tick(now);
                        let after = engine.snapshot();
                        if !before.is_game_over {
                            prop_assert!(after.score >= before.score);
                            prop_assert!(after.current_speed >= before.current_speed);
                        }
                    }
                    Action::Rewind(d) => {
                        engine.tick(now.saturating_sub(d));
                        let after = engine.snapshot();
                        prop_assert_eq!(&*after, &*before);
                    }
                    Action::JumpStart => {
                        // Restarting after a crash drops the baseline
                        engine.jump_start();
                        engine.tick(now);
                    }
                    Action::JumpEnd => engine.jump_end(),
                    Action::FastFall => engine.fast_fall(),
                    Action::Reset => {
                        engine.reset();
                        engine.tick(now);
                    }
                }
                check_invariants(&engine.snapshot())?;
            }
        }

        #[test]
        fn prop_game_over_freezes_everything_but_shake(
            seed in any::<u64>(),
            deltas in prop::collection::vec(0u64..200_000_000, 1..100),
            fast_fall in any::<bool>(),
        ) {
            let mut engine = Engine::from_state(colliding_state(), Pcg32::seed_from_u64(seed));
            let mut now = T0;
            engine.tick(now);
            now += FRAME;
            engine.tick(now);

            let frozen = engine.snapshot();
            prop_assert!(frozen.is_game_over);

            let mut shake = frozen.camera_shake;
            for d in deltas {
                now += d;
                engine.tick(now);
                if fast_fall {
                    engine.fast_fall();
                }
                engine.jump_end();

                let state = engine.snapshot();
                prop_assert!(state.camera_shake <= shake);
                shake = state.camera_shake;

                let mut unshaken = GameState::clone(&state);
                unshaken.camera_shake = frozen.camera_shake;
                prop_assert_eq!(&unshaken, &*frozen);
            }
        }
    }
}
