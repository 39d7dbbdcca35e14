//! Single-writer snapshot cell
//!
//! The engine publishes whole `GameState` values; readers only ever get an
//! `Arc` to a complete snapshot, never a partially updated one.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::sim::GameState;

#[derive(Debug)]
struct Slot {
    current: Arc<GameState>,
    /// Bumped on every publish
    version: u64,
}

/// Shared cell holding the latest published snapshot
#[derive(Debug)]
pub(crate) struct StateCell {
    slot: Mutex<Slot>,
}

impl StateCell {
    pub(crate) fn new(state: GameState) -> Self {
        Self {
            slot: Mutex::new(Slot {
                current: Arc::new(state),
                version: 0,
            }),
        }
    }

    // Publishing is a single Arc swap, so a poisoned slot still holds a whole snapshot
    fn lock(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Latest snapshot and its version
    pub(crate) fn load(&self) -> (Arc<GameState>, u64) {
        let slot = self.lock();
        (Arc::clone(&slot.current), slot.version)
    }

    /// Replace the snapshot in one step
    pub(crate) fn publish(&self, state: GameState) {
        let mut slot = self.lock();
        slot.current = Arc::new(state);
        slot.version += 1;
    }
}

/// Read-only view of the engine's snapshots (for renderers, debug overlays)
#[derive(Debug, Clone)]
pub struct StateObserver {
    cell: Arc<StateCell>,
    seen: Option<u64>,
}

impl StateObserver {
    pub(crate) fn new(cell: Arc<StateCell>) -> Self {
        Self { cell, seen: None }
    }

    /// Latest snapshot, whether or not it has been seen before
    pub fn latest(&mut self) -> Arc<GameState> {
        let (state, version) = self.cell.load();
        self.seen = Some(version);
        state
    }

    /// Latest snapshot if it was published since this observer last looked
    pub fn poll(&mut self) -> Option<Arc<GameState>> {
        let (state, version) = self.cell.load();
        if self.seen == Some(version) {
            return None;
        }
        self.seen = Some(version);
        Some(state)
    }
}
