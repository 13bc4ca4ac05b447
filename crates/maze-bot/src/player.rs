//! The player's position and score, shared between tasks.

use std::sync::{Arc, Mutex, PoisonError};

use maze_core::Point;

/// A copy of the player's state at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerState {
    pub pos: Point,
    /// Moves made so far.
    pub score: u32,
}

/// Guarded handle to the player state.
///
/// Only the automation task writes through it (via the move executor);
/// every other reader gets a consistent copy from
/// [`snapshot`](Self::snapshot).
#[derive(Clone, Debug)]
pub struct PlayerHandle {
    state: Arc<Mutex<PlayerState>>,
}

impl PlayerHandle {
    /// A player standing on `start` with no moves.
    pub fn new(start: Point) -> Self {
        Self {
            state: Arc::new(Mutex::new(PlayerState {
                pos: start,
                score: 0,
            })),
        }
    }

    pub fn snapshot(&self) -> PlayerState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn commit(&self, pos: Point, score: u32) {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = PlayerState { pos, score };
    }
}
