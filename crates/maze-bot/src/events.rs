//! The event stream from the automation task to the presentation task.

use std::sync::mpsc::Sender;

use log::warn;
use maze_core::Point;
use maze_paths::{Path, SearchEvent};

/// How an automated run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RunOutcome {
    /// A path was found and replayed to the end cell.
    Solved { score: u32 },
    /// The search exhausted the maze without reaching the end cell.
    NoSolution,
    /// Cancellation was requested; `score` counts the moves made so far.
    Cancelled { score: u32 },
}

/// One observable step of an automated run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BotEvent {
    /// A search node was expanded or closed.
    Search(SearchEvent),
    PathFound { path: Path },
    SearchFailed,
    /// The player is leaving `cell`; mark it as visited.
    Trail { cell: Point },
    /// The player moves to `to`. `last` is set on the final move.
    Step { to: Point, score: u32, last: bool },
    /// Always the final event of a run.
    Finished(RunOutcome),
}

/// Consumer of [`BotEvent`]s.
pub trait EventSink {
    fn emit(&mut self, event: BotEvent);
}

impl EventSink for Vec<BotEvent> {
    fn emit(&mut self, event: BotEvent) {
        self.push(event);
    }
}

/// Forwards events over a channel to another task.
///
/// If the receiving side hangs up, further events are dropped; the run
/// itself carries on.
pub struct ChannelSink {
    tx: Sender<BotEvent>,
    disconnected: bool,
}

impl ChannelSink {
    pub fn new(tx: Sender<BotEvent>) -> Self {
        Self {
            tx,
            disconnected: false,
        }
    }
}

impl EventSink for ChannelSink {
    fn emit(&mut self, event: BotEvent) {
        if self.disconnected {
            return;
        }
        if self.tx.send(event).is_err() {
            warn!("event receiver disconnected, dropping further events");
            self.disconnected = true;
        }
    }
}
