//! The automation task: wait for the front end, search, replay.

use std::io;
use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::{debug, info};
use maze_core::{Context, World};
use maze_paths::{Astar, SearchEvent, SearchStatus};

use crate::config::{Algorithm, BotConfig};
use crate::events::{BotEvent, ChannelSink, EventSink, RunOutcome};
use crate::executor::{MoveExecutor, Replay};
use crate::gate::ReadyGate;
use crate::player::{PlayerHandle, PlayerState};

/// An automated player for one world.
///
/// A run goes through three phases, all reported to an [`EventSink`]:
///
/// 1. block until the [`ReadyGate`] opens (or cancellation is requested);
/// 2. search with the configured algorithm, forwarding every expansion;
/// 3. on success, replay the recovered path with the configured pacing.
///
/// The run always ends with a [`BotEvent::Finished`].
pub struct Bot {
    world: Arc<World>,
    config: BotConfig,
    gate: ReadyGate,
    ctx: Context,
    player: PlayerHandle,
}

impl Bot {
    pub fn new(world: Arc<World>, config: BotConfig) -> Self {
        let player = PlayerHandle::new(world.start());
        Self {
            world,
            config,
            gate: ReadyGate::new(),
            ctx: Context::new(),
            player,
        }
    }

    /// The gate the presentation task opens once it is set up.
    pub fn gate(&self) -> &ReadyGate {
        &self.gate
    }

    pub fn player(&self) -> &PlayerHandle {
        &self.player
    }

    /// Play on the current thread, blocking until the run ends.
    pub fn run<S>(&self, sink: &mut S) -> RunOutcome
    where
        S: EventSink + ?Sized,
    {
        let outcome = self.play(sink);
        info!("run finished: {outcome:?}");
        sink.emit(BotEvent::Finished(outcome));
        outcome
    }

    /// Play on a dedicated thread, sending events over `tx`.
    pub fn spawn(self, tx: Sender<BotEvent>) -> io::Result<BotHandle> {
        let gate = self.gate.clone();
        let ctx = self.ctx.clone();
        let player = self.player.clone();
        let thread = thread::Builder::new()
            .name("maze-bot".into())
            .spawn(move || self.run(&mut ChannelSink::new(tx)))?;
        Ok(BotHandle {
            thread,
            gate,
            ctx,
            player,
        })
    }

    fn play<S>(&self, sink: &mut S) -> RunOutcome
    where
        S: EventSink + ?Sized,
    {
        if !self.wait_ready() {
            return RunOutcome::Cancelled { score: 0 };
        }

        let world = &*self.world;
        info!(
            "{} search from {} to {} on a {}x{} grid",
            self.config.algorithm,
            world.start(),
            world.end(),
            world.size(),
            world.size()
        );
        let outcome = match self.config.algorithm {
            Algorithm::Astar => Astar::new(world).run(
                &mut |ev: SearchEvent| sink.emit(BotEvent::Search(ev)),
                &self.ctx,
            ),
        };

        let path = match outcome.status() {
            SearchStatus::Cancelled => return RunOutcome::Cancelled { score: 0 },
            SearchStatus::Failed => {
                info!("no solution after {} expansions", outcome.expansions());
                sink.emit(BotEvent::SearchFailed);
                return RunOutcome::NoSolution;
            }
            SearchStatus::Succeeded => match outcome.path() {
                Some(path) => path,
                None => return RunOutcome::NoSolution,
            },
        };
        info!(
            "path of {} moves found after {} expansions",
            path.move_count(),
            outcome.expansions()
        );
        sink.emit(BotEvent::PathFound { path: path.clone() });

        let executor = MoveExecutor::new(self.config.step_delay);
        match executor.execute(&path, &self.player, sink, &self.ctx) {
            Replay::Completed { score } => RunOutcome::Solved { score },
            Replay::Cancelled { score } => RunOutcome::Cancelled { score },
        }
    }

    /// Returns false if cancelled before the gate opened.
    fn wait_ready(&self) -> bool {
        let poll = self.config.ready_poll.max(Duration::from_millis(1));
        loop {
            if self.gate.wait_timeout(poll) {
                return true;
            }
            if self.ctx.is_cancelled() {
                return false;
            }
            debug!("waiting for the presentation task");
        }
    }
}

/// Handle to a bot running on its own thread.
pub struct BotHandle {
    thread: JoinHandle<RunOutcome>,
    gate: ReadyGate,
    ctx: Context,
    player: PlayerHandle,
}

impl BotHandle {
    /// Signal that the presentation side is ready; the bot starts searching.
    pub fn ready(&self) {
        self.gate.open();
    }

    /// Ask the bot to stop at its next step boundary.
    pub fn cancel(&self) {
        self.ctx.cancel();
    }

    /// Current player position and score.
    pub fn player(&self) -> PlayerState {
        self.player.snapshot()
    }

    /// Wait for the run to end.
    pub fn join(self) -> thread::Result<RunOutcome> {
        self.thread.join()
    }
}
