//! Paced replay of a found path, one cell at a time.

use std::thread;
use std::time::Duration;

use log::debug;
use maze_core::Context;
use maze_paths::Path;

use crate::events::{BotEvent, EventSink};
use crate::player::PlayerHandle;

/// Result of replaying a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Replay {
    Completed { score: u32 },
    Cancelled { score: u32 },
}

/// Walks the player along a path, pausing `delay` after each move.
#[derive(Debug, Clone)]
pub struct MoveExecutor {
    delay: Duration,
}

impl MoveExecutor {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Replay `path`, whose first cell is where the player stands.
    ///
    /// For each following cell: a [`BotEvent::Trail`] for the cell being
    /// left (except the start), a [`BotEvent::Step`] with the new score,
    /// the delay, then the position is committed to `player`.
    ///
    /// # Panics
    ///
    /// If `path` is empty.
    pub fn execute<S>(
        &self,
        path: &Path,
        player: &PlayerHandle,
        sink: &mut S,
        ctx: &Context,
    ) -> Replay
    where
        S: EventSink + ?Sized,
    {
        assert!(!path.is_empty(), "cannot replay an empty path");
        debug_assert!(path.is_contiguous(), "path has a gap: {path:?}");

        let cells = path.cells();
        let mut score = 0;
        for (i, &to) in cells.iter().enumerate().skip(1) {
            if ctx.is_cancelled() {
                debug!("replay cancelled after {score} moves");
                return Replay::Cancelled { score };
            }
            if i > 1 {
                sink.emit(BotEvent::Trail { cell: cells[i - 1] });
            }
            let last = i == cells.len() - 1;
            sink.emit(BotEvent::Step {
                to,
                score: score + 1,
                last,
            });
            score += 1;
            if !self.delay.is_zero() {
                thread::sleep(self.delay);
            }
            player.commit(to, score);
            debug!("moved to {to}, score {score}");
        }
        Replay::Completed { score }
    }
}

#[cfg(test)]
mod tests {
    use maze_core::Point;

    use super::*;

    fn straight_path(len: i32) -> Path {
        Path::new((0..len).map(|x| Point::new(x, 0)).collect())
    }

    #[test]
    fn replays_every_move() {
        let path = straight_path(4);
        let player = PlayerHandle::new(Point::new(0, 0));
        let mut events: Vec<BotEvent> = Vec::new();
        let replay = MoveExecutor::new(Duration::ZERO).execute(
            &path,
            &player,
            &mut events,
            &Context::new(),
        );
        assert_eq!(replay, Replay::Completed { score: 3 });
        assert_eq!(
            events,
            vec![
                BotEvent::Step {
                    to: Point::new(1, 0),
                    score: 1,
                    last: false
                },
                BotEvent::Trail {
                    cell: Point::new(1, 0)
                },
                BotEvent::Step {
                    to: Point::new(2, 0),
                    score: 2,
                    last: false
                },
                BotEvent::Trail {
                    cell: Point::new(2, 0)
                },
                BotEvent::Step {
                    to: Point::new(3, 0),
                    score: 3,
                    last: true
                },
            ]
        );
        let state = player.snapshot();
        assert_eq!(state.pos, Point::new(3, 0));
        assert_eq!(state.score, 3);
    }

    #[test]
    fn single_cell_path_makes_no_moves() {
        let path = straight_path(1);
        let player = PlayerHandle::new(Point::new(0, 0));
        let mut events: Vec<BotEvent> = Vec::new();
        let replay = MoveExecutor::new(Duration::ZERO).execute(
            &path,
            &player,
            &mut events,
            &Context::new(),
        );
        assert_eq!(replay, Replay::Completed { score: 0 });
        assert!(events.is_empty());
    }

    #[test]
    fn cancelled_replay_stops_immediately() {
        let path = straight_path(5);
        let player = PlayerHandle::new(Point::new(0, 0));
        let ctx = Context::new();
        ctx.cancel();
        let mut events: Vec<BotEvent> = Vec::new();
        let replay = MoveExecutor::new(Duration::ZERO).execute(&path, &player, &mut events, &ctx);
        assert_eq!(replay, Replay::Cancelled { score: 0 });
        assert!(events.is_empty());
        assert_eq!(player.snapshot().pos, Point::new(0, 0));
    }

    #[test]
    fn delay_paces_the_replay() {
        let path = straight_path(3);
        let player = PlayerHandle::new(Point::new(0, 0));
        let started = std::time::Instant::now();
        MoveExecutor::new(Duration::from_millis(10)).execute(
            &path,
            &player,
            &mut Vec::<BotEvent>::new(),
            &Context::new(),
        );
        assert!(started.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    #[should_panic(expected = "empty path")]
    fn empty_path_is_a_contract_violation() {
        let player = PlayerHandle::new(Point::new(0, 0));
        MoveExecutor::new(Duration::ZERO).execute(
            &Path::default(),
            &player,
            &mut Vec::<BotEvent>::new(),
            &Context::new(),
        );
    }
}
