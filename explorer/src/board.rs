//! Presentation-side model of a run: folds bot events into a board.

use std::fmt::Write as _;
use std::sync::Arc;

use maze_bot::{BotEvent, RunOutcome};
use maze_core::{CellState, Point, World};
use maze_paths::SearchEvent;

/// What the front end knows about the run so far.
pub struct Board {
    world: Arc<World>,
    closed: Vec<bool>,
    trail: Vec<bool>,
    player: Point,
    score: u32,
    expanded: usize,
    path_moves: Option<usize>,
    outcome: Option<RunOutcome>,
}

impl Board {
    pub fn new(world: Arc<World>) -> Self {
        let len = world.bounds().len();
        let player = world.start();
        Self {
            world,
            closed: vec![false; len],
            trail: vec![false; len],
            player,
            score: 0,
            expanded: 0,
            path_moves: None,
            outcome: None,
        }
    }

    /// Apply one event. Returns true once the run has finished.
    pub fn update(&mut self, event: &BotEvent) -> bool {
        match event {
            BotEvent::Search(SearchEvent::Expanded(_)) => self.expanded += 1,
            BotEvent::Search(SearchEvent::Closed(node)) => self.mark(node.pos, Mark::Closed),
            BotEvent::PathFound { path } => self.path_moves = Some(path.move_count()),
            BotEvent::SearchFailed => {}
            BotEvent::Trail { cell } => self.mark(*cell, Mark::Trail),
            BotEvent::Step { to, score, .. } => {
                self.player = *to;
                self.score = *score;
            }
            BotEvent::Finished(outcome) => {
                self.outcome = Some(*outcome);
                return true;
            }
        }
        false
    }

    pub fn player(&self) -> Point {
        self.player
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn outcome(&self) -> Option<RunOutcome> {
        self.outcome
    }

    fn mark(&mut self, p: Point, mark: Mark) {
        let Some(i) = self.world.bounds().index(p) else {
            return;
        };
        match mark {
            Mark::Closed => self.closed[i] = true,
            Mark::Trail => self.trail[i] = true,
        }
    }

    fn glyph(&self, p: Point, cell: CellState) -> char {
        if p == self.player {
            return '@';
        }
        if cell != CellState::Open {
            return cell.symbol();
        }
        let Some(i) = self.world.bounds().index(p) else {
            return ' ';
        };
        if self.trail[i] {
            'o'
        } else if self.closed[i] {
            ':'
        } else {
            '.'
        }
    }

    /// Render the board followed by a status line.
    pub fn draw(&self) -> String {
        let size = self.world.size();
        let mut out = String::with_capacity(((size + 1) * size) as usize + 64);
        for (p, cell) in self.world.iter() {
            out.push(self.glyph(p, cell));
            if p.x == size - 1 {
                out.push('\n');
            }
        }
        let _ = match self.outcome {
            Some(RunOutcome::Solved { score }) => write!(out, "solved in {score} moves"),
            Some(RunOutcome::NoSolution) => write!(out, "no solution"),
            Some(RunOutcome::Cancelled { score }) => write!(out, "cancelled after {score} moves"),
            None => write!(out, "running, score {}", self.score),
        };
        let _ = write!(out, " ({} nodes expanded", self.expanded);
        if let Some(moves) = self.path_moves {
            let _ = write!(out, ", path of {moves} moves");
        }
        out.push(')');
        out
    }
}

#[derive(Clone, Copy)]
enum Mark {
    Closed,
    Trail,
}
