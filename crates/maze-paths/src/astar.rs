use log::{debug, trace};
use maze_core::{Context, Point};

use crate::neighbors::Neighbors;
use crate::node::{Path, SearchNode};
use crate::recover::recover_path;
use crate::trace::{SearchEvent, SearchObserver};
use crate::traits::Maze;

/// Terminal state of a search run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchStatus {
    /// The end cell was reached; the closed set ends with its node.
    Succeeded,
    /// The open set ran dry: no path exists.
    Failed,
    /// The run observed a cancellation request and stopped early.
    Cancelled,
}

/// Result of [`Astar::run`]: the terminal status and the expansion history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    status: SearchStatus,
    closed: Vec<SearchNode>,
    expansions: usize,
}

impl SearchOutcome {
    #[inline]
    pub fn status(&self) -> SearchStatus {
        self.status
    }

    #[inline]
    pub fn is_success(&self) -> bool {
        self.status == SearchStatus::Succeeded
    }

    /// Closed set in insertion order.
    #[inline]
    pub fn closed(&self) -> &[SearchNode] {
        &self.closed
    }

    /// Number of nodes whose neighbors were examined.
    #[inline]
    pub fn expansions(&self) -> usize {
        self.expansions
    }

    /// Recover the start-to-end path. `None` unless the search succeeded.
    pub fn path(&self) -> Option<Path> {
        self.is_success().then(|| recover_path(&self.closed))
    }
}

/// A* search over a uniform-cost, 4-connected maze.
///
/// The engine is idle until [`run`](Self::run), which consumes it: every
/// run starts from fresh open and closed sets and cannot be resumed.
///
/// Selection takes the open node with the lowest `cost + heuristic`; among
/// equal scores the earliest inserted node wins. A position that has been
/// closed is never expanded or reopened again, which is sound here because
/// every edge costs 1 and the Manhattan heuristic is consistent.
pub struct Astar<'w, M: Maze + ?Sized> {
    maze: &'w M,
    open: Vec<SearchNode>,
    closed: Vec<SearchNode>,
    // Per-cell membership for `closed`, indexed by `maze.bounds()`.
    closed_mask: Vec<bool>,
    nbuf: Neighbors,
}

impl<'w, M: Maze + ?Sized> Astar<'w, M> {
    pub fn new(maze: &'w M) -> Self {
        Self {
            maze,
            open: Vec::new(),
            closed: Vec::new(),
            closed_mask: vec![false; maze.bounds().len()],
            nbuf: Neighbors::new(),
        }
    }

    /// Search from the maze's start to its end, reporting progress to
    /// `observer` and checking `ctx` before each expansion.
    pub fn run<O>(mut self, observer: &mut O, ctx: &Context) -> SearchOutcome
    where
        O: SearchObserver + ?Sized,
    {
        let maze = self.maze;
        let (start, end) = (maze.start(), maze.end());
        self.open
            .push(SearchNode::new(start, 0, maze.manhattan_distance(start, end)));

        let mut nbuf = std::mem::take(&mut self.nbuf);
        let mut expansions = 0;

        let status = loop {
            if ctx.is_cancelled() {
                break SearchStatus::Cancelled;
            }
            let Some(current) = self.pop_best() else {
                break SearchStatus::Failed;
            };

            // A cheaper duplicate already closed this position.
            if self.is_closed(current.pos) {
                continue;
            }

            if maze.is_end(current.pos) {
                self.close(current);
                observer.observe(SearchEvent::Closed(current));
                break SearchStatus::Succeeded;
            }

            expansions += 1;
            trace!(
                "expand {} cost={} heuristic={}",
                current.pos, current.cost, current.heuristic
            );
            observer.observe(SearchEvent::Expanded(current));

            let mut accepted = false;
            for &np in nbuf.cardinal(current.pos, |p| maze.is_passable(p)) {
                let n = SearchNode::new(np, current.cost + 1, maze.manhattan_distance(np, end));
                if self.is_closed(np) {
                    continue;
                }
                if self.open.iter().any(|o| o.pos == np && o.cost <= n.cost) {
                    continue;
                }
                self.open.push(n);
                accepted = true;
            }

            if accepted {
                self.close(current);
                observer.observe(SearchEvent::Closed(current));
            }
        };

        debug!(
            "search {:?}: {} expansions, {} closed, {} still open",
            status,
            expansions,
            self.closed.len(),
            self.open.len()
        );

        SearchOutcome {
            status,
            closed: self.closed,
            expansions,
        }
    }

    /// Remove and return the lowest-score open node, earliest first on ties.
    fn pop_best(&mut self) -> Option<SearchNode> {
        let (idx, _) = self
            .open
            .iter()
            .enumerate()
            .min_by_key(|(_, n)| n.score())?;
        Some(self.open.remove(idx))
    }

    fn is_closed(&self, p: Point) -> bool {
        self.maze
            .bounds()
            .index(p)
            .is_some_and(|i| self.closed_mask[i])
    }

    fn close(&mut self, node: SearchNode) {
        if let Some(i) = self.maze.bounds().index(node.pos) {
            self.closed_mask[i] = true;
        }
        self.closed.push(node);
    }
}

/// Run A* on `maze` without tracing or cancellation.
pub fn astar<M: Maze + ?Sized>(maze: &M) -> SearchOutcome {
    Astar::new(maze).run(&mut |_: SearchEvent| {}, &Context::new())
}

#[cfg(test)]
mod tests {
    use std::collections::{HashSet, VecDeque};

    use maze_core::{CellState, World, parse_rows};
    use proptest::prelude::*;

    use super::*;
    use crate::distance::manhattan;
    use crate::neighbors::Direction;

    fn open_world(start: Point, end: Point) -> World {
        let size = 8;
        let mut cells = vec![CellState::Open; 64];
        cells[(start.y * size + start.x) as usize] = CellState::Start;
        cells[(end.y * size + end.x) as usize] = CellState::End;
        World::new(size, cells).unwrap()
    }

    fn assert_valid_path(world: &World, path: &Path) {
        assert_eq!(path.first(), Some(world.start()));
        assert_eq!(path.last(), Some(world.end()));
        assert!(path.is_contiguous(), "path is not contiguous: {path:?}");
        for &p in path.cells() {
            assert!(world.is_passable(p), "path crosses a wall at {p}");
        }
    }

    /// Breadth-first distance from start to end, as a reference.
    fn bfs_distance(world: &World) -> Option<usize> {
        let bounds = world.bounds();
        let mut dist = vec![usize::MAX; bounds.len()];
        let mut queue = VecDeque::new();
        dist[bounds.index(world.start())?] = 0;
        queue.push_back(world.start());
        while let Some(p) = queue.pop_front() {
            let d = dist[bounds.index(p)?];
            if p == world.end() {
                return Some(d);
            }
            for q in Direction::ALL.map(|dir| p + dir.delta()) {
                if !world.is_passable(q) {
                    continue;
                }
                let qi = bounds.index(q)?;
                if dist[qi] == usize::MAX {
                    dist[qi] = d + 1;
                    queue.push_back(q);
                }
            }
        }
        None
    }

    #[test]
    fn open_grid_corner_to_corner() {
        let w = open_world(Point::new(0, 0), Point::new(7, 7));
        let outcome = astar(&w);
        assert_eq!(outcome.status(), SearchStatus::Succeeded);
        let path = outcome.path().unwrap();
        assert_eq!(path.len(), 15);
        assert_eq!(path.move_count(), 14);
        assert_valid_path(&w, &path);
    }

    #[test]
    fn open_grid_paths_are_straight_line_optimal() {
        let pairs = [
            (Point::new(0, 0), Point::new(7, 0)),
            (Point::new(3, 5), Point::new(3, 1)),
            (Point::new(6, 6), Point::new(1, 2)),
            (Point::new(0, 7), Point::new(7, 0)),
        ];
        for (s, e) in pairs {
            let w = open_world(s, e);
            let path = astar(&w).path().unwrap();
            assert_eq!(path.len() as i32, 1 + manhattan(s, e));
            assert_valid_path(&w, &path);
        }
    }

    #[test]
    fn wall_row_without_gap_fails() {
        let w = parse_rows([
            "s.......",
            "........",
            "........",
            "########",
            "........",
            "........",
            "........",
            ".......e",
        ])
        .unwrap();
        let outcome = astar(&w);
        assert_eq!(outcome.status(), SearchStatus::Failed);
        assert!(outcome.path().is_none());
        assert!(outcome.closed().iter().all(|n| n.pos.y < 3));
    }

    #[test]
    fn enclosed_end_fails() {
        let w = parse_rows([
            "s.......",
            "........",
            "....#...",
            "...#e#..",
            "....#...",
            "........",
            "........",
            "........",
        ])
        .unwrap();
        let outcome = astar(&w);
        assert_eq!(outcome.status(), SearchStatus::Failed);
        assert!(outcome.path().is_none());
    }

    #[test]
    fn walled_in_start_fails_without_closing_anything() {
        let w = parse_rows([
            "s#......",
            "#.......",
            "........",
            "........",
            "........",
            "........",
            "........",
            ".......e",
        ])
        .unwrap();
        let outcome = astar(&w);
        assert_eq!(outcome.status(), SearchStatus::Failed);
        assert!(outcome.closed().is_empty());
        assert_eq!(outcome.expansions(), 1);
    }

    #[test]
    fn wall_with_gap_forces_detour() {
        let w = parse_rows([
            "s..#....",
            "...#....",
            "...#e...",
            "........",
            "........",
            "........",
            "........",
            "........",
        ])
        .unwrap();
        let path = astar(&w).path().unwrap();
        let md = manhattan(w.start(), w.end()) as usize;
        assert_eq!(path.move_count(), md + 2);
        assert_valid_path(&w, &path);
        assert!(path.cells().contains(&Point::new(3, 3)));
    }

    #[test]
    fn u_turn_corridor() {
        let w = parse_rows([
            "s#e#####",
            "...#####",
            "########",
            "########",
            "########",
            "########",
            "########",
            "########",
        ])
        .unwrap();
        let path = astar(&w).path().unwrap();
        assert_eq!(
            path.cells(),
            &[
                Point::new(0, 0),
                Point::new(0, 1),
                Point::new(1, 1),
                Point::new(2, 1),
                Point::new(2, 0)
            ]
        );
    }

    #[test]
    fn equal_length_branches() {
        let w = parse_rows([
            "s.......",
            ".#......",
            "..e.....",
            "........",
            "........",
            "........",
            "........",
            "........",
        ])
        .unwrap();
        let path = astar(&w).path().unwrap();
        assert_eq!(path.len(), 5);
        assert_valid_path(&w, &path);
    }

    #[test]
    fn repeated_runs_agree() {
        let w = parse_rows([
            "s.......",
            ".##.###.",
            "........",
            ".###.##.",
            "........",
            ".##.###.",
            "........",
            "...#...e",
        ])
        .unwrap();
        let a = astar(&w);
        let b = astar(&w);
        assert_eq!(a.path().map(|p| p.len()), b.path().map(|p| p.len()));
        assert_eq!(a, b);
    }

    #[test]
    fn start_expansion_is_reported_first() {
        let w = open_world(Point::new(2, 2), Point::new(5, 2));
        let mut events: Vec<SearchEvent> = Vec::new();
        let outcome = Astar::new(&w).run(&mut events, &Context::new());
        assert_eq!(
            events.first(),
            Some(&SearchEvent::Expanded(SearchNode::new(Point::new(2, 2), 0, 3)))
        );
        assert_eq!(
            events.last(),
            Some(&SearchEvent::Closed(SearchNode::new(Point::new(5, 2), 3, 0)))
        );

        let closed: Vec<SearchNode> = events
            .iter()
            .filter_map(|e| match e {
                SearchEvent::Closed(n) => Some(*n),
                _ => None,
            })
            .collect();
        assert_eq!(closed, outcome.closed());

        let expanded = events
            .iter()
            .filter(|e| matches!(e, SearchEvent::Expanded(_)))
            .count();
        assert_eq!(expanded, outcome.expansions());
    }

    #[test]
    fn straight_run_expands_only_the_line() {
        // Every step toward the end keeps the score at 3; siblings score 5.
        let w = open_world(Point::new(2, 2), Point::new(5, 2));
        let outcome = astar(&w);
        let positions: Vec<Point> = outcome.closed().iter().map(|n| n.pos).collect();
        assert_eq!(
            positions,
            vec![
                Point::new(2, 2),
                Point::new(3, 2),
                Point::new(4, 2),
                Point::new(5, 2)
            ]
        );
    }

    #[test]
    fn cheaper_rediscovery_supersedes_stale_entry() {
        // The upper route reaches (2,2) at cost 5 before the lower one
        // finds it at cost 3. Both entries sit in the open set; the cheap
        // one is expanded and the stale one is skipped once popped.
        let w = parse_rows([
            "...#e...",
            "s#.#....",
            "...#....",
            "........",
            "........",
            "........",
            "........",
            "........",
        ])
        .unwrap();
        let mut events: Vec<SearchEvent> = Vec::new();
        let outcome = Astar::new(&w).run(&mut events, &Context::new());
        assert!(outcome.is_success());

        let expanded: Vec<(Point, i32)> = events
            .iter()
            .filter_map(|e| match e {
                SearchEvent::Expanded(n) => Some((n.pos, n.cost)),
                _ => None,
            })
            .collect();
        let p = Point::new;
        assert_eq!(
            expanded,
            vec![
                (p(0, 1), 0),
                (p(0, 0), 1),
                (p(1, 0), 2),
                (p(2, 0), 3),
                (p(0, 2), 1),
                (p(2, 1), 4),
                (p(1, 2), 2),
                (p(2, 2), 3),
                (p(0, 3), 2),
                (p(1, 3), 3),
                (p(2, 3), 4),
                (p(3, 3), 5),
                (p(4, 3), 6),
                (p(4, 2), 7),
                (p(4, 1), 8),
            ]
        );
        assert_eq!(outcome.expansions(), 15);

        // (1,3) is offered again at equal cost from (0,3) and dropped.
        let closed_at = |pos: Point| -> Vec<i32> {
            outcome
                .closed()
                .iter()
                .filter(|n| n.pos == pos)
                .map(|n| n.cost)
                .collect()
        };
        assert_eq!(closed_at(p(2, 2)), vec![3]);
        assert_eq!(closed_at(p(1, 3)), vec![3]);
        assert_eq!(outcome.closed().len(), 16);

        let path = outcome.path().unwrap();
        assert_valid_path(&w, &path);
        assert_eq!(path.move_count(), 9);
    }

    #[test]
    fn closed_positions_are_never_expanded_again() {
        let w = parse_rows([
            "s...#...",
            ".##.#.#.",
            ".#..#.#.",
            ".#.##.#.",
            ".#....#.",
            ".####.#.",
            "......#e",
            "#.......",
        ])
        .unwrap();
        let mut events = Vec::new();
        let outcome = Astar::new(&w).run(&mut events, &Context::new());
        assert!(outcome.is_success());

        let mut closed = HashSet::new();
        for ev in &events {
            match ev {
                SearchEvent::Expanded(n) => {
                    assert!(!closed.contains(&n.pos), "{} expanded after closing", n.pos)
                }
                SearchEvent::Closed(n) => assert!(closed.insert(n.pos)),
            }
        }
        assert_eq!(
            outcome.path().unwrap().move_count(),
            bfs_distance(&w).unwrap()
        );
    }

    #[test]
    fn cancelled_before_start() {
        let w = open_world(Point::new(0, 0), Point::new(7, 7));
        let ctx = Context::new();
        ctx.cancel();
        let outcome = Astar::new(&w).run(&mut |_: SearchEvent| {}, &ctx);
        assert_eq!(outcome.status(), SearchStatus::Cancelled);
        assert!(outcome.closed().is_empty());
        assert!(outcome.path().is_none());
    }

    #[test]
    fn cancelled_mid_search() {
        let w = open_world(Point::new(0, 0), Point::new(7, 7));
        let ctx = Context::new();
        let mut seen = 0;
        let cancel = ctx.clone();
        let outcome = Astar::new(&w).run(
            &mut |ev: SearchEvent| {
                if matches!(ev, SearchEvent::Expanded(_)) {
                    seen += 1;
                    if seen == 3 {
                        cancel.cancel();
                    }
                }
            },
            &ctx,
        );
        assert_eq!(outcome.status(), SearchStatus::Cancelled);
        assert_eq!(outcome.expansions(), 3);
    }

    fn arb_world() -> impl Strategy<Value = World> {
        (8i32..=12)
            .prop_flat_map(|size| {
                let n = (size * size) as usize;
                (
                    Just(size),
                    prop::collection::vec(prop::bool::weighted(0.3), n),
                    0..n,
                    0..n,
                )
            })
            .prop_filter("start and end must differ", |(_, _, s, e)| s != e)
            .prop_map(|(size, walls, s, e)| {
                let mut cells: Vec<CellState> = walls
                    .into_iter()
                    .map(|w| if w { CellState::Wall } else { CellState::Open })
                    .collect();
                cells[s] = CellState::Start;
                cells[e] = CellState::End;
                World::new(size, cells).unwrap()
            })
    }

    proptest! {
        #[test]
        fn matches_breadth_first_reference(world in arb_world()) {
            let outcome = astar(&world);
            match bfs_distance(&world) {
                Some(d) => {
                    prop_assert_eq!(outcome.status(), SearchStatus::Succeeded);
                    let path = outcome.path().unwrap();
                    prop_assert_eq!(path.move_count(), d);
                    prop_assert_eq!(path.first(), Some(world.start()));
                    prop_assert_eq!(path.last(), Some(world.end()));
                    prop_assert!(path.is_contiguous());
                    prop_assert_eq!(outcome.closed().last().map(|n| n.pos), Some(world.end()));
                }
                None => {
                    prop_assert_eq!(outcome.status(), SearchStatus::Failed);
                    prop_assert!(outcome.path().is_none());
                }
            }
        }

        #[test]
        fn closed_set_has_unique_positions(world in arb_world()) {
            let outcome = astar(&world);
            let mut seen = HashSet::new();
            for n in outcome.closed() {
                prop_assert!(seen.insert(n.pos));
            }
        }
    }
}
