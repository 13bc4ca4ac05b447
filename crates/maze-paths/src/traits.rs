use maze_core::{Point, Range, World};

use crate::distance::manhattan;

/// Read-only view of a maze, as needed by the search engine.
pub trait Maze {
    /// Rectangle enclosing every cell the search may visit.
    fn bounds(&self) -> Range;

    fn start(&self) -> Point;

    fn end(&self) -> Point;

    /// False iff `p` is out of bounds or a wall.
    fn is_passable(&self, p: Point) -> bool;

    fn is_end(&self, p: Point) -> bool {
        p == self.end()
    }

    /// Heuristic distance between two cells.
    fn manhattan_distance(&self, a: Point, b: Point) -> i32 {
        manhattan(a, b)
    }
}

impl Maze for World {
    fn bounds(&self) -> Range {
        World::bounds(self)
    }

    fn start(&self) -> Point {
        World::start(self)
    }

    fn end(&self) -> Point {
        World::end(self)
    }

    fn is_passable(&self, p: Point) -> bool {
        World::is_passable(self, p)
    }

    fn is_end(&self, p: Point) -> bool {
        World::is_end(self, p)
    }
}
