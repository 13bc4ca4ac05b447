use maze_core::Point;

/// A node produced by expanding a cell during search.
///
/// Nodes are never updated once created: rediscovering a cell at a lower
/// cost yields a fresh node alongside the old one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchNode {
    pub pos: Point,
    /// Edges traversed from the start cell.
    pub cost: i32,
    /// Manhattan distance from `pos` to the end cell.
    pub heuristic: i32,
}

impl SearchNode {
    #[inline]
    pub const fn new(pos: Point, cost: i32, heuristic: i32) -> Self {
        Self {
            pos,
            cost,
            heuristic,
        }
    }

    /// Priority key: `cost + heuristic`.
    #[inline]
    pub const fn score(&self) -> i32 {
        self.cost + self.heuristic
    }
}

/// An ordered sequence of cells from start to end, both included.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path(Vec<Point>);

impl Path {
    pub fn new(cells: Vec<Point>) -> Self {
        Self(cells)
    }

    #[inline]
    pub fn cells(&self) -> &[Point] {
        &self.0
    }

    /// Number of cells, endpoints included.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of single-cell moves needed to walk the path.
    #[inline]
    pub fn move_count(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    pub fn first(&self) -> Option<Point> {
        self.0.first().copied()
    }

    pub fn last(&self) -> Option<Point> {
        self.0.last().copied()
    }

    /// Whether every consecutive pair of cells is 4-adjacent.
    pub fn is_contiguous(&self) -> bool {
        self.0.windows(2).all(|w| w[0].is_adjacent(w[1]))
    }
}
