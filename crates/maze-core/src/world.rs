//! The maze itself: [`CellState`] and the immutable [`World`].
//!
//! A world is square (`size` × `size`, `size` ≥ [`MIN_SIZE`]) and holds
//! exactly one start cell and exactly one end cell. Once built it is never
//! mutated; tasks share it behind an `Arc`.

use std::fmt;

use thiserror::Error;

use crate::geom::{Point, Range};

/// Smallest accepted side length of a world.
pub const MIN_SIZE: i32 = 8;

/// State of a single maze cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellState {
    #[default]
    Open,
    Start,
    End,
    Wall,
}

impl CellState {
    /// Decode a map-file symbol.
    pub fn from_symbol(ch: char) -> Option<Self> {
        match ch {
            '.' => Some(Self::Open),
            's' => Some(Self::Start),
            'e' => Some(Self::End),
            '#' => Some(Self::Wall),
            _ => None,
        }
    }

    /// The map-file symbol for this state.
    pub fn symbol(self) -> char {
        match self {
            Self::Open => '.',
            Self::Start => 's',
            Self::End => 'e',
            Self::Wall => '#',
        }
    }

    #[inline]
    pub fn is_wall(self) -> bool {
        self == Self::Wall
    }
}

/// Reasons a set of cells does not form a valid world.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WorldError {
    #[error("grid size {size} is below the minimum of {}", MIN_SIZE)]
    Undersized { size: i32 },
    #[error("expected {expected} cells for the grid, got {got}")]
    CellCount { expected: usize, got: usize },
    #[error("grid has no start cell")]
    MissingStart,
    #[error("grid has no end cell")]
    MissingEnd,
    #[error("grid has a second start cell at {second} (first at {first})")]
    DuplicateStart { first: Point, second: Point },
    #[error("grid has a second end cell at {second} (first at {first})")]
    DuplicateEnd { first: Point, second: Point },
    #[error("wall density {0} is outside [0, 1]")]
    WallDensity(f64),
}

/// An immutable square maze.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct World {
    size: i32,
    cells: Vec<CellState>,
    start: Point,
    end: Point,
}

impl World {
    /// Build a world from row-major cells.
    ///
    /// Validates the size, the cell count and that exactly one start and
    /// one end cell are present.
    pub fn new(size: i32, cells: Vec<CellState>) -> Result<Self, WorldError> {
        if size < MIN_SIZE {
            return Err(WorldError::Undersized { size });
        }
        let bounds = Range::new(0, 0, size, size);
        if cells.len() != bounds.len() {
            return Err(WorldError::CellCount {
                expected: bounds.len(),
                got: cells.len(),
            });
        }

        let mut start = None;
        let mut end = None;
        for (p, &state) in bounds.iter().zip(cells.iter()) {
            match state {
                CellState::Start => match start {
                    Some(first) => return Err(WorldError::DuplicateStart { first, second: p }),
                    None => start = Some(p),
                },
                CellState::End => match end {
                    Some(first) => return Err(WorldError::DuplicateEnd { first, second: p }),
                    None => end = Some(p),
                },
                _ => {}
            }
        }

        Ok(Self {
            size,
            cells,
            start: start.ok_or(WorldError::MissingStart)?,
            end: end.ok_or(WorldError::MissingEnd)?,
        })
    }

    /// Side length of the grid.
    #[inline]
    pub fn size(&self) -> i32 {
        self.size
    }

    /// The grid rectangle, `[0, size)` on both axes.
    #[inline]
    pub fn bounds(&self) -> Range {
        Range::new(0, 0, self.size, self.size)
    }

    #[inline]
    pub fn start(&self) -> Point {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Point {
        self.end
    }

    /// State of the cell at `p`, or `None` if out of bounds.
    #[inline]
    pub fn cell(&self, p: Point) -> Option<CellState> {
        self.bounds().index(p).map(|i| self.cells[i])
    }

    /// Whether `p` is inside the grid and not a wall.
    #[inline]
    pub fn is_passable(&self, p: Point) -> bool {
        self.cell(p).is_some_and(|c| !c.is_wall())
    }

    /// Whether `p` is the end cell.
    #[inline]
    pub fn is_end(&self, p: Point) -> bool {
        p == self.end
    }

    /// Iterate over every cell in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Point, CellState)> + '_ {
        self.bounds().iter().zip(self.cells.iter().copied())
    }

    /// Number of wall cells.
    pub fn wall_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_wall()).count()
    }
}

/// Renders the world in the map-file format, header line included, so
/// that the output parses back into an equal world.
impl fmt::Display for World {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{};", self.size)?;
        for row in self.cells.chunks(self.size as usize) {
            let line: String = row.iter().map(|c| c.symbol()).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
