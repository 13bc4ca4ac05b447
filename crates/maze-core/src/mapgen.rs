//! Random map generation.
//!
//! Produces worlds with walls scattered at a given density and the start
//! and end cells on two distinct random positions. Solvability is not
//! guaranteed; an unreachable end is a normal search outcome.

use rand::Rng;

use crate::geom::{Point, Range};
use crate::world::{CellState, MIN_SIZE, World, WorldError};

/// Parameters for [`MapGen::generate`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapGenConfig {
    /// Side length of the generated grid.
    pub size: i32,
    /// Probability in `[0, 1]` that any given cell is a wall.
    pub wall_density: f64,
}

impl Default for MapGenConfig {
    fn default() -> Self {
        Self {
            size: 16,
            wall_density: 0.25,
        }
    }
}

/// Map generator driven by a caller-supplied RNG.
pub struct MapGen<R: Rng> {
    pub rng: R,
}

impl<R: Rng> MapGen<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Generate a world according to `config`.
    pub fn generate(&mut self, config: &MapGenConfig) -> Result<World, WorldError> {
        let MapGenConfig { size, wall_density } = *config;
        if size < MIN_SIZE {
            return Err(WorldError::Undersized { size });
        }
        if !(0.0..=1.0).contains(&wall_density) {
            return Err(WorldError::WallDensity(wall_density));
        }

        let bounds = Range::new(0, 0, size, size);
        let mut cells: Vec<CellState> = (0..bounds.len())
            .map(|_| {
                if self.rng.random_bool(wall_density) {
                    CellState::Wall
                } else {
                    CellState::Open
                }
            })
            .collect();

        let start = self.random_point(size);
        let mut end = self.random_point(size);
        while end == start {
            end = self.random_point(size);
        }
        // In bounds by construction.
        if let (Some(si), Some(ei)) = (bounds.index(start), bounds.index(end)) {
            cells[si] = CellState::Start;
            cells[ei] = CellState::End;
        }

        World::new(size, cells)
    }

    fn random_point(&mut self, size: i32) -> Point {
        Point::new(self.rng.random_range(0..size), self.rng.random_range(0..size))
    }
}
