//! **maze-core**: the static side of the maze explorer.
//!
//! This crate provides the types every other crate of the workspace builds
//! on: grid geometry, the immutable [`World`] (dimensions, walls, start and
//! end cells), the map-file parser and random map generator that build it,
//! and the cooperative cancellation [`Context`] shared between tasks.

pub mod context;
pub mod geom;
pub mod map;
pub mod mapgen;
pub mod world;

pub use context::Context;
pub use geom::{Point, Range};
pub use map::{MapError, load_map, parse_map, parse_rows};
pub use mapgen::{MapGen, MapGenConfig};
pub use world::{CellState, MIN_SIZE, World, WorldError};
