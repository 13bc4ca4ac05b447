//! A* search for grid mazes.
//!
//! The engine explores a uniform-cost, 4-connected grid from the maze's
//! start cell to its end cell:
//!
//! - **Search** ([`Astar`]): best-first expansion keyed on
//!   `cost + heuristic`, with the Manhattan distance as heuristic and
//!   neighbors visited Left, Up, Right, Down.
//! - **Tracing** ([`SearchObserver`]): every expansion and every closure is
//!   reported as a [`SearchEvent`] so a front end can animate the search.
//! - **Path recovery** ([`recover_path`]): the route is rebuilt from the
//!   closed set alone, by cost continuity and adjacency.
//!
//! Mazes are searched through the [`Maze`] trait, implemented for
//! [`maze_core::World`].
//!
//! ```
//! use maze_paths::{SearchStatus, astar};
//!
//! let world = maze_core::parse_rows([
//!     "s.......",
//!     "###.####",
//!     "........",
//!     "........",
//!     "........",
//!     "........",
//!     "........",
//!     ".......e",
//! ])
//! .unwrap();
//! let outcome = astar(&world);
//! assert_eq!(outcome.status(), SearchStatus::Succeeded);
//! assert_eq!(outcome.path().unwrap().move_count(), 14);
//! ```

mod astar;
mod distance;
mod neighbors;
mod node;
mod recover;
mod trace;
mod traits;

pub use astar::{Astar, SearchOutcome, SearchStatus, astar};
pub use distance::manhattan;
pub use neighbors::{Direction, Neighbors};
pub use node::{Path, SearchNode};
pub use recover::recover_path;
pub use trace::{SearchEvent, SearchObserver};
pub use traits::Maze;
