//! Map-file parsing.
//!
//! A map file starts with a header line whose first `;`-separated field is
//! the grid size, followed by `size` rows of symbols:
//!
//! ```text
//! 8;
//! s.......
//! .####...
//! ........
//! ...#....
//! ...#....
//! ...#....
//! ........
//! .......e
//! ```
//!
//! `.` is open floor, `#` a wall, `s` the start and `e` the end. Characters
//! past column `size` on a row are ignored.

use std::path::Path;

use thiserror::Error;

use crate::geom::Point;
use crate::world::{CellState, World, WorldError};

/// Errors that can occur when loading a map.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("cannot read map file: {0}")]
    Io(#[from] std::io::Error),
    #[error("map is empty")]
    Empty,
    #[error("invalid map size {0:?}")]
    InvalidSize(String),
    #[error("map declares {size} rows but row {row} is missing")]
    MissingRow { row: i32, size: i32 },
    #[error("map row {row} has {len} cells, expected at least {size}")]
    ShortRow { row: i32, len: usize, size: i32 },
    #[error("map contains invalid symbol \u{201c}{ch}\u{201d} at {pos}")]
    InvalidSymbol { ch: char, pos: Point },
    #[error(transparent)]
    World(#[from] WorldError),
}

/// Read and parse a map file.
pub fn load_map(path: impl AsRef<Path>) -> Result<World, MapError> {
    let text = std::fs::read_to_string(path)?;
    parse_map(&text)
}

/// Parse a map from its textual form (header line included).
pub fn parse_map(text: &str) -> Result<World, MapError> {
    let mut lines = text.lines();
    let header = lines.next().ok_or(MapError::Empty)?;
    let field = header.split(';').next().unwrap_or_default().trim();
    let size: i32 = field
        .parse()
        .map_err(|_| MapError::InvalidSize(field.to_string()))?;
    if size <= 0 {
        return Err(MapError::InvalidSize(field.to_string()));
    }

    // Grows with the rows actually read, never with the header size.
    let mut rows = Vec::new();
    for row in 0..size {
        let line = lines.next().ok_or(MapError::MissingRow { row, size })?;
        rows.push(line);
    }
    parse_cells(size, rows)
}

/// Parse a square map given only its rows; the size is the number of rows.
///
/// Handy for building worlds inline:
///
/// ```
/// let world = maze_core::parse_rows([
///     "s.......",
///     "........",
///     "........",
///     "........",
///     "........",
///     "........",
///     "........",
///     ".......e",
/// ])
/// .unwrap();
/// assert_eq!(world.size(), 8);
/// ```
pub fn parse_rows<'a>(rows: impl IntoIterator<Item = &'a str>) -> Result<World, MapError> {
    let rows: Vec<&str> = rows.into_iter().collect();
    if rows.is_empty() {
        return Err(MapError::Empty);
    }
    parse_cells(rows.len() as i32, rows)
}

fn parse_cells(size: i32, rows: Vec<&str>) -> Result<World, MapError> {
    let width = size as usize;
    for (y, line) in rows.iter().enumerate() {
        let len = line.chars().count();
        if len < width {
            return Err(MapError::ShortRow {
                row: y as i32,
                len,
                size,
            });
        }
    }

    let mut cells = Vec::with_capacity(width * rows.len());
    for (y, line) in rows.into_iter().enumerate() {
        let y = y as i32;
        for (x, ch) in line.chars().take(width).enumerate() {
            let state = CellState::from_symbol(ch).ok_or(MapError::InvalidSymbol {
                ch,
                pos: Point::new(x as i32, y),
            })?;
            cells.push(state);
        }
    }
    Ok(World::new(size, cells)?)
}
