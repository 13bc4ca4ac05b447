use crate::node::{Path, SearchNode};

/// Rebuild the start-to-end path from a successful search's closed set.
///
/// No parent links are stored during search. Instead the closed set is
/// scanned backward from its last entry (the end node): an earlier entry
/// joins the path when its cost is exactly one less than the current
/// path head and it is 4-adjacent to it. When several entries qualify, the
/// one met first in the backward scan (the most recently closed) wins.
///
/// Returns an empty path for an empty closed set.
pub fn recover_path(closed: &[SearchNode]) -> Path {
    let Some((&last, earlier)) = closed.split_last() else {
        return Path::default();
    };

    let mut cells = Vec::with_capacity(last.cost as usize + 1);
    cells.push(last.pos);
    let mut head = last;
    for &e in earlier.iter().rev() {
        if e.cost == head.cost - 1 && e.pos.is_adjacent(head.pos) {
            cells.push(e.pos);
            head = e;
        }
    }
    cells.reverse();
    Path::new(cells)
}
