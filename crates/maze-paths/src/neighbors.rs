use maze_core::Point;

/// One of the four axis-aligned moves.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Left,
    Up,
    Right,
    Down,
}

impl Direction {
    /// All directions in expansion order.
    pub const ALL: [Direction; 4] = [Self::Left, Self::Up, Self::Right, Self::Down];

    /// Unit offset for this direction (Y grows down).
    #[inline]
    pub const fn delta(self) -> Point {
        match self {
            Self::Left => Point::new(-1, 0),
            Self::Up => Point::new(0, -1),
            Self::Right => Point::new(1, 0),
            Self::Down => Point::new(0, 1),
        }
    }
}

/// Cached neighbor computation helper.
///
/// Yields the cardinal neighbors of a cell in the fixed order Left, Up,
/// Right, Down, filtered by a predicate.
pub struct Neighbors {
    buf: Vec<Point>,
}

impl Default for Neighbors {
    fn default() -> Self {
        Self::new()
    }
}

impl Neighbors {
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(4),
        }
    }

    /// Return the 4-directional neighbors of `p` for which `keep` returns
    /// `true`, in expansion order.
    pub fn cardinal(&mut self, p: Point, keep: impl Fn(Point) -> bool) -> &[Point] {
        self.buf.clear();
        for dir in Direction::ALL {
            let n = p + dir.delta();
            if keep(n) {
                self.buf.push(n);
            }
        }
        &self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cardinal_order_is_left_up_right_down() {
        let mut nb = Neighbors::new();
        let p = Point::new(2, 2);
        assert_eq!(
            nb.cardinal(p, |_| true),
            &[
                Point::new(1, 2),
                Point::new(2, 1),
                Point::new(3, 2),
                Point::new(2, 3)
            ]
        );
    }

    #[test]
    fn cardinal_filters() {
        let mut nb = Neighbors::new();
        let got = nb.cardinal(Point::new(0, 0), |q| q.x >= 0 && q.y >= 0);
        assert_eq!(got, &[Point::new(1, 0), Point::new(0, 1)]);
    }

    #[test]
    fn deltas_are_unit_steps() {
        let p = Point::new(4, 4);
        for dir in Direction::ALL {
            assert!(p.is_adjacent(p + dir.delta()), "{dir:?}");
        }
        assert_eq!(p + Direction::Up.delta(), Point::new(4, 3));
    }
}
