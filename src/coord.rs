use crate::Axis;
use crate::AxisOffset;

/// Offsets of the 8 cells surrounding a cell, row by row:
///
/// ```notrust
///   (-1,-1) (0,-1) (1,-1)
///   (-1, 0)        (1, 0)
///   (-1, 1) (0, 1) (1, 1)
/// ```
const NEIGHBORHOOD: [(AxisOffset, AxisOffset); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Mathematical modulo: the result is always in `[0, modulus)`, also for negative `a`.
///
/// `a % modulus` would return `-1` for `wrap(-1, m)`, which is never a valid index.
pub fn wrap(a: AxisOffset, modulus: AxisOffset) -> AxisOffset {
    assert!(modulus > 0, "modulus must be positive, got {modulus}");

    a.rem_euclid(modulus)
}

/// Position of a cell on a toroidal grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub x: Axis,
    pub y: Axis,
}

impl Coord {
    pub const fn new(x: Axis, y: Axis) -> Self {
        Self { x, y }
    }

    /// Offset this coordinate by `(dx, dy)` on a `size x size` torus.
    pub fn offset(self, dx: AxisOffset, dy: AxisOffset, size: Axis) -> Self {
        let n = AxisOffset::from(size);

        let x = wrap(AxisOffset::from(self.x) + dx, n);
        let y = wrap(AxisOffset::from(self.y) + dy, n);

        // `wrap` keeps both inside [0, size), which always fits an `Axis`
        Self::new(x as Axis, y as Axis)
    }

    /// The 8 toroidally wrapped neighbours of this cell.
    ///
    /// On grids smaller than 3x3 some neighbours coincide with each other or with the cell itself,
    /// exactly as they would on a physical torus that small.
    pub fn neighbors(self, size: Axis) -> [Coord; 8] {
        NEIGHBORHOOD.map(|(dx, dy)| self.offset(dx, dy, size))
    }

    /// Chebyshev (king move) distance between two cells, measured around the torus.
    pub fn chebyshev(self, other: Coord, size: Axis) -> Axis {
        let axis = |a: Axis, b: Axis| {
            let d = a.abs_diff(b);
            d.min(size - d)
        };

        axis(self.x, other.x).max(axis(self.y, other.y))
    }
}

impl From<(Axis, Axis)> for Coord {
    fn from((x, y): (Axis, Axis)) -> Self {
        Self::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::Coord;
    use super::wrap;

    #[test]
    fn wrap_negative() {
        assert_eq!(wrap(-1, 1000), 999);
        assert_eq!(wrap(-1001, 1000), 999);
        assert_eq!(wrap(1000, 1000), 0);
        assert_eq!(wrap(5, 1000), 5);
    }

    #[test]
    #[should_panic]
    fn wrap_zero_modulus() {
        wrap(3, 0);
    }

    #[test]
    fn neighbors_wrap_at_corner() {
        let mut n = Coord::new(0, 0).neighbors(10).to_vec();
        n.sort();

        let mut expected = vec![
            Coord::new(9, 9),
            Coord::new(0, 9),
            Coord::new(1, 9),
            Coord::new(9, 0),
            Coord::new(1, 0),
            Coord::new(9, 1),
            Coord::new(0, 1),
            Coord::new(1, 1),
        ];
        expected.sort();

        assert_eq!(n, expected);
    }

    #[test]
    fn neighbors_exclude_self() {
        let p = Coord::new(4, 7);

        assert!(!p.neighbors(20).contains(&p));
    }

    #[test]
    fn chebyshev_wraps() {
        assert_eq!(Coord::new(0, 0).chebyshev(Coord::new(99, 99), 100), 1);
        assert_eq!(Coord::new(0, 0).chebyshev(Coord::new(50, 3), 100), 50);
        assert_eq!(Coord::new(10, 10).chebyshev(Coord::new(10, 10), 100), 0);
    }
}
