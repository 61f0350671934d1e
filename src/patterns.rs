//! Hand-authored seed patterns.
//!
//! Cells are `(x, y)` offsets from the top-left corner of the pattern's bounding box, with `y`
//! growing downwards.

use crate::Axis;
use crate::coord::Coord;

#[derive(Debug)]
pub struct Pattern {
    pub name: &'static str,
    pub cells: &'static [(Axis, Axis)],
}

impl Pattern {
    /// Width and height of the bounding box
    pub fn extent(&self) -> (Axis, Axis) {
        let w = self.cells.iter().map(|&(x, _)| x + 1).max().unwrap_or(0);
        let h = self.cells.iter().map(|&(_, y)| y + 1).max().unwrap_or(0);

        (w, h)
    }

    /// Absolute coordinates with the bounding box placed at `origin`.
    ///
    /// The caller is responsible for making sure the pattern fits, see [`Pattern::fits`].
    pub fn cells_at(&self, origin: Coord) -> impl Iterator<Item = Coord> + '_ {
        self.cells
            .iter()
            .map(move |&(dx, dy)| Coord::new(origin.x + dx, origin.y + dy))
    }

    /// Whether the pattern placed at `origin` lies inside a `size x size` grid
    pub fn fits(&self, origin: Coord, size: Axis) -> bool {
        let (w, h) = self.extent();

        u32::from(origin.x) + u32::from(w) <= u32::from(size)
            && u32::from(origin.y) + u32::from(h) <= u32::from(size)
    }
}

pub const BLOCK: Pattern = Pattern {
    name: "block",
    cells: &[(0, 0), (1, 0), (0, 1), (1, 1)],
};

/// Period 2, horizontal phase
pub const BLINKER: Pattern = Pattern {
    name: "blinker",
    cells: &[(0, 0), (1, 0), (2, 0)],
};

pub const TOAD: Pattern = Pattern {
    name: "toad",
    cells: &[(1, 0), (2, 0), (3, 0), (0, 1), (1, 1), (2, 1)],
};

pub const BEACON: Pattern = Pattern {
    name: "beacon",
    cells: &[(0, 0), (1, 0), (0, 1), (1, 1), (2, 2), (3, 2), (2, 3), (3, 3)],
};

/// Travels one cell right and one cell down every 4 generations
pub const GLIDER: Pattern = Pattern {
    name: "glider",
    cells: &[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)],
};

pub const R_PENTOMINO: Pattern = Pattern {
    name: "r-pentomino",
    cells: &[(1, 0), (2, 0), (0, 1), (1, 1), (1, 2)],
};

/// Emits a glider every 30 generations.
///
/// At origin `(50, 46)` on a 100x100 grid this is the default seed.
#[rustfmt::skip]
pub const GOSPER_GLIDER_GUN: Pattern = Pattern {
    name: "gosper-glider-gun",
    cells: &[
        // left block
        (0, 4), (1, 4), (0, 5), (1, 5),
        // left ship
        (10, 4), (10, 5), (10, 6), (11, 3), (11, 7), (12, 2), (12, 8), (13, 2), (13, 8),
        (14, 5), (15, 3), (15, 7), (16, 4), (16, 5), (16, 6), (17, 5),
        // right ship
        (20, 2), (20, 3), (20, 4), (21, 2), (21, 3), (21, 4), (22, 1), (22, 5),
        (24, 0), (24, 1), (24, 5), (24, 6),
        // right block
        (34, 2), (34, 3), (35, 2), (35, 3),
    ],
};

pub const PATTERNS: &[Pattern] = &[
    BLOCK,
    BLINKER,
    TOAD,
    BEACON,
    GLIDER,
    R_PENTOMINO,
    GOSPER_GLIDER_GUN,
];

/// Look a pattern up by name, ignoring case
pub fn find(name: &str) -> Option<&'static Pattern> {
    PATTERNS.iter().find(|p| p.name.eq_ignore_ascii_case(name))
}
