use std::ops::Index;

use crate::Axis;
use crate::coord::Coord;

/// Dense `size x size` occupancy table. Edges wrap, see [`Coord::neighbors`].
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    /// Cell buffer, stored row by row
    cb: Vec<bool>,

    /// Side length
    size: Axis,
}

impl Grid {
    /// Create an all-dead grid
    pub fn new(size: Axis) -> Self {
        assert!(size > 0, "grid must be at least 1x1");

        let n = usize::from(size);

        Self {
            cb: vec![false; n * n],
            size,
        }
    }

    pub fn size(&self) -> Axis {
        self.size
    }

    pub fn get(&self, p: Coord) -> bool {
        self.cb[self.xy_from(p)]
    }

    pub fn set(&mut self, p: Coord, alive: bool) {
        let i = self.xy_from(p);

        self.cb[i] = alive;
    }

    /// Number of live cells among the 8 wrapped neighbours of `p`.
    pub fn live_neighbors(&self, p: Coord) -> u8 {
        p.neighbors(self.size)
            .into_iter()
            .filter(|&q| self.get(q))
            .count() as u8
    }

    /// Number of live cells. This scans the whole grid.
    pub fn population(&self) -> usize {
        self.cb.iter().filter(|&&alive| alive).count()
    }

    /// Every live cell, column by column.
    pub fn live_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        let size = self.size;

        (0..size)
            .flat_map(move |x| (0..size).map(move |y| Coord::new(x, y)))
            .filter(|&p| self.get(p))
    }

    fn xy_from(&self, p: Coord) -> usize {
        assert!(p.x < self.size, "x is out of bounds");
        assert!(p.y < self.size, "y is out of bounds");

        usize::from(p.y) * usize::from(self.size) + usize::from(p.x)
    }
}

impl Index<Coord> for Grid {
    type Output = bool;

    fn index(&self, p: Coord) -> &bool {
        &self.cb[self.xy_from(p)]
    }
}

impl std::fmt::Debug for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Grid")
            .field("size", &self.size)
            .field("population", &self.population())
            .finish()
    }
}
