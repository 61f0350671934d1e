use std::collections::HashSet;
use std::str::FromStr;

use rand::Rng;
use thiserror::Error;
use tracing::info;
use tracing::warn;

use crate::Axis;
use crate::coord::Coord;
use crate::grid::Grid;
use crate::patterns::Pattern;
use crate::rule_set::RuleError;
use crate::rule_set::RuleSet;

/// Chance of each cell being born when an extinct world reseeds itself.
pub const RESEED_DENSITY: Density = Density {
    numerator: 1,
    denominator: 50,
};

/// Probability `numerator / denominator` of a cell being alive after a random seeding pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Density {
    numerator: u32,
    denominator: u32,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DensityError {
    #[error("Density {numerator}/{denominator} must satisfy 0 < numerator <= denominator")]
    OutOfRange { numerator: u32, denominator: u32 },

    #[error("Expected a density like \"1/50\", got \"{0}\"")]
    Malformed(String),
}

impl Density {
    pub fn new(numerator: u32, denominator: u32) -> Result<Self, DensityError> {
        if numerator == 0 || numerator > denominator {
            return Err(DensityError::OutOfRange {
                numerator,
                denominator,
            });
        }

        Ok(Self {
            numerator,
            denominator,
        })
    }

    /// Draw a single cell
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> bool {
        rng.gen_ratio(self.numerator, self.denominator)
    }
}

impl Default for Density {
    fn default() -> Self {
        RESEED_DENSITY
    }
}

impl std::fmt::Display for Density {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

impl FromStr for Density {
    type Err = DensityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || DensityError::Malformed(s.to_string());

        let (n, d) = s.trim().split_once('/').ok_or_else(malformed)?;
        let n = n.trim().parse().map_err(|_| malformed())?;
        let d = d.trim().parse().map_err(|_| malformed())?;

        Density::new(n, d)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SeedError {
    #[error("Cell ({x}, {y}) lies outside the {size}x{size} grid")]
    CellOutOfBounds { x: Axis, y: Axis, size: Axis },

    #[error("Pattern \"{name}\" at ({x}, {y}) does not fit in the {size}x{size} grid")]
    PatternOutOfBounds {
        name: &'static str,
        x: Axis,
        y: Axis,
        size: Axis,
    },

    #[error("Grid size must be at least 1")]
    EmptyGrid,

    #[error(transparent)]
    Rule(#[from] RuleError),
}

/// What happened during a single [`World::step`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// The world was extinct and got reseeded before evaluating this tick
    pub reseeded: bool,

    pub survivors: usize,

    /// Live cells that died this tick
    pub deaths: usize,

    pub births: usize,

    /// Dead cells next to at least one live cell. Only these can be born.
    pub candidates: usize,
}

/// A toroidal Life universe.
///
/// Live cells are kept twice: densely in `grid` for neighbour lookups, and sparsely in `cells` so
/// that a tick only visits live cells and their neighbours. `grid[p]` is set for exactly the
/// coordinates in `cells`.
#[derive(Debug, Clone)]
pub struct World {
    grid: Grid,

    /// Live cells, without duplicates
    cells: Vec<Coord>,

    rule: RuleSet,

    /// Used when the population dies out
    reseed: Density,
}

impl World {
    /// Create an empty world. It reseeds itself on the first tick.
    pub fn new(size: Axis) -> Result<Self, SeedError> {
        if size == 0 {
            return Err(SeedError::EmptyGrid);
        }

        Ok(Self {
            grid: Grid::new(size),
            cells: Vec::new(),
            rule: RuleSet::default(),
            reseed: Density::default(),
        })
    }

    /// Create a world from a list of live cells. Repeated cells are only counted once.
    pub fn from_cells<I>(size: Axis, cells: I) -> Result<Self, SeedError>
    where
        I: IntoIterator<Item = Coord>,
    {
        let mut world = Self::new(size)?;

        for p in cells {
            if p.x >= size || p.y >= size {
                return Err(SeedError::CellOutOfBounds { x: p.x, y: p.y, size });
            }

            if world.grid[p] {
                warn!(x = p.x, y = p.y, "Cell seeded twice. Ignoring");
                continue;
            }

            world.grid.set(p, true);
            world.cells.push(p);
        }

        info!(size, population = world.cells.len(), "Seeded world from cells");

        Ok(world)
    }

    /// Create a world holding `pattern` with its bounding box at `origin`
    pub fn from_pattern(size: Axis, pattern: &Pattern, origin: Coord) -> Result<Self, SeedError> {
        if !pattern.fits(origin, size) {
            return Err(SeedError::PatternOutOfBounds {
                name: pattern.name,
                x: origin.x,
                y: origin.y,
                size,
            });
        }

        Self::from_cells(size, pattern.cells_at(origin))
    }

    /// Create a world where every cell is independently alive with the given density
    pub fn random<R: Rng + ?Sized>(
        size: Axis,
        density: Density,
        rng: &mut R,
    ) -> Result<Self, SeedError> {
        let mut world = Self::new(size)?;
        world.scatter(density, rng);

        info!(size, %density, population = world.cells.len(), "Seeded world at random");

        Ok(world)
    }

    /// Replace the rules. Rules with births on 0 neighbours are rejected.
    pub fn with_rule(mut self, rule: RuleSet) -> Result<Self, RuleError> {
        self.rule = rule.check_local()?;

        Ok(self)
    }

    /// Replace the density used to reseed an extinct world
    pub fn with_reseed(mut self, density: Density) -> Self {
        self.reseed = density;
        self
    }

    pub fn size(&self) -> Axis {
        self.grid.size()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Live cells of the current generation
    pub fn cells(&self) -> &[Coord] {
        &self.cells
    }

    pub fn population(&self) -> usize {
        self.cells.len()
    }

    pub fn rule(&self) -> RuleSet {
        self.rule
    }

    pub fn reseed_density(&self) -> Density {
        self.reseed
    }

    pub fn is_alive(&self, p: Coord) -> bool {
        self.grid[p]
    }

    /// Compute the next generation
    pub fn advance<R: Rng + ?Sized>(self, rng: &mut R) -> Self {
        self.step(rng).0
    }

    /// Compute the next generation, reporting what changed.
    ///
    /// Every neighbour count reads the grid as it was at the start of the tick: the grid is only
    /// written once all survivors, deaths and births are known.
    pub fn step<R: Rng + ?Sized>(mut self, rng: &mut R) -> (Self, TickReport) {
        let mut report = TickReport::default();

        if self.cells.is_empty() {
            let density = self.reseed;
            self.scatter(density, rng);

            report.reseeded = true;
            info!(%density, population = self.cells.len(), "Population died out. Reseeded");
        }

        let size = self.size();

        let mut survivors = Vec::with_capacity(self.cells.len());
        let mut doomed = Vec::new();

        // `seen` deduplicates, `candidates` keeps the order in which they were found
        let mut seen = HashSet::new();
        let mut candidates = Vec::new();

        for &p in &self.cells {
            let n = self.grid.live_neighbors(p);

            if self.rule.survives(n) {
                survivors.push(p);
            } else {
                doomed.push(p);
            }

            for q in p.neighbors(size) {
                if !self.grid[q] && seen.insert(q) {
                    candidates.push(q);
                }
            }
        }

        let births: Vec<Coord> = candidates
            .iter()
            .copied()
            .filter(|&q| self.rule.born(self.grid.live_neighbors(q)))
            .collect();

        // Survivors are already set
        for &p in &doomed {
            self.grid.set(p, false);
        }

        for &p in &births {
            self.grid.set(p, true);
        }

        report.survivors = survivors.len();
        report.deaths = doomed.len();
        report.births = births.len();
        report.candidates = candidates.len();

        survivors.extend(births);
        self.cells = survivors;

        (self, report)
    }

    /// Bring every cell to life with probability `density`, column by column.
    ///
    /// Only valid on an empty world.
    fn scatter<R: Rng + ?Sized>(&mut self, density: Density, rng: &mut R) {
        assert!(self.cells.is_empty(), "scatter requires an empty world");

        let size = self.size();

        for x in 0..size {
            for y in 0..size {
                if density.sample(rng) {
                    let p = Coord::new(x, y);

                    self.grid.set(p, true);
                    self.cells.push(p);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::Density;
    use super::DensityError;
    use super::SeedError;
    use super::World;
    use crate::coord::Coord;
    use crate::patterns;
    use crate::rule_set::RuleError;

    fn set(world: &World) -> HashSet<Coord> {
        world.cells().iter().copied().collect()
    }

    #[test]
    fn density_parse() {
        assert_eq!("1/50".parse::<Density>(), Density::new(1, 50));
        assert_eq!(" 3 / 4 ".parse::<Density>(), Density::new(3, 4));
        assert_eq!(
            "0/5".parse::<Density>(),
            Err(DensityError::OutOfRange {
                numerator: 0,
                denominator: 5
            })
        );
        assert_eq!(
            "half".parse::<Density>(),
            Err(DensityError::Malformed("half".to_string()))
        );
    }

    #[test]
    fn from_cells_dedups() {
        let p = Coord::new(1, 1);
        let world = World::from_cells(4, [p, p, Coord::new(2, 2)]).unwrap();

        assert_eq!(world.cells(), &[p, Coord::new(2, 2)]);
        assert_eq!(world.grid().population(), 2);
    }

    #[test]
    fn from_cells_out_of_bounds() {
        let err = World::from_cells(4, [Coord::new(4, 0)]).unwrap_err();

        assert_eq!(err, SeedError::CellOutOfBounds { x: 4, y: 0, size: 4 });
    }

    #[test]
    fn pattern_must_fit() {
        let err = World::from_pattern(10, &patterns::GOSPER_GLIDER_GUN, Coord::new(0, 0)).unwrap_err();

        assert!(matches!(err, SeedError::PatternOutOfBounds { name: "gosper-glider-gun", .. }));
    }

    #[test]
    fn empty_grid_rejected() {
        assert_eq!(World::new(0).unwrap_err(), SeedError::EmptyGrid);
    }

    #[test]
    fn birth_on_zero_rule_rejected() {
        let rule = "b01s23".parse().unwrap();

        let err = World::new(10).unwrap().with_rule(rule).unwrap_err();

        assert_eq!(err, RuleError::BirthOnZero);
    }

    #[test]
    fn blinker_flips() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let world = World::from_pattern(20, &patterns::BLINKER, Coord::new(9, 10)).unwrap();

        let (world, report) = world.step(&mut rng);

        let expected: HashSet<_> = [Coord::new(10, 9), Coord::new(10, 10), Coord::new(10, 11)]
            .into_iter()
            .collect();
        assert_eq!(set(&world), expected);

        assert!(!report.reseeded);
        assert_eq!(report.survivors, 1);
        assert_eq!(report.deaths, 2);
        assert_eq!(report.births, 2);
    }

    #[test]
    fn candidates_are_counted_once() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let world = World::from_pattern(20, &patterns::BLOCK, Coord::new(5, 5)).unwrap();

        let (_, report) = world.step(&mut rng);

        // the 4x4 square around a block, minus the block itself
        assert_eq!(report.candidates, 12);
        assert_eq!(report.births, 0);
        assert_eq!(report.survivors, 4);
    }

    #[test]
    fn survivors_come_before_births() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let world = World::from_pattern(20, &patterns::BLINKER, Coord::new(9, 10)).unwrap();

        let world = world.advance(&mut rng);

        assert_eq!(world.cells()[0], Coord::new(10, 10));
    }

    #[test]
    fn reseed_uses_configured_density() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let every_cell = Density::new(1, 1).unwrap();
        let world = World::new(6).unwrap().with_reseed(every_cell);

        let (world, report) = world.step(&mut rng);

        // a full 6x6 torus reseeds, then every cell has 8 neighbours and dies
        assert!(report.reseeded);
        assert_eq!(report.deaths, 36);
        assert_eq!(report.candidates, 0);
        assert_eq!(world.population(), 0);
    }

    #[test]
    fn same_rng_seed_same_reseed() {
        let a = World::new(50)
            .unwrap()
            .advance(&mut ChaCha8Rng::seed_from_u64(42));
        let b = World::new(50)
            .unwrap()
            .advance(&mut ChaCha8Rng::seed_from_u64(42));

        assert_eq!(a.cells(), b.cells());
        assert_eq!(a.grid(), b.grid());
    }
}
