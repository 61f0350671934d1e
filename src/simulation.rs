use std::ops::ControlFlow;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;
use tracing::info;

use crate::config::Config;
use crate::config::Seed;
use crate::render::Render;
use crate::world::SeedError;
use crate::world::World;

/// Decides when the next tick happens.
pub trait Ticker {
    /// Wait for the next tick. Returns [`ControlFlow::Break`] once the simulation should stop.
    fn wait(&mut self, period: Duration) -> anyhow::Result<ControlFlow<()>>;
}

/// Sleeps for the period, `remaining` times.
pub struct Ticks {
    pub remaining: u64,
}

impl Ticks {
    pub fn new(remaining: u64) -> Self {
        Self { remaining }
    }
}

impl Ticker for Ticks {
    fn wait(&mut self, period: Duration) -> anyhow::Result<ControlFlow<()>> {
        if self.remaining == 0 {
            return Ok(ControlFlow::Break(()));
        }

        self.remaining -= 1;
        thread::sleep(period);

        Ok(ControlFlow::Continue(()))
    }
}

/// Owns the world for as long as it runs, and advances it once per tick.
pub struct Simulation<R = ChaCha8Rng> {
    world: World,

    /// Only used to reseed an extinct world
    rng: R,

    period: Duration,

    /// Number of generations computed so far
    generation: u64,
}

impl Simulation<ChaCha8Rng> {
    /// Seed a world as described by `config`.
    ///
    /// Without an explicit rng seed, the generator is seeded from the OS.
    pub fn from_config(config: &Config) -> Result<Self, SeedError> {
        let mut rng = match config.rng_seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        let world = match config.seed {
            Seed::Pattern { pattern, origin } => {
                let origin = origin.unwrap_or_else(|| config.centered(pattern));
                World::from_pattern(config.size, pattern, origin)?
            }
            Seed::Random(density) => World::random(config.size, density, &mut rng)?,
        };

        let world = world.with_rule(config.rule)?.with_reseed(config.reseed);

        Ok(Self::new(world, rng, config.period))
    }
}

impl<R: Rng> Simulation<R> {
    pub fn new(world: World, rng: R, period: Duration) -> Self {
        Self {
            world,
            rng,
            period,
            generation: 0,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Show the current generation, then replace it with the next one
    pub fn tick<V: Render + ?Sized>(mut self, view: &mut V) -> anyhow::Result<Self> {
        view.render(self.world.cells())
            .with_context(|| format!("Failed to render generation {}", self.generation))?;

        let (world, report) = self.world.step(&mut self.rng);
        self.world = world;
        self.generation += 1;

        debug!(
            generation = self.generation,
            population = self.world.population(),
            ?report,
            "Tick"
        );

        Ok(self)
    }

    /// Tick until `ticker` says to stop, and hand back the final state.
    pub fn run<V, T>(mut self, view: &mut V, ticker: &mut T) -> anyhow::Result<Self>
    where
        V: Render + ?Sized,
        T: Ticker + ?Sized,
    {
        info!(
            size = self.world.size(),
            rule = %self.world.rule(),
            period = ?self.period,
            population = self.world.population(),
            "Starting simulation"
        );

        while ticker.wait(self.period)?.is_continue() {
            self = self.tick(view)?;
        }

        info!(generation = self.generation, "Simulation stopped");

        Ok(self)
    }

    /// Give up ownership of the world
    pub fn into_world(self) -> World {
        self.world
    }
}
