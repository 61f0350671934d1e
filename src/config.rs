//! Startup configuration.
//!
//! Everything has a default matching the classic demo: a Gosper glider gun on a 100x100 torus,
//! ticking every 100ms. Each setting can be overridden through an environment variable:
//!
//! | Variable         | Example              | Meaning                                   |
//! |------------------|----------------------|-------------------------------------------|
//! | `LIFE_SIZE`      | `100`                | Side length of the grid                   |
//! | `LIFE_PERIOD_MS` | `100`                | Time between ticks                        |
//! | `LIFE_SEED`      | `glider@10,10`       | `<pattern>[@x,y]`, `random`, `random:n/d` |
//! | `LIFE_DENSITY`   | `1/50`               | Reseed density once the world dies out    |
//! | `LIFE_RULE`      | `B3/S23`             | Birth/survival rule                       |
//! | `LIFE_RNG_SEED`  | `42`                 | Seed for the random generator             |

use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::Axis;
use crate::coord::Coord;
use crate::patterns;
use crate::patterns::Pattern;
use crate::rule_set::RuleError;
use crate::rule_set::RuleSet;
use crate::world::Density;
use crate::world::DensityError;
use crate::world::RESEED_DENSITY;

pub const DEFAULT_SIZE: Axis = 100;
pub const DEFAULT_PERIOD: Duration = Duration::from_millis(100);
pub const DEFAULT_ORIGIN: Coord = Coord::new(50, 46);

/// How the first generation is produced
#[derive(Debug, Clone, Copy)]
pub enum Seed {
    /// A hand-authored pattern. Without an origin, the pattern is centered.
    Pattern {
        pattern: &'static Pattern,
        origin: Option<Coord>,
    },

    /// Every cell alive with the given density
    Random(Density),
}

impl Default for Seed {
    fn default() -> Self {
        Seed::Pattern {
            pattern: &patterns::GOSPER_GLIDER_GUN,
            origin: Some(DEFAULT_ORIGIN),
        }
    }
}

impl FromStr for Seed {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if s.eq_ignore_ascii_case("random") {
            return Ok(Seed::Random(RESEED_DENSITY));
        }

        if let Some(density) = s.strip_prefix("random:") {
            return Ok(Seed::Random(density.parse()?));
        }

        let (name, origin) = match s.split_once('@') {
            Some((name, at)) => (name, Some(parse_origin(at)?)),
            None => (s, None),
        };

        let pattern =
            patterns::find(name).ok_or_else(|| ConfigError::UnknownPattern(name.to_string()))?;

        Ok(Seed::Pattern { pattern, origin })
    }
}

fn parse_origin(s: &str) -> Result<Coord, ConfigError> {
    let invalid = || ConfigError::InvalidOrigin(s.to_string());

    let (x, y) = s.split_once(',').ok_or_else(invalid)?;
    let x = x.trim().parse().map_err(|_| invalid())?;
    let y = y.trim().parse().map_err(|_| invalid())?;

    Ok(Coord::new(x, y))
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var}: expected a number, got \"{value}\"")]
    InvalidNumber { var: &'static str, value: String },

    #[error("Grid size must be at least 1")]
    ZeroSize,

    #[error("Unknown pattern \"{0}\"")]
    UnknownPattern(String),

    #[error("Expected an origin like \"10,20\", got \"{0}\"")]
    InvalidOrigin(String),

    #[error("Pattern \"{name}\" does not fit in a {size}x{size} grid")]
    PatternTooLarge { name: &'static str, size: Axis },

    #[error(transparent)]
    Density(#[from] DensityError),

    #[error(transparent)]
    Rule(#[from] RuleError),
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Side length of the square grid
    pub size: Axis,

    /// Time between two ticks
    pub period: Duration,

    pub seed: Seed,

    /// Density of the reseeding pass once every cell has died
    pub reseed: Density,

    pub rule: RuleSet,

    /// Seed for the random generator. When unset, the generator is seeded from the OS.
    pub rng_seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            period: DEFAULT_PERIOD,
            seed: Seed::default(),
            reseed: RESEED_DENSITY,
            rule: RuleSet::default(),
            rng_seed: None,
        }
    }
}

impl Config {
    /// Read overrides from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read overrides through `lookup`, which maps a variable name to its value
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(size) = lookup("LIFE_SIZE") {
            config.size = number("LIFE_SIZE", &size)?;
        }

        if let Some(ms) = lookup("LIFE_PERIOD_MS") {
            config.period = Duration::from_millis(number("LIFE_PERIOD_MS", &ms)?);
        }

        if let Some(seed) = lookup("LIFE_SEED") {
            config.seed = seed.parse()?;
        } else if config.size != DEFAULT_SIZE {
            // the default origin only makes sense on the default grid
            config.seed = Seed::Pattern {
                pattern: &patterns::GOSPER_GLIDER_GUN,
                origin: None,
            };
        }

        if let Some(density) = lookup("LIFE_DENSITY") {
            config.reseed = density.parse()?;
        }

        if let Some(rule) = lookup("LIFE_RULE") {
            config.rule = rule.parse::<RuleSet>()?.check_local()?;
        }

        if let Some(seed) = lookup("LIFE_RNG_SEED") {
            config.rng_seed = Some(number("LIFE_RNG_SEED", &seed)?);
        }

        config.validate()?;

        Ok(config)
    }

    /// Check everything that can be checked before building a world
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.size == 0 {
            return Err(ConfigError::ZeroSize);
        }

        if let Seed::Pattern { pattern, origin } = self.seed {
            let origin = origin.unwrap_or_else(|| self.centered(pattern));

            if !pattern.fits(origin, self.size) {
                return Err(ConfigError::PatternTooLarge {
                    name: pattern.name,
                    size: self.size,
                });
            }
        }

        self.rule.check_local()?;

        Ok(())
    }

    /// Origin that puts `pattern` in the middle of the grid
    pub fn centered(&self, pattern: &Pattern) -> Coord {
        let (w, h) = pattern.extent();

        Coord::new(
            self.size.saturating_sub(w) / 2,
            self.size.saturating_sub(h) / 2,
        )
    }
}

fn number<T: FromStr>(var: &'static str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidNumber {
            var,
            value: value.to_string(),
        })
}
