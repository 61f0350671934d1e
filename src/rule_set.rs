use std::str::FromStr;

use thiserror::Error;

/// Rules of Conway's Game of Life.
pub const B3S23: RuleSet = RuleSet::new(0b1000, 0b1100);

/// # Representation
/// Life rules are represented as
/// ```notrust
/// |------birth------|
/// 0000_0000_0000_0000_0000_0000_0000_0000
///                     |----survival-----|
/// ```
///
/// # Examples
/// ```notrust
/// b3s23:                0000_0000_0000_1000_0000_0000_0000_1100
///
/// b0s0:                 0000_0000_0000_0000_0000_0000_0000_0000
/// b012345678s012345678: 0000_0001_1111_1111_0000_0001_1111_1111
/// ```
///
/// See: https://conwaylife.com/wiki/Rulestring
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct RuleSet {
    rule: u32,
}

impl Default for RuleSet {
    fn default() -> Self {
        B3S23
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuleError {
    #[error("Expected 'b' or 'B' to start the rule, got \"{0}\"")]
    MissingBirth(String),

    #[error("Expected 's' or 'S' after the births, got \"{0}\"")]
    MissingSurvival(String),

    #[error("Neighbour counts must be digits 0-8, got '{0}'")]
    InvalidCount(char),

    #[error("Birth on 0 neighbours cannot be evaluated from live cells alone")]
    BirthOnZero,
}

impl RuleSet {
    /// Create a new `RuleSet` for the given births and survivals. For both `b` and
    /// `s`, numbers are set on a bit basis. For instance if bit `i` in `b` is on, it
    /// means `i` is included in the set of births. Any bit past the 8th is ignored.
    pub const fn new(b: u16, s: u16) -> Self {
        let b = b & 0x1FF;
        let s = s & 0x1FF;

        Self {
            rule: (b as u32) << 16 | s as u32,
        }
    }

    pub fn births(&self) -> u16 {
        ((self.rule & 0x1FF0000) >> 0x10) as u16
    }

    pub fn survivals(&self) -> u16 {
        (self.rule & 0x1FF) as u16
    }

    /// Does a dead cell with `n` live neighbours come alive?
    pub fn born(&self, n: u8) -> bool {
        n <= 8 && self.births() & (1 << n) != 0
    }

    /// Does a live cell with `n` live neighbours stay alive?
    pub fn survives(&self, n: u8) -> bool {
        n <= 8 && self.survivals() & (1 << n) != 0
    }

    /// Births must come from cells next to a live cell, which rules out `b0`.
    pub fn check_local(self) -> Result<Self, RuleError> {
        if self.born(0) {
            return Err(RuleError::BirthOnZero);
        }

        Ok(self)
    }
}

impl std::fmt::Display for RuleSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let digits = |mask: u16| -> String {
            (0..=8u8)
                .filter(|n| mask & (1 << n) != 0)
                .map(|n| char::from(b'0' + n))
                .collect()
        };

        write!(f, "B{}/S{}", digits(self.births()), digits(self.survivals()))
    }
}

impl std::fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RuleSet({self})")
    }
}

/// Parses rules that look like `b3s23` or `B3/S23`.
impl FromStr for RuleSet {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        let Some(rest) = s.strip_prefix(['b', 'B']) else {
            return Err(RuleError::MissingBirth(s.to_string()));
        };

        let Some((b, s)) = rest.split_once(['s', 'S']) else {
            return Err(RuleError::MissingSurvival(rest.to_string()));
        };

        let b = b.strip_suffix('/').unwrap_or(b);

        Ok(RuleSet::new(counts_to_mask(b)?, counts_to_mask(s)?))
    }
}

/// Convert the human readable birth/survival counts to a packed bit representation
fn counts_to_mask(counts: &str) -> Result<u16, RuleError> {
    let mut n = 0;

    for c in counts.chars() {
        match c.to_digit(10) {
            Some(d) if d <= 8 => n |= 1 << d,
            _ => return Err(RuleError::InvalidCount(c)),
        }
    }

    Ok(n)
}
