pub mod camera;
pub mod config;
pub mod coord;
pub mod events;
pub mod grid;
pub mod io;
pub mod patterns;
pub mod render;
pub mod rule_set;
pub mod simulation;
pub mod world;

/// A single grid axis. Grids are at most `Axis::MAX + 1` cells wide.
pub type Axis = u16;

/// Signed intermediate used while computing neighbours, before wrapping.
pub type AxisOffset = i32;
