//! Engine internals and public API.

mod coord;
mod coord_set;
mod engine;
mod generation;
mod rules;

pub use coord::{Coord, NEIGHBOR_OFFSETS};
pub use engine::{EngineConfig, LatticeLife};
pub use generation::{Cell, Generation};
pub use rules::{ConfigError, MAX_NEIGHBORS, Rule};
