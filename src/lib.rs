//! Sparse 3D Game of Life engine over an unbounded integer lattice.

pub mod lattice;

pub use lattice::{Cell, ConfigError, Coord, EngineConfig, Generation, LatticeLife, Rule};
