//! Geometry assembly for the Cratewright engine.
//!
//! Combines the layout solvers into a deterministic, purely functional
//! pipeline: a [`CrateConfig`](cratewright_core::CrateConfig) goes in, a
//! flat list of placed [`Part`](cratewright_core::Part) boxes plus the
//! per-panel layouts comes out. Coordinates are inches: X = width,
//! Y = length (front at Y = 0), Z = height, origin at the center of the
//! crate floor.

mod fasteners;
mod generator;
mod markings;
mod stops;
mod usage;

pub use fasteners::KlimpInstance;
pub use generator::{generate, CrateGeometry};
pub use usage::MaterialUsage;
