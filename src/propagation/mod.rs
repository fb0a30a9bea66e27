//! Orbital propagation module
//!
//! The `propagator` submodule defines the propagator contract the engine
//! consumes and an SGP4 implementation via satkit. The `orbit_track`
//! submodule derives the closed orbit ellipse from mean elements.

mod orbit_track;
mod propagator;

pub use orbit_track::*;
pub use propagator::*;
