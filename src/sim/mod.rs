//! Implements the invasion front, the selection rules, and the simulation loop

mod front;
mod results;
mod selection;
mod simulation;
pub use crate::sim::front::*;
pub use crate::sim::results::*;
pub use crate::sim::selection::*;
pub use crate::sim::simulation::*;
