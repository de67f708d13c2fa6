//! Invasion percolation simulator for pore networks
//!
//! A pore network (pores connected by throats) is initially filled with a defending
//! fluid. An invading fluid enters through the inlet pores and, one pore at a time,
//! occupies the front pore with the smallest total (capillary + buoyancy) pressure.
//! A rank-biased random selection generalizes this rule to stochastic invasions.
//!
//! See [sim::Simulation] for an example.

/// Defines a type alias for the error type as a static string
pub type StrError = &'static str;

pub mod base;
pub mod model;
pub mod network;
pub mod prelude;
pub mod sim;
pub mod util;
