//! Makes available common structures needed to run a simulation
//!
//! You may write `use ipsim::prelude::*` in your code and obtain
//! access to commonly used functionality.

pub use crate::base::{PoreStatus, StopReason, DEFAULT_OUT_DIR, DEFAULT_TEST_DIR};
pub use crate::model::{Facilitation, PressureAdjustment, PressureModel};
pub use crate::network::{Grain, Pore, PoreId, PoreNetwork, Radius, Throat};
pub use crate::sim::{Results, Selection, Simulation};
pub use crate::util::paraview_write_vtu;
