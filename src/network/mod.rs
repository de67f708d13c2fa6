//! Implements the pore network (pores, throats, and adjacency) and its builders

mod grid;
mod pore;
mod pore_network;
mod read_text;
pub use crate::network::grid::*;
pub use crate::network::pore::*;
pub use crate::network::pore_network::*;
