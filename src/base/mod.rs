//! Implements the base structures for an invasion percolation simulation

mod constants;
mod enums;
mod legacy_random;
pub use crate::base::constants::*;
pub use crate::base::enums::*;
pub use crate::base::legacy_random::*;
