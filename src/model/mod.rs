//! Implements the pressure model and the pressure adjustment strategies

mod facilitation;
mod pressure_model;
pub use crate::model::facilitation::*;
pub use crate::model::pressure_model::*;
