//! Contains utility functions to export the results

mod paraview;
pub use paraview::*;
