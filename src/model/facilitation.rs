use super::PressureModel;
use crate::network::PoreNetwork;
use std::collections::BTreeSet;

/// Defines a strategy to adjust the pore pressures between invasion steps
///
/// The simulation calls `adjust` after the front is rebuilt and after each
/// incremental update of the front.
pub trait PressureAdjustment {
    /// Adjusts the pressures of the pores
    ///
    /// # Input
    ///
    /// * `network` -- the pore network (pressures are modified in place)
    /// * `model` -- the model used to compute the pressures
    /// * `front` -- the indices of the pores on the invasion front
    fn adjust(&self, network: &mut PoreNetwork, model: &PressureModel, front: &BTreeSet<usize>);
}

/// Implements the (experimental) facilitation of pore filling by neighboring front pores
///
/// The capillary pressure of a front pore is computed with an effective radius
/// `m·R`, where
///
/// ```text
///          n/nf - 1/nf
/// m = 2 - ─────────────
///           1 - 1/nf
/// ```
///
/// `n` is the number of neighbors of the pore that are also on the front and `nf` is
/// the connectivity of the pore. All other pores use `m = 1`, as do pores with `nf ≤ 1`.
///
/// **Warning:** This strategy has not been validated against experiments.
pub struct Facilitation;

impl Facilitation {
    /// Returns the radius multiplier given the number of front neighbors and the connectivity
    pub fn radius_multiplier(n_front_neighbors: usize, connectivity: usize) -> f64 {
        if connectivity <= 1 {
            return 1.0;
        }
        let n = n_front_neighbors as f64;
        let nf = connectivity as f64;
        2.0 - ((n / nf - 1.0 / nf) / (1.0 - 1.0 / nf))
    }
}

impl PressureAdjustment for Facilitation {
    fn adjust(&self, network: &mut PoreNetwork, model: &PressureModel, front: &BTreeSet<usize>) {
        let multipliers: Vec<_> = (0..network.len())
            .map(|index| {
                if front.contains(&index) {
                    let n = network.adjacency(index).iter().filter(|j| front.contains(*j)).count();
                    Facilitation::radius_multiplier(n, network.connectivity(index))
                } else {
                    1.0
                }
            })
            .collect();
        for (index, multiplier) in multipliers.into_iter().enumerate() {
            model.update_capillary(network.pore_mut(index), multiplier);
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
