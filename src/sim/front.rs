use crate::network::{PoreId, PoreNetwork};
use crate::StrError;
use std::cmp::Ordering;
use std::collections::BTreeSet;

/// Orders total pressures with [f64::total_cmp]
#[derive(Clone, Copy, Debug)]
struct Pressure(f64);

impl PartialEq for Pressure {
    fn eq(&self, other: &Self) -> bool {
        self.0.total_cmp(&other.0) == Ordering::Equal
    }
}

impl Eq for Pressure {}

impl PartialOrd for Pressure {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pressure {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Tracks the invasion front: the unoccupied pores adjacent to at least one occupied pore
///
/// The front is kept in two places that must agree: the status of each pore
/// ([crate::base::PoreStatus::Front]) and an ordered set of pore indices used for
/// the selection of the next pore.
///
/// The front pores with a defined (not NaN) total pressure are also kept sorted by
/// `(pt, index)`; thus, the smallest pressure is found in O(log n). The sorting uses
/// the pressures at insertion time; call [Front::rerank] after changing the pressures.
#[derive(Clone, Debug)]
pub struct Front {
    /// Holds the indices of the pores on the front (sorted, thus also sorted by id)
    indices: BTreeSet<usize>,

    /// Holds the front pores with defined total pressure sorted by (pt, index)
    ranked: BTreeSet<(Pressure, usize)>,
}

impl Front {
    /// Allocates a new (empty) instance
    pub fn new() -> Self {
        Front {
            indices: BTreeSet::new(),
            ranked: BTreeSet::new(),
        }
    }

    /// Returns the number of pores on the front
    #[inline]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Returns true if the front is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Returns the indices of the pores on the front
    #[inline]
    pub fn indices(&self) -> &BTreeSet<usize> {
        &self.indices
    }

    /// Returns the number of front pores with defined total pressure
    #[inline]
    pub fn ranked_len(&self) -> usize {
        self.ranked.len()
    }

    /// Returns the (index, pt) pairs of the front pores with defined total pressure
    ///
    /// The pairs are sorted by pt; ties are sorted by index (thus by id).
    pub fn ranked(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.ranked.iter().map(|(pt, index)| (*index, pt.0))
    }

    /// Returns the ids of the pores on the front (sorted)
    pub fn ids(&self, network: &PoreNetwork) -> Vec<PoreId> {
        self.indices.iter().map(|i| network.pore(*i).id).collect()
    }

    /// Rebuilds the front from scratch using the occupied pores
    pub fn rebuild(&mut self, network: &mut PoreNetwork) {
        self.indices.clear();
        self.ranked.clear();
        for index in 0..network.len() {
            network.pore_mut(index).clear_front();
        }
        for index in 0..network.len() {
            if !network.pore(index).is_occupied() {
                continue;
            }
            for k in 0..network.connectivity(index) {
                let neighbor = network.adjacency(index)[k];
                if network.pore_mut(neighbor).mark_front() {
                    self.insert(network, neighbor);
                }
            }
        }
    }

    /// Updates the front after a pore has been invaded
    ///
    /// Only the neighbors of the invaded pore are visited; the other front pores
    /// remain on the front because occupied pores never return to the front.
    pub fn update(&mut self, network: &mut PoreNetwork, invaded: usize) {
        network.pore_mut(invaded).clear_front();
        if self.indices.remove(&invaded) {
            self.ranked.remove(&(Pressure(network.pore(invaded).pt), invaded));
        }
        for k in 0..network.connectivity(invaded) {
            let neighbor = network.adjacency(invaded)[k];
            if network.pore_mut(neighbor).mark_front() {
                self.insert(network, neighbor);
            }
        }
    }

    /// Sorts the front pores again using the current total pressures
    pub fn rerank(&mut self, network: &PoreNetwork) {
        self.ranked.clear();
        for index in &self.indices {
            let pt = network.pore(*index).pt;
            if !pt.is_nan() {
                self.ranked.insert((Pressure(pt), *index));
            }
        }
    }

    /// Adds a pore to the front
    fn insert(&mut self, network: &PoreNetwork, index: usize) {
        if self.indices.insert(index) {
            let pt = network.pore(index).pt;
            if !pt.is_nan() {
                self.ranked.insert((Pressure(pt), index));
            }
        }
    }

    /// Checks that the front equals the unoccupied pores adjacent to occupied pores
    pub fn verify(&self, network: &PoreNetwork) -> Result<(), StrError> {
        let mut expected = BTreeSet::new();
        for index in 0..network.len() {
            if network.pore(index).is_occupied() {
                for neighbor in network.adjacency(index) {
                    if !network.pore(*neighbor).is_occupied() {
                        expected.insert(*neighbor);
                    }
                }
            }
        }
        if expected != self.indices {
            return Err("front differs from the unoccupied pores adjacent to occupied pores");
        }
        for index in 0..network.len() {
            if network.pore(index).is_front() != self.indices.contains(&index) {
                return Err("pore status disagrees with the front");
            }
        }
        let ranked: BTreeSet<_> = self
            .indices
            .iter()
            .map(|index| (Pressure(network.pore(*index).pt), *index))
            .filter(|(pt, _)| !pt.0.is_nan())
            .collect();
        if ranked != self.ranked {
            return Err("front ranking disagrees with the total pressures");
        }
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
