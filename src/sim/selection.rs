use super::Front;
use crate::base::LegacyRandom;
use crate::network::PoreNetwork;
use crate::StrError;

/// Maps a uniform draw into a rank of the (ascending) sorted front
///
/// Computes `ceil(draw^exponent · n)` and returns `n - 1` if the result equals `n`.
/// Large exponents push the rank towards one (the second smallest pressure) because
/// the ceiling maps any positive `draw^exponent · n ≤ 1` to one. Rank zero happens
/// only if `draw^exponent · n` is exactly zero (a zero draw or an underflow). An
/// exponent equal to one gives an almost uniform choice.
///
/// # Input
///
/// * `n` -- number of candidates (≥ 1)
/// * `draw` -- uniform value in [0, 1)
/// * `exponent` -- bias exponent `c = 1/p`
pub fn rank_from_draw(n: usize, draw: f64, exponent: f64) -> usize {
    let rank = f64::ceil(f64::powf(draw, exponent) * n as f64) as usize;
    usize::min(rank, n.saturating_sub(1))
}

/// Defines the rule that chooses the next pore to be invaded
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Selection {
    /// Chooses the front pore with the smallest total pressure (ties go to the smallest id)
    Minimum,

    /// Chooses a front pore by rank with a power-law biased random draw
    RankBiased { exponent: f64 },
}

impl Selection {
    /// Allocates a new instance given the stochastic parameter p ∈ [0, 1]
    ///
    /// `p = 0` gives [Selection::Minimum]; otherwise the bias exponent is `c = 1/p`.
    pub fn new(p: f64) -> Result<Self, StrError> {
        if !(p >= 0.0 && p <= 1.0) {
            return Err("p must be in [0, 1]");
        }
        if p == 0.0 {
            Ok(Selection::Minimum)
        } else {
            Ok(Selection::RankBiased { exponent: 1.0 / p })
        }
    }

    /// Returns the bias exponent (infinity for the deterministic selection)
    pub fn exponent(&self) -> f64 {
        match self {
            Selection::Minimum => f64::INFINITY,
            Selection::RankBiased { exponent } => *exponent,
        }
    }

    /// Chooses the next pore, marks it as occupied, and returns its index and threshold
    ///
    /// The threshold is the total pressure of the chosen pore. Pores with undefined
    /// (NaN) total pressure are never chosen. Returns None if the front has no pore
    /// with a defined total pressure (including the empty front). A random number is
    /// drawn only by [Selection::RankBiased] and only if there is a candidate.
    pub fn select(&self, network: &mut PoreNetwork, front: &Front, rng: &mut LegacyRandom) -> Option<(usize, f64)> {
        let n = front.ranked_len();
        if n == 0 {
            return None;
        }
        let (index, threshold) = match self {
            Selection::Minimum => front.ranked().next()?,
            Selection::RankBiased { exponent } => {
                let rank = rank_from_draw(n, rng.uniform(), *exponent);
                front.ranked().nth(rank)?
            }
        };
        network.pore_mut(index).occupy_now();
        Some((index, threshold))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
