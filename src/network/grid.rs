use super::{Pore, PoreNetwork, Throat};
use crate::base::LegacyRandom;
use crate::StrError;

/// Specifies the pore radii of a regular grid
#[derive(Clone, Debug)]
pub enum Radius {
    /// The same radius for all pores
    Constant(f64),

    /// One radius per pore, sorted by pore id
    Values(Vec<f64>),

    /// Radii drawn from a normal distribution; values smaller than `min` are replaced by `min`
    ///
    /// The draws use [LegacyRandom] seeded with `seed` (one draw per pore, sorted by id).
    TruncatedNormal { mean: f64, std_dev: f64, min: f64, seed: u32 },
}

/// Specifies the grain (material) types of a regular grid
#[derive(Clone, Debug)]
pub enum Grain {
    /// The same grain type for all pores
    Constant(usize),

    /// One grain type per pore, sorted by pore id
    Values(Vec<usize>),
}

impl Radius {
    /// Generates the radii of `npore` pores
    fn generate(&self, npore: usize) -> Result<Vec<f64>, StrError> {
        match self {
            Radius::Constant(r) => Ok(vec![*r; npore]),
            Radius::Values(values) => {
                if values.len() != npore {
                    return Err("the number of radius values must equal the number of pores");
                }
                Ok(values.clone())
            }
            Radius::TruncatedNormal {
                mean,
                std_dev,
                min,
                seed,
            } => {
                if *std_dev < 0.0 {
                    return Err("standard deviation of radius must be ≥ 0.0");
                }
                let mut rng = LegacyRandom::new(*seed);
                Ok((0..npore).map(|_| f64::max(rng.normal(*mean, *std_dev), *min)).collect())
            }
        }
    }
}

impl Grain {
    /// Generates the grain types of `npore` pores
    fn generate(&self, npore: usize) -> Result<Vec<usize>, StrError> {
        match self {
            Grain::Constant(g) => Ok(vec![*g; npore]),
            Grain::Values(values) => {
                if values.len() != npore {
                    return Err("the number of grain values must equal the number of pores");
                }
                Ok(values.clone())
            }
        }
    }
}

impl PoreNetwork {
    /// Allocates a regular grid of pores connected to their face neighbors
    ///
    /// The pore at the grid coordinate `(i, j, k)` has id `i + nx·(j + ny·k)` and is
    /// located at `(i, j, k)·cell_size`. Thus, sorting by id equals sorting by z, y, and x.
    ///
    /// ```text
    /// nx = 2, ny = 3, nz = 1 (top view)
    ///
    ///   y
    ///   ↑
    ///   4----5
    ///   |    |
    ///   2----3
    ///   |    |
    ///   0----1 → x
    /// ```
    ///
    /// # Input
    ///
    /// * `nx`, `ny`, `nz` -- number of pores along each direction (≥ 1)
    /// * `cell_size` -- spacing between pores (m)
    /// * `radius` -- pore radii
    /// * `grain` -- grain types
    pub fn new_grid(
        nx: usize,
        ny: usize,
        nz: usize,
        cell_size: f64,
        radius: Radius,
        grain: Grain,
    ) -> Result<Self, StrError> {
        if nx < 1 || ny < 1 || nz < 1 {
            return Err("the number of pores along each direction must be ≥ 1");
        }
        if !(cell_size > 0.0) {
            return Err("cell size must be > 0.0");
        }
        let npore = nx * ny * nz;
        let radii = radius.generate(npore)?;
        let grains = grain.generate(npore)?;
        let id = |i: usize, j: usize, k: usize| i + nx * (j + ny * k);
        let mut pores = Vec::with_capacity(npore);
        let mut throats = Vec::with_capacity(3 * npore);
        for k in 0..nz {
            for j in 0..ny {
                for i in 0..nx {
                    let n = id(i, j, k);
                    let (x, y, z) = (i as f64 * cell_size, j as f64 * cell_size, k as f64 * cell_size);
                    pores.push(Pore::new(n, x, y, z, radii[n], grains[n]));
                    let mut connect = |other: usize| {
                        throats.push(Throat {
                            id: throats.len(),
                            start: n,
                            end: other,
                        })
                    };
                    if i + 1 < nx {
                        connect(id(i + 1, j, k));
                    }
                    if j + 1 < ny {
                        connect(id(i, j + 1, k));
                    }
                    if k + 1 < nz {
                        connect(id(i, j, k + 1));
                    }
                }
            }
        }
        PoreNetwork::new(pores, throats)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
