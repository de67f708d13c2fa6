use super::{Pore, PoreId};
use crate::StrError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::ffi::OsStr;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

/// Holds a throat (network edge) connecting two pores
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct Throat {
    /// Identification number
    pub id: usize,

    /// Id of the first pore
    pub start: PoreId,

    /// Id of the second pore
    pub end: PoreId,
}

/// Holds the data written to (or read from) a JSON file
#[derive(Deserialize, Serialize)]
struct NetworkData {
    pores: Vec<Pore>,
    throats: Vec<Throat>,
}

/// Holds a pore network: pores (nodes), throats (edges) and the adjacency map
///
/// The pores are stored sorted by id. Most functions take the *index* of a pore
/// in this sorted array; use [PoreNetwork::index_of] to convert an id into an index.
#[derive(Clone, Debug)]
pub struct PoreNetwork {
    /// Holds all pores sorted by id
    pores: Vec<Pore>,

    /// Maps pore id to index in `pores`
    index: HashMap<PoreId, usize>,

    /// Holds all throats
    throats: Vec<Throat>,

    /// Holds the indices of the neighbors of each pore (npore)
    adjacency: Vec<Vec<usize>>,

    /// Indicates that the pressures have been computed by a PressureModel
    pub(crate) initialized: bool,
}

impl PoreNetwork {
    /// Allocates a new instance
    ///
    /// # Input
    ///
    /// * `pores` -- the pores in any order; they will be sorted by id
    /// * `throats` -- the connections; duplicates and self-loops are ignored
    pub fn new(mut pores: Vec<Pore>, throats: Vec<Throat>) -> Result<Self, StrError> {
        pores.sort_by_key(|pore| pore.id);
        let mut index = HashMap::with_capacity(pores.len());
        for (i, pore) in pores.iter().enumerate() {
            if index.insert(pore.id, i).is_some() {
                return Err("pore ids must be unique");
            }
        }
        let mut adjacency = vec![Vec::new(); pores.len()];
        for throat in &throats {
            let a = *index.get(&throat.start).ok_or("throat refers to a non-existent pore")?;
            let b = *index.get(&throat.end).ok_or("throat refers to a non-existent pore")?;
            if a == b || adjacency[a].contains(&b) {
                continue;
            }
            adjacency[a].push(b);
            adjacency[b].push(a);
        }
        Ok(PoreNetwork {
            pores,
            index,
            throats,
            adjacency,
            initialized: false,
        })
    }

    /// Returns the number of pores
    #[inline]
    pub fn len(&self) -> usize {
        self.pores.len()
    }

    /// Returns true if there are no pores
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pores.is_empty()
    }

    /// Returns all pores (sorted by id)
    #[inline]
    pub fn pores(&self) -> &[Pore] {
        &self.pores
    }

    /// Returns mutable access to all pores (e.g., to modify radii)
    ///
    /// **Note:** The pressures must be recomputed with
    /// [crate::model::PressureModel::initialize_pores] afterwards.
    pub fn pores_mut(&mut self) -> &mut [Pore] {
        self.initialized = false;
        &mut self.pores
    }

    /// Returns the pore at a given index
    #[inline]
    pub fn pore(&self, index: usize) -> &Pore {
        &self.pores[index]
    }

    /// Returns mutable access to the pore at a given index (crate-only)
    #[inline]
    pub(crate) fn pore_mut(&mut self, index: usize) -> &mut Pore {
        &mut self.pores[index]
    }

    /// Returns the pore with a given id
    pub fn pore_by_id(&self, id: PoreId) -> Result<&Pore, StrError> {
        Ok(&self.pores[self.index_of(id)?])
    }

    /// Returns the index of the pore with a given id
    pub fn index_of(&self, id: PoreId) -> Result<usize, StrError> {
        self.index.get(&id).copied().ok_or("cannot find pore with the given id")
    }

    /// Returns all throats
    #[inline]
    pub fn throats(&self) -> &[Throat] {
        &self.throats
    }

    /// Returns the indices of the neighbors of a pore
    #[inline]
    pub fn adjacency(&self, index: usize) -> &[usize] {
        &self.adjacency[index]
    }

    /// Returns the ids of the neighbors of the pore with a given id
    pub fn neighbor_ids(&self, id: PoreId) -> Result<Vec<PoreId>, StrError> {
        let index = self.index_of(id)?;
        Ok(self.adjacency[index].iter().map(|n| self.pores[*n].id).collect())
    }

    /// Returns the number of neighbors of a pore
    #[inline]
    pub fn connectivity(&self, index: usize) -> usize {
        self.adjacency[index].len()
    }

    /// Returns the minimum z-coordinate (or NaN if there are no pores)
    pub fn min_z(&self) -> f64 {
        self.pores.iter().map(|p| p.z).reduce(f64::min).unwrap_or(f64::NAN)
    }

    /// Returns the maximum z-coordinate (or NaN if there are no pores)
    pub fn max_z(&self) -> f64 {
        self.pores.iter().map(|p| p.z).reduce(f64::max).unwrap_or(f64::NAN)
    }

    /// Returns true if the pressures have been computed
    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Multiplies coordinates and radii by a factor (e.g., to convert cm to m)
    pub fn scale_lengths(&mut self, factor: f64) -> Result<&mut Self, StrError> {
        if !(factor > 0.0) {
            return Err("length factor must be > 0.0");
        }
        for pore in self.pores_mut() {
            pore.x *= factor;
            pore.y *= factor;
            pore.z *= factor;
            pore.radius *= factor;
        }
        Ok(self)
    }

    /// Replaces radii smaller than `min` by `min`
    pub fn truncate_radius(&mut self, min: f64) -> Result<&mut Self, StrError> {
        if !(min > 0.0) {
            return Err("minimum radius must be > 0.0");
        }
        for pore in self.pores_mut() {
            if pore.radius < min {
                pore.radius = min;
            }
        }
        Ok(self)
    }

    /// Adds an offset to all grain types (e.g., -1 to convert one-based into zero-based)
    pub fn shift_grain(&mut self, offset: i64) -> Result<&mut Self, StrError> {
        for pore in &self.pores {
            if (pore.grain as i64) + offset < 0 {
                return Err("grain type cannot become negative");
            }
        }
        for pore in self.pores_mut() {
            pore.grain = ((pore.grain as i64) + offset) as usize;
        }
        Ok(self)
    }

    /// Sets the inlet and outlet pores and resets the occupancy
    ///
    /// This function replaces the default inlet (pores at the minimum z) and outlet
    /// (pores at the maximum z) set by [crate::model::PressureModel::initialize_pores].
    /// After this call, the occupied pores are exactly the inlet pores.
    ///
    /// # Input
    ///
    /// * `is_start` -- returns true if the pore is an inlet
    /// * `is_end` -- returns true if the pore is an outlet
    pub fn set_boundaries<F, G>(&mut self, is_start: F, is_end: G) -> &mut Self
    where
        F: Fn(&Pore) -> bool,
        G: Fn(&Pore) -> bool,
    {
        for pore in &mut self.pores {
            pore.start = is_start(pore);
            pore.end = is_end(pore);
            pore.reset_status();
        }
        self
    }

    /// Resets the occupancy: only the inlet pores become occupied
    pub fn reset_occupancy(&mut self) {
        for pore in &mut self.pores {
            pore.reset_status();
        }
    }

    /// Returns true if an outlet pore is occupied
    pub fn reached_outlet(&self) -> bool {
        self.pores.iter().any(|p| p.end && p.is_occupied())
    }

    /// Returns the ids of the occupied pores (sorted)
    pub fn occupied_ids(&self) -> Vec<PoreId> {
        self.pores.iter().filter(|p| p.is_occupied()).map(|p| p.id).collect()
    }

    /// Returns the ids of the pores on the front (sorted)
    pub fn front_ids(&self) -> Vec<PoreId> {
        self.pores.iter().filter(|p| p.is_front()).map(|p| p.id).collect()
    }

    /// Reads a JSON file containing the pores and throats
    ///
    /// # Input
    ///
    /// * `full_path` -- may be a String, &str, or Path
    pub fn read_json<P>(full_path: &P) -> Result<Self, StrError>
    where
        P: AsRef<OsStr> + ?Sized,
    {
        let path = Path::new(full_path).to_path_buf();
        let file = File::open(&path).map_err(|_| "file not found")?;
        let reader = BufReader::new(file);
        let data: NetworkData = serde_json::from_reader(reader).map_err(|_| "deserialize failed")?;
        PoreNetwork::new(data.pores, data.throats)
    }

    /// Writes a JSON file with the pores and throats
    ///
    /// **Note:** The pressures are not recomputed when reading the file back.
    ///
    /// # Input
    ///
    /// * `full_path` -- may be a String, &str, or Path
    pub fn write_json<P>(&self, full_path: &P) -> Result<(), StrError>
    where
        P: AsRef<OsStr> + ?Sized,
    {
        let path = Path::new(full_path).to_path_buf();
        if let Some(p) = path.parent() {
            fs::create_dir_all(p).map_err(|_| "cannot create directory")?;
        }
        let data = NetworkData {
            pores: self.pores.clone(),
            throats: self.throats.clone(),
        };
        let mut file = File::create(&path).map_err(|_| "cannot create file")?;
        serde_json::to_writer(&mut file, &data).map_err(|_| "cannot write file")?;
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
