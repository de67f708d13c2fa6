use crate::base::StopReason;
use crate::network::PoreId;
use crate::StrError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::ffi::OsStr;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

/// Holds one invasion step
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct Invasion {
    /// Id of the invaded pore
    pub node: PoreId,

    /// Total pressure of the invaded pore at the time of invasion
    pub threshold: f64,
}

/// Holds the invasion sequence of a run
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Results {
    /// The invasions in chronological order
    pub invasions: Vec<Invasion>,

    /// The reason why the run stopped (None if the run has not finished)
    pub stop_reason: Option<StopReason>,
}

impl Results {
    /// Allocates a new (empty) instance
    pub fn new() -> Self {
        Results {
            invasions: Vec::new(),
            stop_reason: None,
        }
    }

    /// Returns the number of invasions
    pub fn len(&self) -> usize {
        self.invasions.len()
    }

    /// Returns true if no pore has been invaded
    pub fn is_empty(&self) -> bool {
        self.invasions.is_empty()
    }

    /// Appends an invasion
    pub fn push(&mut self, node: PoreId, threshold: f64) {
        self.invasions.push(Invasion { node, threshold });
    }

    /// Returns the ids of the invaded pores in chronological order
    pub fn nodes(&self) -> Vec<PoreId> {
        self.invasions.iter().map(|inv| inv.node).collect()
    }

    /// Returns the invasion thresholds in chronological order
    pub fn thresholds(&self) -> Vec<f64> {
        self.invasions.iter().map(|inv| inv.threshold).collect()
    }

    /// Returns the iteration (starting at zero) at which a pore has been invaded
    pub fn iteration_of(&self, node: PoreId) -> Option<usize> {
        self.invasions.iter().position(|inv| inv.node == node)
    }

    /// Returns a map from the id of each invaded pore to its iteration (starting at zero)
    pub fn iterations(&self) -> HashMap<PoreId, usize> {
        let mut map = HashMap::with_capacity(self.invasions.len());
        for (iteration, inv) in self.invasions.iter().enumerate() {
            map.entry(inv.node).or_insert(iteration);
        }
        map
    }

    /// Reads a JSON file containing the results
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
        let results = serde_json::from_reader(reader).map_err(|_| "deserialize failed")?;
        Ok(results)
    }

    /// Writes a JSON file with the results
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
        let mut file = File::create(&path).map_err(|_| "cannot create file")?;
        serde_json::to_writer_pretty(&mut file, &self).map_err(|_| "cannot write file")?;
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
