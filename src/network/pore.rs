use crate::base::PoreStatus;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Defines the identification number of a pore (as given by the network builder)
pub type PoreId = usize;

/// Holds the geometric and physical data of a pore (network node)
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Pore {
    /// Identification number
    pub id: PoreId,

    /// x-coordinate (m)
    pub x: f64,

    /// y-coordinate (m)
    pub y: f64,

    /// z-coordinate (m); elevation
    pub z: f64,

    /// Radius (m)
    pub radius: f64,

    /// Grain (material) type; zero-based index into the list of contact angles
    pub grain: usize,

    /// Contact angle of the invading fluid (degrees) or None if the grain has no angle
    pub angle: Option<f64>,

    /// Capillary pressure (Pa)
    #[serde(with = "nan_as_null")]
    pub pc: f64,

    /// Buoyancy (gravity) pressure (Pa)
    #[serde(with = "nan_as_null")]
    pub pg: f64,

    /// Total pressure pc + pg (Pa); the invasion threshold of this pore
    #[serde(with = "nan_as_null")]
    pub pt: f64,

    /// Inlet flag
    pub start: bool,

    /// Outlet flag
    pub end: bool,

    /// Invasion state; modified only by the front tracker and the selection policy
    pub(crate) status: PoreStatus,
}

impl Pore {
    /// Allocates a new instance with undefined pressures
    pub fn new(id: PoreId, x: f64, y: f64, z: f64, radius: f64, grain: usize) -> Self {
        Pore {
            id,
            x,
            y,
            z,
            radius,
            grain,
            angle: None,
            pc: f64::NAN,
            pg: f64::NAN,
            pt: f64::NAN,
            start: false,
            end: false,
            status: PoreStatus::Unvisited,
        }
    }

    /// Returns the invasion state
    #[inline]
    pub fn status(&self) -> PoreStatus {
        self.status
    }

    /// Returns 1 if the pore is occupied by the invading fluid, 0 otherwise
    #[inline]
    pub fn occupy(&self) -> i32 {
        if self.status == PoreStatus::Occupied {
            1
        } else {
            0
        }
    }

    /// Returns 1 if the pore is on the invasion front, 0 otherwise
    #[inline]
    pub fn neighbor(&self) -> i32 {
        if self.status == PoreStatus::Front {
            1
        } else {
            0
        }
    }

    /// Returns true if the pore is occupied
    #[inline]
    pub fn is_occupied(&self) -> bool {
        self.status == PoreStatus::Occupied
    }

    /// Returns true if the pore is on the front
    #[inline]
    pub fn is_front(&self) -> bool {
        self.status == PoreStatus::Front
    }

    /// Puts the pore on the front
    ///
    /// Returns false (and does nothing) if the pore is occupied.
    pub(crate) fn mark_front(&mut self) -> bool {
        match self.status {
            PoreStatus::Occupied => false,
            _ => {
                self.status = PoreStatus::Front;
                true
            }
        }
    }

    /// Removes the pore from the front; occupied pores are not affected
    pub(crate) fn clear_front(&mut self) {
        if self.status == PoreStatus::Front {
            self.status = PoreStatus::Unvisited;
        }
    }

    /// Marks the pore as invaded
    pub(crate) fn occupy_now(&mut self) {
        self.status = PoreStatus::Occupied;
    }

    /// Sets the initial state: occupied if inlet, unvisited otherwise
    pub(crate) fn reset_status(&mut self) {
        self.status = if self.start {
            PoreStatus::Occupied
        } else {
            PoreStatus::Unvisited
        };
    }
}

/// Writes undefined (NaN) pressures as JSON null and reads them back
mod nan_as_null {
    use super::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_nan() {
            serializer.serialize_none()
        } else {
            serializer.serialize_some(value)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
