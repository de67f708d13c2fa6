use crate::base::{DEFAULT_GRAVITY, DEFAULT_GRAVITY_ANGLE};
use crate::network::{Pore, PoreNetwork};
use crate::StrError;
use std::f64::consts::PI;
use std::fmt;

/// Computes the capillary, buoyancy, and total pressures of the pores
///
/// The pressures of a pore with radius `R`, elevation `z`, and contact angle `θ` are:
///
/// ```text
/// pc = -2 σ cos(θ) / R
/// pg = (ρd - ρi) g cos(α) z
/// pt = pc + pg
/// ```
///
/// where `σ` is the surface tension, `ρd` and `ρi` are the defending and invading fluid
/// densities, `g` is the gravity acceleration, and `α` is the angle between the gravity
/// vector and the z axis (180° means gravity pointing down).
#[derive(Clone, Debug)]
pub struct PressureModel {
    /// Contact angles (degrees) of the invading fluid; one value per grain type
    pub contact_angles: Vec<f64>,

    /// Invading fluid density (kg/m³)
    pub invading_density: f64,

    /// Defending fluid density (kg/m³)
    pub defending_density: f64,

    /// Surface tension (N/m)
    pub tension: f64,

    /// Gravity acceleration (m/s²)
    pub gravity: f64,

    /// Angle (degrees) between the gravity vector and the z axis
    pub gravity_angle: f64,
}

impl PressureModel {
    /// Allocates a new instance with the default gravity (9.8 m/s² pointing down)
    ///
    /// # Input
    ///
    /// * `contact_angles` -- contact angles (degrees), one per grain type
    /// * `invading_density` -- invading fluid density (kg/m³)
    /// * `defending_density` -- defending fluid density (kg/m³)
    /// * `tension` -- surface tension (N/m)
    pub fn new(
        contact_angles: &[f64],
        invading_density: f64,
        defending_density: f64,
        tension: f64,
    ) -> Result<Self, StrError> {
        if contact_angles.iter().any(|a| !a.is_finite()) {
            return Err("contact angles must be finite");
        }
        if !(invading_density >= 0.0) || !(defending_density >= 0.0) {
            return Err("densities must be ≥ 0.0");
        }
        if !(tension > 0.0) {
            return Err("surface tension must be > 0.0");
        }
        Ok(PressureModel {
            contact_angles: contact_angles.to_vec(),
            invading_density,
            defending_density,
            tension,
            gravity: DEFAULT_GRAVITY,
            gravity_angle: DEFAULT_GRAVITY_ANGLE,
        })
    }

    /// Sets the gravity acceleration
    pub fn set_gravity(&mut self, value: f64) -> Result<&mut Self, StrError> {
        if !(value >= 0.0) {
            return Err("gravity must be ≥ 0.0");
        }
        self.gravity = value;
        Ok(self)
    }

    /// Sets the angle (degrees) between the gravity vector and the z axis
    pub fn set_gravity_angle(&mut self, degrees: f64) -> Result<&mut Self, StrError> {
        if !degrees.is_finite() {
            return Err("gravity angle must be finite");
        }
        self.gravity_angle = degrees;
        Ok(self)
    }

    /// Returns the contact angle of a grain type, if available
    #[inline]
    pub fn contact_angle(&self, grain: usize) -> Option<f64> {
        self.contact_angles.get(grain).copied()
    }

    /// Calculates the capillary pressure
    ///
    /// Returns NaN if the angle is not available.
    pub fn capillary_pressure(&self, angle: Option<f64>, radius: f64) -> f64 {
        match angle {
            Some(degrees) => -2.0 * self.tension * f64::cos(degrees * PI / 180.0) / radius,
            None => f64::NAN,
        }
    }

    /// Calculates the buoyancy (gravity) pressure at elevation z
    pub fn buoyancy_pressure(&self, z: f64) -> f64 {
        (self.defending_density - self.invading_density) * self.gravity * f64::cos(self.gravity_angle * PI / 180.0) * z
    }

    /// Recomputes the capillary and total pressures using an effective radius `multiplier·radius`
    pub(crate) fn update_capillary(&self, pore: &mut Pore, multiplier: f64) {
        pore.pc = self.capillary_pressure(pore.angle, pore.radius * multiplier);
        pore.pt = pore.pc + pore.pg;
    }

    /// Computes the pressures of all pores and sets the initial occupancy
    ///
    /// The pores at the minimum elevation become inlets (start) and are occupied.
    /// The pores at the maximum elevation become outlets (end). Pores whose grain type
    /// has no contact angle get undefined (NaN) pressures and will never be invaded.
    ///
    /// Use [PoreNetwork::set_boundaries] afterwards to choose other inlets/outlets.
    pub fn initialize_pores(&self, network: &mut PoreNetwork) -> Result<(), StrError> {
        if network.is_empty() {
            return Err("cannot initialize a network without pores");
        }
        let z_min = network.min_z();
        let z_max = network.max_z();
        for pore in network.pores_mut() {
            pore.angle = self.contact_angle(pore.grain);
            pore.pg = self.buoyancy_pressure(pore.z);
            self.update_capillary(pore, 1.0);
            pore.start = pore.z <= z_min;
            pore.end = pore.z >= z_max;
            pore.reset_status();
        }
        network.initialized = true;
        Ok(())
    }
}

impl fmt::Display for PressureModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pressure model\n")?;
        write!(f, "==============\n")?;
        write!(f, "contact_angles = {:?}\n", self.contact_angles)?;
        write!(f, "invading_density = {:?}\n", self.invading_density)?;
        write!(f, "defending_density = {:?}\n", self.defending_density)?;
        write!(f, "tension = {:?}\n", self.tension)?;
        write!(f, "gravity = {:?}\n", self.gravity)?;
        write!(f, "gravity_angle = {:?}\n", self.gravity_angle)?;
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
