//! Physical constants and temperature.

use serde::Deserialize;

use crate::error::{JunctionError, Result};

/// Elementary charge in C.
pub const ELEMENTARY_CHARGE: f64 = 1.602176634e-19;
/// Boltzmann constant in J/K.
pub const BOLTZMANN: f64 = 1.380649e-23;
/// Vacuum permittivity in F/m.
pub const VACUUM_PERMITTIVITY: f64 = 8.854187817e-12;
/// Relative permittivity of silicon.
pub const SILICON_RELATIVE_PERMITTIVITY: f64 = 11.7;

/// Constants shared by every calculation of a scenario.
///
/// Never mutated once a [`Junction`](super::Junction) has been built from it.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct PhysicalConstants {
    /// Elementary charge (C)
    pub charge: f64,
    /// Boltzmann constant (J/K)
    pub boltzmann: f64,
    /// Vacuum permittivity (F/m)
    pub vacuum_permittivity: f64,
    /// Relative permittivity of the semiconductor
    pub relative_permittivity: f64,
    /// Lattice temperature (K)
    pub temperature: f64,
}

impl Default for PhysicalConstants {
    fn default() -> Self {
        Self {
            charge: ELEMENTARY_CHARGE,
            boltzmann: BOLTZMANN,
            vacuum_permittivity: VACUUM_PERMITTIVITY,
            relative_permittivity: SILICON_RELATIVE_PERMITTIVITY,
            temperature: crate::DEFAULT_TEMPERATURE,
        }
    }
}

impl PhysicalConstants {
    /// Same constants at another temperature.
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    /// Every constant must be positive and finite.
    pub fn validate(&self) -> Result<()> {
        let values = [
            ("charge", self.charge),
            ("boltzmann", self.boltzmann),
            ("vacuum_permittivity", self.vacuum_permittivity),
            ("relative_permittivity", self.relative_permittivity),
            ("temperature", self.temperature),
        ];
        for (param, value) in values {
            if !(value.is_finite() && value > 0.0) {
                return Err(JunctionError::invalid_parameter(param, value, "must be positive and finite"));
            }
        }
        Ok(())
    }

    /// k_B * T in J.
    pub fn thermal_energy(&self) -> f64 {
        self.boltzmann * self.temperature
    }

    /// k_B * T / q in V (about 25.85 mV at 300 K).
    pub fn thermal_voltage(&self) -> f64 {
        self.thermal_energy() / self.charge
    }

    /// Absolute permittivity of the semiconductor, εr * ε0, in F/m.
    pub fn semiconductor_permittivity(&self) -> f64 {
        self.relative_permittivity * self.vacuum_permittivity
    }
}
