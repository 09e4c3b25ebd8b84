//! Junction parameters and the validated [`Junction`] built from them.

use serde::Deserialize;

use crate::error::{JunctionError, Result};

use super::barrier::potential_barrier;
use super::PhysicalConstants;

/// How the intrinsic carrier concentration ni is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntrinsicDensity {
    /// ni = exp(-Eg / (2 k_B T)) * sqrt(Nc * Nv)
    #[default]
    Derived,
    /// A fixed literal value in m^-3
    Fixed(f64),
}

/// Doping, band and transport parameters of a p-n junction, in SI units.
///
/// Fields missing from a scenario file fall back to [`JunctionConfig::homojunction`].
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct JunctionConfig {
    /// Acceptor concentration NA (m^-3)
    pub acceptor_density: f64,
    /// Donor concentration ND (m^-3)
    pub donor_density: f64,
    /// Effective density of states in the conduction band Nc (m^-3)
    pub conduction_dos: f64,
    /// Effective density of states in the valence band Nv (m^-3)
    pub valence_dos: f64,
    /// Bandgap Eg (eV)
    pub bandgap: f64,
    /// Electron diffusion coefficient Dn (m^2/s)
    pub electron_diffusivity: f64,
    /// Hole diffusion coefficient Dp (m^2/s)
    pub hole_diffusivity: f64,
    /// Electron lifetime (s)
    pub electron_lifetime: f64,
    /// Hole lifetime (s)
    pub hole_lifetime: f64,
    /// Thickness of the p layer dp (m)
    pub p_thickness: f64,
    /// Thickness of the n layer dn (m)
    pub n_thickness: f64,
    pub intrinsic_density: IntrinsicDensity,
}

impl Default for JunctionConfig {
    fn default() -> Self {
        Self::homojunction()
    }
}

impl JunctionConfig {
    /// Lightly doped p-side homojunction used for the I-V studies.
    pub fn homojunction() -> Self {
        Self {
            acceptor_density: 1e12,
            donor_density: 1e18,
            conduction_dos: 1e20,
            valence_dos: 1e20,
            bandgap: 1.1,
            electron_diffusivity: 1.0e-3,
            hole_diffusivity: 1.0e-3,
            electron_lifetime: 1.0e-3,
            hole_lifetime: 1.0e-3,
            p_thickness: 200e-6,
            n_thickness: 1e-6,
            intrinsic_density: IntrinsicDensity::Derived,
        }
    }

    /// Symmetric silicon junction used for the band diagram, with the
    /// textbook room-temperature ni.
    pub fn silicon_reference() -> Self {
        Self {
            acceptor_density: 1e16,
            donor_density: 1e16,
            conduction_dos: 1e19,
            valence_dos: 1e19,
            bandgap: 1.12,
            intrinsic_density: IntrinsicDensity::Fixed(1.5e16),
            ..Self::homojunction()
        }
    }

    /// Check every value the model takes a logarithm, root or quotient of.
    pub fn validate(&self) -> Result<()> {
        let strictly_positive = [
            ("acceptor_density", self.acceptor_density),
            ("donor_density", self.donor_density),
            ("conduction_dos", self.conduction_dos),
            ("valence_dos", self.valence_dos),
            ("bandgap", self.bandgap),
            ("electron_diffusivity", self.electron_diffusivity),
            ("hole_diffusivity", self.hole_diffusivity),
            ("electron_lifetime", self.electron_lifetime),
            ("hole_lifetime", self.hole_lifetime),
        ];
        for (param, value) in strictly_positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(JunctionError::invalid_parameter(
                    param,
                    value,
                    "must be positive and finite",
                ));
            }
        }

        for (param, value) in [("p_thickness", self.p_thickness), ("n_thickness", self.n_thickness)] {
            if !value.is_finite() {
                return Err(JunctionError::invalid_parameter(param, value, "must be finite"));
            }
        }

        if let IntrinsicDensity::Fixed(ni) = self.intrinsic_density {
            if !(ni.is_finite() && ni > 0.0) {
                return Err(JunctionError::invalid_parameter(
                    "intrinsic_density",
                    ni,
                    "must be positive and finite",
                ));
            }
        }

        Ok(())
    }
}

/// A validated junction together with its cached derived quantities.
///
/// Read-only once built; cheap to copy into solvers and worker threads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Junction {
    config: JunctionConfig,
    constants: PhysicalConstants,
    electron_diffusion_length: f64,
    hole_diffusion_length: f64,
    intrinsic_density: f64,
    built_in_potential: f64,
}

impl Junction {
    /// Validate `config` and precompute Ln, Lp, ni and Vbi.
    pub fn new(config: JunctionConfig, constants: PhysicalConstants) -> Result<Self> {
        constants.validate()?;
        config.validate()?;

        let bandgap_energy = config.bandgap * constants.charge;
        let built_in_potential = potential_barrier(
            config.acceptor_density,
            config.donor_density,
            config.conduction_dos,
            config.valence_dos,
            bandgap_energy,
            &constants,
        )?;

        let intrinsic_density = match config.intrinsic_density {
            IntrinsicDensity::Derived => {
                (-bandgap_energy / (2.0 * constants.thermal_energy())).exp()
                    * (config.conduction_dos * config.valence_dos).sqrt()
            }
            IntrinsicDensity::Fixed(ni) => ni,
        };

        Ok(Self {
            config,
            constants,
            electron_diffusion_length: (config.electron_diffusivity * config.electron_lifetime).sqrt(),
            hole_diffusion_length: (config.hole_diffusivity * config.hole_lifetime).sqrt(),
            intrinsic_density,
            built_in_potential,
        })
    }

    /// Build with the default constants at 300 K.
    pub fn with_default_constants(config: JunctionConfig) -> Result<Self> {
        Self::new(config, PhysicalConstants::default())
    }

    pub fn config(&self) -> &JunctionConfig {
        &self.config
    }

    pub fn constants(&self) -> &PhysicalConstants {
        &self.constants
    }

    /// Ln = sqrt(Dn * τn) in m.
    pub fn electron_diffusion_length(&self) -> f64 {
        self.electron_diffusion_length
    }

    /// Lp = sqrt(Dp * τp) in m.
    pub fn hole_diffusion_length(&self) -> f64 {
        self.hole_diffusion_length
    }

    /// Intrinsic carrier concentration in m^-3.
    pub fn intrinsic_density(&self) -> f64 {
        self.intrinsic_density
    }

    /// Equilibrium built-in potential Vbi in V.
    pub fn built_in_potential(&self) -> f64 {
        self.built_in_potential
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_diffusion_lengths_are_cached() {
        let junction = Junction::with_default_constants(JunctionConfig::homojunction()).unwrap();
        assert_relative_eq!(junction.electron_diffusion_length(), 1e-3, max_relative = 1e-12);
        assert_relative_eq!(junction.hole_diffusion_length(), 1e-3, max_relative = 1e-12);
    }

    #[test]
    fn test_derived_intrinsic_density() {
        let constants = PhysicalConstants::default();
        let junction = Junction::new(JunctionConfig::homojunction(), constants).unwrap();
        let expected = (-1.1 / (2.0 * constants.thermal_voltage())).exp() * 1e20;
        assert_relative_eq!(junction.intrinsic_density(), expected, max_relative = 1e-12);
    }

    #[test]
    fn test_fixed_intrinsic_density() {
        let junction = Junction::with_default_constants(JunctionConfig::silicon_reference()).unwrap();
        assert_eq!(junction.intrinsic_density(), 1.5e16);
    }

    #[test]
    fn test_rejects_non_positive_doping() {
        let config = JunctionConfig {
            donor_density: 0.0,
            ..JunctionConfig::homojunction()
        };
        let err = Junction::with_default_constants(config).unwrap_err();
        assert!(matches!(err, JunctionError::InvalidParameter { ref param, .. } if param == "donor_density"));
    }

    #[test]
    fn test_rejects_negative_lifetime() {
        let config = JunctionConfig {
            hole_lifetime: -1e-3,
            ..JunctionConfig::homojunction()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_non_positive_fixed_ni() {
        let config = JunctionConfig {
            intrinsic_density: IntrinsicDensity::Fixed(0.0),
            ..JunctionConfig::silicon_reference()
        };
        assert!(config.validate().is_err());
    }
}
