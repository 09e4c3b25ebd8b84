//! Built-in potential and depletion-region widths.
//!
//! Depletion approximation:
//!   Vbi = (Eg - k_B T ln(Nc Nv / (NA ND))) / q
//!   Wn  = sqrt(2 Veff ε0 εsi NA / (q ND (ND + NA)))
//!   Wp  = sqrt(2 Veff ε0 εsi ND / (q NA (ND + NA)))
//!
//! with Veff = |Vbi - V|. The magnitude keeps both widths real when the
//! forward bias exceeds Vbi.

use crate::error::{JunctionError, Result};

use super::{Junction, PhysicalConstants};

/// Built-in potential barrier in V for a bandgap `eg` given in J.
pub fn potential_barrier(
    na: f64,
    nd: f64,
    nc: f64,
    nv: f64,
    eg: f64,
    constants: &PhysicalConstants,
) -> Result<f64> {
    for density in [na, nd, nc, nv] {
        if !(density.is_finite() && density > 0.0) {
            return Err(JunctionError::DomainError {
                operation: "potential_barrier",
                argument: density,
            });
        }
    }
    let ratio = (nc * nv) / (na * nd);
    if !(ratio.is_finite() && ratio > 0.0) {
        return Err(JunctionError::DomainError {
            operation: "potential_barrier",
            argument: ratio,
        });
    }
    Ok((eg - constants.thermal_energy() * ratio.ln()) / constants.charge)
}

/// Depletion-region extent on each side of the metallurgical junction, in m.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepletionWidths {
    /// Wn, extent into the n side
    pub n_side: f64,
    /// Wp, extent into the p side
    pub p_side: f64,
}

impl DepletionWidths {
    /// Wn + Wp.
    pub fn total(&self) -> f64 {
        self.n_side + self.p_side
    }
}

impl Junction {
    /// Depletion widths under applied bias `voltage`.
    pub fn depletion_widths(&self, voltage: f64) -> Result<DepletionWidths> {
        if !voltage.is_finite() {
            return Err(JunctionError::NonFiniteBias { voltage });
        }

        let config = self.config();
        let constants = self.constants();
        let (na, nd) = (config.acceptor_density, config.donor_density);

        let v_eff = (self.built_in_potential() - voltage).abs();
        // ε0 * εsi, where εsi is already absolute
        let permittivity = constants.vacuum_permittivity * constants.semiconductor_permittivity();
        let scale = 2.0 * v_eff * permittivity / (constants.charge * (nd + na));

        Ok(DepletionWidths {
            n_side: (scale * na / nd).sqrt(),
            p_side: (scale * nd / na).sqrt(),
        })
    }
}
