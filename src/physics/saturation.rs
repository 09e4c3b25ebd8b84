//! Diffusion-limited reverse saturation current density.
//!
//!   js = q Dn ni^2 / (Ln NA) * coth((dp - Wp) / Ln)
//!      + q Dp ni^2 / (Lp ND) * coth((dn - Wn) / Lp)
//!
//! The coth factors account for quasi-neutral regions thinner than the
//! diffusion length. A depletion edge reaching the contact makes the
//! argument zero and js infinite; that value is returned as is.

use crate::error::Result;

use super::Junction;

/// Hyperbolic cotangent. Infinite at zero.
pub fn coth(x: f64) -> f64 {
    1.0 / x.tanh()
}

impl Junction {
    /// Saturation current density js in A/m² under applied bias `voltage`.
    pub fn saturation_current_density(&self, voltage: f64) -> Result<f64> {
        let widths = self.depletion_widths(voltage)?;
        let config = self.config();
        let q = self.constants().charge;
        let ni2 = self.intrinsic_density() * self.intrinsic_density();
        let (ln, lp) = (self.electron_diffusion_length(), self.hole_diffusion_length());

        let electrons = q * config.electron_diffusivity * ni2 / (ln * config.acceptor_density);
        let holes = q * config.hole_diffusivity * ni2 / (lp * config.donor_density);

        Ok(electrons * coth((config.p_thickness - widths.p_side) / ln)
            + holes * coth((config.n_thickness - widths.n_side) / lp))
    }
}
