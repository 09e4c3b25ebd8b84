//! Smooth electrostatic potential profile across the depletion region.
//!
//! The profile is flat at the barrier height A = Vbi - V on the p side
//! (x <= -Wp), zero on the n side (x >= Wn), and blended in between by
//!   phi(x) = A * 0.5 * (1 - tanh(beta * (x - xm))),   xm = (Wn - Wp) / 2
//!
//! The blend only meets the flat pieces when beta * (Wn + Wp) >> 1; for
//! shallower blends the profile steps at the depletion edges.

use crate::error::{JunctionError, Result};

use super::{DepletionWidths, Junction};

/// Default steepness of the tanh blend, in 1/m.
pub const DEFAULT_BETA: f64 = 2.0;

impl Junction {
    /// Potential at each position of `x` (m) under applied bias `voltage`.
    pub fn potential_profile(&self, x: &[f64], voltage: f64, beta: f64) -> Result<Vec<f64>> {
        check_beta(beta)?;
        let widths = self.depletion_widths(voltage)?;
        let amplitude = self.built_in_potential() - voltage;
        Ok(x.iter().map(|&x| blend(x, amplitude, &widths, beta)).collect())
    }

    /// Potential at a single position.
    pub fn potential_at(&self, x: f64, voltage: f64, beta: f64) -> Result<f64> {
        check_beta(beta)?;
        let widths = self.depletion_widths(voltage)?;
        Ok(blend(x, self.built_in_potential() - voltage, &widths, beta))
    }
}

fn check_beta(beta: f64) -> Result<()> {
    if beta.is_finite() && beta > 0.0 {
        Ok(())
    } else {
        Err(JunctionError::invalid_parameter("beta", beta, "must be positive and finite"))
    }
}

fn blend(x: f64, amplitude: f64, widths: &DepletionWidths, beta: f64) -> f64 {
    let (wn, wp) = (widths.n_side, widths.p_side);
    if x <= -wp {
        amplitude
    } else if x >= wn {
        0.0
    } else {
        let xm = (-wp + wn) / 2.0;
        amplitude * 0.5 * (1.0 - (beta * (x - xm)).tanh())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::JunctionConfig;
    use approx::assert_abs_diff_eq;

    fn junction() -> Junction {
        Junction::with_default_constants(JunctionConfig::homojunction()).unwrap()
    }

    #[test]
    fn test_flat_regions_outside_depletion() {
        let junction = junction();
        let w = junction.depletion_widths(-0.5).unwrap();
        let x = [-10.0 * w.p_side, -w.p_side, w.n_side, 10.0 * w.n_side + 1e-3];
        let phi = junction.potential_profile(&x, -0.5, DEFAULT_BETA).unwrap();

        let barrier = junction.built_in_potential() + 0.5;
        assert_eq!(phi, vec![barrier, barrier, 0.0, 0.0]);
    }

    #[test]
    fn test_midpoint_is_half_the_barrier() {
        let junction = junction();
        let w = junction.depletion_widths(0.0).unwrap();
        let xm = (w.n_side - w.p_side) / 2.0;
        let phi = junction.potential_at(xm, 0.0, DEFAULT_BETA).unwrap();
        assert_abs_diff_eq!(phi, 0.5 * junction.built_in_potential(), epsilon = 1e-15);
    }

    #[test]
    fn test_continuous_at_depletion_edges_for_steep_blend() {
        let junction = junction();
        for voltage in [-1.0, 0.0, 0.3] {
            let w = junction.depletion_widths(voltage).unwrap();
            let beta = 60.0 / w.total();
            let inside = 1e-9 * w.total();
            let barrier = junction.built_in_potential() - voltage;

            let left = junction.potential_at(-w.p_side + inside, voltage, beta).unwrap();
            let right = junction.potential_at(w.n_side - inside, voltage, beta).unwrap();
            assert_abs_diff_eq!(left, barrier, epsilon = 1e-9);
            assert_abs_diff_eq!(right, 0.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_monotonically_decreasing() {
        let junction = junction();
        let w = junction.depletion_widths(0.0).unwrap();
        let beta = 10.0 / w.total();
        let n = 200;
        let x: Vec<f64> = (0..n)
            .map(|i| -2.0 * w.p_side + 2.0 * w.total() * i as f64 / (n - 1) as f64)
            .collect();
        let phi = junction.potential_profile(&x, 0.0, beta).unwrap();
        assert!(phi.windows(2).all(|pair| pair[1] <= pair[0]));
    }

    #[test]
    fn test_rejects_non_positive_beta() {
        let junction = junction();
        assert!(junction.potential_at(0.0, 0.0, 0.0).is_err());
        assert!(junction.potential_profile(&[0.0], 0.0, -1.0).is_err());
    }
}
