//! Brent's bracketed root finder.
//!
//! Combines bisection, secant and inverse quadratic interpolation. Every
//! step keeps a sign change inside [b, c], so the bracket never loses the
//! root. Interpolation is skipped whenever an endpoint value is infinite,
//! which happens when the diode exponential overflows.

use crate::error::{JunctionError, Result};

use super::{DEFAULT_TOLERANCE, MAX_ITERATIONS};

/// A converged root and the work it took.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Root {
    pub x: f64,
    /// f(x), smallest in magnitude of the final bracket
    pub residual: f64,
    pub iterations: usize,
}

/// Brent solver settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Brent {
    /// Maximum iterations
    pub max_iterations: usize,
    /// Absolute tolerance on x
    pub tolerance: f64,
}

impl Default for Brent {
    fn default() -> Self {
        Self::new()
    }
}

impl Brent {
    /// Create a solver with the default tolerance and iteration budget.
    pub fn new() -> Self {
        Self {
            max_iterations: MAX_ITERATIONS,
            tolerance: DEFAULT_TOLERANCE,
        }
    }

    pub fn with_config(max_iterations: usize, tolerance: f64) -> Self {
        Self {
            max_iterations,
            tolerance,
        }
    }

    /// Find x in [lower, upper] with f(x) = 0.
    ///
    /// Fails with [`JunctionError::RootNotFound`] if f has the same sign at
    /// both ends, and with [`JunctionError::MaxIterationsExceeded`] if the
    /// bracket has not shrunk below the tolerance within the budget.
    pub fn find_root<F>(&self, mut f: F, lower: f64, upper: f64) -> Result<Root>
    where
        F: FnMut(f64) -> Result<f64>,
    {
        let mut a = lower;
        let mut b = upper;
        let mut fa = evaluate(&mut f, a)?;
        let mut fb = evaluate(&mut f, b)?;

        if fa == 0.0 {
            return Ok(Root { x: a, residual: fa, iterations: 0 });
        }
        if fb == 0.0 {
            return Ok(Root { x: b, residual: fb, iterations: 0 });
        }
        if (fa > 0.0) == (fb > 0.0) {
            return Err(JunctionError::RootNotFound {
                lower,
                upper,
                f_lower: fa,
                f_upper: fb,
            });
        }

        let mut c = a;
        let mut fc = fa;
        let mut d = b - a;
        let mut e = d;

        for iter in 0..self.max_iterations {
            // Keep the root between b and c
            if (fb > 0.0) == (fc > 0.0) {
                c = a;
                fc = fa;
                d = b - a;
                e = d;
            }
            // b is the best estimate so far
            if fc.abs() < fb.abs() {
                a = b;
                b = c;
                c = a;
                fa = fb;
                fb = fc;
                fc = fa;
            }

            let tol = 2.0 * f64::EPSILON * b.abs() + 0.5 * self.tolerance;
            let half = 0.5 * (c - b);
            if half.abs() <= tol || fb == 0.0 {
                return Ok(Root { x: b, residual: fb, iterations: iter });
            }

            let finite = fa.is_finite() && fb.is_finite() && fc.is_finite();
            if finite && e.abs() >= tol && fa.abs() > fb.abs() {
                let s = fb / fa;
                let (mut p, mut q) = if a == c {
                    // Secant
                    (2.0 * half * s, 1.0 - s)
                } else {
                    // Inverse quadratic interpolation
                    let q = fa / fc;
                    let r = fb / fc;
                    (
                        s * (2.0 * half * q * (q - r) - (b - a) * (r - 1.0)),
                        (q - 1.0) * (r - 1.0) * (s - 1.0),
                    )
                };
                if p > 0.0 {
                    q = -q;
                }
                p = p.abs();

                let bound = (3.0 * half * q - (tol * q).abs()).min((e * q).abs());
                if 2.0 * p < bound {
                    e = d;
                    d = p / q;
                } else {
                    d = half;
                    e = d;
                }
            } else {
                d = half;
                e = d;
            }

            a = b;
            fa = fb;
            b += if d.abs() > tol { d } else { tol.copysign(half) };
            fb = evaluate(&mut f, b)?;
        }

        Err(JunctionError::MaxIterationsExceeded {
            iterations: self.max_iterations,
            width: (c - b).abs(),
        })
    }
}

fn evaluate<F>(f: &mut F, x: f64) -> Result<f64>
where
    F: FnMut(f64) -> Result<f64>,
{
    let value = f(x)?;
    if value.is_nan() {
        return Err(JunctionError::NonFiniteResidual { current: x });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_finds_cubic_root() {
        let root = Brent::new()
            .find_root(|x| Ok(x * x * x - 2.0 * x - 5.0), 2.0, 3.0)
            .unwrap();
        assert_abs_diff_eq!(root.x, 2.0945514815423265, epsilon = 1e-12);
        assert!(root.iterations < 20);
    }

    #[test]
    fn test_accepts_reversed_sign_bracket() {
        let root = Brent::new().find_root(|x| Ok(1.0 - x.exp()), -3.0, 5.0).unwrap();
        assert_abs_diff_eq!(root.x, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_root_at_endpoint() {
        let root = Brent::new().find_root(|x| Ok(x - 1.0), 1.0, 4.0).unwrap();
        assert_eq!(root.x, 1.0);
        assert_eq!(root.iterations, 0);
    }

    #[test]
    fn test_no_sign_change_is_reported() {
        let err = Brent::new().find_root(|x| Ok(x * x + 1.0), -1.0, 1.0).unwrap_err();
        match err {
            JunctionError::RootNotFound { f_lower, f_upper, .. } => {
                assert_eq!(f_lower, 2.0);
                assert_eq!(f_upper, 2.0);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_iteration_budget_is_enforced() {
        let solver = Brent::with_config(3, 1e-15);
        let err = solver.find_root(|x| Ok(x.powi(3) - 0.3), -100.0, 100.0).unwrap_err();
        assert!(matches!(err, JunctionError::MaxIterationsExceeded { iterations: 3, .. }));
    }

    #[test]
    fn test_survives_overflowing_endpoint() {
        // exp overflows at the upper end; the solver must fall back to bisection
        let root = Brent::new()
            .find_root(|x| Ok((x / 0.025).exp() - 1e3), -1.0, 1e3)
            .unwrap();
        assert_abs_diff_eq!(root.x, 0.025 * 1e3f64.ln(), epsilon = 1e-10);
    }

    #[test]
    fn test_nan_residual_is_an_error() {
        let err = Brent::new().find_root(|_| Ok(f64::NAN), 0.0, 1.0).unwrap_err();
        assert!(matches!(err, JunctionError::NonFiniteResidual { .. }));
    }

    #[test]
    fn test_propagates_evaluation_errors() {
        let err = Brent::new()
            .find_root(|v| Err(JunctionError::NonFiniteBias { voltage: v }), 0.0, 1.0)
            .unwrap_err();
        assert!(matches!(err, JunctionError::NonFiniteBias { .. }));
    }
}
