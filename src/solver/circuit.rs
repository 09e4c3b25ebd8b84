//! Series/shunt-resistance equivalent circuit and the per-voltage solve.

use serde::Deserialize;

use crate::error::{JunctionError, Result};
use crate::physics::Junction;

use super::brent::{Brent, Root};
use super::{DEFAULT_TOLERANCE, MAX_ITERATIONS, PER_SQUARE_METER_TO_PER_SQUARE_CM};

/// Lumped circuit elements around the junction, per unit area.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct CircuitParams {
    /// Series resistance Rs (Ω·cm²)
    pub series_resistance: f64,
    /// Shunt resistance Rp (Ω·cm²), never zero
    pub shunt_resistance: f64,
    /// Photocurrent density jcc (A/cm²)
    pub photocurrent: f64,
}

impl Default for CircuitParams {
    /// Dark heterojunction fit: Rs = 2.5, Rp = 60, jcc = 1.6e-4.
    fn default() -> Self {
        Self {
            series_resistance: 2.5,
            shunt_resistance: 60.0,
            photocurrent: 0.00016,
        }
    }
}

impl CircuitParams {
    /// Create validated circuit parameters.
    pub fn new(series_resistance: f64, shunt_resistance: f64, photocurrent: f64) -> Result<Self> {
        let params = Self {
            series_resistance,
            shunt_resistance,
            photocurrent,
        };
        params.validate()?;
        Ok(params)
    }

    pub fn with_series_resistance(mut self, series_resistance: f64) -> Self {
        self.series_resistance = series_resistance;
        self
    }

    pub fn with_shunt_resistance(mut self, shunt_resistance: f64) -> Self {
        self.shunt_resistance = shunt_resistance;
        self
    }

    pub fn with_photocurrent(mut self, photocurrent: f64) -> Self {
        self.photocurrent = photocurrent;
        self
    }

    /// All values finite, Rp nonzero. Negative Rs is allowed.
    pub fn validate(&self) -> Result<()> {
        for (param, value) in [
            ("series_resistance", self.series_resistance),
            ("shunt_resistance", self.shunt_resistance),
            ("photocurrent", self.photocurrent),
        ] {
            if !value.is_finite() {
                return Err(JunctionError::invalid_parameter(param, value, "must be finite"));
            }
        }
        if self.shunt_resistance == 0.0 {
            return Err(JunctionError::invalid_parameter(
                "shunt_resistance",
                self.shunt_resistance,
                "must be nonzero",
            ));
        }
        Ok(())
    }
}

/// How the root-finding bracket for the current density is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BracketPolicy {
    /// The same [lower, upper] for every voltage and parameter set.
    Fixed { lower: f64, upper: f64 },
    /// lower = -(shunt_scale / |Rp| + |jcc|), upper = max_current_density.
    ///
    /// The lower end covers the full photocurrent plus the shunt leakage of
    /// `shunt_scale` volts of reverse bias.
    Shunt {
        shunt_scale: f64,
        max_current_density: f64,
    },
}

impl Default for BracketPolicy {
    fn default() -> Self {
        BracketPolicy::Shunt {
            shunt_scale: 2.0,
            max_current_density: 100.0,
        }
    }
}

impl BracketPolicy {
    /// The bracket (lower, upper) for `params`, in A/cm².
    pub fn interval(&self, params: &CircuitParams) -> Result<(f64, f64)> {
        let (lower, upper) = match *self {
            BracketPolicy::Fixed { lower, upper } => (lower, upper),
            BracketPolicy::Shunt {
                shunt_scale,
                max_current_density,
            } => (
                -(shunt_scale / params.shunt_resistance.abs() + params.photocurrent.abs()),
                max_current_density,
            ),
        };
        if !(lower.is_finite() && upper.is_finite() && lower < upper) {
            return Err(JunctionError::invalid_parameter(
                "bracket",
                upper - lower,
                format!("[{lower:e}, {upper:e}] is not a finite, non-empty interval"),
            ));
        }
        Ok((lower, upper))
    }
}

/// Root-finding settings for [`CircuitSolver`].
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Bracket selection
    pub bracket: BracketPolicy,
    /// Absolute tolerance on the current density (A/cm²)
    pub tolerance: f64,
    /// Maximum Brent iterations per voltage sample
    pub max_iterations: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            bracket: BracketPolicy::default(),
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: MAX_ITERATIONS,
        }
    }
}

impl SolverConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bracket(mut self, bracket: BracketPolicy) -> Self {
        self.bracket = bracket;
        self
    }

    /// Set the root tolerance (A/cm²).
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Tolerance positive and finite, at least one iteration.
    pub fn validate(&self) -> Result<()> {
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(JunctionError::invalid_parameter(
                "tolerance",
                self.tolerance,
                "must be positive and finite",
            ));
        }
        if self.max_iterations == 0 {
            return Err(JunctionError::invalid_parameter(
                "max_iterations",
                0.0,
                "must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Solves the equivalent circuit of a [`Junction`] one voltage at a time.
///
/// Holds no state between calls: every voltage is solved from scratch.
#[derive(Debug, Clone, Copy)]
pub struct CircuitSolver {
    junction: Junction,
    config: SolverConfig,
}

impl CircuitSolver {
    /// Create a solver with the default configuration.
    pub fn new(junction: Junction) -> Self {
        Self::with_config(junction, SolverConfig::default())
    }

    pub fn with_config(junction: Junction, config: SolverConfig) -> Self {
        Self { junction, config }
    }

    pub fn junction(&self) -> &Junction {
        &self.junction
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Current density of the diode branch in A/cm² at junction voltage `voltage`:
    ///   js(V) * (exp(qV / k_B T) - 1) * 1e-4 - jcc
    ///
    /// The shunt resistance does not enter this branch.
    pub fn diode_current(&self, voltage: f64, params: &CircuitParams) -> Result<f64> {
        let js = self.junction.saturation_current_density(voltage)?;
        let vt = self.junction.constants().thermal_voltage();
        Ok(js * ((voltage / vt).exp() - 1.0) * PER_SQUARE_METER_TO_PER_SQUARE_CM - params.photocurrent)
    }

    /// Kirchhoff residual for a trial current density `current` at terminal voltage `voltage`.
    pub fn residual(&self, current: f64, voltage: f64, params: &CircuitParams) -> Result<f64> {
        let rs = params.series_resistance;
        let rp = params.shunt_resistance;
        let junction_voltage = voltage - rs * current;
        Ok(self.diode_current(junction_voltage, params)? - current * (1.0 + rs / rp) + voltage / rp)
    }

    /// Terminal current density (A/cm²) at terminal voltage `voltage`.
    pub fn solve_current(&self, voltage: f64, params: &CircuitParams) -> Result<f64> {
        self.solve(voltage, params).map(|root| root.x)
    }

    /// Like [`solve_current`](Self::solve_current), also reporting the
    /// final residual and iteration count.
    pub fn solve(&self, voltage: f64, params: &CircuitParams) -> Result<Root> {
        if !voltage.is_finite() {
            return Err(JunctionError::NonFiniteBias { voltage });
        }
        params.validate()?;
        self.config.validate()?;

        let (lower, upper) = self.config.bracket.interval(params)?;
        let brent = Brent::with_config(self.config.max_iterations, self.config.tolerance);
        let root = brent.find_root(|j| self.residual(j, voltage, params), lower, upper)?;

        tracing::trace!(
            voltage,
            current = root.x,
            residual = root.residual,
            iterations = root.iterations,
            "solved terminal current"
        );
        Ok(root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::JunctionConfig;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn solver() -> CircuitSolver {
        CircuitSolver::new(Junction::with_default_constants(JunctionConfig::homojunction()).unwrap())
    }

    #[test]
    fn test_solution_zeroes_the_residual() {
        let solver = solver();
        let params = CircuitParams::default();
        for voltage in [-1.0, -0.2, 0.0, 0.4, 0.7, 1.0] {
            let j = solver.solve_current(voltage, &params).unwrap();
            let r = solver.residual(j, voltage, &params).unwrap();
            assert!(r.abs() < 1e-9, "residual {r} at V = {voltage}");
        }
    }

    #[test]
    fn test_solve_is_idempotent() {
        let solver = solver();
        let params = CircuitParams::default();
        let first = solver.solve_current(0.55, &params).unwrap();
        let second = solver.solve_current(0.55, &params).unwrap();
        assert_eq!(first.to_bits(), second.to_bits());
    }

    #[test]
    fn test_large_shunt_recovers_ideal_diode() {
        let solver = solver();
        let params = CircuitParams::new(0.0, 1e12, 0.0).unwrap();
        for voltage in [0.3, 0.4, 0.5] {
            let j = solver.solve_current(voltage, &params).unwrap();
            let ideal = solver.diode_current(voltage, &params).unwrap();
            assert_abs_diff_eq!(j, ideal, epsilon = 1e-9);
            // What is left is the leakage through the shunt
            assert_abs_diff_eq!(j - ideal, voltage / 1e12, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_short_circuit_current_is_photocurrent() {
        let solver = solver();
        let params = CircuitParams::new(0.0, 1e4, 0.0228).unwrap();
        let j = solver.solve_current(0.0, &params).unwrap();
        assert_abs_diff_eq!(j, -0.0228, epsilon = 1e-12);
    }

    #[test]
    fn test_diode_branch_ignores_shunt() {
        let solver = solver();
        let low = CircuitParams::default().with_shunt_resistance(1.0);
        let high = CircuitParams::default().with_shunt_resistance(1e6);
        assert_eq!(
            solver.diode_current(0.6, &low).unwrap(),
            solver.diode_current(0.6, &high).unwrap()
        );
    }

    #[test]
    fn test_series_resistance_limits_forward_current() {
        let solver = solver();
        let ideal = CircuitParams::new(1e-6, 1e4, 0.0).unwrap();
        let lossy = ideal.with_series_resistance(10.0);
        let j_ideal = solver.solve_current(0.8, &ideal).unwrap();
        let j_lossy = solver.solve_current(0.8, &lossy).unwrap();
        assert!(j_lossy < j_ideal);
        assert!(j_lossy < 0.8 / 10.0);
    }

    #[test]
    fn test_reference_bracket_agrees_with_default_policy() {
        let junction = *solver().junction();
        let params = CircuitParams::default();
        let fixed = CircuitSolver::with_config(
            junction,
            SolverConfig::new().with_bracket(BracketPolicy::Fixed {
                lower: -2.0 / params.shunt_resistance,
                upper: 100.0,
            }),
        );
        for voltage in [-0.5, 0.2, 0.9] {
            let a = fixed.solve_current(voltage, &params).unwrap();
            let b = solver().solve_current(voltage, &params).unwrap();
            assert_abs_diff_eq!(a, b, epsilon = 1e-11);
        }
    }

    #[test]
    fn test_bracket_without_sign_change_fails() {
        let junction = *solver().junction();
        let solver = CircuitSolver::with_config(
            junction,
            SolverConfig::new().with_bracket(BracketPolicy::Fixed { lower: 10.0, upper: 100.0 }),
        );
        let err = solver.solve_current(0.0, &CircuitParams::default()).unwrap_err();
        assert!(matches!(err, JunctionError::RootNotFound { lower, upper, .. } if lower == 10.0 && upper == 100.0));
    }

    #[test]
    fn test_shunt_policy_bracket() {
        let params = CircuitParams::new(1.0, -50.0, 0.01).unwrap();
        let (lower, upper) = BracketPolicy::default().interval(&params).unwrap();
        assert_relative_eq!(lower, -(2.0 / 50.0 + 0.01), max_relative = 1e-15);
        assert_eq!(upper, 100.0);
    }

    #[test]
    fn test_empty_bracket_is_rejected() {
        let policy = BracketPolicy::Fixed { lower: 1.0, upper: 1.0 };
        assert!(policy.interval(&CircuitParams::default()).is_err());
    }

    #[test]
    fn test_zero_shunt_is_rejected() {
        let err = CircuitParams::new(1.0, 0.0, 0.0).unwrap_err();
        assert!(matches!(err, JunctionError::InvalidParameter { ref param, .. } if param == "shunt_resistance"));

        let params = CircuitParams::default().with_shunt_resistance(0.0);
        assert!(solver().solve_current(0.1, &params).is_err());
    }

    #[test]
    fn test_solver_settings_are_validated() {
        let junction = *solver().junction();
        let params = CircuitParams::default();

        let nan_tolerance = CircuitSolver::with_config(junction, SolverConfig::new().with_tolerance(f64::NAN));
        let err = nan_tolerance.solve_current(0.2, &params).unwrap_err();
        assert!(matches!(err, JunctionError::InvalidParameter { ref param, .. } if param == "tolerance"));

        let no_iterations = CircuitSolver::with_config(junction, SolverConfig::new().with_max_iterations(0));
        let err = no_iterations.solve_current(0.2, &params).unwrap_err();
        assert!(matches!(err, JunctionError::InvalidParameter { ref param, .. } if param == "max_iterations"));

        assert!(SolverConfig::default().validate().is_ok());
    }

    #[test]
    fn test_non_finite_voltage_is_rejected() {
        let err = solver().solve_current(f64::INFINITY, &CircuitParams::default()).unwrap_err();
        assert!(matches!(err, JunctionError::NonFiniteBias { .. }));
    }
}
