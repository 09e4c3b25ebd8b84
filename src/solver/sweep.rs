//! I-V curves over voltage arrays and parameter families.

use rayon::prelude::*;

use crate::error::{JunctionError, Result};

use super::circuit::{CircuitParams, CircuitSolver};

/// `n` evenly spaced values from `start` to `stop`, both included.
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            let mut values: Vec<f64> = (0..n).map(|i| start + step * i as f64).collect();
            values[n - 1] = stop;
            values
        }
    }
}

/// One solved sample of an I-V curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IvPoint {
    /// Terminal voltage (V)
    pub voltage: f64,
    /// Terminal current density (A/cm²)
    pub current_density: f64,
}

/// Solved samples in the order the voltages were given.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IvCurve {
    points: Vec<IvPoint>,
}

impl IvCurve {
    pub fn new(points: Vec<IvPoint>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[IvPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &IvPoint> {
        self.points.iter()
    }

    /// (voltage, current density) pairs.
    pub fn pairs(&self) -> impl Iterator<Item = (f64, f64)> + Clone + '_ {
        self.points.iter().map(|p| (p.voltage, p.current_density))
    }

    pub fn voltages(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.voltage).collect()
    }

    pub fn current_densities(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.current_density).collect()
    }
}

/// One circuit parameter varied over a list of values, the others held fixed.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterSweep {
    SeriesResistance(Vec<f64>),
    ShuntResistance(Vec<f64>),
    Photocurrent(Vec<f64>),
}

impl ParameterSweep {
    pub fn values(&self) -> &[f64] {
        match self {
            ParameterSweep::SeriesResistance(v)
            | ParameterSweep::ShuntResistance(v)
            | ParameterSweep::Photocurrent(v) => v,
        }
    }

    /// Short column label of the varied parameter.
    pub fn label(&self) -> &'static str {
        match self {
            ParameterSweep::SeriesResistance(_) => "rs",
            ParameterSweep::ShuntResistance(_) => "rp",
            ParameterSweep::Photocurrent(_) => "jcc",
        }
    }

    /// `base` with the varied parameter replaced by each value in turn.
    pub fn variants(&self, base: &CircuitParams) -> Vec<CircuitParams> {
        self.values()
            .iter()
            .map(|&value| match self {
                ParameterSweep::SeriesResistance(_) => base.with_series_resistance(value),
                ParameterSweep::ShuntResistance(_) => base.with_shunt_resistance(value),
                ParameterSweep::Photocurrent(_) => base.with_photocurrent(value),
            })
            .collect()
    }
}

/// Drives a [`CircuitSolver`] over voltage arrays.
///
/// Samples are independent, so they may be solved on the rayon pool; the
/// curve and any reported failure are the same either way.
#[derive(Debug, Clone, Copy)]
pub struct CurveSweeper {
    solver: CircuitSolver,
    parallel: bool,
}

impl CurveSweeper {
    pub fn new(solver: CircuitSolver) -> Self {
        Self {
            solver,
            parallel: false,
        }
    }

    /// Solve samples concurrently.
    ///
    /// A parallel sweep does not stop early: every sample is solved before
    /// the first failure in input order is reported. The result, `Ok` or
    /// `Err`, is the same as for a sequential sweep.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn solver(&self) -> &CircuitSolver {
        &self.solver
    }

    /// Solve every voltage for one parameter set.
    ///
    /// Reports the first failing sample in input order as
    /// [`JunctionError::SweepPoint`]. Sequential sweeps stop there; parallel
    /// ones finish the remaining samples first.
    #[tracing::instrument(level = "debug", skip_all, fields(points = voltages.len(), parallel = self.parallel))]
    pub fn sweep(&self, voltages: &[f64], params: &CircuitParams) -> Result<IvCurve> {
        params.validate()?;

        let solve = |(index, &voltage): (usize, &f64)| -> Result<IvPoint> {
            self.solver
                .solve_current(voltage, params)
                .map(|current_density| IvPoint {
                    voltage,
                    current_density,
                })
                .map_err(|e| e.at_sweep_point(index, voltage))
        };

        let points = if self.parallel {
            let solved: Vec<Result<IvPoint>> = voltages.par_iter().enumerate().map(&solve).collect();
            solved.into_iter().collect::<Result<Vec<_>>>()?
        } else {
            voltages.iter().enumerate().map(&solve).collect::<Result<Vec<_>>>()?
        };

        tracing::debug!(
            series_resistance = params.series_resistance,
            shunt_resistance = params.shunt_resistance,
            photocurrent = params.photocurrent,
            "sweep complete"
        );
        Ok(IvCurve::new(points))
    }

    /// One independent curve per parameter set, in the order given.
    pub fn sweep_family(&self, voltages: &[f64], variants: &[CircuitParams]) -> Result<Vec<IvCurve>> {
        variants
            .iter()
            .enumerate()
            .map(|(variant, params)| {
                self.sweep(voltages, params)
                    .map_err(|e| JunctionError::FamilyMember {
                        variant,
                        source: Box::new(e),
                    })
            })
            .collect()
    }
}
