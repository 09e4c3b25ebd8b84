//! Equivalent-circuit I-V solver.
//!
//! This module provides the numerical core of the model.
//!
//! ## Equivalent circuit
//!
//! The junction diode sits behind a series resistance Rs and in parallel
//! with a shunt resistance Rp; the photocurrent jcc is subtracted from the
//! diode branch. For a terminal voltage V the junction sees V - Rs*j and
//! Kirchhoff's laws give the implicit equation
//!
//! ```text
//! f(j) = j_diode(V - Rs*j) - j*(1 + Rs/Rp) + V/Rp = 0
//! ```
//!
//! which is solved per voltage sample with Brent's method on a bracket that
//! must contain a sign change of f.
//!
//! - [`brent`] - the bracketed root finder
//! - [`circuit`] - circuit parameters, residual and per-point solve
//! - [`sweep`] - I-V curves over voltage arrays and parameter families

pub mod brent;
pub mod circuit;
pub mod sweep;

pub use brent::{Brent, Root};
pub use circuit::{BracketPolicy, CircuitParams, CircuitSolver, SolverConfig};
pub use sweep::{linspace, CurveSweeper, IvCurve, IvPoint, ParameterSweep};

/// Absolute tolerance on the current density root (A/cm²).
pub const DEFAULT_TOLERANCE: f64 = 1e-13;

/// Maximum Brent iterations per voltage sample.
pub const MAX_ITERATIONS: usize = 200;

/// Converts A/m² to A/cm².
pub const PER_SQUARE_METER_TO_PER_SQUARE_CM: f64 = 1e-4;
