//! # pn_junction
//!
//! An analytic model of a p-n junction and its I-V characteristic.
//!
//! This library provides:
//! - Built-in potential and bias-dependent depletion widths (depletion approximation)
//! - A smooth potential profile for band diagrams
//! - The diffusion-limited saturation current density of a thin-layer diode
//! - An I-V solver for the diode behind series and shunt resistances, with photocurrent
//! - Readers and figures of merit (MPP, Voc, Jsc, FF) for measured curves
//!
//! ## Architecture
//!
//! - [`physics`] - constants, junction parameters and closed-form junction physics
//! - [`solver`] - Brent root finding, the equivalent circuit and voltage sweeps
//! - [`measurement`] - two-column measurement files and curve figures of merit
//! - [`config`] - TOML scenario files
//! - [`output`] - CSV output
//!
//! ## Usage
//!
//! ```no_run
//! use pn_junction::{CircuitParams, CircuitSolver, CurveSweeper, Junction, JunctionConfig};
//!
//! # fn main() -> pn_junction::Result<()> {
//! let junction = Junction::with_default_constants(JunctionConfig::homojunction())?;
//! let sweeper = CurveSweeper::new(CircuitSolver::new(junction));
//! let voltages = pn_junction::solver::linspace(-1.0, 1.0, 1000);
//! let curve = sweeper.sweep(&voltages, &CircuitParams::new(2.5, 60.0, 0.00016)?)?;
//! # Ok(())
//! # }
//! ```
//!
//! ### CLI
//!
//! ```bash
//! pnj sweep --config scenario.toml --rs 2.8 --rp 47 --jcc 0.0228 > iv.csv
//! ```
//!
//! ## Solution Method
//!
//! For each terminal voltage V the current density j solves
//!
//! ```text
//! j_diode(V - Rs*j) - j*(1 + Rs/Rp) + V/Rp = 0
//! ```
//!
//! by Brent's method on a bracket that must contain a sign change. Samples
//! are independent; there is no warm start between them.

pub mod config;
pub mod error;
pub mod measurement;
pub mod output;
pub mod physics;
pub mod solver;

#[cfg(feature = "cli")]
pub mod telemetry;

// Re-export main types for convenience
pub use crate::config::ScenarioConfig;
pub use error::{JunctionError, Result};
pub use physics::{Junction, JunctionConfig, PhysicalConstants};
pub use solver::{CircuitParams, CircuitSolver, CurveSweeper, IvCurve};

/// Default lattice temperature in K.
pub const DEFAULT_TEMPERATURE: f64 = 300.0;
