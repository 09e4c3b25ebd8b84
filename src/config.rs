//! Scenario files.
//!
//! A scenario bundles everything needed to reproduce one study: constants,
//! junction, circuit elements, voltage grid and solver settings. Every
//! section is optional.
//!
//! ```toml
//! preset = "homojunction"        # or "silicon_reference"
//!
//! [constants]
//! temperature = 300.0
//!
//! [circuit]
//! series_resistance = 2.8
//! shunt_resistance = 47.0
//! photocurrent = 0.0228
//!
//! [sweep]
//! start = -1.0
//! stop = 1.0
//! points = 1000
//!
//! [solver.bracket]
//! kind = "fixed"
//! lower = -0.05
//! upper = 100.0
//! ```
//!
//! A `[junction]` table replaces the preset; its missing fields take the
//! homojunction values.

use std::path::Path;

use ::config::{Config, File, FileFormat};
use serde::Deserialize;

use crate::error::{JunctionError, Result};
use crate::physics::{Junction, JunctionConfig, PhysicalConstants};
use crate::solver::{linspace, CircuitParams, CircuitSolver, SolverConfig};

/// Built-in junction parameter sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    #[default]
    Homojunction,
    SiliconReference,
}

impl Preset {
    pub fn config(&self) -> JunctionConfig {
        match self {
            Preset::Homojunction => JunctionConfig::homojunction(),
            Preset::SiliconReference => JunctionConfig::silicon_reference(),
        }
    }
}

/// Voltage grid of a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    pub start: f64,
    pub stop: f64,
    pub points: usize,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            start: -1.0,
            stop: 1.0,
            points: 1000,
        }
    }
}

impl SweepConfig {
    pub fn voltages(&self) -> Result<Vec<f64>> {
        if !(self.start.is_finite() && self.stop.is_finite()) {
            return Err(JunctionError::invalid_parameter(
                "sweep",
                self.stop - self.start,
                "start and stop must be finite",
            ));
        }
        Ok(linspace(self.start, self.stop, self.points))
    }
}

/// Everything needed to run one study.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    pub preset: Preset,
    pub junction: Option<JunctionConfig>,
    pub constants: PhysicalConstants,
    pub circuit: CircuitParams,
    pub sweep: SweepConfig,
    pub solver: SolverConfig,
}

impl ScenarioConfig {
    /// Load a TOML scenario file.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(JunctionError::FileReadError {
                path: path.display().to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "scenario file not found"),
            });
        }
        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml))
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    /// Parse a TOML scenario from a string.
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::from_str(input, FileFormat::Toml))
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    /// The junction parameters in effect: the `[junction]` table if given,
    /// the preset otherwise.
    pub fn junction_config(&self) -> JunctionConfig {
        self.junction.unwrap_or_else(|| self.preset.config())
    }

    /// Validate and build the junction.
    pub fn junction(&self) -> Result<Junction> {
        Junction::new(self.junction_config(), self.constants)
    }

    /// Validate and build a solver for this scenario.
    pub fn circuit_solver(&self) -> Result<CircuitSolver> {
        self.solver.validate()?;
        Ok(CircuitSolver::with_config(self.junction()?, self.solver))
    }
}
