//! Measured I-V data and curve figures of merit.
//!
//! # File format
//!
//! ```text
//! Tension   Courant        <- header, discarded
//! -0,50     -1,2E-4        <- voltage, current; decimal comma allowed
//! 0,00      -2,1E-2
//! ...
//! ```
//!
//! Measured samples share axes with computed [`IvCurve`](crate::solver::IvCurve)s
//! but are otherwise unrelated to the model.

mod characteristics;
mod reader;

pub use characteristics::{
    max_power_point, open_circuit_voltage, short_circuit_current, CellCharacteristics, MaxPowerPoint,
};
pub use reader::{parse_measurement_bytes, parse_measurements, read_measurements};

/// One line of a measurement file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasuredSample {
    /// Voltage (V)
    pub voltage: f64,
    /// Current as recorded (A or A/cm²)
    pub current: f64,
}

/// Samples in file order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MeasuredCurve {
    samples: Vec<MeasuredSample>,
}

impl MeasuredCurve {
    pub fn new(samples: Vec<MeasuredSample>) -> Self {
        Self { samples }
    }

    pub fn samples(&self) -> &[MeasuredSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// (voltage, current) pairs.
    pub fn pairs(&self) -> impl Iterator<Item = (f64, f64)> + Clone + '_ {
        self.samples.iter().map(|s| (s.voltage, s.current))
    }

    pub fn voltages(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.voltage).collect()
    }

    pub fn currents(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.current).collect()
    }
}
