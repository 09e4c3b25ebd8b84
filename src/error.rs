//! Error types for the junction model.
//!
//! This module provides a unified error type [`JunctionError`] that covers
//! parameter validation, root finding, measurement parsing and output.

use thiserror::Error;

/// Result type alias using [`JunctionError`].
pub type Result<T> = std::result::Result<T, JunctionError>;

/// Unified error type for all junction model operations.
#[derive(Error, Debug)]
pub enum JunctionError {
    // ============ Parameter Errors ============
    /// A configuration value is outside its physical range
    #[error("Invalid parameter '{param}' ({value:e}): {message}")]
    InvalidParameter {
        param: String,
        value: f64,
        message: String,
    },

    /// Non-positive or non-finite argument to a logarithm or square root
    #[error("Domain error in {operation}: argument {argument:e} must be positive and finite")]
    DomainError {
        operation: &'static str,
        argument: f64,
    },

    /// Applied bias is NaN or infinite
    #[error("Applied bias must be finite (got {voltage})")]
    NonFiniteBias { voltage: f64 },

    // ============ Solver Errors ============
    /// The residual does not change sign over the bracket
    #[error("No root in [{lower:e}, {upper:e}]: residual is {f_lower:e} and {f_upper:e} at the ends")]
    RootNotFound {
        lower: f64,
        upper: f64,
        f_lower: f64,
        f_upper: f64,
    },

    /// Brent iteration ran out of budget
    #[error("Root finder did not converge after {iterations} iterations (bracket width: {width:.2e})")]
    MaxIterationsExceeded { iterations: usize, width: f64 },

    /// The residual evaluated to NaN
    #[error("Residual is not a number at current density {current:e} A/cm²")]
    NonFiniteResidual { current: f64 },

    /// A single voltage sample of a sweep failed
    #[error("Sweep failed at sample {index} (V = {voltage} V)")]
    SweepPoint {
        index: usize,
        voltage: f64,
        #[source]
        source: Box<JunctionError>,
    },

    /// One curve of a parameter family failed
    #[error("Sweep of parameter variant {variant} failed")]
    FamilyMember {
        variant: usize,
        #[source]
        source: Box<JunctionError>,
    },

    // ============ Input Errors ============
    /// A measurement line could not be parsed as numbers
    #[error("Malformed measurement at line {line}: cannot parse '{field}' ({message})")]
    MalformedSample {
        line: usize,
        field: String,
        message: String,
    },

    /// Error reading an input file
    #[error("Failed to read file '{path}': {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Scenario file could not be loaded or deserialized
    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),

    // ============ Output Errors ============
    /// Error writing results
    #[error("Output error: {message}")]
    OutputError { message: String },
}

impl JunctionError {
    /// Create an invalid parameter error
    pub fn invalid_parameter(param: impl Into<String>, value: f64, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            param: param.into(),
            value,
            message: message.into(),
        }
    }

    /// Create a malformed sample error
    pub fn malformed_sample(line: usize, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedSample {
            line,
            field: field.into(),
            message: message.into(),
        }
    }

    /// Wrap a per-sample failure with its position in the sweep
    pub fn at_sweep_point(self, index: usize, voltage: f64) -> Self {
        Self::SweepPoint {
            index,
            voltage,
            source: Box::new(self),
        }
    }

    /// The innermost error, skipping sweep and family wrappers.
    pub fn root_cause(&self) -> &JunctionError {
        match self {
            Self::SweepPoint { source, .. } | Self::FamilyMember { source, .. } => source.root_cause(),
            other => other,
        }
    }
}
