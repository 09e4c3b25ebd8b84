//! Closed-form junction physics.
//!
//! Everything here follows from the depletion approximation:
//!
//! - [`constants`] - charge, Boltzmann constant, permittivities, temperature
//! - [`junction`] - doping/band/transport parameters and the validated [`Junction`]
//! - [`barrier`] - built-in potential and bias-dependent depletion widths
//! - [`profile`] - tanh-blended potential profile for band diagrams
//! - [`saturation`] - diffusion-limited saturation current density
//!
//! All quantities are SI (m, m^-3, s, V) except the bandgap, given in eV.

pub mod barrier;
pub mod constants;
pub mod junction;
pub mod profile;
pub mod saturation;

pub use barrier::{potential_barrier, DepletionWidths};
pub use constants::PhysicalConstants;
pub use junction::{IntrinsicDensity, Junction, JunctionConfig};
pub use profile::DEFAULT_BETA;
pub use saturation::coth;
