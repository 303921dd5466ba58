//! Configuration and parameters
//!
//! Default constants, the simulation parameter block and sanity checks.

pub mod check;
pub mod constants;
pub mod params;

pub use constants::*;
pub use params::*;
