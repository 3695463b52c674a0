//! Configuration module for motion-kernel.
//!
//! Provides types for loading and validating axis limits and calculation
//! modes from TOML files (with `std` feature) or pre-parsed data.

mod axis;
#[cfg(feature = "std")]
mod loader;
mod system;
mod validation;

pub use axis::AxisConfig;
pub use system::{SystemConfig, MAX_AXES};
pub use validation::validate_config;

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};
