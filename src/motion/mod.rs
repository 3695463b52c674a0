//! Kinematic state integration and multi-DoF sampling.
//!
//! Every check, query and sampler in the crate steps states with the same
//! closed-form constant-jerk formulas defined here.

mod executor;
mod state;

pub use executor::TrajectoryExecutor;
pub use state::{integrate, velocity_at_zero_acceleration, KinematicState};
