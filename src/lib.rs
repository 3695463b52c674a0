//! # motion-kernel
//!
//! Jerk-limited motion profile verification and kinematic request validation.
//!
//! ## Features
//!
//! - **Request validation**: Per-DoF limits, boundary states and waypoint
//!   settings checked before any calculation
//! - **Profile certification**: Seven-phase constant-jerk profiles checked
//!   against boundary conditions and limits within fixed tolerances
//! - **Brake prefixes**: Out-of-limit initial states brought back into range
//! - **Sampling**: Closed-form state at any time, per control cycle for all DoFs
//! - **no_std compatible**: Core library works without standard library
//! - **Configuration-driven**: Axis limits and modes from TOML files
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use motion_kernel::{KinematicRequest, KinematicState, Limits, Profile};
//! use motion_kernel::profile::{ControlSigns, ReachedLimits};
//!
//! let config = motion_kernel::load_config("axes.toml")?;
//! let mut request = KinematicRequest::<1>::from_config(&config)?;
//! request.target_position = [10.0];
//! request.validate()?;
//!
//! // Certify the candidate durations proposed by a step-time solver
//! let mut profile = Profile::new();
//! profile.set_boundary(KinematicState::default(), KinematicState::new(10.0, 0.0, 0.0));
//! profile.t = [0.2, 0.3, 0.2, 1.3, 0.2, 0.3, 0.2];
//! let accepted = profile.check(
//!     ControlSigns::Uddu,
//!     ReachedLimits::Acc0Acc1Vel,
//!     50.0,
//!     &Limits::symmetric(5.0, 10.0, 50.0),
//! );
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O and TOML parsing
//! - `defmt`: Enables defmt logging for embedded targets
//! - `tracing`: Enables `tracing` logging for hosts

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

#[cfg(all(test, not(feature = "std")))]
extern crate std;

// Must come first so the logging macros are visible in every module
#[macro_use]
mod fmt;

// Core modules
pub mod config;
pub mod error;
pub mod motion;
pub mod profile;
pub mod request;
pub mod roots;

// Re-exports for ergonomic API
pub use config::{validate_config, AxisConfig, SystemConfig};
pub use error::{ConfigError, Error, Result, ValidationError};
pub use motion::{KinematicState, TrajectoryExecutor};
pub use profile::{Bound, BrakeProfile, Limits, Profile};
pub use request::{ControlInterface, DurationDiscretization, KinematicRequest, Synchronization};

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};
