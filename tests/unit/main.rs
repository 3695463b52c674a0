//! Unit test harness for motion-kernel.
//!
//! This module organizes unit tests for each component of the library.

mod config_parsing;
mod profile_checks;
mod properties;
mod request_validation;
