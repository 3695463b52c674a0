//! Axis configuration from TOML.

use heapless::String;
use serde::Deserialize;

/// Kinematic limits of one axis (degree of freedom).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AxisConfig {
    /// Human-readable name (max 32 chars).
    pub name: String<32>,

    /// Maximum velocity.
    pub max_velocity: f64,

    /// Maximum acceleration.
    pub max_acceleration: f64,

    /// Maximum jerk. Omit for second-order (jerk-unlimited) motion.
    #[serde(default = "default_max_jerk")]
    pub max_jerk: f64,

    /// Minimum velocity, `-max_velocity` when omitted.
    #[serde(default)]
    pub min_velocity: Option<f64>,

    /// Minimum acceleration, `-max_acceleration` when omitted.
    #[serde(default)]
    pub min_acceleration: Option<f64>,

    /// Optional lower position bound.
    #[serde(default)]
    pub min_position: Option<f64>,

    /// Optional upper position bound.
    #[serde(default)]
    pub max_position: Option<f64>,

    /// Whether the axis takes part in the calculation.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_max_jerk() -> f64 {
    f64::INFINITY
}

fn default_enabled() -> bool {
    true
}

impl AxisConfig {
    /// Effective minimum velocity.
    pub fn effective_min_velocity(&self) -> f64 {
        self.min_velocity.unwrap_or(-self.max_velocity)
    }

    /// Effective minimum acceleration.
    pub fn effective_min_acceleration(&self) -> f64 {
        self.min_acceleration.unwrap_or(-self.max_acceleration)
    }

    /// Whether the axis is limited in jerk (third-order motion).
    pub fn is_jerk_limited(&self) -> bool {
        self.max_jerk.is_finite()
    }
}
