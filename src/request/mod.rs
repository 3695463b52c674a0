//! Kinematic requests: the input of one multi-DoF motion calculation.
//!
//! A [`KinematicRequest`] carries the current and target state of every
//! degree of freedom together with its kinematic limits and the global
//! calculation modes. Requests are plain data: the caller fills them field
//! by field, and [`KinematicRequest::validate`] checks them without mutation.

mod display;
mod validation;

use heapless::Vec;
use serde::Deserialize;

use crate::config::SystemConfig;
use crate::error::{ConfigError, Error, Result};

/// Maximum number of intermediate waypoints of a request.
pub const MAX_WAYPOINTS: usize = 16;

/// Maximum number of sections (waypoints + 1) of a request.
pub const MAX_SECTIONS: usize = MAX_WAYPOINTS + 1;

/// Per-section values, one `[f64; DOFS]` entry per section.
pub type SectionValues<const DOFS: usize> = Vec<[f64; DOFS], MAX_SECTIONS>;

/// Which boundary quantity the motion is steered to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlInterface {
    /// Target position, velocity and acceleration.
    #[default]
    Position,
    /// Target velocity and acceleration only.
    Velocity,
}

/// How the profiles of several DoFs are synchronized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Synchronization {
    /// All DoFs finish at the same time.
    #[default]
    Time,
    /// Synchronize in time only where it does not slow the motion down.
    TimeIfNecessary,
    /// All DoFs share the same phase timing.
    Phase,
    /// Every DoF moves in its own minimum time.
    None,
}

/// Whether profile durations are continuous or multiples of the control period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationDiscretization {
    /// Any duration.
    #[default]
    Continuous,
    /// Durations are rounded up to whole control cycles.
    Discrete,
}

/// Input of one motion calculation for `DOFS` degrees of freedom.
///
/// Equality is a deep field comparison, used to detect whether a cached
/// calculation must be redone.
#[derive(Debug, Clone, PartialEq)]
pub struct KinematicRequest<const DOFS: usize> {
    /// Global control interface.
    pub control_interface: ControlInterface,
    /// Global synchronization.
    pub synchronization: Synchronization,
    /// Global duration discretization.
    pub duration_discretization: DurationDiscretization,

    /// Current position.
    pub current_position: [f64; DOFS],
    /// Current velocity.
    pub current_velocity: [f64; DOFS],
    /// Current acceleration.
    pub current_acceleration: [f64; DOFS],

    /// Target position.
    pub target_position: [f64; DOFS],
    /// Target velocity.
    pub target_velocity: [f64; DOFS],
    /// Target acceleration.
    pub target_acceleration: [f64; DOFS],

    /// Maximum velocity.
    pub max_velocity: [f64; DOFS],
    /// Maximum acceleration.
    pub max_acceleration: [f64; DOFS],
    /// Maximum jerk. An infinite jerk selects second-order profiles.
    pub max_jerk: [f64; DOFS],

    /// Minimum velocity, `-max_velocity` when unset.
    pub min_velocity: Option<[f64; DOFS]>,
    /// Minimum acceleration, `-max_acceleration` when unset.
    pub min_acceleration: Option<[f64; DOFS]>,

    /// Which DoFs are calculated at all.
    pub enabled: [bool; DOFS],

    /// Per-DoF control interface, overriding the global one.
    pub per_dof_control_interface: Option<[ControlInterface; DOFS]>,
    /// Per-DoF synchronization, overriding the global one.
    pub per_dof_synchronization: Option<[Synchronization; DOFS]>,

    /// Lower position bound.
    pub min_position: Option<[f64; DOFS]>,
    /// Upper position bound.
    pub max_position: Option<[f64; DOFS]>,

    /// Intermediate positions passed through in order.
    pub intermediate_positions: Vec<[f64; DOFS], MAX_WAYPOINTS>,

    /// Per-section maximum velocity.
    pub per_section_max_velocity: Option<SectionValues<DOFS>>,
    /// Per-section maximum acceleration.
    pub per_section_max_acceleration: Option<SectionValues<DOFS>>,
    /// Per-section maximum jerk.
    pub per_section_max_jerk: Option<SectionValues<DOFS>>,
    /// Per-section minimum velocity.
    pub per_section_min_velocity: Option<SectionValues<DOFS>>,
    /// Per-section minimum acceleration.
    pub per_section_min_acceleration: Option<SectionValues<DOFS>>,
    /// Per-section upper position bound.
    pub per_section_max_position: Option<SectionValues<DOFS>>,
    /// Per-section lower position bound.
    pub per_section_min_position: Option<SectionValues<DOFS>>,
    /// Per-section minimum duration.
    pub per_section_minimum_duration: Option<Vec<f64, MAX_SECTIONS>>,

    /// Minimum duration of the whole motion.
    pub minimum_duration: Option<f64>,

    /// Time budget of an external solver in microseconds. Not used by validation.
    pub interrupt_calculation_duration: Option<f64>,
}

impl<const DOFS: usize> Default for KinematicRequest<DOFS> {
    fn default() -> Self {
        Self {
            control_interface: ControlInterface::Position,
            synchronization: Synchronization::Time,
            duration_discretization: DurationDiscretization::Continuous,
            current_position: [0.0; DOFS],
            current_velocity: [0.0; DOFS],
            current_acceleration: [0.0; DOFS],
            target_position: [0.0; DOFS],
            target_velocity: [0.0; DOFS],
            target_acceleration: [0.0; DOFS],
            max_velocity: [0.0; DOFS],
            max_acceleration: [0.0; DOFS],
            max_jerk: [0.0; DOFS],
            min_velocity: None,
            min_acceleration: None,
            enabled: [true; DOFS],
            per_dof_control_interface: None,
            per_dof_synchronization: None,
            min_position: None,
            max_position: None,
            intermediate_positions: Vec::new(),
            per_section_max_velocity: None,
            per_section_max_acceleration: None,
            per_section_max_jerk: None,
            per_section_min_velocity: None,
            per_section_min_acceleration: None,
            per_section_max_position: None,
            per_section_min_position: None,
            per_section_minimum_duration: None,
            minimum_duration: None,
            interrupt_calculation_duration: None,
        }
    }
}

impl<const DOFS: usize> KinematicRequest<DOFS> {
    /// Create a request at rest at the origin with zero limits, every DoF enabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of degrees of freedom.
    #[inline]
    pub const fn degrees_of_freedom(&self) -> usize {
        DOFS
    }

    /// Number of sections between current state, waypoints and target.
    #[inline]
    pub fn number_of_sections(&self) -> usize {
        self.intermediate_positions.len() + 1
    }

    /// Effective minimum velocity of `dof`.
    #[inline]
    pub fn effective_min_velocity(&self, dof: usize) -> f64 {
        self.min_velocity
            .map_or(-self.max_velocity[dof], |min| min[dof])
    }

    /// Effective minimum acceleration of `dof`.
    #[inline]
    pub fn effective_min_acceleration(&self, dof: usize) -> f64 {
        self.min_acceleration
            .map_or(-self.max_acceleration[dof], |min| min[dof])
    }

    /// Effective control interface of `dof` (a per-DoF override wins).
    #[inline]
    pub fn effective_control_interface(&self, dof: usize) -> ControlInterface {
        self.per_dof_control_interface
            .map_or(self.control_interface, |per_dof| per_dof[dof])
    }

    /// Effective synchronization of `dof` (a per-DoF override wins).
    #[inline]
    pub fn effective_synchronization(&self, dof: usize) -> Synchronization {
        self.per_dof_synchronization
            .map_or(self.synchronization, |per_dof| per_dof[dof])
    }

    /// Build a request whose limits, bounds, enable flags and modes come from
    /// `config`. Boundary states are left at rest at the origin.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::AxisCountMismatch`] if the configuration does
    /// not declare exactly `DOFS` axes.
    pub fn from_config(config: &SystemConfig) -> Result<Self> {
        if config.axes.len() != DOFS {
            return Err(Error::Config(ConfigError::AxisCountMismatch {
                expected: DOFS,
                found: config.axes.len(),
            }));
        }

        let mut request = Self {
            control_interface: config.control_interface,
            synchronization: config.synchronization,
            duration_discretization: config.duration_discretization,
            ..Self::default()
        };

        let axes = &config.axes;
        for (dof, axis) in axes.iter().enumerate() {
            request.max_velocity[dof] = axis.max_velocity;
            request.max_acceleration[dof] = axis.max_acceleration;
            request.max_jerk[dof] = axis.max_jerk;
            request.enabled[dof] = axis.enabled;
        }

        if axes.iter().any(|axis| axis.min_velocity.is_some()) {
            request.min_velocity = Some(core::array::from_fn(|dof| {
                axes[dof].min_velocity.unwrap_or(-axes[dof].max_velocity)
            }));
        }
        if axes.iter().any(|axis| axis.min_acceleration.is_some()) {
            request.min_acceleration = Some(core::array::from_fn(|dof| {
                axes[dof]
                    .min_acceleration
                    .unwrap_or(-axes[dof].max_acceleration)
            }));
        }
        if axes.iter().any(|axis| axis.min_position.is_some()) {
            request.min_position = Some(core::array::from_fn(|dof| {
                axes[dof].min_position.unwrap_or(f64::NEG_INFINITY)
            }));
        }
        if axes.iter().any(|axis| axis.max_position.is_some()) {
            request.max_position = Some(core::array::from_fn(|dof| {
                axes[dof].max_position.unwrap_or(f64::INFINITY)
            }));
        }

        debug!("request built from {} configured axes", DOFS);
        Ok(request)
    }
}
