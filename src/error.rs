//! Error types for motion-kernel.
//!
//! Provides unified error handling across configuration loading and
//! kinematic request validation. Profile checks never fail with an error:
//! a rejected candidate is an ordinary `false`.

use core::fmt;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all motion-kernel operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Kinematic request validation error
    Validation(ValidationError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Configuration declares no axes
    NoAxes,
    /// Duplicate axis name in configuration
    DuplicateAxisName(heapless::String<32>),
    /// A kinematic limit is NaN or has the wrong sign
    InvalidLimit {
        /// Axis name
        axis: heapless::String<32>,
        /// Which limit is wrong
        limit: LimitKind,
        /// Offending value
        value: f64,
    },
    /// Position bounds are not ordered (min must be < max)
    InvalidPositionBounds {
        /// Axis name
        axis: heapless::String<32>,
        /// Minimum position
        min: f64,
        /// Maximum position
        max: f64,
    },
    /// Number of configured axes differs from the request's degrees of freedom
    AxisCountMismatch {
        /// Degrees of freedom of the request
        expected: usize,
        /// Axes found in the configuration
        found: usize,
    },
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Kinematic limit identifiers used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitKind {
    /// Maximum velocity
    MaxVelocity,
    /// Minimum velocity
    MinVelocity,
    /// Maximum acceleration
    MaxAcceleration,
    /// Minimum acceleration
    MinAcceleration,
    /// Maximum jerk
    MaxJerk,
    /// Upper position bound
    MaxPosition,
    /// Lower position bound
    MinPosition,
}

impl LimitKind {
    /// Whether `value` is acceptable for this kind of limit.
    ///
    /// Maximum velocity, acceleration and jerk must be non-negative, their
    /// minimum counterparts non-positive. Position bounds only need to be numbers.
    pub fn admits(self, value: f64) -> bool {
        match self {
            LimitKind::MaxVelocity | LimitKind::MaxAcceleration | LimitKind::MaxJerk => {
                value >= 0.0
            }
            LimitKind::MinVelocity | LimitKind::MinAcceleration => value <= 0.0,
            LimitKind::MaxPosition | LimitKind::MinPosition => !value.is_nan(),
        }
    }

    fn requirement(self) -> &'static str {
        match self {
            LimitKind::MaxVelocity | LimitKind::MaxAcceleration | LimitKind::MaxJerk => {
                "should be larger than or equal to zero"
            }
            LimitKind::MinVelocity | LimitKind::MinAcceleration => {
                "should be smaller than or equal to zero"
            }
            LimitKind::MaxPosition | LimitKind::MinPosition => "should be a valid number",
        }
    }
}

/// Which side of a symmetric limit pair is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitSide {
    /// The upper (maximum) limit
    Maximum,
    /// The lower (minimum) limit
    Minimum,
}

/// Kinematic quantity of a boundary state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantity {
    /// Position
    Position,
    /// Velocity
    Velocity,
    /// Acceleration
    Acceleration,
}

/// Which boundary of the motion a state belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    /// The current (initial) state
    Current,
    /// The target (final) state
    Target,
}

/// How a boundary value violates its constraints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Violation {
    /// Value is NaN or infinite
    NotFinite {
        /// Offending value
        value: f64,
    },
    /// Value is above its maximum limit
    ExceedsMaximum {
        /// Offending value
        value: f64,
        /// Maximum limit
        limit: f64,
    },
    /// Value is below its minimum limit
    UndercutsMinimum {
        /// Offending value
        value: f64,
        /// Minimum limit
        limit: f64,
    },
}

/// Why intermediate waypoints cannot be used with the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaypointConflict {
    /// A global minimum duration is set
    MinimumDuration,
    /// Durations are discretized
    DiscreteDuration,
    /// A per-DoF control interface override is set
    PerDofControlInterface,
    /// A per-DoF synchronization override is set
    PerDofSynchronization,
    /// A DoF has an infinite jerk limit
    InfiniteJerk {
        /// Degree of freedom
        dof: usize,
    },
    /// A per-section list does not hold one entry per section
    SectionCountMismatch {
        /// Number of sections (waypoints + 1)
        expected: usize,
        /// Number of entries found
        found: usize,
    },
}

/// Kinematic request validation errors.
///
/// Every variant carries the offending degree of freedom, so a caller can
/// report the problem without re-running the validation.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Maximum jerk is NaN or negative
    InvalidJerkLimit {
        /// Degree of freedom
        dof: usize,
        /// Offending value
        value: f64,
    },
    /// Maximum acceleration is NaN or negative, or the minimum is NaN or positive
    InvalidAccelerationLimit {
        /// Degree of freedom
        dof: usize,
        /// Maximum or (derived) minimum limit
        side: LimitSide,
        /// Offending value
        value: f64,
    },
    /// Maximum velocity is NaN or negative, or the minimum is NaN or positive
    InvalidVelocityLimit {
        /// Degree of freedom
        dof: usize,
        /// Maximum or (derived) minimum limit
        side: LimitSide,
        /// Offending value
        value: f64,
    },
    /// Current state value is not finite or outside its limits
    InvalidCurrentState {
        /// Degree of freedom
        dof: usize,
        /// Concerned quantity
        quantity: Quantity,
        /// Kind of violation
        violation: Violation,
    },
    /// Target state value is not finite or outside its limits
    InvalidTargetState {
        /// Degree of freedom
        dof: usize,
        /// Concerned quantity
        quantity: Quantity,
        /// Kind of violation
        violation: Violation,
    },
    /// The state will inevitably cross a velocity limit under the jerk budget
    InevitableLimitViolation {
        /// Degree of freedom
        dof: usize,
        /// Current or target state
        boundary: Boundary,
        /// Which velocity limit is crossed
        side: LimitSide,
        /// Velocity reached once acceleration is ramped to zero
        velocity: f64,
        /// Crossed velocity limit
        limit: f64,
    },
    /// A position bound is NaN
    InvalidPositionLimit {
        /// Degree of freedom
        dof: usize,
        /// Upper or lower bound
        side: LimitSide,
        /// Offending value
        value: f64,
    },
    /// An intermediate position is not finite
    InvalidIntermediatePosition {
        /// Index of the waypoint
        index: usize,
        /// Degree of freedom
        dof: usize,
        /// Offending value
        value: f64,
    },
    /// A per-section limit is NaN or has the wrong sign
    InvalidSectionLimit {
        /// Index of the section
        section: usize,
        /// Degree of freedom
        dof: usize,
        /// Which limit is wrong
        limit: LimitKind,
        /// Offending value
        value: f64,
    },
    /// A minimum duration is negative or not finite
    InvalidMinimumDuration {
        /// Section index, `None` for the duration of the whole motion
        section: Option<usize>,
        /// Offending value
        value: f64,
    },
    /// Intermediate waypoints combined with an unsupported setting
    IncompatibleWaypointConfiguration(WaypointConflict),
}

impl ValidationError {
    /// Degree of freedom the error refers to, if any.
    pub fn dof(&self) -> Option<usize> {
        match *self {
            ValidationError::InvalidJerkLimit { dof, .. }
            | ValidationError::InvalidAccelerationLimit { dof, .. }
            | ValidationError::InvalidVelocityLimit { dof, .. }
            | ValidationError::InvalidCurrentState { dof, .. }
            | ValidationError::InvalidTargetState { dof, .. }
            | ValidationError::InevitableLimitViolation { dof, .. }
            | ValidationError::InvalidPositionLimit { dof, .. }
            | ValidationError::InvalidIntermediatePosition { dof, .. }
            | ValidationError::InvalidSectionLimit { dof, .. } => Some(dof),
            ValidationError::InvalidMinimumDuration { .. } => None,
            ValidationError::IncompatibleWaypointConfiguration(WaypointConflict::InfiniteJerk {
                dof,
            }) => Some(dof),
            ValidationError::IncompatibleWaypointConfiguration(_) => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Validation(e) => write!(f, "Validation error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::NoAxes => write!(f, "Configuration declares no axes"),
            ConfigError::DuplicateAxisName(name) => write!(f, "Duplicate axis name: '{}'", name),
            ConfigError::InvalidLimit { axis, limit, value } => {
                write!(f, "Invalid {} of axis '{}': {}", limit, axis, value)
            }
            ConfigError::InvalidPositionBounds { axis, min, max } => write!(
                f,
                "Invalid position bounds of axis '{}': min ({}) must be < max ({})",
                axis, min, max
            ),
            ConfigError::AxisCountMismatch { expected, found } => write!(
                f,
                "Configuration has {} axes, but the request has {} degrees of freedom",
                found, expected
            ),
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for LimitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LimitKind::MaxVelocity => "maximum velocity",
            LimitKind::MinVelocity => "minimum velocity",
            LimitKind::MaxAcceleration => "maximum acceleration",
            LimitKind::MinAcceleration => "minimum acceleration",
            LimitKind::MaxJerk => "maximum jerk",
            LimitKind::MaxPosition => "maximum position",
            LimitKind::MinPosition => "minimum position",
        };
        f.write_str(name)
    }
}

impl fmt::Display for LimitSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LimitSide::Maximum => f.write_str("maximum"),
            LimitSide::Minimum => f.write_str("minimum"),
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quantity::Position => f.write_str("position"),
            Quantity::Velocity => f.write_str("velocity"),
            Quantity::Acceleration => f.write_str("acceleration"),
        }
    }
}

impl fmt::Display for Boundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Boundary::Current => f.write_str("current"),
            Boundary::Target => f.write_str("target"),
        }
    }
}

impl fmt::Display for WaypointConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WaypointConflict::MinimumDuration => {
                write!(f, "a minimum duration is not supported with intermediate positions")
            }
            WaypointConflict::DiscreteDuration => {
                write!(f, "discrete durations are not supported with intermediate positions")
            }
            WaypointConflict::PerDofControlInterface => write!(
                f,
                "a per-DoF control interface is not supported with intermediate positions"
            ),
            WaypointConflict::PerDofSynchronization => write!(
                f,
                "a per-DoF synchronization is not supported with intermediate positions"
            ),
            WaypointConflict::InfiniteJerk { dof } => write!(
                f,
                "the infinite jerk limit of DoF {} is not supported with intermediate positions",
                dof
            ),
            WaypointConflict::SectionCountMismatch { expected, found } => write!(
                f,
                "per-section list has {} entries, expected one per section ({})",
                found, expected
            ),
        }
    }
}

fn write_violation(
    f: &mut fmt::Formatter<'_>,
    boundary: Boundary,
    dof: usize,
    quantity: Quantity,
    violation: &Violation,
) -> fmt::Result {
    match violation {
        Violation::NotFinite { value } => write!(
            f,
            "{} {} {} of DoF {} should be a valid number",
            boundary, quantity, value, dof
        ),
        Violation::ExceedsMaximum { value, limit } => write!(
            f,
            "{} {} {} of DoF {} exceeds its maximum {} limit {}",
            boundary, quantity, value, dof, quantity, limit
        ),
        Violation::UndercutsMinimum { value, limit } => write!(
            f,
            "{} {} {} of DoF {} undercuts its minimum {} limit {}",
            boundary, quantity, value, dof, quantity, limit
        ),
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::InvalidJerkLimit { dof, value } => write!(
                f,
                "maximum jerk limit {} of DoF {} should be larger than or equal to zero",
                value, dof
            ),
            ValidationError::InvalidAccelerationLimit { dof, side, value } => match side {
                LimitSide::Maximum => write!(
                    f,
                    "maximum acceleration limit {} of DoF {} should be larger than or equal to zero",
                    value, dof
                ),
                LimitSide::Minimum => write!(
                    f,
                    "minimum acceleration limit {} of DoF {} should be smaller than or equal to zero",
                    value, dof
                ),
            },
            ValidationError::InvalidVelocityLimit { dof, side, value } => match side {
                LimitSide::Maximum => write!(
                    f,
                    "maximum velocity limit {} of DoF {} should be larger than or equal to zero",
                    value, dof
                ),
                LimitSide::Minimum => write!(
                    f,
                    "minimum velocity limit {} of DoF {} should be smaller than or equal to zero",
                    value, dof
                ),
            },
            ValidationError::InvalidCurrentState { dof, quantity, violation } => {
                write_violation(f, Boundary::Current, *dof, *quantity, violation)
            }
            ValidationError::InvalidTargetState { dof, quantity, violation } => {
                write_violation(f, Boundary::Target, *dof, *quantity, violation)
            }
            ValidationError::InevitableLimitViolation { dof, boundary, side, velocity, limit } => {
                let verb = match side {
                    LimitSide::Maximum => "exceed",
                    LimitSide::Minimum => "undercut",
                };
                write!(
                    f,
                    "DoF {} will inevitably reach a velocity of {} from the {} kinematic state that will {} its {} velocity limit {}",
                    dof, velocity, boundary, verb, side, limit
                )
            }
            ValidationError::InvalidPositionLimit { dof, side, value } => write!(
                f,
                "{} position limit {} of DoF {} should be a valid number",
                side, value, dof
            ),
            ValidationError::InvalidIntermediatePosition { index, dof, value } => write!(
                f,
                "intermediate position {} of DoF {} at waypoint {} should be a valid number",
                value, dof, index
            ),
            ValidationError::InvalidSectionLimit { section, dof, limit, value } => write!(
                f,
                "{} limit {} of DoF {} in section {} {}",
                limit,
                value,
                dof,
                section,
                limit.requirement()
            ),
            ValidationError::InvalidMinimumDuration { section: Some(section), value } => write!(
                f,
                "minimum duration {} of section {} should be a non-negative number",
                value, section
            ),
            ValidationError::InvalidMinimumDuration { section: None, value } => write!(
                f,
                "minimum duration {} should be a non-negative number",
                value
            ),
            ValidationError::IncompatibleWaypointConfiguration(conflict) => {
                write!(f, "Incompatible waypoint configuration: {}", conflict)
            }
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<ValidationError> for Error {
    fn from(e: ValidationError) -> Self {
        Error::Validation(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for ValidationError {}
