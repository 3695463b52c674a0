//! Configuration validation.

use crate::error::{ConfigError, Error, LimitKind, Result};

use super::{AxisConfig, SystemConfig};

/// Validate a system configuration.
///
/// Checks:
/// - At least one axis is configured
/// - Axis names are unique
/// - Maximum limits are non-negative and minimum limits non-positive (none NaN)
/// - Position bounds are ordered (min < max)
pub fn validate_config(config: &SystemConfig) -> Result<()> {
    if config.axes.is_empty() {
        return Err(Error::Config(ConfigError::NoAxes));
    }

    for (i, axis) in config.axes.iter().enumerate() {
        if config.axes[..i].iter().any(|other| other.name == axis.name) {
            return Err(Error::Config(ConfigError::DuplicateAxisName(axis.name.clone())));
        }
        validate_axis(axis)?;
    }

    Ok(())
}

fn invalid_limit(axis: &AxisConfig, limit: LimitKind, value: f64) -> Error {
    Error::Config(ConfigError::InvalidLimit {
        axis: axis.name.clone(),
        limit,
        value,
    })
}

fn validate_axis(axis: &AxisConfig) -> Result<()> {
    let maximums = [
        (LimitKind::MaxVelocity, axis.max_velocity),
        (LimitKind::MaxAcceleration, axis.max_acceleration),
        (LimitKind::MaxJerk, axis.max_jerk),
    ];
    for (limit, value) in maximums {
        if !limit.admits(value) {
            return Err(invalid_limit(axis, limit, value));
        }
    }

    let minimums = [
        (LimitKind::MinVelocity, axis.min_velocity),
        (LimitKind::MinAcceleration, axis.min_acceleration),
    ];
    for (limit, value) in minimums {
        if let Some(value) = value {
            if !limit.admits(value) {
                return Err(invalid_limit(axis, limit, value));
            }
        }
    }

    if let (Some(min), Some(max)) = (axis.min_position, axis.max_position) {
        if !(min < max) {
            return Err(Error::Config(ConfigError::InvalidPositionBounds {
                axis: axis.name.clone(),
                min,
                max,
            }));
        }
    }

    Ok(())
}
