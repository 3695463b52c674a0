//! Kinematic request validation.

use super::{ControlInterface, DurationDiscretization, KinematicRequest, SectionValues};
use crate::error::{
    Boundary, Error, LimitKind, LimitSide, Quantity, Result, ValidationError, Violation,
    WaypointConflict,
};
use crate::motion::velocity_at_zero_acceleration;

/// Which boundary states are checked against their limits.
#[derive(Debug, Clone, Copy)]
struct StateChecks {
    current: bool,
    target: bool,
}

fn not_finite(value: f64) -> Option<Violation> {
    (!value.is_finite()).then_some(Violation::NotFinite { value })
}

fn outside(value: f64, min: f64, max: f64) -> Option<Violation> {
    if value > max {
        Some(Violation::ExceedsMaximum { value, limit: max })
    } else if value < min {
        Some(Violation::UndercutsMinimum { value, limit: min })
    } else {
        None
    }
}

fn current_state(dof: usize, quantity: Quantity, violation: Violation) -> Error {
    Error::Validation(ValidationError::InvalidCurrentState {
        dof,
        quantity,
        violation,
    })
}

fn target_state(dof: usize, quantity: Quantity, violation: Violation) -> Error {
    Error::Validation(ValidationError::InvalidTargetState {
        dof,
        quantity,
        violation,
    })
}

fn position_bound<const DOFS: usize>(
    bound: Option<&[f64; DOFS]>,
    dof: usize,
    side: LimitSide,
) -> Result<()> {
    match bound.map(|bound| bound[dof]) {
        Some(value) if value.is_nan() => {
            Err(Error::Validation(ValidationError::InvalidPositionLimit { dof, side, value }))
        }
        _ => Ok(()),
    }
}

fn inevitable(dof: usize, boundary: Boundary, side: LimitSide, velocity: f64, limit: f64) -> Error {
    Error::Validation(ValidationError::InevitableLimitViolation {
        dof,
        boundary,
        side,
        velocity,
        limit,
    })
}

impl<const DOFS: usize> KinematicRequest<DOFS> {
    /// Validate the request, checking only the target state against the limits.
    ///
    /// Equivalent to `validate_with(false, true)`.
    pub fn validate(&self) -> Result<()> {
        self.validate_with(false, true)
    }

    /// Validate the request.
    ///
    /// Every DoF is checked, enabled or not, and the first violation is
    /// returned. `check_current_state_within_limits` and
    /// `check_target_state_within_limits` additionally require the respective
    /// boundary velocity and acceleration to lie within the limits, and the
    /// velocity to stay within them while the acceleration is ramped to zero.
    /// Position bounds, durations, waypoints and per-section limits are then
    /// checked before the waypoint compatibility rules.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found.
    pub fn validate_with(
        &self,
        check_current_state_within_limits: bool,
        check_target_state_within_limits: bool,
    ) -> Result<()> {
        let checks = StateChecks {
            current: check_current_state_within_limits,
            target: check_target_state_within_limits,
        };

        let result = (0..DOFS)
            .try_for_each(|dof| self.validate_dof(dof, checks))
            .and_then(|()| self.validate_durations())
            .and_then(|()| self.validate_intermediate_positions())
            .and_then(|()| self.validate_section_limits())
            .and_then(|()| self.validate_waypoints());

        if let Err(Error::Validation(ref e)) = result {
            debug!("request rejected at DoF {}", e.dof().map_or(-1, |dof| dof as i64));
        }
        result
    }

    /// Whether the request is valid; same rules as [`validate`](Self::validate).
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Whether the request is valid; same rules as [`validate_with`](Self::validate_with).
    pub fn is_valid_with(
        &self,
        check_current_state_within_limits: bool,
        check_target_state_within_limits: bool,
    ) -> bool {
        self.validate_with(check_current_state_within_limits, check_target_state_within_limits)
            .is_ok()
    }

    fn validate_dof(&self, dof: usize, checks: StateChecks) -> Result<()> {
        let j_max = self.max_jerk[dof];
        if j_max.is_nan() || j_max < 0.0 {
            return Err(Error::Validation(ValidationError::InvalidJerkLimit { dof, value: j_max }));
        }

        let a_max = self.max_acceleration[dof];
        if a_max.is_nan() || a_max < 0.0 {
            return Err(Error::Validation(ValidationError::InvalidAccelerationLimit {
                dof,
                side: LimitSide::Maximum,
                value: a_max,
            }));
        }

        let a_min = self.effective_min_acceleration(dof);
        if a_min.is_nan() || a_min > 0.0 {
            return Err(Error::Validation(ValidationError::InvalidAccelerationLimit {
                dof,
                side: LimitSide::Minimum,
                value: a_min,
            }));
        }

        let a0 = self.current_acceleration[dof];
        if let Some(violation) = not_finite(a0) {
            return Err(current_state(dof, Quantity::Acceleration, violation));
        }
        let af = self.target_acceleration[dof];
        if let Some(violation) = not_finite(af) {
            return Err(target_state(dof, Quantity::Acceleration, violation));
        }

        if checks.current {
            if let Some(violation) = outside(a0, a_min, a_max) {
                return Err(current_state(dof, Quantity::Acceleration, violation));
            }
        }
        if checks.target {
            if let Some(violation) = outside(af, a_min, a_max) {
                return Err(target_state(dof, Quantity::Acceleration, violation));
            }
        }

        let v0 = self.current_velocity[dof];
        if let Some(violation) = not_finite(v0) {
            return Err(current_state(dof, Quantity::Velocity, violation));
        }
        let vf = self.target_velocity[dof];
        if let Some(violation) = not_finite(vf) {
            return Err(target_state(dof, Quantity::Velocity, violation));
        }

        position_bound(self.min_position.as_ref(), dof, LimitSide::Minimum)?;
        position_bound(self.max_position.as_ref(), dof, LimitSide::Maximum)?;

        if self.effective_control_interface(dof) != ControlInterface::Position {
            return Ok(());
        }

        let p0 = self.current_position[dof];
        if let Some(violation) = not_finite(p0) {
            return Err(current_state(dof, Quantity::Position, violation));
        }
        let pf = self.target_position[dof];
        if let Some(violation) = not_finite(pf) {
            return Err(target_state(dof, Quantity::Position, violation));
        }

        let v_max = self.max_velocity[dof];
        if v_max.is_nan() || v_max < 0.0 {
            return Err(Error::Validation(ValidationError::InvalidVelocityLimit {
                dof,
                side: LimitSide::Maximum,
                value: v_max,
            }));
        }

        let v_min = self.effective_min_velocity(dof);
        if v_min.is_nan() || v_min > 0.0 {
            return Err(Error::Validation(ValidationError::InvalidVelocityLimit {
                dof,
                side: LimitSide::Minimum,
                value: v_min,
            }));
        }

        if checks.current {
            if let Some(violation) = outside(v0, v_min, v_max) {
                return Err(current_state(dof, Quantity::Velocity, violation));
            }
        }
        if checks.target {
            if let Some(violation) = outside(vf, v_min, v_max) {
                return Err(target_state(dof, Quantity::Velocity, violation));
            }
        }

        // Ramping the acceleration to zero moves the velocity further in its direction
        if checks.current && j_max > 0.0 {
            if a0 > 0.0 {
                let v = velocity_at_zero_acceleration(v0, a0, j_max);
                if v > v_max {
                    return Err(inevitable(dof, Boundary::Current, LimitSide::Maximum, v, v_max));
                }
            } else if a0 < 0.0 {
                let v = velocity_at_zero_acceleration(v0, a0, -j_max);
                if v < v_min {
                    return Err(inevitable(dof, Boundary::Current, LimitSide::Minimum, v, v_min));
                }
            }
        }

        // The target state is reached from a zero-acceleration state backwards in time
        if checks.target && j_max > 0.0 {
            if af < 0.0 {
                let v = velocity_at_zero_acceleration(vf, af, j_max);
                if v > v_max {
                    return Err(inevitable(dof, Boundary::Target, LimitSide::Maximum, v, v_max));
                }
            } else if af > 0.0 {
                let v = velocity_at_zero_acceleration(vf, af, -j_max);
                if v < v_min {
                    return Err(inevitable(dof, Boundary::Target, LimitSide::Minimum, v, v_min));
                }
            }
        }

        Ok(())
    }

    fn validate_durations(&self) -> Result<()> {
        let invalid = |value: f64| !value.is_finite() || value < 0.0;

        if let Some(value) = self.minimum_duration.filter(|&value| invalid(value)) {
            return Err(Error::Validation(ValidationError::InvalidMinimumDuration {
                section: None,
                value,
            }));
        }

        let durations = self.per_section_minimum_duration.iter().flatten().copied();
        if let Some((section, value)) = durations.enumerate().find(|&(_, value)| invalid(value)) {
            return Err(Error::Validation(ValidationError::InvalidMinimumDuration {
                section: Some(section),
                value,
            }));
        }

        Ok(())
    }

    fn validate_intermediate_positions(&self) -> Result<()> {
        for (index, waypoint) in self.intermediate_positions.iter().enumerate() {
            if let Some(dof) = waypoint.iter().position(|p| !p.is_finite()) {
                return Err(Error::Validation(ValidationError::InvalidIntermediatePosition {
                    index,
                    dof,
                    value: waypoint[dof],
                }));
            }
        }
        Ok(())
    }

    fn section_limits(&self) -> [(LimitKind, Option<&SectionValues<DOFS>>); 7] {
        [
            (LimitKind::MaxVelocity, self.per_section_max_velocity.as_ref()),
            (LimitKind::MaxAcceleration, self.per_section_max_acceleration.as_ref()),
            (LimitKind::MaxJerk, self.per_section_max_jerk.as_ref()),
            (LimitKind::MinVelocity, self.per_section_min_velocity.as_ref()),
            (LimitKind::MinAcceleration, self.per_section_min_acceleration.as_ref()),
            (LimitKind::MaxPosition, self.per_section_max_position.as_ref()),
            (LimitKind::MinPosition, self.per_section_min_position.as_ref()),
        ]
    }

    /// Same sign rules as the global limits, section by section.
    fn validate_section_limits(&self) -> Result<()> {
        for (limit, list) in self.section_limits() {
            let Some(list) = list else { continue };
            for (section, values) in list.iter().enumerate() {
                if let Some(dof) = values.iter().position(|&value| !limit.admits(value)) {
                    return Err(Error::Validation(ValidationError::InvalidSectionLimit {
                        section,
                        dof,
                        limit,
                        value: values[dof],
                    }));
                }
            }
        }
        Ok(())
    }

    fn validate_waypoints(&self) -> Result<()> {
        if self.intermediate_positions.is_empty()
            || self.control_interface != ControlInterface::Position
        {
            return Ok(());
        }

        let conflict = |conflict| {
            Err(Error::Validation(ValidationError::IncompatibleWaypointConfiguration(conflict)))
        };

        if self.minimum_duration.is_some() {
            return conflict(WaypointConflict::MinimumDuration);
        }
        if self.duration_discretization != DurationDiscretization::Continuous {
            return conflict(WaypointConflict::DiscreteDuration);
        }
        if self.per_dof_control_interface.is_some() {
            return conflict(WaypointConflict::PerDofControlInterface);
        }
        if self.per_dof_synchronization.is_some() {
            return conflict(WaypointConflict::PerDofSynchronization);
        }
        if let Some(dof) = self.max_jerk.iter().position(|j| j.is_infinite()) {
            return conflict(WaypointConflict::InfiniteJerk { dof });
        }

        let expected = self.number_of_sections();
        let lengths = self
            .section_limits()
            .into_iter()
            .filter_map(|(_, list)| list.map(|list| list.len()))
            .chain(self.per_section_minimum_duration.as_ref().map(|list| list.len()));
        for found in lengths {
            if found != expected {
                return conflict(WaypointConflict::SectionCountMismatch { expected, found });
            }
        }

        Ok(())
    }
}
