//! Unit tests for kinematic request validation diagnostics.

use motion_kernel::error::{LimitSide, WaypointConflict};
use motion_kernel::{Error, KinematicRequest, ValidationError};

fn three_axes() -> KinematicRequest<3> {
    let mut request = KinematicRequest::new();
    request.target_position = [1.0, 2.0, 3.0];
    request.max_velocity = [1.0, 1.0, 1.0];
    request.max_acceleration = [1.0, 1.0, 1.0];
    request.max_jerk = [1.0, 1.0, 1.0];
    request
}

fn validation_error<const DOFS: usize>(request: &KinematicRequest<DOFS>) -> ValidationError {
    match request.validate() {
        Err(Error::Validation(e)) => e,
        other => panic!("expected a validation error for\n{}got {:?}", request, other),
    }
}

/// Test that the first failing DoF is reported.
#[test]
fn test_first_violation_wins() {
    let mut request = three_axes();
    request.max_jerk = [1.0, -1.0, f64::NAN];
    let e = validation_error(&request);
    assert_eq!(e.dof(), Some(1));
    assert_eq!(
        e.to_string(),
        "maximum jerk limit -1 of DoF 1 should be larger than or equal to zero"
    );
}

/// Test the message of a derived minimum limit.
#[test]
fn test_minimum_acceleration_message() {
    let mut request = three_axes();
    request.min_acceleration = Some([-1.0, -1.0, 0.5]);
    let e = validation_error(&request);
    assert_eq!(
        e,
        ValidationError::InvalidAccelerationLimit {
            dof: 2,
            side: LimitSide::Minimum,
            value: 0.5
        }
    );
    assert!(e.to_string().contains("should be smaller than or equal to zero"));
}

/// Test that the target acceleration limit is checked by default.
#[test]
fn test_target_acceleration_limit() {
    let mut request = three_axes();
    request.target_acceleration = [0.0, -1.5, 0.0];
    let e = validation_error(&request);
    assert!(e.to_string().contains("undercuts its minimum acceleration limit -1"));

    assert!(request.is_valid_with(true, false));
}

/// Test the asymmetric velocity limits.
#[test]
fn test_asymmetric_velocity_limits() {
    let mut request = three_axes();
    request.min_velocity = Some([-0.2, -1.0, -1.0]);
    request.target_velocity = [-0.5, 0.0, 0.0];
    let e = validation_error(&request);
    assert_eq!(e.dof(), Some(0));

    request.target_velocity = [-0.1, 0.0, 0.0];
    assert!(request.is_valid());
}

/// Test a waypoint conflict message and that it names no DoF.
#[test]
fn test_waypoint_conflict() {
    let mut request = three_axes();
    request.intermediate_positions.push([0.5, 1.0, 1.5]).unwrap();
    request.minimum_duration = Some(1.0);
    let e = validation_error(&request);
    assert_eq!(
        e,
        ValidationError::IncompatibleWaypointConfiguration(WaypointConflict::MinimumDuration)
    );
    assert_eq!(e.dof(), None);
    assert!(e.to_string().contains("intermediate positions"));
}

/// Test that the interrupt budget does not affect validation.
#[test]
fn test_interrupt_budget_ignored() {
    let mut request = three_axes();
    request.interrupt_calculation_duration = Some(-5.0);
    assert!(request.is_valid());
}

/// Test that NaN waypoints and position bounds are rejected even with every flag set.
#[test]
fn test_nan_waypoint_and_bound() {
    let mut request = KinematicRequest::<1>::new();
    request.max_velocity = [1.0];
    request.max_acceleration = [1.0];
    request.max_jerk = [1.0];
    request.target_position = [1.0];
    assert!(request.is_valid_with(true, true));

    let mut waypoint = request.clone();
    waypoint.intermediate_positions.push([f64::NAN]).unwrap();
    assert!(!waypoint.is_valid_with(true, true));
    assert!(validation_error(&waypoint)
        .to_string()
        .contains("intermediate position NaN of DoF 0 at waypoint 0"));

    let mut bound = request;
    bound.min_position = Some([f64::NAN]);
    assert!(!bound.is_valid_with(true, true));
    assert_eq!(validation_error(&bound).dof(), Some(0));
    assert!(validation_error(&bound).to_string().starts_with("minimum position limit NaN"));
}
