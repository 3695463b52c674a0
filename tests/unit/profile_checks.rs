//! Unit tests for profile certification through the public API.

use motion_kernel::profile::{ControlSigns, ReachedLimits, A_PRECISION, T_MAX};
use motion_kernel::{BrakeProfile, KinematicState, Limits, Profile};

fn rest(position: f64) -> KinematicState {
    KinematicState::new(position, 0.0, 0.0)
}

fn candidate(t: [f64; 7], pf: f64) -> Profile {
    let mut profile = Profile::new();
    profile.set_boundary(rest(0.0), rest(pf));
    profile.t = t;
    profile
}

/// Test that a rejected candidate keeps the tags of the last accepted one.
#[test]
fn test_rejection_keeps_previous_tags() {
    let lim = Limits::symmetric(5.0, 10.0, 50.0);
    let mut profile = candidate([0.2, 0.3, 0.2, 1.3, 0.2, 0.3, 0.2], 10.0);
    assert!(profile.check(ControlSigns::Uddu, ReachedLimits::Acc0Acc1Vel, 50.0, &lim));

    profile.t[3] = 1.0;
    assert!(!profile.check(ControlSigns::Udud, ReachedLimits::Vel, 50.0, &lim));
    assert_eq!(profile.limits, ReachedLimits::Acc0Acc1Vel);
    assert_eq!(profile.control_signs, ControlSigns::Uddu);
}

/// Test that check_with_timing verifies the total duration.
#[test]
fn test_timing_is_verified() {
    let lim = Limits::symmetric(5.0, 10.0, 50.0);
    let mut profile = candidate([0.2, 0.3, 0.2, 1.3, 0.2, 0.3, 0.2], 10.0);
    assert!(profile.check_with_timing(2.7, ControlSigns::Uddu, ReachedLimits::Acc0Acc1Vel, 50.0, &lim));
    assert!(!profile.check_with_timing(2.8, ControlSigns::Uddu, ReachedLimits::Acc0Acc1Vel, 50.0, &lim));
}

/// Test that the jerk bound of the timed variant is enforced.
#[test]
fn test_jerk_above_limit() {
    let lim = Limits::symmetric(5.0, 10.0, 40.0);
    let mut profile = candidate([0.2, 0.3, 0.2, 1.3, 0.2, 0.3, 0.2], 10.0);
    assert!(!profile.check_with_timing_and_jerk(
        2.7,
        ControlSigns::Uddu,
        ReachedLimits::Acc0Acc1Vel,
        50.0,
        &lim
    ));
}

/// Test that overly long profiles are rejected.
#[test]
fn test_duration_above_maximum() {
    let lim = Limits::symmetric(1.0, 1.0, 1.0);
    let mut profile = candidate([0.0, 0.0, 0.0, 2.0 * T_MAX, 0.0, 0.0, 0.0], 0.0);
    assert!(!profile.check(ControlSigns::Uddu, ReachedLimits::Vel, 1.0, &lim));
}

/// Test a UDUD velocity-interface candidate that overshoots and comes back.
#[test]
fn test_velocity_interface_udud() {
    let lim = Limits::symmetric(f64::INFINITY, 1.0, 1.0);
    let mut profile = Profile::new();
    profile.set_boundary_for_velocity(rest(0.0), 0.0, 0.0);
    // Up by 1.0 in two seconds, then down by 1.0 in two seconds
    profile.t = [1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0];
    assert!(profile.check_for_velocity(ControlSigns::Uddu, ReachedLimits::None, 1.0, &lim));
    assert!(profile.v[7].abs() < 1e-12);
    assert!(profile.a[7].abs() < A_PRECISION);
    assert!(!profile.check_for_velocity(ControlSigns::Udud, ReachedLimits::None, 1.0, &lim));
}

/// Test the velocity brake followed by state sampling.
#[test]
fn test_position_brake_prefix_sampling() {
    let lim = Limits::symmetric(1.0, 1.0, 1.0);
    let initial = KinematicState::new(0.0, 2.0, 0.0);

    let mut brake = BrakeProfile::default();
    brake.position_brake(initial.velocity, initial.acceleration, &lim);
    let mut state = initial;
    brake.finalize(&mut state);
    assert!(brake.duration > 0.0);

    let mut profile = Profile::new();
    profile.brake = brake;
    profile.set_boundary(state, state);
    profile.p[7] = state.position;
    profile.v[7] = state.velocity;
    profile.a[7] = state.acceleration;

    // The brake is sampled first, the main profile starts at its end
    let (start, _) = profile.state_at(0.0);
    assert_eq!(start, initial);
    let (end, _) = profile.state_at(brake.duration);
    assert!((end.velocity - state.velocity).abs() < 1e-12);
    assert!(end.velocity < initial.velocity);
}
