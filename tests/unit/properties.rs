//! Property tests for validation, integration and profile queries.

use motion_kernel::profile::{ControlSigns, ReachedLimits};
use motion_kernel::{KinematicRequest, KinematicState, Limits, Profile};
use proptest::prelude::*;

fn full_profile() -> Profile {
    let mut profile = Profile::new();
    profile.set_boundary(KinematicState::default(), KinematicState::new(10.0, 0.0, 0.0));
    profile.t = [0.2, 0.3, 0.2, 1.3, 0.2, 0.3, 0.2];
    assert!(profile.check(
        ControlSigns::Uddu,
        ReachedLimits::Acc0Acc1Vel,
        50.0,
        &Limits::symmetric(5.0, 10.0, 50.0)
    ));
    profile
}

proptest! {
    /// A candidate with any negative duration is never accepted.
    #[test]
    fn negative_durations_are_rejected(
        mut t in prop::array::uniform7(0.0f64..2.0),
        index in 0usize..7,
        negative in -2.0f64..-1e-9,
    ) {
        t[index] = negative;
        let lim = Limits::symmetric(5.0, 10.0, 50.0);

        let mut profile = Profile::new();
        profile.set_boundary(KinematicState::default(), KinematicState::new(10.0, 0.0, 0.0));
        profile.t = t;

        prop_assert!(!profile.check(ControlSigns::Uddu, ReachedLimits::None, 50.0, &lim));
        prop_assert!(!profile.check_for_velocity(ControlSigns::Udud, ReachedLimits::None, 50.0, &lim));
        prop_assert!(!profile.check_for_second_order(ControlSigns::Uddu, ReachedLimits::None, 10.0, -10.0, &lim));
        prop_assert!(!profile.check_for_second_order_velocity(ControlSigns::Uddu, ReachedLimits::None, 10.0));
        prop_assert!(!profile.check_for_first_order(ControlSigns::Uddu, ReachedLimits::None, 5.0));
    }

    /// An accepted candidate keeps its plateaus and cruise within the limits.
    #[test]
    fn accepted_profiles_respect_limits(
        dt in prop::array::uniform7(-1e-9f64..1e-9),
        perturbed in any::<bool>(),
        v_max in 4.5f64..6.0,
        a_max in 9.5f64..11.0,
        v_min in -6.0f64..-0.1,
        a_min in -11.0f64..-0.1,
    ) {
        let lim = Limits::new(v_max, v_min, a_max, a_min, 50.0);

        let mut profile = Profile::new();
        profile.set_boundary(KinematicState::default(), KinematicState::new(10.0, 0.0, 0.0));
        profile.t = [0.2, 0.3, 0.2, 1.3, 0.2, 0.3, 0.2];
        if perturbed {
            for (t, delta) in profile.t.iter_mut().zip(dt) {
                *t += delta;
            }
        }

        if profile.check(ControlSigns::Uddu, ReachedLimits::Acc0Acc1Vel, 50.0, &lim) {
            for a in [profile.a[1], profile.a[3], profile.a[5]] {
                prop_assert!(a <= a_max + 1e-12 && a >= a_min - 1e-12, "a = {}", a);
            }
            for &v in &profile.v[3..7] {
                prop_assert!(v <= v_max + 1e-12 && v >= v_min - 1e-12, "v = {}", v);
            }
        } else {
            // The unperturbed candidate peaks at v = 5 and a = ±10
            prop_assert!(perturbed || v_max < 5.0 || a_max < 10.0 || a_min > -10.0);
        }
    }

    /// Integrating in two steps matches integrating in one.
    #[test]
    fn integration_is_additive(
        p in -10.0f64..10.0,
        v in -10.0f64..10.0,
        a in -10.0f64..10.0,
        j in -10.0f64..10.0,
        t1 in 0.0f64..2.0,
        t2 in 0.0f64..2.0,
    ) {
        let start = KinematicState::new(p, v, a);
        let split = start.integrate(t1, j).integrate(t2, j);
        let whole = start.integrate(t1 + t2, j);

        prop_assert!((split.position - whole.position).abs() < 1e-9);
        prop_assert!((split.velocity - whole.velocity).abs() < 1e-9);
        prop_assert!((split.acceleration - whole.acceleration).abs() < 1e-9);
    }

    /// Requests whose boundary states rest within the limits are valid.
    #[test]
    fn resting_states_within_limits_are_valid(
        v_max in 0.0f64..10.0,
        a_max in 0.0f64..10.0,
        j_max in 0.0f64..10.0,
        p0 in -100.0f64..100.0,
        pf in -100.0f64..100.0,
        v_fraction in -1.0f64..1.0,
    ) {
        let mut request = KinematicRequest::<1>::new();
        request.max_velocity = [v_max];
        request.max_acceleration = [a_max];
        request.max_jerk = [j_max];
        request.current_position = [p0];
        request.target_position = [pf];
        request.current_velocity = [v_fraction * v_max];
        request.target_velocity = [v_fraction * v_max];

        prop_assert!(request.is_valid_with(true, true), "{}", request);
    }

    /// A NaN in any boundary state makes the request invalid.
    #[test]
    fn nan_state_is_invalid(field in 0usize..6) {
        let mut request = KinematicRequest::<1>::new();
        request.max_velocity = [1.0];
        request.max_acceleration = [1.0];
        request.max_jerk = [1.0];
        match field {
            0 => request.current_position = [f64::NAN],
            1 => request.current_velocity = [f64::NAN],
            2 => request.current_acceleration = [f64::NAN],
            3 => request.target_position = [f64::NAN],
            4 => request.target_velocity = [f64::NAN],
            _ => request.target_acceleration = [f64::NAN],
        }

        prop_assert!(!request.is_valid_with(false, false));
    }

    /// Every sampled position lies within the reported extrema.
    #[test]
    fn samples_lie_within_extrema(time in 0.0f64..2.7) {
        let profile = full_profile();
        let bound = profile.get_position_extrema();
        let (state, _) = profile.state_at(time);

        prop_assert!(state.position >= bound.min - 1e-9);
        prop_assert!(state.position <= bound.max + 1e-9);
    }

    /// The time found for a position samples back to that position.
    #[test]
    fn time_at_position_is_inverse(position in 0.01f64..9.9) {
        let profile = full_profile();
        let time = profile.get_first_state_at_position(position, 0.0);
        prop_assert!(time.is_some());

        let (state, _) = profile.state_at(time.unwrap());
        prop_assert!((state.position - position).abs() < 1e-7);
    }
}
