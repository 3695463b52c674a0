//! Braking prefix segments.
//!
//! When the initial state already violates (or will inevitably violate) the
//! velocity or acceleration limits, up to two constant-jerk segments bring it
//! back into range before the main seven phases start.

use libm::{fabs, sqrt};

use super::Limits;
use crate::motion::{integrate, velocity_at_zero_acceleration, KinematicState};

/// Margin added to brake durations so the main profile starts strictly inside the limits.
const BRAKE_EPS: f64 = 2.2e-14;

/// Velocity after applying jerk `j` for `t` starting from `(v0, a0)`.
#[inline]
fn velocity_at(v0: f64, a0: f64, j: f64, t: f64) -> f64 {
    v0 + t * (a0 + j * t / 2.0)
}

/// Up to two constant-jerk segments preceding the main profile.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BrakeProfile {
    /// Total duration; zero when no braking is needed.
    pub duration: f64,
    /// Segment durations.
    pub t: [f64; 2],
    /// Segment jerks.
    pub j: [f64; 2],
    /// Acceleration at the start of each segment.
    pub a: [f64; 2],
    /// Velocity at the start of each segment.
    pub v: [f64; 2],
    /// Position at the start of each segment.
    pub p: [f64; 2],
}

impl BrakeProfile {
    fn clear(&mut self) {
        *self = Self::default();
    }

    /// Bring an acceleration above `a_max` back into range.
    ///
    /// Called with reversed limits for `a0 < aMin`.
    fn acceleration_brake(&mut self, v0: f64, a0: f64, lim: &Limits) {
        let Limits { v_max, v_min, a_max, j_max, .. } = *lim;
        self.j[0] = -j_max;

        let t_to_a_max = (a0 - a_max) / j_max;
        let t_to_a_zero = a0 / j_max;

        let v_at_a_max = velocity_at(v0, a0, -j_max, t_to_a_max);
        let v_at_a_zero = velocity_at(v0, a0, -j_max, t_to_a_zero);

        if (v_at_a_zero > v_max && j_max > 0.0) || (v_at_a_zero < v_max && j_max < 0.0) {
            self.velocity_brake(v0, a0, lim);
        } else if (v_at_a_max < v_min && j_max > 0.0) || (v_at_a_max > v_min && j_max < 0.0) {
            let t_to_v_min = -(v_at_a_max - v_min) / a_max;
            let t_to_v_max = -a_max / (2.0 * j_max) - (v_at_a_max - v_max) / a_max;

            self.t[0] = t_to_a_max + BRAKE_EPS;
            self.t[1] = t_to_v_min.min(t_to_v_max - BRAKE_EPS).max(0.0);
        } else {
            self.t[0] = t_to_a_max + BRAKE_EPS;
        }
    }

    /// Bring a velocity above `v_max` back into range.
    ///
    /// Called with reversed limits for `v0 < vMin`.
    fn velocity_brake(&mut self, v0: f64, a0: f64, lim: &Limits) {
        let Limits { v_max, v_min, a_min, j_max, .. } = *lim;
        self.j[0] = -j_max;

        let t_to_a_min = (a0 - a_min) / j_max;
        let t_to_v_max = a0 / j_max + sqrt(a0 * a0 + 2.0 * j_max * (v0 - v_max)) / fabs(j_max);
        let t_to_v_min = a0 / j_max + sqrt(a0 * a0 / 2.0 + j_max * (v0 - v_min)) / fabs(j_max);
        let t_min_to_v_max = t_to_v_max.min(t_to_v_min);

        if t_to_a_min < t_min_to_v_max {
            let v_at_a_min = velocity_at(v0, a0, -j_max, t_to_a_min);
            let t_to_v_max_with_constant = -(v_at_a_min - v_max) / a_min;
            let t_to_v_min_with_constant = a_min / (2.0 * j_max) - (v_at_a_min - v_min) / a_min;

            self.t[0] = (t_to_a_min - BRAKE_EPS).max(0.0);
            self.t[1] = t_to_v_max_with_constant.min(t_to_v_min_with_constant).max(0.0);
        } else {
            self.t[0] = (t_min_to_v_max - BRAKE_EPS).max(0.0);
        }
    }

    /// Compute the brake of a third-order position-interface profile.
    ///
    /// Zero jerk or acceleration limits disable braking.
    pub fn position_brake(&mut self, v0: f64, a0: f64, lim: &Limits) {
        self.clear();
        let Limits { v_max, v_min, a_max, a_min, j_max } = *lim;
        if j_max == 0.0 || a_max == 0.0 || a_min == 0.0 {
            return;
        }

        if a0 > a_max {
            self.acceleration_brake(v0, a0, lim);
        } else if a0 < a_min {
            self.acceleration_brake(v0, a0, &lim.reversed());
        } else if (v0 > v_max && velocity_at_zero_acceleration(v0, a0, -j_max) > v_min)
            || (a0 > 0.0 && velocity_at_zero_acceleration(v0, a0, j_max) > v_max)
        {
            self.velocity_brake(v0, a0, lim);
        } else if (v0 < v_min && velocity_at_zero_acceleration(v0, a0, j_max) < v_max)
            || (a0 < 0.0 && velocity_at_zero_acceleration(v0, a0, -j_max) < v_min)
        {
            self.velocity_brake(v0, a0, &lim.reversed());
        }

        if self.t[0] > 0.0 || self.t[1] > 0.0 {
            debug!("position brake: {} s + {} s", self.t[0], self.t[1]);
        }
    }

    /// Compute the brake of a second-order position-interface profile.
    pub fn second_order_position_brake(&mut self, v0: f64, lim: &Limits) {
        self.clear();
        let Limits { v_max, v_min, a_max, a_min, .. } = *lim;
        if a_max == 0.0 || a_min == 0.0 {
            return;
        }

        if v0 > v_max {
            self.a[0] = a_min;
            self.t[0] = (v_max - v0) / a_min + BRAKE_EPS;
        } else if v0 < v_min {
            self.a[0] = a_max;
            self.t[0] = (v_min - v0) / a_max + BRAKE_EPS;
        }
    }

    /// Compute the brake of a third-order velocity-interface profile.
    pub fn velocity_interface_brake(&mut self, a0: f64, lim: &Limits) {
        self.clear();
        let Limits { a_max, a_min, j_max, .. } = *lim;
        if j_max == 0.0 {
            return;
        }

        if a0 > a_max {
            self.j[0] = -j_max;
            self.t[0] = (a0 - a_max) / j_max + BRAKE_EPS;
        } else if a0 < a_min {
            self.j[0] = j_max;
            self.t[0] = -(a0 - a_min) / j_max + BRAKE_EPS;
        }
    }

    /// Second-order velocity-interface profiles never brake.
    pub fn second_order_velocity_interface_brake(&mut self) {
        self.clear();
    }

    /// Integrate the brake segments from `state` and advance it to their end.
    pub fn finalize(&mut self, state: &mut KinematicState) {
        if self.t[0] <= 0.0 && self.t[1] <= 0.0 {
            self.duration = 0.0;
            return;
        }

        self.duration = self.t[0];
        self.p[0] = state.position;
        self.v[0] = state.velocity;
        self.a[0] = state.acceleration;
        *state = state.integrate(self.t[0], self.j[0]);

        if self.t[1] > 0.0 {
            self.duration += self.t[1];
            self.p[1] = state.position;
            self.v[1] = state.velocity;
            self.a[1] = state.acceleration;
            *state = state.integrate(self.t[1], self.j[1]);
        }
    }

    /// Integrate a second-order brake (constant acceleration `a[0]`) from `state`.
    pub fn finalize_second_order(&mut self, state: &mut KinematicState) {
        if self.t[0] <= 0.0 {
            self.duration = 0.0;
            return;
        }

        self.duration = self.t[0];
        self.p[0] = state.position;
        self.v[0] = state.velocity;
        let (p, v, a) = integrate(self.t[0], state.position, state.velocity, self.a[0], 0.0);
        *state = KinematicState::new(p, v, a);
    }
}
