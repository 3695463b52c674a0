//! Candidate verification.
//!
//! Every `check*` method materialises the state trajectory of the phase
//! durations in `t` by exact integration and accepts the candidate only if it
//! reproduces the target state and respects the limits. All variants reject
//! negative durations before integrating anything.

use libm::fabs;

use crate::motion::integrate;

use super::{
    ControlSigns, Direction, Limits, Profile, ReachedLimits, A_EPS, A_PRECISION, J_EPS,
    P_PRECISION, T_MAX, T_PRECISION, V_EPS, V_PRECISION,
};

/// Bounds `[low, upp]` oriented by direction and widened by `eps`.
#[inline]
fn oriented_bounds(direction: Direction, max: f64, min: f64, eps: f64) -> (f64, f64) {
    match direction {
        Direction::Up => (min - eps, max + eps),
        Direction::Down => (max - eps, min + eps),
    }
}

#[inline]
fn direction_of(value: f64) -> Direction {
    if value > 0.0 {
        Direction::Up
    } else {
        Direction::Down
    }
}

impl Profile {
    /// Reject negative durations, fill `t_sum` and reject overly long profiles.
    fn accumulate_durations(&mut self) -> bool {
        if self.t[0] < 0.0 {
            trace!("candidate rejected: negative duration");
            return false;
        }
        self.t_sum[0] = self.t[0];
        for i in 0..6 {
            if self.t[i + 1] < 0.0 {
                trace!("candidate rejected: negative duration");
                return false;
            }
            self.t_sum[i + 1] = self.t_sum[i] + self.t[i + 1];
        }

        if self.t_sum[6] > T_MAX {
            trace!("candidate rejected: duration above limit");
            return false;
        }
        true
    }

    /// Whether the total duration matches `tf`.
    #[inline]
    fn matches_duration(&self, tf: f64) -> bool {
        fabs(self.t_sum[6] - tf) <= T_PRECISION * tf.max(1.0)
    }

    /// Fill the jerk of each phase from the sign pattern; idle phases get none.
    fn apply_jerk_pattern(&mut self, control_signs: ControlSigns, jf: f64) {
        let signs = control_signs.pattern();
        for i in 0..7 {
            self.j[i] = if self.t[i] > 0.0 { signs[i] * jf } else { 0.0 };
        }
    }

    fn accept(&mut self, control_signs: ControlSigns, limits: ReachedLimits, direction: Direction) {
        self.control_signs = control_signs;
        self.limits = limits;
        self.direction = direction;
    }

    /// Verify a third-order position candidate.
    ///
    /// `limits` must already be oriented: for a downward profile pass
    /// [`Limits::reversed`] and a negative `jf`.
    pub fn check(
        &mut self,
        control_signs: ControlSigns,
        limits: ReachedLimits,
        jf: f64,
        lim: &Limits,
    ) -> bool {
        self.check_position(control_signs, limits, false, jf, lim)
    }

    /// Like [`Profile::check`], but pins acceleration plateaus to the exact limits.
    pub fn check_with_set_limits(
        &mut self,
        control_signs: ControlSigns,
        limits: ReachedLimits,
        jf: f64,
        lim: &Limits,
    ) -> bool {
        self.check_position(control_signs, limits, true, jf, lim)
    }

    fn check_position(
        &mut self,
        control_signs: ControlSigns,
        limits: ReachedLimits,
        set_limits: bool,
        jf: f64,
        lim: &Limits,
    ) -> bool {
        if !self.accumulate_durations() {
            return false;
        }

        if limits.has_velocity_plateau() && self.t[3] < f64::EPSILON {
            return false;
        }
        if limits.has_acc0_plateau() && self.t[1] < f64::EPSILON {
            return false;
        }
        if limits.has_acc1_plateau() && self.t[5] < f64::EPSILON {
            return false;
        }

        self.apply_jerk_pattern(control_signs, jf);

        let direction = direction_of(lim.v_max);
        let (v_low, v_upp) = oriented_bounds(direction, lim.v_max, lim.v_min, V_EPS);

        for i in 0..7 {
            (self.p[i + 1], self.v[i + 1], self.a[i + 1]) =
                integrate(self.t[i], self.p[i], self.v[i], self.a[i], self.j[i]);

            if limits.has_velocity_plateau() && i == 2 {
                self.a[3] = 0.0;
            }

            if set_limits {
                match (limits, i) {
                    (ReachedLimits::Acc0 | ReachedLimits::Acc0Acc1, 0) => self.a[1] = lim.a_max,
                    (ReachedLimits::Acc1, 2) => self.a[3] = lim.a_min,
                    (ReachedLimits::Acc0Acc1, 4) => self.a[5] = lim.a_min,
                    _ => {}
                }
            }

            // The initial phases may start outside the velocity limits (brake).
            if i > 1 && self.a[i + 1] * self.a[i] < -f64::EPSILON {
                let v_a_zero = self.v[i] - (self.a[i] * self.a[i]) / (2.0 * self.j[i]);
                if v_a_zero > v_upp || v_a_zero < v_low {
                    trace!("candidate rejected: velocity limit crossed within phase");
                    return false;
                }
            }
        }

        let (a_low, a_upp) = oriented_bounds(direction, lim.a_max, lim.a_min, A_EPS);

        let boundary_ok = fabs(self.p[7] - self.pf) < P_PRECISION
            && fabs(self.v[7] - self.vf) < V_PRECISION
            && fabs(self.a[7] - self.af) < A_PRECISION;
        let acceleration_ok = [self.a[1], self.a[3], self.a[5]]
            .iter()
            .all(|&a| a >= a_low && a <= a_upp);
        let velocity_ok = self.v[3..7].iter().all(|&v| v >= v_low && v <= v_upp);

        if boundary_ok && acceleration_ok && velocity_ok {
            self.accept(control_signs, limits, direction);
            true
        } else {
            false
        }
    }

    /// Verify a third-order position candidate that must last `tf`.
    pub fn check_with_timing(
        &mut self,
        tf: f64,
        control_signs: ControlSigns,
        limits: ReachedLimits,
        jf: f64,
        lim: &Limits,
    ) -> bool {
        self.check(control_signs, limits, jf, lim) && self.matches_duration(tf)
    }

    /// Like [`Profile::check_with_timing`], but also requires `|jf| ≤ |jMax|`.
    pub fn check_with_timing_and_jerk(
        &mut self,
        tf: f64,
        control_signs: ControlSigns,
        limits: ReachedLimits,
        jf: f64,
        lim: &Limits,
    ) -> bool {
        fabs(jf) < fabs(lim.j_max) + J_EPS
            && self.check_with_timing(tf, control_signs, limits, jf, lim)
    }

    /// Verify a third-order velocity-interface candidate.
    ///
    /// Only the final velocity and acceleration are matched; the position is
    /// integrated but not constrained.
    pub fn check_for_velocity(
        &mut self,
        control_signs: ControlSigns,
        limits: ReachedLimits,
        jf: f64,
        lim: &Limits,
    ) -> bool {
        if !self.accumulate_durations() {
            return false;
        }

        if limits == ReachedLimits::Acc0 && self.t[1] < f64::EPSILON {
            return false;
        }

        self.apply_jerk_pattern(control_signs, jf);

        for i in 0..7 {
            (self.p[i + 1], self.v[i + 1], self.a[i + 1]) =
                integrate(self.t[i], self.p[i], self.v[i], self.a[i], self.j[i]);
        }

        let direction = direction_of(lim.a_max);
        let (a_low, a_upp) = oriented_bounds(direction, lim.a_max, lim.a_min, A_EPS);

        let boundary_ok =
            fabs(self.v[7] - self.vf) < V_PRECISION && fabs(self.a[7] - self.af) < A_PRECISION;
        let acceleration_ok = [self.a[1], self.a[3], self.a[5]]
            .iter()
            .all(|&a| a >= a_low && a <= a_upp);

        if boundary_ok && acceleration_ok {
            self.accept(control_signs, limits, direction);
            true
        } else {
            false
        }
    }

    /// Verify a third-order velocity-interface candidate that must last `tf`.
    pub fn check_for_velocity_with_timing(
        &mut self,
        tf: f64,
        control_signs: ControlSigns,
        limits: ReachedLimits,
        jf: f64,
        lim: &Limits,
    ) -> bool {
        self.check_for_velocity(control_signs, limits, jf, lim) && self.matches_duration(tf)
    }

    /// Like [`Profile::check_for_velocity_with_timing`], but also requires `|jf| ≤ |jMax|`.
    pub fn check_for_velocity_with_timing_and_jerk(
        &mut self,
        tf: f64,
        control_signs: ControlSigns,
        limits: ReachedLimits,
        jf: f64,
        lim: &Limits,
    ) -> bool {
        fabs(jf) < fabs(lim.j_max) + J_EPS
            && self.check_for_velocity_with_timing(tf, control_signs, limits, jf, lim)
    }

    /// Verify a second-order (acceleration-limited) position candidate.
    ///
    /// Jerk is zero everywhere; each phase holds a constant acceleration of
    /// `a_up` or `a_down` following the sign pattern.
    pub fn check_for_second_order(
        &mut self,
        control_signs: ControlSigns,
        limits: ReachedLimits,
        a_up: f64,
        a_down: f64,
        lim: &Limits,
    ) -> bool {
        if !self.accumulate_durations() {
            return false;
        }

        self.j = [0.0; 7];
        let signs = control_signs.pattern();
        for i in 0..7 {
            self.a[i] = if self.t[i] > 0.0 {
                if signs[i] > 0.0 {
                    a_up
                } else if signs[i] < 0.0 {
                    a_down
                } else {
                    0.0
                }
            } else {
                0.0
            };
        }
        self.a[7] = self.af;

        let direction = direction_of(lim.v_max);
        let (v_low, v_upp) = oriented_bounds(direction, lim.v_max, lim.v_min, V_EPS);

        for i in 0..7 {
            let t = self.t[i];
            self.v[i + 1] = self.v[i] + t * self.a[i];
            self.p[i + 1] = self.p[i] + t * (self.v[i] + t * self.a[i] / 2.0);
        }

        let boundary_ok =
            fabs(self.p[7] - self.pf) < P_PRECISION && fabs(self.v[7] - self.vf) < V_PRECISION;
        let velocity_ok = self.v[2..7].iter().all(|&v| v >= v_low && v <= v_upp);

        if boundary_ok && velocity_ok {
            self.accept(control_signs, limits, direction);
            true
        } else {
            false
        }
    }

    /// Verify a second-order position candidate that must last `tf`.
    pub fn check_for_second_order_with_timing(
        &mut self,
        tf: f64,
        control_signs: ControlSigns,
        limits: ReachedLimits,
        a_up: f64,
        a_down: f64,
        lim: &Limits,
    ) -> bool {
        self.check_for_second_order(control_signs, limits, a_up, a_down, lim)
            && self.matches_duration(tf)
    }

    /// Like [`Profile::check_for_second_order_with_timing`], but also requires
    /// both accelerations to lie within `[aMin, aMax]`.
    pub fn check_for_second_order_with_timing_and_acceleration(
        &mut self,
        tf: f64,
        control_signs: ControlSigns,
        limits: ReachedLimits,
        a_up: f64,
        a_down: f64,
        lim: &Limits,
    ) -> bool {
        lim.a_min - A_EPS < a_up
            && a_up < lim.a_max + A_EPS
            && lim.a_min - A_EPS < a_down
            && a_down < lim.a_max + A_EPS
            && self.check_for_second_order_with_timing(tf, control_signs, limits, a_up, a_down, lim)
    }

    /// Verify a second-order velocity-interface candidate.
    ///
    /// Phase 1 holds the constant acceleration `a_up`; only the final
    /// velocity is matched.
    pub fn check_for_second_order_velocity(
        &mut self,
        control_signs: ControlSigns,
        limits: ReachedLimits,
        a_up: f64,
    ) -> bool {
        if !self.accumulate_durations() {
            return false;
        }

        self.j = [0.0; 7];
        self.a = [0.0; 8];
        if self.t[1] > 0.0 {
            self.a[1] = a_up;
        }
        self.a[7] = self.af;

        for i in 0..7 {
            let t = self.t[i];
            self.v[i + 1] = self.v[i] + t * self.a[i];
            self.p[i + 1] = self.p[i] + t * (self.v[i] + t * self.a[i] / 2.0);
        }

        if fabs(self.v[7] - self.vf) < V_PRECISION {
            self.accept(control_signs, limits, direction_of(a_up));
            true
        } else {
            false
        }
    }

    /// Verify a second-order velocity-interface candidate that must last `tf`.
    pub fn check_for_second_order_velocity_with_timing(
        &mut self,
        tf: f64,
        control_signs: ControlSigns,
        limits: ReachedLimits,
        a_up: f64,
    ) -> bool {
        self.check_for_second_order_velocity(control_signs, limits, a_up)
            && self.matches_duration(tf)
    }

    /// Like [`Profile::check_for_second_order_velocity_with_timing`], but also
    /// requires `a_up` to lie within `[aMin, aMax]`.
    pub fn check_for_second_order_velocity_with_timing_and_acceleration(
        &mut self,
        tf: f64,
        control_signs: ControlSigns,
        limits: ReachedLimits,
        a_up: f64,
        lim: &Limits,
    ) -> bool {
        lim.a_min - A_EPS < a_up
            && a_up < lim.a_max + A_EPS
            && self.check_for_second_order_velocity_with_timing(tf, control_signs, limits, a_up)
    }

    /// Verify a first-order (velocity-limited) position candidate.
    ///
    /// Phase 3 moves at the constant velocity `v_up`; only the final position
    /// is matched.
    pub fn check_for_first_order(
        &mut self,
        control_signs: ControlSigns,
        limits: ReachedLimits,
        v_up: f64,
    ) -> bool {
        if !self.accumulate_durations() {
            return false;
        }

        self.j = [0.0; 7];
        self.a = [0.0; 8];
        self.v = [0.0; 8];
        if self.t[3] > 0.0 {
            self.v[3] = v_up;
        }
        self.v[7] = self.vf;

        for i in 0..7 {
            let t = self.t[i];
            self.p[i + 1] = self.p[i] + t * self.v[i];
        }

        if fabs(self.p[7] - self.pf) < P_PRECISION {
            self.accept(control_signs, limits, direction_of(v_up));
            true
        } else {
            false
        }
    }

    /// Verify a first-order position candidate that must last `tf`.
    pub fn check_for_first_order_with_timing(
        &mut self,
        tf: f64,
        control_signs: ControlSigns,
        limits: ReachedLimits,
        v_up: f64,
    ) -> bool {
        self.check_for_first_order(control_signs, limits, v_up) && self.matches_duration(tf)
    }

    /// Like [`Profile::check_for_first_order_with_timing`], but also requires
    /// `v_up` to lie within `[vMin, vMax]`.
    pub fn check_for_first_order_with_timing_and_velocity(
        &mut self,
        tf: f64,
        control_signs: ControlSigns,
        limits: ReachedLimits,
        v_up: f64,
        lim: &Limits,
    ) -> bool {
        lim.v_min - V_EPS < v_up
            && v_up < lim.v_max + V_EPS
            && self.check_for_first_order_with_timing(tf, control_signs, limits, v_up)
    }
}
