//! Kinematic state and constant-jerk integration.

/// Position, velocity and acceleration of one degree of freedom.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct KinematicState {
    /// Position.
    pub position: f64,
    /// Velocity.
    pub velocity: f64,
    /// Acceleration.
    pub acceleration: f64,
}

impl KinematicState {
    /// Create a new state.
    #[inline]
    pub const fn new(position: f64, velocity: f64, acceleration: f64) -> Self {
        Self {
            position,
            velocity,
            acceleration,
        }
    }

    /// State reached after applying constant `jerk` for duration `t`.
    #[inline]
    pub fn integrate(self, t: f64, jerk: f64) -> Self {
        let (position, velocity, acceleration) =
            integrate(t, self.position, self.velocity, self.acceleration, jerk);
        Self {
            position,
            velocity,
            acceleration,
        }
    }
}

/// Exact constant-jerk integration over `t`.
///
/// Returns `(p, v, a)` at time `t` starting from `(p0, v0, a0)`.
#[inline]
pub fn integrate(t: f64, p0: f64, v0: f64, a0: f64, j: f64) -> (f64, f64, f64) {
    (
        p0 + t * (v0 + t * (a0 / 2.0 + t * j / 6.0)),
        v0 + t * (a0 + t * j / 2.0),
        a0 + t * j,
    )
}

/// Velocity at the instant the acceleration reaches zero.
///
/// The acceleration is ramped towards zero with jerk `-j`, so `j` carries the
/// sign of `a0` (pass `jMax` for a positive `a0`, `-jMax` for a negative one).
#[inline]
pub fn velocity_at_zero_acceleration(v0: f64, a0: f64, j: f64) -> f64 {
    v0 + (a0 * a0) / (2.0 * j)
}
