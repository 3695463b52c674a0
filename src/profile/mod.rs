//! Jerk-limited motion profiles.
//!
//! A [`Profile`] describes the motion of one degree of freedom as seven
//! constant-jerk phases, optionally preceded by [`BrakeProfile`] segments that
//! bring an out-of-limits initial state back into range. A candidate profile
//! proposed by a step-time solver is materialised and certified by the
//! `check*` family; accepted profiles answer extremum and timing queries.

mod brake;
mod check;
mod extrema;

use core::fmt;

use heapless::Vec;

use crate::motion::{integrate, KinematicState};

pub use brake::BrakeProfile;
pub use extrema::Bound;

/// Velocity tolerance for limit and sign comparisons.
pub const V_EPS: f64 = 1e-12;
/// Acceleration tolerance for limit and sign comparisons.
pub const A_EPS: f64 = 1e-12;
/// Jerk tolerance for limit comparisons.
pub const J_EPS: f64 = 1e-12;
/// Required final position accuracy.
pub const P_PRECISION: f64 = 1e-8;
/// Required final velocity accuracy.
pub const V_PRECISION: f64 = 1e-8;
/// Required final acceleration accuracy.
pub const A_PRECISION: f64 = 1e-10;
/// Required accuracy of a profile's total duration (relative for long profiles).
pub const T_PRECISION: f64 = 1e-12;
/// Longest profile duration accepted by any check.
pub const T_MAX: f64 = 1e12;

/// Which constraints are saturated along a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReachedLimits {
    /// Both acceleration plateaus and the velocity plateau.
    Acc0Acc1Vel,
    /// Only the velocity plateau.
    Vel,
    /// Only the first acceleration plateau.
    Acc0,
    /// Only the second acceleration plateau.
    Acc1,
    /// Both acceleration plateaus.
    Acc0Acc1,
    /// First acceleration plateau and velocity plateau.
    Acc0Vel,
    /// Second acceleration plateau and velocity plateau.
    Acc1Vel,
    /// No limit reached.
    #[default]
    None,
}

impl ReachedLimits {
    /// Whether phase 3 is a constant-velocity coast.
    #[inline]
    pub fn has_velocity_plateau(self) -> bool {
        matches!(
            self,
            ReachedLimits::Acc0Acc1Vel
                | ReachedLimits::Acc0Vel
                | ReachedLimits::Acc1Vel
                | ReachedLimits::Vel
        )
    }

    /// Whether phase 1 holds the acceleration at its limit.
    #[inline]
    pub fn has_acc0_plateau(self) -> bool {
        matches!(self, ReachedLimits::Acc0 | ReachedLimits::Acc0Acc1)
    }

    /// Whether phase 5 holds the acceleration at its limit.
    #[inline]
    pub fn has_acc1_plateau(self) -> bool {
        matches!(self, ReachedLimits::Acc1 | ReachedLimits::Acc0Acc1)
    }
}

/// Whether a profile moves towards increasing or decreasing positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Limits are used as given.
    #[default]
    Up,
    /// Limits are mirrored (`vMax` and `vMin` swapped, negative jerk).
    Down,
}

/// Jerk sign pattern of the two acceleration ramps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControlSigns {
    /// Up, down, down, up: jerk signs `(+, 0, -, 0, -, 0, +)`.
    #[default]
    Uddu,
    /// Up, down, up, down: jerk signs `(+, 0, -, 0, +, 0, -)`.
    Udud,
}

impl ControlSigns {
    /// Sign of each phase's jerk (or acceleration for second-order profiles).
    #[inline]
    pub fn pattern(self) -> [f64; 7] {
        match self {
            ControlSigns::Uddu => [1.0, 0.0, -1.0, 0.0, -1.0, 0.0, 1.0],
            ControlSigns::Udud => [1.0, 0.0, -1.0, 0.0, 1.0, 0.0, -1.0],
        }
    }
}

/// Kinematic limits of one degree of freedom, already oriented by direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Limits {
    /// Maximum velocity.
    pub v_max: f64,
    /// Minimum velocity.
    pub v_min: f64,
    /// Maximum acceleration.
    pub a_max: f64,
    /// Minimum acceleration.
    pub a_min: f64,
    /// Maximum jerk.
    pub j_max: f64,
}

impl Limits {
    /// Create limits from explicit values.
    pub const fn new(v_max: f64, v_min: f64, a_max: f64, a_min: f64, j_max: f64) -> Self {
        Self {
            v_max,
            v_min,
            a_max,
            a_min,
            j_max,
        }
    }

    /// Symmetric limits (`min = -max`).
    pub const fn symmetric(v_max: f64, a_max: f64, j_max: f64) -> Self {
        Self::new(v_max, -v_max, a_max, -a_max, j_max)
    }

    /// Limits mirrored for a profile in the [`Direction::Down`] direction.
    pub fn reversed(&self) -> Self {
        Self::new(self.v_min, self.v_max, self.a_min, self.a_max, -self.j_max)
    }
}

/// A constant-jerk piece of a profile, located on the profile's time axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Segment {
    /// Start time on the profile's time axis.
    pub start: f64,
    /// Duration of the segment.
    pub duration: f64,
    /// State at the start of the segment.
    pub state: KinematicState,
    /// Constant jerk within the segment.
    pub jerk: f64,
}

/// Seven-phase profile of one degree of freedom.
///
/// Arrays `a`, `v`, `p` hold the state at the start of each phase plus the
/// final state; they are only meaningful after a `check*` call accepted the
/// profile. A rejected check leaves them in whatever state the rejection
/// happened, and `limits`/`control_signs`/`direction` keep their previous
/// values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Profile {
    /// Phase durations.
    pub t: [f64; 7],
    /// Running sum of the phase durations.
    pub t_sum: [f64; 7],
    /// Jerk of each phase.
    pub j: [f64; 7],
    /// Acceleration at each phase boundary.
    pub a: [f64; 8],
    /// Velocity at each phase boundary.
    pub v: [f64; 8],
    /// Position at each phase boundary.
    pub p: [f64; 8],

    /// Braking segment applied before the main phases.
    pub brake: BrakeProfile,
    /// Accelerating segment applied after the brake and before the main phases.
    pub accel: BrakeProfile,

    /// Target position.
    pub pf: f64,
    /// Target velocity.
    pub vf: f64,
    /// Target acceleration.
    pub af: f64,

    /// Saturated limits of the accepted candidate.
    pub limits: ReachedLimits,
    /// Direction of the accepted candidate.
    pub direction: Direction,
    /// Jerk sign pattern of the accepted candidate.
    pub control_signs: ControlSigns,
}

impl Profile {
    /// Create an empty profile starting and ending at rest at the origin.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed initial and target states for a position-interface candidate.
    pub fn set_boundary(&mut self, initial: KinematicState, target: KinematicState) {
        self.p[0] = initial.position;
        self.v[0] = initial.velocity;
        self.a[0] = initial.acceleration;
        self.pf = target.position;
        self.vf = target.velocity;
        self.af = target.acceleration;
    }

    /// Seed initial and target states for a velocity-interface candidate.
    ///
    /// The target position is left untouched; velocity checks ignore it.
    pub fn set_boundary_for_velocity(
        &mut self,
        initial: KinematicState,
        target_velocity: f64,
        target_acceleration: f64,
    ) {
        self.p[0] = initial.position;
        self.v[0] = initial.velocity;
        self.a[0] = initial.acceleration;
        self.vf = target_velocity;
        self.af = target_acceleration;
    }

    /// Copy the boundary states of another profile.
    pub fn set_boundary_from(&mut self, other: &Profile) {
        self.p[0] = other.p[0];
        self.v[0] = other.v[0];
        self.a[0] = other.a[0];
        self.pf = other.pf;
        self.vf = other.vf;
        self.af = other.af;
    }

    /// Initial state of the main phases.
    #[inline]
    pub fn initial_state(&self) -> KinematicState {
        KinematicState::new(self.p[0], self.v[0], self.a[0])
    }

    /// Final state reached by the main phases.
    #[inline]
    pub fn final_state(&self) -> KinematicState {
        KinematicState::new(self.p[7], self.v[7], self.a[7])
    }

    /// Duration of the prefix sub-profiles.
    #[inline]
    pub fn prefix_duration(&self) -> f64 {
        self.brake.duration + self.accel.duration
    }

    /// Total duration including prefix sub-profiles.
    #[inline]
    pub fn duration(&self) -> f64 {
        self.prefix_duration() + self.t_sum[6]
    }

    /// Constant-jerk segments in time order: brake, accel, then the seven phases.
    pub(crate) fn segments(&self) -> Vec<Segment, 11> {
        let mut segments = Vec::new();
        let mut start = 0.0;

        for sub in [&self.brake, &self.accel] {
            if sub.duration <= 0.0 {
                continue;
            }
            for k in 0..2 {
                if sub.t[k] > 0.0 {
                    let _ = segments.push(Segment {
                        start,
                        duration: sub.t[k],
                        state: KinematicState::new(sub.p[k], sub.v[k], sub.a[k]),
                        jerk: sub.j[k],
                    });
                    start += sub.t[k];
                }
            }
        }

        for i in 0..7 {
            let _ = segments.push(Segment {
                start,
                duration: self.t[i],
                state: KinematicState::new(self.p[i], self.v[i], self.a[i]),
                jerk: self.j[i],
            });
            start += self.t[i];
        }

        segments
    }

    /// State and jerk at `time` since the start of the profile.
    ///
    /// Beyond the end, the final state is extrapolated with zero jerk.
    pub fn state_at(&self, time: f64) -> (KinematicState, f64) {
        for segment in self.segments().iter() {
            if time < segment.start + segment.duration {
                let dt = (time - segment.start).max(0.0);
                return (segment.state.integrate(dt, segment.jerk), segment.jerk);
            }
        }

        let dt = time - self.duration();
        let (p, v, a) = integrate(dt.max(0.0), self.p[7], self.v[7], self.a[7], 0.0);
        (KinematicState::new(p, v, a), 0.0)
    }
}

impl fmt::Display for ReachedLimits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReachedLimits::Acc0Acc1Vel => "ACC0_ACC1_VEL",
            ReachedLimits::Vel => "VEL",
            ReachedLimits::Acc0 => "ACC0",
            ReachedLimits::Acc1 => "ACC1",
            ReachedLimits::Acc0Acc1 => "ACC0_ACC1",
            ReachedLimits::Acc0Vel => "ACC0_VEL",
            ReachedLimits::Acc1Vel => "ACC1_VEL",
            ReachedLimits::None => "NONE",
        };
        f.write_str(name)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => f.write_str("UP"),
            Direction::Down => f.write_str("DOWN"),
        }
    }
}

impl fmt::Display for ControlSigns {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControlSigns::Uddu => f.write_str("UDDU"),
            ControlSigns::Udud => f.write_str("UDUD"),
        }
    }
}

/// Diagnostic label such as `UP_ACC0_ACC1_VEL_UDDU`.
impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}_{}", self.direction, self.limits, self.control_signs)
    }
}
