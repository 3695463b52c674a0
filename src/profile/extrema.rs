//! Position extrema and time-at-position queries on accepted profiles.

use libm::{fabs, sqrt};

use super::{Profile, Segment};
use crate::motion::integrate;
use crate::roots::solve_cubic;

/// Tolerance on the final position when it is used as the fallback answer.
const FINAL_POSITION_EPS: f64 = 1e-9;

/// Position range covered by a profile and the times the extremes occur.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bound {
    /// Lowest position.
    pub min: f64,
    /// Highest position.
    pub max: f64,
    /// Time at which `min` is reached.
    pub t_min: f64,
    /// Time at which `max` is reached.
    pub t_max: f64,
}

impl Default for Bound {
    fn default() -> Self {
        Self {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
            t_min: 0.0,
            t_max: 0.0,
        }
    }
}

impl Bound {
    /// Whether `position` lies within `[min, max]`.
    #[inline]
    pub fn contains(&self, position: f64) -> bool {
        position >= self.min && position <= self.max
    }

    fn include(&mut self, position: f64, time: f64) {
        if position < self.min {
            self.min = position;
            self.t_min = time;
        }
        if position > self.max {
            self.max = position;
            self.t_max = time;
        }
    }

    /// Consider the interior stationary point at `t_ext` within `segment`.
    fn include_stationary(&mut self, t_ext: f64, segment: &Segment) {
        if 0.0 < t_ext && t_ext < segment.duration {
            let s = segment.state;
            let (p_ext, _, a_ext) =
                integrate(t_ext, s.position, s.velocity, s.acceleration, segment.jerk);
            if a_ext > 0.0 && p_ext < self.min {
                self.min = p_ext;
                self.t_min = segment.start + t_ext;
            } else if a_ext < 0.0 && p_ext > self.max {
                self.max = p_ext;
                self.t_max = segment.start + t_ext;
            }
        }
    }

    /// Fold a segment's start position and its interior extrema (`v(t) = 0`) in.
    fn include_segment(&mut self, segment: &Segment) {
        let s = segment.state;
        let (v, a, j) = (s.velocity, s.acceleration, segment.jerk);
        self.include(s.position, segment.start);

        if j != 0.0 {
            let d = a * a - 2.0 * j * v;
            if fabs(d) < f64::EPSILON {
                self.include_stationary(-a / j, segment);
            } else if d > 0.0 {
                let d_sqrt = sqrt(d);
                self.include_stationary((-a - d_sqrt) / j, segment);
                self.include_stationary((-a + d_sqrt) / j, segment);
            }
        } else if a != 0.0 {
            self.include_stationary(-v / a, segment);
        }
    }
}

impl Profile {
    /// Lowest and highest position along the profile, including prefix segments.
    pub fn get_position_extrema(&self) -> Bound {
        let mut extrema = Bound::default();
        for segment in self.segments().iter() {
            extrema.include_segment(segment);
        }
        extrema.include(self.pf, self.duration());
        extrema
    }

    /// First time at or after `time_after` at which the profile reaches `pt`.
    ///
    /// Times are measured from the start of the profile, prefix segments
    /// included. Returns `None` if the position is never reached.
    pub fn get_first_state_at_position(&self, pt: f64, time_after: f64) -> Option<f64> {
        for segment in self.segments().iter() {
            if segment.duration <= 0.0 {
                continue;
            }

            let s = segment.state;
            if fabs(s.position - pt) < f64::EPSILON && segment.start >= time_after {
                return Some(segment.start);
            }

            let roots = solve_cubic(
                segment.jerk / 6.0,
                s.acceleration / 2.0,
                s.velocity,
                s.position - pt,
            );
            let mut first: Option<f64> = None;
            for &t in roots.iter() {
                if 0.0 < t && time_after - segment.start <= t && t <= segment.duration {
                    first = Some(first.map_or(t, |f| f.min(t)));
                }
            }
            if let Some(t) = first {
                return Some(segment.start + t);
            }
        }

        let end = self.duration();
        if fabs(self.pf - pt) < FINAL_POSITION_EPS && end >= time_after {
            return Some(end);
        }
        None
    }
}
