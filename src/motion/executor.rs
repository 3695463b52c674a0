//! Control-cycle sampling of accepted profiles.

use libm::ceil;

use super::KinematicState;
use crate::profile::{Bound, Profile};

/// Runtime state while sampling one accepted profile per DoF.
///
/// Each call to [`Iterator::next`] advances the clock by one control period
/// and yields the state of every DoF at that instant. The last sample is taken
/// exactly at the end of the longest profile; shorter profiles hold their
/// final velocity from then on.
#[derive(Debug, Clone)]
pub struct TrajectoryExecutor<const DOFS: usize> {
    /// Accepted profiles being sampled.
    profiles: [Profile; DOFS],

    /// Control period in seconds.
    control_period: f64,

    /// Duration of the longest profile.
    duration: f64,

    /// Number of control cycles already sampled.
    current_cycle: u32,

    /// Whether the final sample was produced.
    complete: bool,
}

impl<const DOFS: usize> TrajectoryExecutor<DOFS> {
    /// Create an executor sampling `profiles` every `control_period` seconds.
    ///
    /// A non-positive or non-finite period yields no samples.
    pub fn new(profiles: [Profile; DOFS], control_period: f64) -> Self {
        let duration = profiles.iter().map(Profile::duration).fold(0.0, f64::max);

        let period_valid = control_period > 0.0 && control_period.is_finite();
        if !period_valid {
            warn!("control period {} is not positive, nothing to sample", control_period);
        }

        Self {
            profiles,
            control_period,
            duration,
            current_cycle: 0,
            complete: !period_valid || duration <= 0.0,
        }
    }

    /// Check if sampling is complete.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Number of control cycles sampled so far.
    #[inline]
    pub fn current_cycle(&self) -> u32 {
        self.current_cycle
    }

    /// Number of control cycles needed to reach the end of the longest profile.
    pub fn total_cycles(&self) -> u32 {
        if !(self.control_period > 0.0 && self.control_period.is_finite()) {
            return 0;
        }
        ceil(self.duration / self.control_period) as u32
    }

    /// Time of the last sample.
    #[inline]
    pub fn elapsed(&self) -> f64 {
        (self.current_cycle as f64 * self.control_period).min(self.duration)
    }

    /// Duration of the longest profile.
    #[inline]
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Control period in seconds.
    #[inline]
    pub fn control_period(&self) -> f64 {
        self.control_period
    }

    /// The sampled profiles.
    #[inline]
    pub fn profiles(&self) -> &[Profile; DOFS] {
        &self.profiles
    }

    /// State of every DoF at `time` since the start.
    pub fn state_at(&self, time: f64) -> [KinematicState; DOFS] {
        core::array::from_fn(|dof| self.profiles[dof].state_at(time).0)
    }

    /// Position range covered by each DoF.
    pub fn position_extrema(&self) -> [Bound; DOFS] {
        core::array::from_fn(|dof| self.profiles[dof].get_position_extrema())
    }

    /// Reset the clock to the beginning.
    pub fn reset(&mut self) {
        self.current_cycle = 0;
        self.complete = self.total_cycles() == 0;
    }

    /// Get progress as a fraction (0.0 to 1.0).
    #[inline]
    pub fn progress(&self) -> f64 {
        if self.duration <= 0.0 {
            1.0
        } else {
            self.elapsed() / self.duration
        }
    }
}

impl<const DOFS: usize> Iterator for TrajectoryExecutor<DOFS> {
    type Item = [KinematicState; DOFS];

    fn next(&mut self) -> Option<Self::Item> {
        if self.complete {
            return None;
        }

        self.current_cycle += 1;
        let mut time = self.current_cycle as f64 * self.control_period;
        if time >= self.duration {
            time = self.duration;
            self.complete = true;
            trace!("sampling finished after {} cycles", self.current_cycle);
        }

        Some(self.state_at(time))
    }
}
