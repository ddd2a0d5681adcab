// Slew-rate-limited reference ramp
//
// Moves an internal value toward a target by at most `max_delta` per tick,
// then clamps it into `[min_value, max_value]`. Used to soften frequency
// and speed commands before they reach the voltage stages.

use crate::config::ConfigError;
use crate::numeric::Numeric;

/// Trajectory generator with bounded step and hard floor/ceiling.
pub struct Trajectory<T: Numeric> {
    /// Target value the ramp converges on
    target_value: T,
    /// Intermediate value along the trajectory
    int_value: T,
    /// Lower bound enforced after every step
    min_value: T,
    /// Upper bound enforced after every step
    max_value: T,
    /// Largest step applied per tick
    max_delta: T,
}

impl<T: Numeric> Trajectory<T> {
    pub fn new() -> Self {
        Self {
            target_value: T::ZERO,
            int_value: T::ZERO,
            min_value: T::ZERO,
            max_value: T::ZERO,
            max_delta: T::ZERO,
        }
    }

    /// Advance the intermediate value one tick toward the target.
    ///
    /// The error is saturated to `[-max_delta, max_delta]` before it is
    /// applied, and the sum is saturated to `[min_value, max_value]`, so a
    /// target outside the bounds is approached but never reached.
    pub fn run(&mut self) {
        let error = self.target_value - self.int_value;
        let int_value = self.int_value + error.sat(self.max_delta, -self.max_delta);
        self.int_value = int_value.sat(self.max_value, self.min_value);
    }

    pub fn get_target_value(&self) -> T {
        self.target_value
    }

    pub fn set_target_value(&mut self, target_value: T) {
        self.target_value = target_value;
    }

    pub fn get_int_value(&self) -> T {
        self.int_value
    }

    /// Seed the intermediate value directly (e.g. bumpless restart).
    pub fn set_int_value(&mut self, int_value: T) {
        self.int_value = int_value;
    }

    pub fn get_min_value(&self) -> T {
        self.min_value
    }

    pub fn set_min_value(&mut self, min_value: T) {
        self.min_value = min_value;
    }

    pub fn get_max_value(&self) -> T {
        self.max_value
    }

    pub fn set_max_value(&mut self, max_value: T) {
        self.max_value = max_value;
    }

    pub fn get_max_delta(&self) -> T {
        self.max_delta
    }

    /// Set the per-tick step limit. A non-positive limit would stall the
    /// ramp forever, so it is rejected here rather than looping at run
    /// time.
    pub fn set_max_delta(&mut self, max_delta: T) -> Result<(), ConfigError> {
        if max_delta <= T::ZERO {
            return Err(ConfigError::NonPositiveMaxDelta);
        }
        self.max_delta = max_delta;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fixed::types::I8F24;

    fn ramp(max_delta: f32, min: f32, max: f32) -> Trajectory<f32> {
        let mut traj = Trajectory::new();
        traj.set_min_value(min);
        traj.set_max_value(max);
        traj.set_max_delta(max_delta).unwrap();
        traj
    }

    #[test]
    fn converges_in_exact_tick_count() {
        // |target| / max_delta = 4 exactly
        let mut traj = ramp(0.25, -10.0, 10.0);
        traj.set_target_value(1.0);
        for _ in 0..3 {
            traj.run();
            assert!(traj.get_int_value() < 1.0);
        }
        traj.run();
        assert_eq!(traj.get_int_value(), 1.0);
    }

    #[test]
    fn fractional_last_step() {
        // ceil(0.9 / 0.25) = 4 ticks
        let mut traj = ramp(0.25, -10.0, 10.0);
        traj.set_target_value(0.9);
        for _ in 0..4 {
            traj.run();
        }
        assert_eq!(traj.get_int_value(), 0.9);
    }

    #[test]
    fn negative_target() {
        let mut traj = ramp(0.5, -10.0, 10.0);
        traj.set_target_value(-2.0);
        for tick in 1..=4 {
            traj.run();
            assert_eq!(traj.get_int_value(), -0.5 * tick as f32);
        }
    }

    #[test]
    fn step_never_exceeds_max_delta() {
        let mut traj = ramp(0.1, -1.0, 1.0);
        traj.set_target_value(100.0);
        let mut prev = traj.get_int_value();
        for _ in 0..30 {
            traj.run();
            assert!((traj.get_int_value() - prev).abs() <= 0.1 + f32::EPSILON);
            prev = traj.get_int_value();
        }
    }

    #[test]
    fn bounds_truncate_convergence() {
        // Target beyond the ceiling: the ramp parks on the ceiling.
        let mut traj = ramp(0.5, -1.0, 1.0);
        traj.set_target_value(5.0);
        for _ in 0..10 {
            traj.run();
        }
        assert_eq!(traj.get_int_value(), 1.0);
    }

    #[test]
    fn zero_max_delta_rejected() {
        let mut traj = Trajectory::<f32>::new();
        assert_eq!(
            traj.set_max_delta(0.0),
            Err(ConfigError::NonPositiveMaxDelta)
        );
        assert_eq!(
            traj.set_max_delta(-0.5),
            Err(ConfigError::NonPositiveMaxDelta)
        );
    }

    #[test]
    fn fixed_point_ramp_matches() {
        let mut traj = Trajectory::<I8F24>::new();
        traj.set_min_value(I8F24::from_num(-1.0));
        traj.set_max_value(I8F24::from_num(1.0));
        traj.set_max_delta(I8F24::from_num(0.25)).unwrap();
        traj.set_target_value(I8F24::from_num(1.0));
        for _ in 0..4 {
            traj.run();
        }
        assert_eq!(traj.get_int_value(), I8F24::from_num(1.0));
    }
}
