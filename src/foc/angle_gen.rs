// Phase accumulator
//
// Integrates a per-unit frequency into a per-unit rotating angle once per
// tick. The angle unit is turns: one electrical revolution spans 1.0 and
// the accumulator wraps at +/-1.0.

use crate::config::ConfigError;
use crate::numeric::Numeric;

/// Per-tick angle generator.
pub struct AngleGen<T: Numeric> {
    /// Last frequency input [pu]
    freq: T,
    /// Angle advance at full-scale frequency [turns/tick]
    step_angle_max: T,
    /// Angle advance applied this tick [turns]
    step_angle: T,
    /// Accumulated angle [turns], wraps at +/-1
    angle: T,
}

impl<T: Numeric> AngleGen<T> {
    pub fn new() -> Self {
        Self {
            freq: T::ZERO,
            step_angle_max: T::ZERO,
            step_angle: T::ZERO,
            angle: T::ZERO,
        }
    }

    /// Derive the full-scale step from the per-unit frequency base and
    /// the control period.
    pub fn set_params(
        &mut self,
        full_scale_freq_hz: f32,
        ctrl_period_s: f32,
    ) -> Result<(), ConfigError> {
        if full_scale_freq_hz <= 0.0 || ctrl_period_s <= 0.0 {
            return Err(ConfigError::NonPositiveStepAngle);
        }
        self.step_angle_max = T::from_f32(full_scale_freq_hz * ctrl_period_s);
        Ok(())
    }

    /// Integrate one tick of the given frequency.
    ///
    /// The raw sum is wrapped by magnitude (`|angle| mod 1`) and the sign
    /// of the current frequency is re-applied afterwards, so the wrapped
    /// angle's sign always matches the present rotation direction, even on
    /// the first tick after a reversal. A zero frequency leaves the sign
    /// branch untaken: the unsigned wrap result stands.
    pub fn run(&mut self, freq: T) {
        self.freq = freq;
        self.step_angle = freq * self.step_angle_max;

        let mut angle = self.angle + self.step_angle;
        angle = angle.wrap_frac();
        if self.freq < T::ZERO {
            angle = -angle;
        }
        self.angle = angle;
    }

    /// Wrapped angle output [turns]
    pub fn get_angle(&self) -> T {
        self.angle
    }

    /// Angle advance applied on the last tick [turns]
    pub fn get_step_angle(&self) -> T {
        self.step_angle
    }

    pub fn get_freq(&self) -> T {
        self.freq
    }
}
