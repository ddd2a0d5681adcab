// PI (Proportional-Integral) regulator with anti-windup

use crate::config::ConfigError;
use crate::numeric::Numeric;

/// PI regulator with integrator clamping and output limiting.
///
/// Two run forms share the state: the parallel form integrates
/// `ki * error`, the series form integrates `ki * (kp * error)` so the
/// integral gain acts downstream of the proportional gain. In both forms
/// the integrator is saturated to the output window on its own, before
/// the feedforward term enters the sum; feedforward can therefore use any
/// remaining output headroom, but the integrator never winds up past the
/// limits.
pub struct PiController<T: Numeric> {
    /// Proportional gain
    kp: T,
    /// Integral gain
    ki: T,
    /// Integrator value, held within [out_min, out_max]
    ui: T,
    /// Last reference input (diagnostic)
    ref_value: T,
    /// Last feedback input (diagnostic)
    fback_value: T,
    /// Last feedforward input (diagnostic)
    ffwd_value: T,
    /// Minimum output value allowed
    out_min: T,
    /// Maximum output value allowed
    out_max: T,
}

impl<T: Numeric> PiController<T> {
    /// Create a new PI regulator.
    ///
    /// # Arguments
    /// * `kp` - Proportional gain
    /// * `ki` - Integral gain
    /// * `out_min` - Minimum output limit
    /// * `out_max` - Maximum output limit
    pub fn new(kp: T, ki: T, out_min: T, out_max: T) -> Result<Self, ConfigError> {
        if out_min > out_max {
            return Err(ConfigError::InvertedOutputLimits);
        }
        Ok(Self {
            kp,
            ki,
            ui: T::ZERO,
            ref_value: T::ZERO,
            fback_value: T::ZERO,
            ffwd_value: T::ZERO,
            out_min,
            out_max,
        })
    }

    /// Create a symmetric PI regulator (output range: -limit to +limit).
    pub fn new_symmetric(kp: T, ki: T, out_limit: T) -> Result<Self, ConfigError> {
        Self::new(kp, ki, -out_limit, out_limit)
    }

    /// Run the parallel form for one tick.
    pub fn run_parallel(&mut self, ref_value: T, fback_value: T, ffwd_value: T) -> T {
        let error = ref_value - fback_value;
        let up = self.kp * error;
        self.ui = (self.ui + self.ki * error).sat(self.out_max, self.out_min);

        self.ref_value = ref_value;
        self.fback_value = fback_value;
        self.ffwd_value = ffwd_value;

        (up + self.ui + ffwd_value).sat(self.out_max, self.out_min)
    }

    /// Run the series form for one tick: the integrator accumulates the
    /// proportional output instead of the raw error.
    pub fn run_series(&mut self, ref_value: T, fback_value: T, ffwd_value: T) -> T {
        let error = ref_value - fback_value;
        let up = self.kp * error;
        self.ui = (self.ui + self.ki * up).sat(self.out_max, self.out_min);

        self.ref_value = ref_value;
        self.fback_value = fback_value;
        self.ffwd_value = ffwd_value;

        (up + self.ui + ffwd_value).sat(self.out_max, self.out_min)
    }

    /// Reset the integrator to zero.
    pub fn reset(&mut self) {
        self.ui = T::ZERO;
    }

    /// Set the proportional and integral gains.
    pub fn set_gains(&mut self, kp: T, ki: T) {
        self.kp = kp;
        self.ki = ki;
    }

    /// Set the output limits.
    pub fn set_min_max(&mut self, out_min: T, out_max: T) -> Result<(), ConfigError> {
        if out_min > out_max {
            return Err(ConfigError::InvertedOutputLimits);
        }
        self.out_min = out_min;
        self.out_max = out_max;
        Ok(())
    }

    /// Seed the integrator (e.g. bumpless takeover from another stage).
    pub fn set_ui(&mut self, ui: T) {
        self.ui = ui;
    }

    pub fn get_kp(&self) -> T {
        self.kp
    }

    pub fn get_ki(&self) -> T {
        self.ki
    }

    pub fn get_ui(&self) -> T {
        self.ui
    }

    pub fn get_out_min(&self) -> T {
        self.out_min
    }

    pub fn get_out_max(&self) -> T {
        self.out_max
    }

    pub fn get_ref_value(&self) -> T {
        self.ref_value
    }

    pub fn get_fback_value(&self) -> T {
        self.fback_value
    }

    pub fn get_ffwd_value(&self) -> T {
        self.ffwd_value
    }
}
