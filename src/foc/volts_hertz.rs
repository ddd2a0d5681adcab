// Volts/hertz profile
//
// Maps a per-unit frequency command to a per-unit voltage magnitude along
// a piecewise-linear curve, then projects the magnitude onto a fixed
// d/q gain pair so the open-loop drive keeps some flux-axis excitation.

use crate::config::{ConfigError, VF_D_AXIS_GAIN_PU};
use crate::numeric::Numeric;

/// Piecewise-linear volts/hertz curve with fixed d/q projection.
///
/// Frequencies below the low corner hold the minimum voltage, frequencies
/// above the high corner hold the rated voltage, and the span in between
/// interpolates along a slope precomputed at configuration time.
pub struct VoltsHertz<T: Numeric> {
    /// Per-unit frequency base [Hz]
    full_scale_freq_hz: f32,
    /// Per-unit voltage base [V]
    full_scale_voltage_v: f32,
    /// Stator voltage vector magnitude ceiling [pu]
    max_vs_mag: T,
    /// Last frequency input [pu]
    freq: T,
    /// Low corner [pu]
    low_freq: T,
    /// High corner [pu]
    high_freq: T,
    /// Voltage below the low corner [pu]
    volt_min: T,
    /// Rated voltage at the high corner [pu]
    volt_max: T,
    /// Precomputed (volt_max - volt_min) / (high_freq - low_freq)
    vf_slope: T,
    /// Voltage magnitude output [pu]
    vs_out: T,
    /// Fixed d/q projection pair, |gain| = max_vs_mag
    vdq_gain: [T; 2],
    /// Voltage vector output [pu]
    vdq_out: [T; 2],
}

impl<T: Numeric> VoltsHertz<T> {
    pub fn new() -> Self {
        Self {
            full_scale_freq_hz: 0.0,
            full_scale_voltage_v: 0.0,
            max_vs_mag: T::ZERO,
            freq: T::ZERO,
            low_freq: T::ZERO,
            high_freq: T::ZERO,
            volt_min: T::ZERO,
            volt_max: T::ZERO,
            vf_slope: T::ZERO,
            vs_out: T::ZERO,
            vdq_gain: [T::ZERO; 2],
            vdq_out: [T::ZERO; 2],
        }
    }

    /// Store the per-unit bases and the magnitude ceiling.
    pub fn set_params(
        &mut self,
        full_scale_freq_hz: f32,
        full_scale_voltage_v: f32,
        max_vs_mag: T,
    ) -> Result<(), ConfigError> {
        if full_scale_freq_hz <= 0.0 || full_scale_voltage_v <= 0.0 {
            return Err(ConfigError::NonPositiveFullScale);
        }
        self.full_scale_freq_hz = full_scale_freq_hz;
        self.full_scale_voltage_v = full_scale_voltage_v;
        self.max_vs_mag = max_vs_mag;
        Ok(())
    }

    /// Configure the curve corners (engineering units, normalized here)
    /// and derive the slope and the d/q projection pair.
    pub fn set_profile(
        &mut self,
        low_freq_hz: f32,
        high_freq_hz: f32,
        volt_min_v: f32,
        volt_max_v: f32,
    ) -> Result<(), ConfigError> {
        if self.full_scale_freq_hz <= 0.0 || self.full_scale_voltage_v <= 0.0 {
            return Err(ConfigError::NonPositiveFullScale);
        }
        if high_freq_hz <= low_freq_hz {
            return Err(ConfigError::EmptyFrequencySpan);
        }
        if volt_max_v < volt_min_v {
            return Err(ConfigError::InvertedVoltageSpan);
        }

        let d_gain = T::from_f32(VF_D_AXIS_GAIN_PU);
        let q_gain_sq = self.max_vs_mag * self.max_vs_mag - d_gain * d_gain;
        if q_gain_sq < T::ZERO {
            return Err(ConfigError::VsMagnitudeTooSmall);
        }

        self.low_freq = T::from_f32(low_freq_hz / self.full_scale_freq_hz);
        self.high_freq = T::from_f32(high_freq_hz / self.full_scale_freq_hz);
        self.volt_min = T::from_f32(volt_min_v / self.full_scale_voltage_v);
        self.volt_max = T::from_f32(volt_max_v / self.full_scale_voltage_v);
        self.vf_slope = (self.volt_max - self.volt_min) / (self.high_freq - self.low_freq);
        self.vdq_gain = [d_gain, q_gain_sq.sqrt()];

        debug!(
            "volts/hertz profile: {}..{} Hz, {}..{} V",
            low_freq_hz, high_freq_hz, volt_min_v, volt_max_v
        );
        Ok(())
    }

    /// Evaluate the curve for one tick and split the magnitude onto the
    /// d/q axes.
    pub fn run(&mut self, freq: T) {
        self.freq = freq;
        self.vs_out = if freq <= self.low_freq {
            self.volt_min
        } else if freq >= self.high_freq {
            self.volt_max
        } else {
            self.volt_min + self.vf_slope * (freq - self.low_freq)
        };
        self.vdq_out[0] = self.vs_out * self.vdq_gain[0];
        self.vdq_out[1] = self.vs_out * self.vdq_gain[1];
    }

    /// Last frequency input [pu]
    pub fn get_freq(&self) -> T {
        self.freq
    }

    /// Voltage magnitude output [pu]
    pub fn get_vs(&self) -> T {
        self.vs_out
    }

    /// d-axis voltage output [pu]
    pub fn get_vd(&self) -> T {
        self.vdq_out[0]
    }

    /// q-axis voltage output [pu]
    pub fn get_vq(&self) -> T {
        self.vdq_out[1]
    }

    pub fn get_vdq_gain(&self) -> [T; 2] {
        self.vdq_gain
    }
}
