// Drive configuration: parameter defaults, the aggregate parameter set
// handed to the pipeline, and the configuration-fault vocabulary.
//
// Every fault a stage can detect is a configuration-time fault; the
// per-tick path never reports errors.

use thiserror::Error;

/// Full-scale frequency base for per-unit quantities [Hz] (default value)
pub const DEFAULT_FULL_SCALE_FREQ_HZ: f32 = 60.0;

/// Full-scale voltage base for per-unit quantities [V] (default value)
pub const DEFAULT_FULL_SCALE_VOLTAGE_V: f32 = 300.0;

/// DC bus voltage [V] (default value)
pub const DEFAULT_V_DC_BUS: f32 = 300.0;

/// Control period [s] (2.5 kHz tick) (default value)
pub const DEFAULT_CONTROL_PERIOD_S: f32 = 400e-6;

/// Maximum stator voltage vector magnitude [pu] (default value)
pub const DEFAULT_MAX_VS_MAG_PU: f32 = 0.5;

/// Fixed d-axis share of the volts/hertz output vector [pu]
pub const VF_D_AXIS_GAIN_PU: f32 = 0.3;

/// Speed regulator proportional gain (default value)
pub const DEFAULT_SPEED_KP: f32 = 0.8;

/// Speed regulator integral gain (default value)
pub const DEFAULT_SPEED_KI: f32 = 0.1;

/// Command ramp step per tick [pu] (default value)
pub const DEFAULT_RAMP_MAX_DELTA_PU: f32 = 0.002;

/// Volts/hertz profile corners (default values)
pub mod vf {
    /// Low corner frequency [Hz]
    pub const DEFAULT_LOW_FREQ_HZ: f32 = 5.0;

    /// High corner frequency, rated voltage reached here [Hz]
    pub const DEFAULT_HIGH_FREQ_HZ: f32 = 50.0;

    /// Voltage held below the low corner [V]
    pub const DEFAULT_VOLT_MIN_V: f32 = 10.0;

    /// Rated voltage at and above the high corner [V]
    pub const DEFAULT_VOLT_MAX_V: f32 = 230.0;
}

/// Data logger depth in samples per channel (default value)
pub const DEFAULT_LOG_DEPTH: usize = 400;

/// Faults detected while configuring a stage, before the control session
/// starts. None of these are discoverable at run time instead: the tick
/// path assumes a validated configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Volts/hertz corner frequencies must satisfy `low < high`.
    #[error("volts/hertz corner frequencies must satisfy low < high")]
    EmptyFrequencySpan,
    /// Volts/hertz corner voltages must satisfy `min <= max`.
    #[error("volts/hertz corner voltages must satisfy min <= max")]
    InvertedVoltageSpan,
    /// The stator voltage magnitude cannot cover the fixed d-axis share.
    #[error("stator voltage magnitude is below the d-axis gain")]
    VsMagnitudeTooSmall,
    /// Regulator output limits must satisfy `min <= max`.
    #[error("regulator output limits must satisfy min <= max")]
    InvertedOutputLimits,
    /// The inverse DC bus scale must be positive.
    #[error("inverse DC bus voltage must be positive")]
    NonPositiveDcBus,
    /// A zero ramp step would never converge on its target.
    #[error("trajectory step limit must be positive")]
    NonPositiveMaxDelta,
    /// Angle integration needs a positive full-scale frequency and period.
    #[error("angle step scale requires positive full-scale frequency and period")]
    NonPositiveStepAngle,
    /// Per-unit scaling needs positive full-scale bases.
    #[error("full-scale bases must be positive")]
    NonPositiveFullScale,
}

/// Aggregate parameter set for one drive pipeline.
///
/// Plain engineering units; each stage converts to per-unit against the
/// full-scale bases during configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriveParams {
    pub full_scale_freq_hz: f32,
    pub full_scale_voltage_v: f32,
    pub ctrl_period_s: f32,
    pub dc_bus_v: f32,
    pub max_vs_mag_pu: f32,
    pub vf_low_freq_hz: f32,
    pub vf_high_freq_hz: f32,
    pub vf_volt_min_v: f32,
    pub vf_volt_max_v: f32,
    pub speed_kp: f32,
    pub speed_ki: f32,
    pub ramp_max_delta_pu: f32,
}

impl Default for DriveParams {
    fn default() -> Self {
        Self {
            full_scale_freq_hz: DEFAULT_FULL_SCALE_FREQ_HZ,
            full_scale_voltage_v: DEFAULT_FULL_SCALE_VOLTAGE_V,
            ctrl_period_s: DEFAULT_CONTROL_PERIOD_S,
            dc_bus_v: DEFAULT_V_DC_BUS,
            max_vs_mag_pu: DEFAULT_MAX_VS_MAG_PU,
            vf_low_freq_hz: vf::DEFAULT_LOW_FREQ_HZ,
            vf_high_freq_hz: vf::DEFAULT_HIGH_FREQ_HZ,
            vf_volt_min_v: vf::DEFAULT_VOLT_MIN_V,
            vf_volt_max_v: vf::DEFAULT_VOLT_MAX_V,
            speed_kp: DEFAULT_SPEED_KP,
            speed_ki: DEFAULT_SPEED_KI,
            ramp_max_delta_pu: DEFAULT_RAMP_MAX_DELTA_PU,
        }
    }
}
