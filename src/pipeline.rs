// Per-tick control pipeline
//
// Owns one instance of every stage and runs them in a fixed order once
// per PWM period: command ramp, voltage stage (V/f curve or speed PI),
// angle integration, frame rotation, space-vector modulation. The tick
// path is straight-line arithmetic: no allocation, no waiting, no
// error reporting. All faults surface while the pipeline is built.

use crate::config::{ConfigError, DriveParams};
use crate::datalog::DataLog;
use crate::foc::{
    AngleGen, ControlMode, InversePark, PiController, Svpwm, Trajectory, VoltsHertz,
};
use crate::numeric::Numeric;

/// Drive control pipeline producing three phase-duty fractions per tick.
pub struct DrivePipeline<T: Numeric, const LOG: usize> {
    mode: ControlMode,
    traj: Trajectory<T>,
    volts_hertz: VoltsHertz<T>,
    speed_pi: PiController<T>,
    angle_gen: AngleGen<T>,
    ipark: InversePark<T>,
    svpwm: Svpwm<T>,
    datalog: DataLog<T, LOG>,
}

impl<T: Numeric + Default, const LOG: usize> DrivePipeline<T, LOG> {
    /// Build and configure every stage from one parameter set.
    pub fn new(mode: ControlMode, params: &DriveParams) -> Result<Self, ConfigError> {
        if params.dc_bus_v <= 0.0 {
            return Err(ConfigError::NonPositiveDcBus);
        }

        let mut traj = Trajectory::new();
        traj.set_min_value(-T::ONE);
        traj.set_max_value(T::ONE);
        traj.set_max_delta(T::from_f32(params.ramp_max_delta_pu))?;

        let max_vs_mag = T::from_f32(params.max_vs_mag_pu);

        let mut volts_hertz = VoltsHertz::new();
        volts_hertz.set_params(
            params.full_scale_freq_hz,
            params.full_scale_voltage_v,
            max_vs_mag,
        )?;
        volts_hertz.set_profile(
            params.vf_low_freq_hz,
            params.vf_high_freq_hz,
            params.vf_volt_min_v,
            params.vf_volt_max_v,
        )?;

        let speed_pi = PiController::new_symmetric(
            T::from_f32(params.speed_kp),
            T::from_f32(params.speed_ki),
            max_vs_mag,
        )?;

        let mut angle_gen = AngleGen::new();
        angle_gen.set_params(params.full_scale_freq_hz, params.ctrl_period_s)?;

        let mut svpwm = Svpwm::new();
        // Stage voltages are per-unit of the full-scale base; fold the
        // base into the bus normalization so the modulator sees
        // bus-relative fractions.
        svpwm.setup(T::from_f32(params.full_scale_voltage_v / params.dc_bus_v))?;

        info!(
            "drive pipeline configured: period {} s, dc bus {} V",
            params.ctrl_period_s, params.dc_bus_v
        );

        Ok(Self {
            mode,
            traj,
            volts_hertz,
            speed_pi,
            angle_gen,
            ipark: InversePark::new(),
            svpwm,
            datalog: DataLog::new(),
        })
    }

    /// Run one control tick.
    ///
    /// `command` is the per-unit frequency (open loop) or speed reference
    /// (closed loop); `speed_fback` is the measured per-unit speed, used
    /// only in closed loop. Returns the three phase-duty fractions.
    pub fn tick(&mut self, command: T, speed_fback: T) -> [T; 3] {
        self.traj.set_target_value(command);
        self.traj.run();
        let ramped = self.traj.get_int_value();

        let vdq = match self.mode {
            ControlMode::OpenLoopVf => {
                self.volts_hertz.run(ramped);
                [self.volts_hertz.get_vd(), self.volts_hertz.get_vq()]
            }
            ControlMode::SpeedControl => {
                let vq = self.speed_pi.run_parallel(ramped, speed_fback, T::ZERO);
                [T::ZERO, vq]
            }
        };

        // The angle always integrates the ramped reference, so the
        // rotating frame keeps advancing smoothly through mode changes.
        self.angle_gen.run(ramped);
        let (sin_th, cos_th) = self.angle_gen.get_angle().sin_cos_turns();
        self.ipark.set_phasor(cos_th, sin_th);

        let vab = self.ipark.run(vdq);
        let duties = self.svpwm.run(vab);

        self.datalog
            .update([ramped, self.angle_gen.get_angle(), duties[0]]);
        duties
    }

    /// Switch control mode; the speed regulator restarts clean.
    pub fn set_mode(&mut self, mode: ControlMode) {
        if mode != self.mode {
            info!("control mode change");
            self.speed_pi.reset();
            self.mode = mode;
        }
    }

    pub fn get_mode(&self) -> ControlMode {
        self.mode
    }

    /// Ramped command currently feeding the voltage and angle stages [pu]
    pub fn get_ramped_command(&self) -> T {
        self.traj.get_int_value()
    }

    /// Rotating angle [turns]
    pub fn get_angle(&self) -> T {
        self.angle_gen.get_angle()
    }

    /// Speed regulator diagnostics
    pub fn speed_pi(&self) -> &PiController<T> {
        &self.speed_pi
    }

    pub fn datalog(&self) -> &DataLog<T, LOG> {
        &self.datalog
    }

    pub fn datalog_mut(&mut self) -> &mut DataLog<T, LOG> {
        &mut self.datalog
    }
}
