// Control stage modules for the per-tick drive pipeline
// Open-loop V/f and closed-loop speed control for a three-phase inverter

pub mod angle_gen;
pub mod pi_controller;
pub mod svpwm;
pub mod trajectory;
pub mod transforms;
pub mod volts_hertz;

// Re-export main types for easier access
pub use angle_gen::AngleGen;
pub use pi_controller::PiController;
pub use svpwm::Svpwm;
pub use trajectory::Trajectory;
pub use transforms::InversePark;
pub use volts_hertz::VoltsHertz;

/// Drive control mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControlMode {
    /// Open-loop volts/hertz: the ramped frequency command sets both the
    /// voltage magnitude and the rotating angle.
    OpenLoopVf,
    /// Closed-loop speed: a PI regulator on the speed error sets the
    /// q-axis voltage; the ramped reference still drives the angle.
    SpeedControl,
}
