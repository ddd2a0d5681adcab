// Coordinate transformation for the drive pipeline
// Rotating dq frame to stationary alpha/beta frame via a cached phasor

use crate::numeric::Numeric;

/// Inverse Park transform (dq → αβ) with a cached sine/cosine pair.
///
/// The phasor is installed separately from the per-call rotation: either
/// from a radian angle via [`setup`](InversePark::setup), or directly via
/// [`set_phasor`](InversePark::set_phasor) when the caller already has the
/// pair (the pipeline derives it from the per-unit angle). `run` itself is
/// pure.
pub struct InversePark<T: Numeric> {
    /// Sine of the frame angle
    sin_th: T,
    /// Cosine of the frame angle
    cos_th: T,
}

impl<T: Numeric> InversePark<T> {
    /// Identity rotation until a phasor is installed.
    pub fn new() -> Self {
        Self {
            sin_th: T::ZERO,
            cos_th: T::ONE,
        }
    }

    /// Cache the sine/cosine of a radian angle.
    pub fn setup(&mut self, theta_rad: T) {
        let (sin_th, cos_th) = theta_rad.sin_cos_rad();
        self.sin_th = sin_th;
        self.cos_th = cos_th;
    }

    /// Install a caller-computed phasor.
    pub fn set_phasor(&mut self, cos_th: T, sin_th: T) {
        self.cos_th = cos_th;
        self.sin_th = sin_th;
    }

    /// Rotate a dq vector into the stationary frame.
    pub fn run(&self, dq: [T; 2]) -> [T; 2] {
        [
            dq[0] * self.cos_th - dq[1] * self.sin_th,
            dq[1] * self.cos_th + dq[0] * self.sin_th,
        ]
    }

    pub fn get_sin_th(&self) -> T {
        self.sin_th
    }

    pub fn get_cos_th(&self) -> T {
        self.cos_th
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f32::consts::{FRAC_PI_2, PI};
    use fixed::types::I8F24;

    const EPSILON: f32 = 0.001;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn zero_angle_is_identity() {
        let mut ipark = InversePark::new();
        ipark.setup(0.0);
        let [alpha, beta] = ipark.run([1.0, 0.0]);
        assert!(approx_eq(alpha, 1.0));
        assert!(approx_eq(beta, 0.0));
    }

    #[test]
    fn quarter_turn_maps_d_onto_beta() {
        let mut ipark = InversePark::new();
        ipark.setup(FRAC_PI_2);
        let [alpha, beta] = ipark.run([1.0, 0.0]);
        assert!(approx_eq(alpha, 0.0));
        assert!(approx_eq(beta, 1.0));
    }

    #[test]
    fn opposite_angles_round_trip() {
        let mut fwd = InversePark::new();
        let mut back = InversePark::new();
        for theta in [-PI, -1.8, -0.3, 0.0, 0.42, 1.1, 2.9] {
            fwd.setup(theta);
            back.setup(-theta);
            let out = back.run(fwd.run([0.6, -0.8]));
            assert!(approx_eq(out[0], 0.6));
            assert!(approx_eq(out[1], -0.8));
        }
    }

    #[test]
    fn set_phasor_matches_setup() {
        let mut by_angle = InversePark::new();
        let mut by_phasor = InversePark::new();
        by_angle.setup(0.42);
        by_phasor.set_phasor(libm::cosf(0.42), libm::sinf(0.42));
        let a = by_angle.run([0.3, 0.7]);
        let b = by_phasor.run([0.3, 0.7]);
        assert!(approx_eq(a[0], b[0]));
        assert!(approx_eq(a[1], b[1]));
    }

    #[test]
    fn fixed_point_round_trip() {
        let mut fwd = InversePark::<I8F24>::new();
        let mut back = InversePark::<I8F24>::new();
        fwd.setup(I8F24::from_num(1.1));
        back.setup(I8F24::from_num(-1.1));
        let out = back.run(fwd.run([I8F24::from_num(0.6), I8F24::from_num(-0.8)]));
        assert!(approx_eq(out[0].to_num::<f32>(), 0.6));
        assert!(approx_eq(out[1].to_num::<f32>(), -0.8));
    }
}
