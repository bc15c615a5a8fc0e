//! Bounded nonlinear recurrence over the complex plane.
//!
//! One step of the map evaluates
//! `sin(z + alpha) + beta * cos(0.5 * z) + gamma * z * e^(-|z|)`
//! on a numerically conditioned copy of the state. Two guards keep the
//! iteration total and bounded for every reachable input:
//!
//! - magnitude clamping before and after the arithmetic caps the modulus
//!   at [`DEFAULT_MAGNITUDE_CAP`] while preserving the argument;
//! - reducing both components into [0, 2pi) keeps the trigonometric and
//!   exponential terms well-conditioned;
//! - any non-finite intermediate result collapses to 0+0i so a bad step
//!   degrades the stream instead of aborting it.

use std::f64::consts::TAU;

use num_complex::Complex64;

use crate::error::FractalStreamError;
use crate::params::KeyParams;

/// Default cap on the modulus of the map state.
pub const DEFAULT_MAGNITUDE_CAP: f64 = 100.0;

/// One-step evaluator for the fractal recurrence.
///
/// Holds the password-derived coefficients and the magnitude cap. The
/// evaluator itself is stateless: [`step`](Self::step) is a pure function
/// of its input, which keeps keystream generation reproducible and lets
/// independent streams share an evaluator across threads.
#[derive(Debug, Clone)]
pub struct FractalMap {
    params: KeyParams,
    magnitude_cap: f64,
}

impl FractalMap {
    /// Creates an evaluator with the default magnitude cap of 100.
    pub fn new(params: KeyParams) -> Self {
        FractalMap {
            params,
            magnitude_cap: DEFAULT_MAGNITUDE_CAP,
        }
    }

    /// Creates an evaluator with a custom magnitude cap.
    ///
    /// # Parameters
    /// - `params`: Password-derived coefficients.
    /// - `cap`: Maximum modulus of the state; must be positive and finite.
    ///
    /// # Errors
    /// Returns [`FractalStreamError::InvalidMagnitudeCap`] if `cap` is not
    /// a positive finite number.
    pub fn with_magnitude_cap(params: KeyParams, cap: f64) -> Result<Self, FractalStreamError> {
        if !cap.is_finite() || cap <= 0.0 {
            return Err(FractalStreamError::InvalidMagnitudeCap);
        }
        Ok(FractalMap {
            params,
            magnitude_cap: cap,
        })
    }

    /// Returns the coefficients driving this map.
    pub fn params(&self) -> &KeyParams {
        &self.params
    }

    /// Returns the magnitude cap.
    pub fn magnitude_cap(&self) -> f64 {
        self.magnitude_cap
    }

    /// Advances the state by one application of the recurrence.
    ///
    /// Total for every input: NaN or infinite components survive neither
    /// the modular reduction nor the finiteness check and collapse to
    /// 0+0i before the output clamp. The returned modulus never exceeds
    /// the magnitude cap.
    ///
    /// # Parameters
    /// - `z`: Current state.
    ///
    /// # Returns
    /// The next state, with modulus at most [`magnitude_cap`](Self::magnitude_cap).
    pub fn step(&self, z: Complex64) -> Complex64 {
        let z = clamp_magnitude(z, self.magnitude_cap);

        // rem_euclid keeps the reduction in [0, 2pi) for negative parts too.
        let z_safe = Complex64::new(z.re.rem_euclid(TAU), z.im.rem_euclid(TAU));

        let damping = (-z_safe.norm()).exp();
        let result = (z_safe + self.params.alpha).sin()
            + self.params.beta * (0.5 * z_safe).cos()
            + self.params.gamma * z_safe * damping;

        let result = if result.re.is_finite() && result.im.is_finite() {
            result
        } else {
            Complex64::new(0.0, 0.0)
        };

        clamp_magnitude(result, self.magnitude_cap)
    }
}

/// Rescales `z` onto the circle of radius `cap` if its modulus exceeds it.
///
/// Preserves the argument and caps the modulus. Values whose modulus is
/// NaN pass through unchanged; the finiteness check after the arithmetic
/// is responsible for them.
fn clamp_magnitude(z: Complex64, cap: f64) -> Complex64 {
    let mag = z.norm();
    if mag > cap {
        z / mag * cap
    } else {
        z
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map_for(password: &str) -> FractalMap {
        FractalMap::new(KeyParams::derive(password))
    }

    #[test]
    fn test_step_deterministic() {
        let map = map_for("test");
        let z = Complex64::new(0.5, 0.3);
        assert_eq!(map.step(z), map.step(z));
    }

    #[test]
    fn test_step_bounded_for_huge_input() {
        let map = map_for("test");
        let z = Complex64::new(1e6, 1e6);
        let next = map.step(z);
        assert!(
            next.norm() <= DEFAULT_MAGNITUDE_CAP,
            "modulus exceeded cap: {}",
            next.norm()
        );
    }

    #[test]
    fn test_step_bounded_for_extreme_inputs() {
        let map = map_for("boundary");
        let inputs = [
            Complex64::new(f64::MAX, 0.0),
            Complex64::new(0.0, f64::MAX),
            Complex64::new(-1e300, 1e300),
            Complex64::new(f64::INFINITY, 0.0),
            Complex64::new(f64::NEG_INFINITY, f64::INFINITY),
            Complex64::new(f64::NAN, 0.0),
            Complex64::new(f64::NAN, f64::NAN),
        ];
        for z in inputs {
            let next = map.step(z);
            assert!(
                next.re.is_finite() && next.im.is_finite(),
                "non-finite output for input {:?}: {:?}",
                z,
                next
            );
            assert!(
                next.norm() <= DEFAULT_MAGNITUDE_CAP,
                "modulus exceeded cap for input {:?}: {}",
                z,
                next.norm()
            );
        }
    }

    #[test]
    fn test_orbit_stays_bounded() {
        let map = map_for("OrbitTest");
        let mut z = Complex64::new(0.5, 0.3);
        for i in 0..10_000 {
            z = map.step(z);
            assert!(
                z.re.is_finite() && z.im.is_finite(),
                "orbit left the finite plane at step {}",
                i
            );
            assert!(
                z.norm() <= DEFAULT_MAGNITUDE_CAP,
                "orbit escaped the cap at step {}: {}",
                i,
                z.norm()
            );
        }
    }

    #[test]
    fn test_clamp_preserves_argument() {
        let z = Complex64::new(300.0, 400.0); // modulus 500
        let clamped = clamp_magnitude(z, 100.0);
        assert!((clamped.norm() - 100.0).abs() < 1e-9);
        assert!((clamped.arg() - z.arg()).abs() < 1e-12);
    }

    #[test]
    fn test_clamp_leaves_small_values_untouched() {
        let z = Complex64::new(1.0, -2.0);
        assert_eq!(clamp_magnitude(z, 100.0), z);
    }

    #[test]
    fn test_custom_cap_respected() {
        let map = FractalMap::with_magnitude_cap(KeyParams::derive("cap"), 1.5).unwrap();
        let mut z = Complex64::new(0.5, 0.3);
        for _ in 0..1_000 {
            z = map.step(z);
            assert!(z.norm() <= 1.5 + 1e-12);
        }
    }

    #[test]
    fn test_invalid_cap_rejected() {
        for cap in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let result = FractalMap::with_magnitude_cap(KeyParams::derive("x"), cap);
            assert!(
                matches!(result, Err(FractalStreamError::InvalidMagnitudeCap)),
                "cap {} should be rejected",
                cap
            );
        }
    }

    #[test]
    fn test_different_params_different_orbits() {
        let map1 = map_for("PasswordA");
        let map2 = map_for("PasswordB");
        let z = Complex64::new(0.5, 0.3);
        assert_ne!(map1.step(z), map2.step(z));
    }
}
