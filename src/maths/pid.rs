//! Wrap-aware PID controller for steering position control.
//!
//! Position error is the minimal wrap distance between setpoint and
//! measurement, so the controller always drives the shorter rotational
//! path (never more than half a revolution), even when raw encoder counts
//! have accumulated many revolutions.

use super::scalar;
use crate::error::{Error, Result};

/// Proportional, integral and derivative gains.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PidGains {
    pub p: f64,
    pub i: f64,
    pub d: f64,
}

impl PidGains {
    /// Create a new gain set.
    pub fn new(p: f64, i: f64, d: f64) -> Self {
        Self { p, i, d }
    }
}

/// PID controller whose error term wraps at the encoder modulus.
///
/// Owned and stepped by exactly one module controller; state is mutated
/// once per control tick and only reset through [`WrapAwarePid::reset`].
#[derive(Debug, Clone)]
pub struct WrapAwarePid {
    gains: PidGains,
    ticks_per_rev: f64,
    integral: f64,
    previous_error: f64,
    output_min: f64,
    output_max: f64,
}

impl WrapAwarePid {
    /// Create a new controller.
    ///
    /// `ticks_per_rev` is the wrap modulus of the position measurement and
    /// must be at least 1; `output_min` must be below `output_max`. Both
    /// are rejected here so the per-tick step stays unchecked.
    pub fn new(
        gains: PidGains,
        ticks_per_rev: f64,
        output_min: f64,
        output_max: f64,
    ) -> Result<Self> {
        if !(ticks_per_rev >= 1.0) {
            return Err(Error::InvalidParameter(format!(
                "ticks_per_rev must be >= 1, got {}",
                ticks_per_rev
            )));
        }
        if !(output_min < output_max) {
            return Err(Error::InvalidParameter(format!(
                "PID output range is empty: [{}, {}]",
                output_min, output_max
            )));
        }

        Ok(Self {
            gains,
            ticks_per_rev,
            integral: 0.0,
            previous_error: 0.0,
            output_min,
            output_max,
        })
    }

    /// Run one control step and return the bounded correction.
    ///
    /// The error is the minimal wrap distance from `current_ticks` to
    /// `target_ticks`, in `[-ticks_per_rev/2, ticks_per_rev/2)`.
    pub fn step(&mut self, target_ticks: f64, current_ticks: f64) -> f64 {
        let error = scalar::normalize_angle_native(target_ticks - current_ticks, self.ticks_per_rev);

        self.integral += error;
        let derivative = error - self.previous_error;
        self.previous_error = error;

        let raw = self.gains.p * error + self.gains.i * self.integral + self.gains.d * derivative;
        raw.clamp(self.output_min, self.output_max)
    }

    /// Replace the gains without touching accumulated state.
    pub fn set_gains(&mut self, gains: PidGains) {
        self.gains = gains;
    }

    /// Current gains.
    pub fn gains(&self) -> PidGains {
        self.gains
    }

    /// Clear the integral accumulator and previous error.
    pub fn reset(&mut self) {
        self.integral = 0.0;
        self.previous_error = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn pid(p: f64, i: f64, d: f64) -> WrapAwarePid {
        WrapAwarePid::new(PidGains::new(p, i, d), 5.0, -100.0, 100.0).unwrap()
    }

    #[test]
    fn test_rejects_bad_modulus() {
        assert!(WrapAwarePid::new(PidGains::new(1.0, 0.0, 0.0), 0.0, -1.0, 1.0).is_err());
        assert!(WrapAwarePid::new(PidGains::new(1.0, 0.0, 0.0), -5.0, -1.0, 1.0).is_err());
        assert!(WrapAwarePid::new(PidGains::new(1.0, 0.0, 0.0), f64::NAN, -1.0, 1.0).is_err());
    }

    #[test]
    fn test_rejects_empty_output_range() {
        assert!(WrapAwarePid::new(PidGains::new(1.0, 0.0, 0.0), 5.0, 1.0, 1.0).is_err());
        assert!(WrapAwarePid::new(PidGains::new(1.0, 0.0, 0.0), 5.0, 2.0, -2.0).is_err());
    }

    #[test]
    fn test_proportional_response() {
        let mut pid = pid(2.0, 0.0, 0.0);
        assert_relative_eq!(pid.step(1.0, 0.0), 2.0);
        assert_relative_eq!(pid.step(0.5, 0.0), 1.0);
    }

    #[test]
    fn test_error_takes_shorter_wrap_path() {
        // Raw difference +4 on a 5-tick revolution wraps to -1
        let mut pid = pid(1.0, 0.0, 0.0);
        assert_relative_eq!(pid.step(4.0, 0.0), -1.0);
    }

    #[test]
    fn test_error_ignores_accumulated_revolutions() {
        let mut pid = pid(1.0, 0.0, 0.0);
        // Encoder has wound up 100 revolutions; error is still just 1 tick
        assert_relative_eq!(pid.step(1.0, 500.0), 1.0);
    }

    #[test]
    fn test_integral_accumulates() {
        let mut pid = pid(0.0, 1.0, 0.0);
        assert_relative_eq!(pid.step(1.0, 0.0), 1.0);
        assert_relative_eq!(pid.step(1.0, 0.0), 2.0);
        assert_relative_eq!(pid.step(1.0, 0.0), 3.0);
    }

    #[test]
    fn test_derivative_responds_to_error_change() {
        let mut pid = pid(0.0, 0.0, 1.0);
        // First step: error jumps 0 -> 1
        assert_relative_eq!(pid.step(1.0, 0.0), 1.0);
        // Error unchanged: derivative term is zero
        assert_relative_eq!(pid.step(1.0, 0.0), 0.0);
        // Error shrinks: negative derivative
        assert_relative_eq!(pid.step(0.5, 0.0), -0.5);
    }

    #[test]
    fn test_output_clamped() {
        let mut pid = WrapAwarePid::new(PidGains::new(10.0, 0.0, 0.0), 5.0, -0.5, 0.5).unwrap();
        assert_relative_eq!(pid.step(2.0, 0.0), 0.5);
        assert_relative_eq!(pid.step(-2.0, 0.0), -0.5);
    }

    #[test]
    fn test_reset_clears_state() {
        let mut pid = pid(0.0, 1.0, 1.0);
        pid.step(1.0, 0.0);
        pid.step(1.0, 0.0);
        pid.reset();
        // Integral and previous error are gone: identical to a fresh step
        assert_relative_eq!(pid.step(1.0, 0.0), 2.0); // i*1 + d*(1-0)
    }

    #[test]
    fn test_set_gains_keeps_state() {
        let mut pid = pid(0.0, 1.0, 0.0);
        pid.step(1.0, 0.0);
        pid.set_gains(PidGains::new(0.0, 2.0, 0.0));
        // Integral of 2 ticks total, doubled gain
        assert_relative_eq!(pid.step(1.0, 0.0), 4.0);
    }
}
