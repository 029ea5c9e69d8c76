//! Mock hardware for hardware-free testing.
//!
//! [`MockMotorPair`] is deterministic: velocity setpoints integrate into
//! encoder positions through [`MockMotorPair::step`], with no slip or
//! noise, so closed-loop tests converge to exact predictions.

use super::{Axis, Motor, MotorPair, OperatorInput, TelemetrySink};
use crate::error::Result;

/// Simulated differential motor pair.
///
/// Encoder velocity tracks the last commanded setpoint; `step(dt)`
/// advances each encoder position by `setpoint * dt`.
#[derive(Debug, Default)]
pub struct MockMotorPair {
    setpoints: [f64; 2],
    positions: [f64; 2],
    velocities: [f64; 2],
    inverted: [bool; 2],
}

fn index(motor: Motor) -> usize {
    match motor {
        Motor::One => 0,
        Motor::Two => 1,
    }
}

impl MockMotorPair {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last commanded velocity setpoint.
    pub fn setpoint(&self, motor: Motor) -> f64 {
        self.setpoints[index(motor)]
    }

    /// Force an encoder position, e.g. to start a test mid-revolution.
    pub fn set_encoder_position(&mut self, motor: Motor, ticks: f64) {
        self.positions[index(motor)] = ticks;
    }

    pub fn is_inverted(&self, motor: Motor) -> bool {
        self.inverted[index(motor)]
    }

    /// Advance the simulation by `dt` control periods: positions
    /// integrate the current setpoints, velocities track them exactly.
    pub fn step(&mut self, dt: f64) {
        for i in 0..2 {
            self.positions[i] += self.setpoints[i] * dt;
            self.velocities[i] = self.setpoints[i];
        }
    }
}

impl MotorPair for MockMotorPair {
    fn set_velocity_setpoint(&mut self, motor: Motor, value: f64) -> Result<()> {
        self.setpoints[index(motor)] = value;
        Ok(())
    }

    fn encoder_position(&self, motor: Motor) -> Result<f64> {
        Ok(self.positions[index(motor)])
    }

    fn encoder_velocity(&self, motor: Motor) -> Result<f64> {
        Ok(self.velocities[index(motor)])
    }

    fn set_inverted(&mut self, motor: Motor, inverted: bool) -> Result<()> {
        self.inverted[index(motor)] = inverted;
        Ok(())
    }
}

/// Operator input returning fixed axis values.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedInput {
    pub x: f64,
    pub y: f64,
    pub rotate: f64,
}

impl FixedInput {
    pub fn new(x: f64, y: f64, rotate: f64) -> Self {
        Self { x, y, rotate }
    }
}

impl OperatorInput for FixedInput {
    fn axis(&self, axis: Axis) -> f64 {
        match axis {
            Axis::TranslateX => self.x,
            Axis::TranslateY => self.y,
            Axis::Rotate => self.rotate,
        }
    }
}

/// Telemetry sink recording every published value, for assertions.
#[derive(Debug, Default)]
pub struct RecordingTelemetry {
    pub published: Vec<(String, f64)>,
}

impl RecordingTelemetry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last value published under `key`, if any.
    pub fn get(&self, key: &str) -> Option<f64> {
        self.published
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| *v)
    }
}

impl TelemetrySink for RecordingTelemetry {
    fn publish_number(&mut self, key: &str, value: f64) {
        self.published.push((key.to_string(), value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_integrates_setpoints() {
        let mut pair = MockMotorPair::new();
        pair.set_velocity_setpoint(Motor::One, 10.0).unwrap();
        pair.set_velocity_setpoint(Motor::Two, -4.0).unwrap();
        pair.step(0.5);

        assert_eq!(pair.encoder_position(Motor::One).unwrap(), 5.0);
        assert_eq!(pair.encoder_position(Motor::Two).unwrap(), -2.0);
        assert_eq!(pair.encoder_velocity(Motor::One).unwrap(), 10.0);
    }

    #[test]
    fn test_recording_telemetry_keeps_latest() {
        let mut sink = RecordingTelemetry::new();
        sink.publish_number("k", 1.0);
        sink.publish_number("k", 2.0);
        assert_eq!(sink.get("k"), Some(2.0));
        assert_eq!(sink.get("missing"), None);
    }
}
