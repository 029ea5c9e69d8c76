//! Hardware abstraction traits.
//!
//! The control core never talks to hardware directly: motor pairs,
//! operator input and telemetry are all behind traits, with real
//! implementations supplied by the embedding application and mocks in
//! [`mock`] for hardware-free testing.

pub mod mock;

use crate::error::Result;

/// Index of one motor within a differential pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motor {
    One,
    Two,
}

/// Operator input axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    TranslateX,
    TranslateY,
    Rotate,
}

/// Two velocity-controlled motors driving one differential swerve module.
///
/// Configured once at construction, then invoked every control tick.
/// Setpoints and encoder readings are in native encoder units
/// (ticks, ticks per control period).
pub trait MotorPair {
    /// Command a velocity setpoint on one motor.
    fn set_velocity_setpoint(&mut self, motor: Motor, value: f64) -> Result<()>;

    /// Current encoder position in native ticks (unnormalized).
    fn encoder_position(&self, motor: Motor) -> Result<f64>;

    /// Current encoder velocity in ticks per control period.
    fn encoder_velocity(&self, motor: Motor) -> Result<f64>;

    /// Set motor inversion. Called once during module construction.
    fn set_inverted(&mut self, motor: Motor, inverted: bool) -> Result<()>;
}

/// Source of operator commands.
pub trait OperatorInput {
    /// Axis value in `[-1, 1]`.
    fn axis(&self, axis: Axis) -> f64;
}

/// Write-only telemetry sink. Fire-and-forget: values are never read
/// back by the control core.
pub trait TelemetrySink {
    fn publish_number(&mut self, key: &str, value: f64);
}

/// Telemetry sink that discards everything.
pub struct NullTelemetry;

impl TelemetrySink for NullTelemetry {
    fn publish_number(&mut self, _key: &str, _value: f64) {}
}
