//! Drive configuration.
//!
//! Loaded from a TOML file and validated at the boundary, so the per-tick
//! control path never re-checks its parameters. Gains live here rather
//! than in an ambient tunable store; live retuning goes through the
//! explicit `update_gains` calls on module and drive.

use crate::error::{Error, Result};
use crate::maths::PidGains;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Top-level drive configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DriveConfig {
    pub geometry: GeometryConfig,
    pub control: ControlConfig,
    pub input: InputConfig,
}

/// Robot frame geometry
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeometryConfig {
    /// Track width (distance between left and right modules)
    pub width: f64,
    /// Wheelbase length (distance between front and back modules)
    pub length: f64,
}

/// Steering-loop control parameters
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ControlConfig {
    /// Encoder ticks per full module revolution (the wrap modulus)
    pub ticks_per_rev: f64,
    /// Proportional gain
    pub gain_p: f64,
    /// Integral gain
    pub gain_i: f64,
    /// Derivative gain
    pub gain_d: f64,
    /// Lower bound of the raw PID output
    pub output_min: f64,
    /// Upper bound of the raw PID output
    pub output_max: f64,
    /// Magnitude bound applied to the steering correction before it is
    /// mixed into the motor setpoints
    pub safety_bound: f64,
    /// Wheel speed (ticks per control period) corresponding to a
    /// full-scale drive command
    pub max_wheel_velocity: f64,
}

/// Operator input parameters
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InputConfig {
    /// Neutral zone around the axis center, in `[0, 1)`
    pub deadband: f64,
}

impl DriveConfig {
    /// Load configuration from a TOML file and validate it.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: DriveConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Default configuration for the 10x10 differential-swerve testbed.
    pub fn testbed_defaults() -> Self {
        Self {
            geometry: GeometryConfig {
                width: 10.0,
                length: 10.0,
            },
            control: ControlConfig {
                ticks_per_rev: 5.0,
                gain_p: 1.0,
                gain_i: 0.0,
                gain_d: 0.0,
                output_min: -100.0,
                output_max: 100.0,
                safety_bound: 100.0,
                max_wheel_velocity: 2000.0,
            },
            input: InputConfig { deadband: 0.15 },
        }
    }

    /// Steering gains as a [`PidGains`] value.
    pub fn gains(&self) -> PidGains {
        PidGains::new(self.control.gain_p, self.control.gain_i, self.control.gain_d)
    }

    /// Reject invalid parameters.
    ///
    /// Everything the hot control path assumes about its inputs is
    /// checked here, once.
    pub fn validate(&self) -> Result<()> {
        if !(self.geometry.width > 0.0) || !(self.geometry.length > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "robot geometry must be positive, got {}x{}",
                self.geometry.width, self.geometry.length
            )));
        }
        if !(self.control.ticks_per_rev >= 1.0) {
            return Err(Error::InvalidParameter(format!(
                "ticks_per_rev must be >= 1, got {}",
                self.control.ticks_per_rev
            )));
        }
        if !(self.control.output_min < self.control.output_max) {
            return Err(Error::InvalidParameter(format!(
                "PID output range is empty: [{}, {}]",
                self.control.output_min, self.control.output_max
            )));
        }
        if !(self.control.safety_bound >= 0.0) {
            return Err(Error::InvalidParameter(format!(
                "safety_bound must be non-negative, got {}",
                self.control.safety_bound
            )));
        }
        if !(self.control.max_wheel_velocity > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "max_wheel_velocity must be positive, got {}",
                self.control.max_wheel_velocity
            )));
        }
        if !(0.0..1.0).contains(&self.input.deadband) {
            return Err(Error::InvalidParameter(format!(
                "deadband must be in [0, 1), got {}",
                self.input.deadband
            )));
        }
        Ok(())
    }
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self::testbed_defaults()
    }
}
