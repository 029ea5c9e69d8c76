//! Single differential-swerve module controller.
//!
//! One module is steered and driven by two motors: the sum of their
//! angular velocities rotates the module (steering), their difference
//! spins the wheel (drive). The controller closes a wrap-aware position
//! loop on the steering angle and mixes the correction into the two
//! velocity setpoints.

use std::f64::consts::TAU;

use crate::config::DriveConfig;
use crate::error::Result;
use crate::hal::{Motor, MotorPair, TelemetrySink};
use crate::kinematics::{module_position, ModuleId};
use crate::maths::{scalar, PidGains, Vector2d, WrapAwarePid};

/// Controller for one swerve module, bound to its motor pair.
///
/// Exactly one `set`/`set_vector`/`stop` call per control tick is the
/// contract; the PID state is owned here and mutated on each `set`.
pub struct SwerveModule<M: MotorPair> {
    id: ModuleId,
    position_vec: Vector2d,
    motors: M,
    pid: WrapAwarePid,
    ticks_per_rev: f64,
    safety_bound: f64,
    saturation_count: u64,
}

impl<M: MotorPair> SwerveModule<M> {
    /// Bind a module controller to its motor pair.
    ///
    /// Validates the configuration, derives the static position vector
    /// from the robot geometry and configures motor polarity. All
    /// configuration errors surface here, never at runtime.
    pub fn new(id: ModuleId, config: &DriveConfig, mut motors: M) -> Result<Self> {
        config.validate()?;

        let position_vec = module_position(
            id,
            config.geometry.width / 2.0,
            config.geometry.length / 2.0,
        );

        let pid = WrapAwarePid::new(
            config.gains(),
            config.control.ticks_per_rev,
            config.control.output_min,
            config.control.output_max,
        )?;

        // Polarities; unlikely to change on this hardware
        motors.set_inverted(Motor::One, false)?;
        motors.set_inverted(Motor::Two, false)?;

        log::debug!(
            "SwerveModule {}: bound at {} ({} ticks/rev)",
            id,
            position_vec,
            config.control.ticks_per_rev
        );

        Ok(Self {
            id,
            position_vec,
            motors,
            pid,
            ticks_per_rev: config.control.ticks_per_rev,
            safety_bound: config.control.safety_bound,
            saturation_count: 0,
        })
    }

    /// Module id.
    pub fn id(&self) -> ModuleId {
        self.id
    }

    /// Static position vector relative to the rotation center.
    pub fn position_vec(&self) -> Vector2d {
        self.position_vec
    }

    /// Command a steering angle (radians) and wheel speed (native
    /// velocity units) for this tick.
    ///
    /// The angle is converted to native tick space and closed-loop
    /// steered via the wrap-aware PID, so the module always takes the
    /// shorter rotational path. The correction is bounded before mixing:
    /// motor one carries `+speed`, motor two `-speed + correction`, which
    /// steers the module without disturbing the net wheel speed.
    pub fn set(&mut self, angle_rad: f64, speed: f64) -> Result<()> {
        let target_ticks = angle_rad * self.ticks_per_rev / TAU;
        let current_ticks = self.position_native()?;

        let correction = self.pid.step(target_ticks, current_ticks);
        let bounded = scalar::limit(correction, self.safety_bound);
        if bounded != correction {
            self.saturation_count += 1;
            log::debug!(
                "SwerveModule {}: correction {:.3} saturated to {:.3}",
                self.id,
                correction,
                bounded
            );
        }

        log::trace!(
            "SwerveModule {}: target={:.3} ticks, current={:.3} ticks, correction={:.3}",
            self.id,
            target_ticks,
            current_ticks,
            bounded
        );

        self.motors.set_velocity_setpoint(Motor::One, speed)?;
        self.motors.set_velocity_setpoint(Motor::Two, -speed + bounded)?;
        Ok(())
    }

    /// Command the module from a drive vector: angle is the steering
    /// target, magnitude the wheel speed.
    pub fn set_vector(&mut self, vector: Vector2d) -> Result<()> {
        self.set(vector.angle(), vector.magnitude())
    }

    /// Zero both motor setpoints. Callable at any time as a replacement
    /// for the tick's setpoint write.
    pub fn stop(&mut self) -> Result<()> {
        self.motors.set_velocity_setpoint(Motor::One, 0.0)?;
        self.motors.set_velocity_setpoint(Motor::Two, 0.0)?;
        Ok(())
    }

    /// Module angular position in native ticks, unnormalized: the average
    /// of the two motor encoders.
    pub fn position_native(&self) -> Result<f64> {
        let p1 = self.motors.encoder_position(Motor::One)?;
        let p2 = self.motors.encoder_position(Motor::Two)?;
        Ok((p1 + p2) / 2.0)
    }

    /// Module position wrapped to `[-ticks_per_rev/2, ticks_per_rev/2)`.
    pub fn position_native_normalized(&self) -> Result<f64> {
        Ok(scalar::normalize_angle_native(
            self.position_native()?,
            self.ticks_per_rev,
        ))
    }

    /// Module position in radians, wrapped to `[-π, π)`.
    pub fn position_rad_normalized(&self) -> Result<f64> {
        Ok(scalar::normalize_angle_rad2(
            self.position_native()? * TAU / self.ticks_per_rev,
        ))
    }

    /// Module angular velocity: the average of the two encoder velocities.
    pub fn velocity(&self) -> Result<f64> {
        let v1 = self.motors.encoder_velocity(Motor::One)?;
        let v2 = self.motors.encoder_velocity(Motor::Two)?;
        Ok((v1 + v2) / 2.0)
    }

    /// Velocity of the first motor alone, for bring-up diagnostics.
    pub fn motor1_velocity(&self) -> Result<f64> {
        self.motors.encoder_velocity(Motor::One)
    }

    /// Replace the steering gains, keeping accumulated PID state.
    pub fn update_gains(&mut self, p: f64, i: f64, d: f64) {
        self.pid.set_gains(PidGains::new(p, i, d));
    }

    /// Reset the steering loop (integral accumulator and previous error).
    pub fn reset_control(&mut self) {
        self.pid.reset();
    }

    /// Publish module state to a telemetry sink.
    pub fn publish_telemetry<T: TelemetrySink>(&mut self, sink: &mut T) -> Result<()> {
        let label = self.id.label();
        sink.publish_number(&format!("{} position native", label), self.position_native()?);
        sink.publish_number(
            &format!("{} position rad", label),
            self.position_rad_normalized()?,
        );
        sink.publish_number(&format!("{} velocity", label), self.velocity()?);
        sink.publish_number(
            &format!("{} saturation count", label),
            self.saturation_count as f64,
        );
        Ok(())
    }

    /// Borrow the underlying motor pair.
    pub fn motors(&self) -> &M {
        &self.motors
    }

    /// Mutably borrow the underlying motor pair (simulation stepping,
    /// hardware reconfiguration).
    pub fn motors_mut(&mut self) -> &mut M {
        &mut self.motors
    }
}
