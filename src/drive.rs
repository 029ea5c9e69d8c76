//! Four-module drive orchestration.
//!
//! Turns one (translation, rotation) command into four module commands
//! per tick, and maps raw operator axes into that command.

use crate::config::DriveConfig;
use crate::error::Result;
use crate::hal::{Axis, MotorPair, OperatorInput, TelemetrySink};
use crate::kinematics::{self, ModuleId};
use crate::maths::{scalar, Vector2d};
use crate::module::SwerveModule;

/// The complete differential-swerve drivetrain: four module controllers
/// plus the shared kinematics.
pub struct SwerveDrive<M: MotorPair> {
    modules: [SwerveModule<M>; 4],
    positions: [Vector2d; 4],
    max_wheel_velocity: f64,
    deadband: f64,
}

impl<M: MotorPair> SwerveDrive<M> {
    /// Build the drivetrain from a validated configuration and one motor
    /// pair per module, in [`ModuleId::ALL`] order (FR, FL, BR, BL).
    pub fn new(config: &DriveConfig, motor_pairs: [M; 4]) -> Result<Self> {
        config.validate()?;

        let [fr, fl, br, bl] = motor_pairs;
        let modules = [
            SwerveModule::new(ModuleId::FrontRight, config, fr)?,
            SwerveModule::new(ModuleId::FrontLeft, config, fl)?,
            SwerveModule::new(ModuleId::BackRight, config, br)?,
            SwerveModule::new(ModuleId::BackLeft, config, bl)?,
        ];
        let positions = modules.each_ref().map(|m| m.position_vec());

        log::info!(
            "SwerveDrive: four modules up, max wheel velocity {}",
            config.control.max_wheel_velocity
        );

        Ok(Self {
            modules,
            positions,
            max_wheel_velocity: config.control.max_wheel_velocity,
            deadband: config.input.deadband,
        })
    }

    /// Run one drive tick.
    ///
    /// `translation` is field-relative with components in `[-1, 1]`,
    /// `rotation_power` in `[-1, 1]`. The batch-normalized unit-budget
    /// drive vectors are scaled to the configured wheel-velocity ceiling
    /// before being handed to the modules.
    pub fn drive(
        &mut self,
        gyro_heading: f64,
        translation: Vector2d,
        rotation_power: f64,
    ) -> Result<()> {
        let vectors =
            kinematics::calculate_all_modules(gyro_heading, rotation_power, translation, self.positions);

        for (module, vector) in self.modules.iter_mut().zip(vectors) {
            let speed = vector.magnitude() * self.max_wheel_velocity;
            module.set(vector.angle(), speed)?;
        }
        Ok(())
    }

    /// Read the operator axes and apply the deadband remap to each.
    ///
    /// Returns the field-relative translation vector and rotation power
    /// to feed into [`SwerveDrive::drive`].
    pub fn command_from_input<I: OperatorInput>(&self, input: &I) -> (Vector2d, f64) {
        let x = scalar::adjust_deadband(input.axis(Axis::TranslateX), self.deadband);
        let y = scalar::adjust_deadband(input.axis(Axis::TranslateY), self.deadband);
        let rotation = scalar::adjust_deadband(input.axis(Axis::Rotate), self.deadband);
        (Vector2d::new(x, y), rotation)
    }

    /// Convenience: one teleop tick straight from the operator input.
    pub fn drive_from_input<I: OperatorInput>(
        &mut self,
        input: &I,
        gyro_heading: f64,
    ) -> Result<()> {
        let (translation, rotation) = self.command_from_input(input);
        self.drive(gyro_heading, translation, rotation)
    }

    /// Stop every module immediately.
    pub fn stop(&mut self) -> Result<()> {
        for module in &mut self.modules {
            module.stop()?;
        }
        Ok(())
    }

    /// Fan new steering gains out to every module.
    pub fn update_gains(&mut self, p: f64, i: f64, d: f64) {
        log::info!("SwerveDrive: gains updated to p={} i={} d={}", p, i, d);
        for module in &mut self.modules {
            module.update_gains(p, i, d);
        }
    }

    /// Publish every module's state.
    pub fn publish_telemetry<T: TelemetrySink>(&mut self, sink: &mut T) -> Result<()> {
        for module in &mut self.modules {
            module.publish_telemetry(sink)?;
        }
        Ok(())
    }

    /// Borrow one module controller.
    pub fn module(&self, id: ModuleId) -> &SwerveModule<M> {
        &self.modules[Self::index(id)]
    }

    /// Mutably borrow one module controller.
    pub fn module_mut(&mut self, id: ModuleId) -> &mut SwerveModule<M> {
        &mut self.modules[Self::index(id)]
    }

    fn index(id: ModuleId) -> usize {
        match id {
            ModuleId::FrontRight => 0,
            ModuleId::FrontLeft => 1,
            ModuleId::BackRight => 2,
            ModuleId::BackLeft => 3,
        }
    }
}
