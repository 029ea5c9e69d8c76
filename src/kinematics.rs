//! Swerve kinematics: module geometry, per-module drive vectors and
//! batch magnitude normalization.
//!
//! Geometry is pure — no actuator handles here. Binding a module position
//! to its motor pair happens in [`crate::module`].

use std::f64::consts::FRAC_PI_2;

use crate::maths::Vector2d;

/// Identifies one of the four swerve modules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModuleId {
    FrontRight,
    FrontLeft,
    BackRight,
    BackLeft,
}

impl ModuleId {
    /// All module ids in construction order.
    pub const ALL: [ModuleId; 4] = [
        ModuleId::FrontRight,
        ModuleId::FrontLeft,
        ModuleId::BackRight,
        ModuleId::BackLeft,
    ];

    /// Short label used in log messages and telemetry keys.
    pub fn label(&self) -> &'static str {
        match self {
            ModuleId::FrontRight => "FR",
            ModuleId::FrontLeft => "FL",
            ModuleId::BackRight => "BR",
            ModuleId::BackLeft => "BL",
        }
    }
}

impl std::fmt::Display for ModuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Static position vector of a module relative to the rotation center.
///
/// `half_width`/`half_length` are half the robot's track and wheelbase;
/// x grows to the right, y forward.
pub fn module_position(id: ModuleId, half_width: f64, half_length: f64) -> Vector2d {
    match id {
        ModuleId::FrontRight => Vector2d::new(half_width, half_length),
        ModuleId::FrontLeft => Vector2d::new(-half_width, half_length),
        ModuleId::BackRight => Vector2d::new(half_width, -half_length),
        ModuleId::BackLeft => Vector2d::new(-half_width, -half_length),
    }
}

/// Compute the drive vector for one module.
///
/// The field-relative `translation` is rotated by `gyro_heading` into the
/// robot frame. The rotation contribution is the module position scaled to
/// length `rotation_power` and rotated a quarter turn — the tangential
/// velocity of a wheel spinning the robot about its center. Translation
/// and rotation are independent in velocity space, so the drive vector is
/// their sum: its angle is the steering target and its magnitude the
/// wheel speed.
pub fn calculate_drive_vector(
    gyro_heading: f64,
    rotation_power: f64,
    translation: Vector2d,
    module_position: Vector2d,
) -> Vector2d {
    let translation_robot = translation.rotate(gyro_heading);
    let rotation_vec = module_position.normalize_to(rotation_power).rotate(FRAC_PI_2);
    translation_robot + rotation_vec
}

/// Proportionally rescale a batch of vectors so the longest does not
/// exceed `limit`.
///
/// If no vector exceeds the limit the batch is returned unchanged.
/// Otherwise every vector is scaled by `limit / max_magnitude`, so the
/// relative magnitudes are preserved and the largest result has magnitude
/// exactly `limit`. This keeps the commanded motion shape intact when a
/// wheel would otherwise be driven past its physical speed limit.
pub fn batch_normalize<const N: usize>(limit: f64, vectors: [Vector2d; N]) -> [Vector2d; N] {
    let max_magnitude = vectors
        .iter()
        .map(Vector2d::magnitude)
        .fold(0.0f64, f64::max);

    if limit >= max_magnitude {
        return vectors;
    }

    vectors.map(|v| v.scale(limit / max_magnitude))
}

/// Compute drive vectors for every module and normalize the batch
/// against a unit speed budget.
pub fn calculate_all_modules<const N: usize>(
    gyro_heading: f64,
    rotation_power: f64,
    translation: Vector2d,
    module_positions: [Vector2d; N],
) -> [Vector2d; N] {
    let drive_vectors = module_positions
        .map(|pos| calculate_drive_vector(gyro_heading, rotation_power, translation, pos));

    batch_normalize(1.0, drive_vectors)
}
