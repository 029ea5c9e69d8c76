//! Scalar normalization and mapping utilities.
//!
//! Angle wrapping, native encoder-tick wrapping, affine remapping and
//! joystick deadband adjustment. All functions are total and pure.

use std::f64::consts::{PI, TAU};

/// Clamp `value` to `[-bound, bound]`, preserving sign.
///
/// `bound` should be passed as a non-negative number. Returns `value`
/// unchanged whenever `|value| < bound`.
///
/// # Example
/// ```
/// use chakra_drive::maths::scalar::limit;
///
/// assert_eq!(limit(3.0, 5.0), 3.0);
/// assert_eq!(limit(-7.0, 5.0), -5.0);
/// ```
#[inline]
pub fn limit(value: f64, bound: f64) -> f64 {
    if value.abs() < bound {
        value
    } else if value < 0.0 {
        -bound
    } else {
        bound
    }
}

/// Return whichever of `a`, `b` is closest to zero.
///
/// Ties go to `a`.
#[inline]
pub fn abs_min(a: f64, b: f64) -> f64 {
    if a.abs() <= b.abs() { a } else { b }
}

/// Normalize an angle in radians to `[0, 2π)`.
///
/// # Example
/// ```
/// use chakra_drive::maths::scalar::normalize_angle_rad;
/// use std::f64::consts::PI;
///
/// assert!((normalize_angle_rad(-PI / 2.0) - 1.5 * PI).abs() < 1e-12);
/// ```
#[inline]
pub fn normalize_angle_rad(angle: f64) -> f64 {
    let mut scaled = angle % TAU;
    if scaled < 0.0 {
        scaled += TAU;
    }
    scaled
}

/// Normalize an angle in radians to `[-π, π)`.
#[inline]
pub fn normalize_angle_rad2(angle: f64) -> f64 {
    let mut scaled = (angle + PI) % TAU;
    if scaled < 0.0 {
        scaled += TAU;
    }
    scaled - PI
}

/// Normalize an angle in degrees to `[0, 360)`.
#[inline]
pub fn normalize_angle_deg(angle: f64) -> f64 {
    let mut scaled = angle % 360.0;
    if scaled < 0.0 {
        scaled += 360.0;
    }
    scaled
}

/// Normalize an angle in degrees to `[-180, 180)`.
#[inline]
pub fn normalize_angle_deg2(angle: f64) -> f64 {
    let mut scaled = (angle + 180.0) % 360.0;
    if scaled < 0.0 {
        scaled += 360.0;
    }
    scaled - 180.0
}

/// Normalize an encoder count to `[-ticks_per_rev/2, ticks_per_rev/2)`.
///
/// Generalizes the radian/degree wraps to an arbitrary modulus. The `%`
/// operator in Rust keeps the sign of the dividend, so the intermediate
/// result must be shifted back into the positive range before the final
/// subtraction.
///
/// # Example
/// ```
/// use chakra_drive::maths::scalar::normalize_angle_native;
///
/// assert_eq!(normalize_angle_native(7.0, 5.0), 2.0);
/// assert_eq!(normalize_angle_native(4.0, 5.0), -1.0);
/// ```
#[inline]
pub fn normalize_angle_native(ticks: f64, ticks_per_rev: f64) -> f64 {
    let half = ticks_per_rev / 2.0;
    let mut scaled = (ticks + half) % ticks_per_rev;
    if scaled < 0.0 {
        scaled += ticks_per_rev;
    }
    scaled - half
}

/// Affine remap of `value` from the range `a..b` to the range `c..d`,
/// such that `map(a) == c` and `map(b) == d`.
///
/// Caller must ensure `a != b`; range bounds coming from configuration
/// are validated there.
#[inline]
pub fn map(value: f64, a: f64, b: f64, c: f64, d: f64) -> f64 {
    ((value - a) * (d - c) / (b - a)) + c
}

/// Remap a joystick axis so it reads zero inside the deadband and
/// `0..1` (by magnitude) outside of it.
///
/// The zero point is shifted to the edge of the deadband, so the output
/// is continuous at the boundary: an axis value exactly at
/// `deadband_min` maps to 0.
#[inline]
pub fn adjust_deadband(axis_value: f64, deadband_min: f64) -> f64 {
    let abs = axis_value.abs();
    if abs < deadband_min {
        return 0.0;
    }
    axis_value.signum() * map(abs, deadband_min, 1.0, 0.0, 1.0)
}
