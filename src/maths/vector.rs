//! Immutable 2D vector type.
//!
//! Drive commands, module positions and per-module drive vectors are all
//! `Vector2d` values. Every operation returns a new vector.

use super::scalar;

/// Two-dimensional vector with `f64` components.
///
/// Equality is exact floating-point comparison (bit-for-bit values
/// compare equal); use [`Vector2d::approx_eq`] where tolerance is needed.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector2d {
    pub x: f64,
    pub y: f64,
}

impl Vector2d {
    /// The zero vector.
    pub const ZERO: Vector2d = Vector2d { x: 0.0, y: 0.0 };

    /// Create a new vector from cartesian components.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Magnitude (length) of the vector.
    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Angle of the vector in radians, wrapped to `[0, 2π)`.
    pub fn angle(&self) -> f64 {
        scalar::normalize_angle_rad(self.y.atan2(self.x))
    }

    /// Scale the vector by `factor`. Angle is unchanged (or flipped for
    /// negative factors), magnitude is multiplied.
    pub fn scale(&self, factor: f64) -> Vector2d {
        Vector2d::new(self.x * factor, self.y * factor)
    }

    /// Rotate the vector counter-clockwise by `angle` radians.
    pub fn rotate(&self, angle: f64) -> Vector2d {
        let (sin, cos) = angle.sin_cos();
        Vector2d::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    /// Normalize the vector to unit length.
    ///
    /// The zero vector has no direction; normalizing it returns the zero
    /// vector rather than NaN components. All call sites rely on this
    /// zero-in, zero-out behavior.
    pub fn normalize(&self) -> Vector2d {
        self.normalize_to(1.0)
    }

    /// Normalize the vector to length `target`.
    ///
    /// Same zero-vector policy as [`Vector2d::normalize`].
    pub fn normalize_to(&self, target: f64) -> Vector2d {
        let magnitude = self.magnitude();
        if magnitude == 0.0 {
            return Vector2d::ZERO;
        }
        self.scale(target / magnitude)
    }

    /// Dot product of two vectors.
    pub fn dot(&self, other: Vector2d) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Component-wise absolute value (reflection into the first quadrant).
    pub fn abs(&self) -> Vector2d {
        Vector2d::new(self.x.abs(), self.y.abs())
    }

    /// Component-wise comparison within `epsilon`.
    pub fn approx_eq(&self, other: Vector2d, epsilon: f64) -> bool {
        (self.x - other.x).abs() <= epsilon && (self.y - other.y).abs() <= epsilon
    }
}

impl std::ops::Add for Vector2d {
    type Output = Vector2d;

    fn add(self, other: Vector2d) -> Vector2d {
        Vector2d::new(self.x + other.x, self.y + other.y)
    }
}

impl std::fmt::Display for Vector2d {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
