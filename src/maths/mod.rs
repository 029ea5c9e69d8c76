//! Floating-point geometry and control-law primitives.

pub mod pid;
pub mod scalar;
pub mod vector;

pub use pid::{PidGains, WrapAwarePid};
pub use vector::Vector2d;
