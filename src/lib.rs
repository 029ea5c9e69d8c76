//! chakra-drive - differential swerve drive control core
//!
//! Computes per-wheel steering angles and drive speeds for a four-module
//! differential-swerve drivetrain, and closes the wrap-aware position
//! loop that steers each module's motor pair to the commanded angle.
//!
//! Hardware lives behind the traits in [`hal`]; the crate ships a
//! deterministic mock rig in [`hal::mock`] for hardware-free testing.

pub mod config;
pub mod drive;
pub mod error;
pub mod hal;
pub mod kinematics;
pub mod maths;
pub mod module;

// Re-export commonly used types
pub use config::DriveConfig;
pub use drive::SwerveDrive;
pub use error::{Error, Result};
pub use kinematics::ModuleId;
pub use maths::Vector2d;
pub use module::SwerveModule;
