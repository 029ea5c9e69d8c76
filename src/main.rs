//! chakra-drive demo binary.
//!
//! Runs the full drivetrain against the mock motor rig at a fixed
//! control period: a few seconds of field-forward translation, then a
//! spin in place, logging module state along the way.

use std::env;
use std::f64::consts::FRAC_PI_2;
use std::path::Path;
use std::thread;
use std::time::Duration;

use chakra_drive::hal::mock::MockMotorPair;
use chakra_drive::hal::NullTelemetry;
use chakra_drive::{DriveConfig, ModuleId, Result, SwerveDrive, Vector2d};

/// Control period of the demo loop.
const TICK: Duration = Duration::from_millis(20);

/// Parse config path from command line arguments.
///
/// Supports:
/// - `chakra-drive <path>` (positional)
/// - `chakra-drive --config <path>` (flag-based)
/// - `chakra-drive -c <path>` (short flag)
fn parse_config_path() -> Option<String> {
    let args: Vec<String> = env::args().collect();

    for i in 1..args.len() {
        if (args[i] == "--config" || args[i] == "-c") && i + 1 < args.len() {
            return Some(args[i + 1].clone());
        }
    }

    if args.len() > 1 && !args[1].starts_with('-') {
        return Some(args[1].clone());
    }

    None
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("chakra-drive demo starting...");

    let config = match parse_config_path() {
        Some(path) if Path::new(&path).exists() => {
            log::info!("Using config: {}", path);
            DriveConfig::from_file(&path)?
        }
        Some(path) => {
            log::warn!("Config {} not found, using testbed defaults", path);
            DriveConfig::testbed_defaults()
        }
        None => DriveConfig::testbed_defaults(),
    };

    let mut drive = SwerveDrive::new(&config, [(); 4].map(|_| MockMotorPair::new()))?;
    let mut telemetry = NullTelemetry;
    let dt = TICK.as_secs_f64();

    // Phase 1: field-forward translation
    log::info!("Phase 1: translating forward");
    for tick in 0..150 {
        drive.drive(0.0, Vector2d::new(0.0, 1.0), 0.0)?;
        step_mocks(&mut drive, dt);
        drive.publish_telemetry(&mut telemetry)?;

        if tick % 25 == 0 {
            let fr = drive.module(ModuleId::FrontRight);
            log::info!(
                "tick {:3}: FR angle {:.3} rad (target {:.3}), velocity {:.1}",
                tick,
                fr.position_rad_normalized()?,
                FRAC_PI_2,
                fr.velocity()?
            );
        }
        thread::sleep(TICK);
    }

    // Phase 2: spin in place
    log::info!("Phase 2: rotating in place");
    for tick in 0..150 {
        drive.drive(0.0, Vector2d::ZERO, 0.5)?;
        step_mocks(&mut drive, dt);
        drive.publish_telemetry(&mut telemetry)?;

        if tick % 25 == 0 {
            let fr = drive.module(ModuleId::FrontRight);
            log::info!(
                "tick {:3}: FR angle {:.3} rad, velocity {:.1}",
                tick,
                fr.position_rad_normalized()?,
                fr.velocity()?
            );
        }
        thread::sleep(TICK);
    }

    drive.stop()?;
    log::info!("Demo complete, drive stopped");
    Ok(())
}

/// Advance every mock motor pair by one control period.
fn step_mocks(drive: &mut SwerveDrive<MockMotorPair>, dt: f64) {
    for id in ModuleId::ALL {
        drive.module_mut(id).motors_mut().step(dt);
    }
}
