//! End-to-end closed-loop tests on the mock motor rig.
//!
//! Drives the full four-module drivetrain through the mock hardware and
//! checks that steering converges to the kinematic targets along the
//! shorter wrap path while wheel speeds respect the velocity budget.

use approx::assert_relative_eq;
use chakra_drive::hal::mock::{MockMotorPair, RecordingTelemetry};
use chakra_drive::hal::Motor;
use chakra_drive::{DriveConfig, ModuleId, SwerveDrive, Vector2d};
use std::f64::consts::{FRAC_PI_2, PI, TAU};

const DT: f64 = 0.02;

fn make_drive(gain_p: f64) -> SwerveDrive<MockMotorPair> {
    let mut config = DriveConfig::testbed_defaults();
    config.control.gain_p = gain_p;
    SwerveDrive::new(&config, [(); 4].map(|_| MockMotorPair::new())).unwrap()
}

fn step_all(drive: &mut SwerveDrive<MockMotorPair>, dt: f64) {
    for id in ModuleId::ALL {
        drive.module_mut(id).motors_mut().step(dt);
    }
}

#[test]
fn forward_translation_steers_all_modules_to_same_angle() {
    let mut drive = make_drive(10.0);

    for _ in 0..400 {
        drive.drive(0.0, Vector2d::new(0.0, 1.0), 0.0).unwrap();
        step_all(&mut drive, DT);
    }

    // A (0, 1) translation points every wheel at π/2
    for id in ModuleId::ALL {
        let angle = drive.module(id).position_rad_normalized().unwrap();
        assert_relative_eq!(angle, FRAC_PI_2, epsilon = 1e-3);
    }
}

#[test]
fn rotation_in_place_steers_modules_tangentially() {
    let mut drive = make_drive(10.0);

    for _ in 0..400 {
        drive.drive(0.0, Vector2d::ZERO, 0.5).unwrap();
        step_all(&mut drive, DT);
    }

    // Each module must end up perpendicular to its position vector
    for id in ModuleId::ALL {
        let module = drive.module(id);
        let angle = module.position_rad_normalized().unwrap();
        let radius_angle = module.position_vec().angle();

        let offset = (angle - radius_angle).rem_euclid(TAU);
        assert_relative_eq!(offset, FRAC_PI_2, epsilon = 1e-3);
    }
}

#[test]
fn steering_takes_shorter_wrap_path() {
    let mut drive = make_drive(1.0);

    // Command a target 4 ticks away on a 5-tick revolution. The raw
    // difference is +4; the wrap-aware loop must steer -1 instead.
    let target_angle = 4.0 * TAU / 5.0;
    drive
        .module_mut(ModuleId::FrontLeft)
        .set(target_angle, 0.0)
        .unwrap();

    let module = drive.module(ModuleId::FrontLeft);
    assert_relative_eq!(module.motors().setpoint(Motor::Two), -1.0, epsilon = 1e-12);

    // Let the loop run; the module settles at the commanded angle having
    // moved backwards through less than half a revolution.
    let mut min_position: f64 = 0.0;
    for _ in 0..600 {
        drive
            .module_mut(ModuleId::FrontLeft)
            .set(target_angle, 0.0)
            .unwrap();
        step_all(&mut drive, DT);
        let pos = drive
            .module(ModuleId::FrontLeft)
            .position_native()
            .unwrap();
        min_position = min_position.min(pos);
    }

    let settled = drive
        .module(ModuleId::FrontLeft)
        .position_native()
        .unwrap();
    assert_relative_eq!(settled, -1.0, epsilon = 1e-2);
    // Never wandered more than half a revolution from the start
    assert!(min_position > -2.5, "overshot the wrap: {}", min_position);
}

#[test]
fn wheel_speeds_never_exceed_velocity_ceiling() {
    let mut drive = make_drive(5.0);

    // Saturating command: full diagonal translation plus full rotation
    for _ in 0..50 {
        drive.drive(0.3, Vector2d::new(1.0, 1.0), 1.0).unwrap();
        step_all(&mut drive, DT);

        for id in ModuleId::ALL {
            let m1 = drive.module(id).motors().setpoint(Motor::One).abs();
            assert!(m1 <= 2000.0 + 1e-9, "{}: wheel speed {}", id, m1);
        }
    }
}

#[test]
fn gyro_heading_keeps_command_field_relative() {
    // A field +x command with the robot turned a quarter turn lands at
    // π/2 once rotated into the robot frame.
    let mut drive = make_drive(10.0);

    for _ in 0..400 {
        drive.drive(FRAC_PI_2, Vector2d::new(1.0, 0.0), 0.0).unwrap();
        step_all(&mut drive, DT);
    }

    for id in ModuleId::ALL {
        let angle = drive.module(id).position_rad_normalized().unwrap();
        assert_relative_eq!(angle, FRAC_PI_2, epsilon = 1e-3);
    }
}

#[test]
fn stop_halts_the_rig() {
    let mut drive = make_drive(10.0);
    drive.drive(0.0, Vector2d::new(0.0, 1.0), 0.2).unwrap();
    drive.stop().unwrap();
    step_all(&mut drive, DT);

    for id in ModuleId::ALL {
        assert_eq!(drive.module(id).velocity().unwrap(), 0.0);
        assert_eq!(drive.module(id).motor1_velocity().unwrap(), 0.0);
    }
}

#[test]
fn telemetry_covers_every_module() {
    let mut drive = make_drive(1.0);
    let mut sink = RecordingTelemetry::new();
    drive.publish_telemetry(&mut sink).unwrap();

    for label in ["FR", "FL", "BR", "BL"] {
        assert!(sink.get(&format!("{} position native", label)).is_some());
        assert!(sink.get(&format!("{} velocity", label)).is_some());
    }
}

#[test]
fn module_positions_match_geometry() {
    let drive = make_drive(1.0);
    assert_eq!(
        drive.module(ModuleId::FrontRight).position_vec(),
        Vector2d::new(5.0, 5.0)
    );
    assert_eq!(
        drive.module(ModuleId::BackLeft).position_vec(),
        Vector2d::new(-5.0, -5.0)
    );
}

#[test]
fn half_revolution_target_is_reachable() {
    // π is exactly half a revolution: wrapped error is -N/2, a valid
    // (negative-end) representative. The loop still settles there.
    let mut drive = make_drive(8.0);

    for _ in 0..800 {
        drive.module_mut(ModuleId::BackRight).set(PI, 0.0).unwrap();
        step_all(&mut drive, DT);
    }

    let angle = drive
        .module(ModuleId::BackRight)
        .position_rad_normalized()
        .unwrap();
    assert_relative_eq!(angle.abs(), PI, epsilon = 1e-2);
}
