//! End-to-end mission runs against the scripted detector and recording
//! vehicle. The issued-command trace is the oracle.

use tagnav_mission::sim::{square_detection, RecordingVehicle, ScriptedDetector, VehicleCall};
use tagnav_mission::{
    run_mission, MissionConfig, MissionError, MotionCommand, SearchMode, TargetResolution,
    Velocity,
};

use tagnav_mission::MotionCommand::{MoveForward, RotateCcw, RotateCw};

const FRAME_CENTER_X: f32 = 320.0;
const CENTER_Y: f32 = 240.0;

fn centered(id: u32, side_px: f32) -> Vec<tagnav_core::Detection> {
    vec![square_detection(id, FRAME_CENTER_X, CENTER_Y, side_px)]
}

#[test]
fn worked_two_target_scenario_round_trip() {
    let config = MissionConfig {
        targets: vec![0, 1],
        // Search sweeps at 15 deg, alignment corrections at 10 deg.
        search_rotation_deg: 15,
        ..MissionConfig::default()
    };

    // Apparent widths chosen so the pinhole estimate truncates to 50 cm and
    // 30 cm respectively (20 * 77.4 * 10 / w).
    let width_50cm = 309.0;
    let width_30cm = 515.0;

    let frames = vec![
        // Target 0: four frames right of center -> CW 10 each.
        vec![square_detection(0, 500.0, CENTER_Y, 60.0)],
        vec![square_detection(0, 500.0, CENTER_Y, 60.0)],
        vec![square_detection(0, 500.0, CENTER_Y, 60.0)],
        vec![square_detection(0, 500.0, CENTER_Y, 60.0)],
        // Fifth frame flips sides: retry bound hit, escape CCW 40 / CW 35.
        vec![square_detection(0, 100.0, CENTER_Y, 60.0)],
        // Aligned now; centered detection 50 cm out -> MoveForward 50.
        centered(0, width_50cm),
        // Target 1: one miss -> search CW 15, then centered at 30 cm.
        vec![],
        centered(1, width_30cm),
    ];

    let mut vehicle = RecordingVehicle::new();
    let mut detector = ScriptedDetector::new(frames);
    let report = run_mission(&mut vehicle, &mut detector, &config).unwrap();

    assert_eq!(
        report.outcomes,
        vec![(0, TargetResolution::Arrived), (1, TargetResolution::Arrived)]
    );
    assert_eq!(
        report.outbound.commands(),
        &[
            RotateCw(10),
            RotateCw(10),
            RotateCw(10),
            RotateCw(10),
            RotateCcw(40),
            RotateCw(35),
            MoveForward(50),
            RotateCw(15),
            MoveForward(30),
        ]
    );
    assert_eq!(
        report.compacted,
        vec![
            RotateCw(40),
            RotateCcw(40),
            RotateCw(35),
            MoveForward(50),
            RotateCw(15),
            MoveForward(30),
        ]
    );
    // Trim drops everything through the first advance plus one more entry.
    assert_eq!(report.return_route, vec![RotateCw(180), MoveForward(30)]);

    // The vehicle saw the outbound motions, then the return leg, bracketed
    // by exactly one takeoff and one landing.
    assert_eq!(vehicle.trace.first(), Some(&VehicleCall::Takeoff));
    assert_eq!(vehicle.trace.last(), Some(&VehicleCall::Land));
    assert_eq!(
        vehicle.motion_trace(),
        vec![
            VehicleCall::RotateCw(10),
            VehicleCall::RotateCw(10),
            VehicleCall::RotateCw(10),
            VehicleCall::RotateCw(10),
            VehicleCall::RotateCcw(40),
            VehicleCall::RotateCw(35),
            VehicleCall::MoveForward(50),
            VehicleCall::RotateCw(15),
            VehicleCall::MoveForward(30),
            VehicleCall::RotateCw(180),
            VehicleCall::MoveForward(30),
        ]
    );
    assert_eq!(detector.frames_left(), 0);
}

#[test]
fn low_battery_never_takes_off() {
    let config = MissionConfig {
        targets: vec![0],
        ..MissionConfig::default()
    };
    let mut vehicle = RecordingVehicle::with_battery(15);
    let mut detector = ScriptedDetector::new(vec![centered(0, 515.0)]);

    let err = run_mission(&mut vehicle, &mut detector, &config).unwrap_err();
    assert!(matches!(
        err,
        MissionError::LowBattery {
            percent: 15,
            min_percent: 20
        }
    ));
    // Defensive landing only; no takeoff was ever issued.
    assert_eq!(vehicle.trace, vec![VehicleCall::Land]);
}

#[test]
fn lost_target_is_skipped_not_fatal() {
    let config = MissionConfig {
        targets: vec![0, 1],
        ..MissionConfig::default()
    };
    let frames = vec![
        // Target 0 shows up off-center, then vanishes before arrival.
        vec![square_detection(0, 500.0, CENTER_Y, 60.0)],
        vec![],
        // Target 1 resolves normally 30 cm out.
        centered(1, 515.0),
    ];
    let mut vehicle = RecordingVehicle::new();
    let mut detector = ScriptedDetector::new(frames);

    let report = run_mission(&mut vehicle, &mut detector, &config).unwrap();
    assert_eq!(
        report.outcomes,
        vec![(0, TargetResolution::Lost), (1, TargetResolution::Arrived)]
    );
    // No forward advance was spent on the lost target.
    assert_eq!(
        report.outbound.commands(),
        &[RotateCw(10), MoveForward(30)]
    );
}

#[test]
fn command_failure_still_lands() {
    let config = MissionConfig {
        targets: vec![0],
        ..MissionConfig::default()
    };
    let frames = vec![vec![], vec![]];
    let mut vehicle = RecordingVehicle::new();
    // Takeoff occupies the first trace slot; the second motion command is
    // rejected.
    vehicle.fail_after = Some(2);
    let mut detector = ScriptedDetector::new(frames);

    let err = run_mission(&mut vehicle, &mut detector, &config).unwrap_err();
    assert!(matches!(err, MissionError::Vehicle(_)));
    assert_eq!(vehicle.trace.last(), Some(&VehicleCall::Land));
}

#[test]
fn detector_failure_still_lands() {
    let config = MissionConfig {
        targets: vec![0],
        ..MissionConfig::default()
    };
    // Script runs dry while target 0 is still being searched.
    let mut vehicle = RecordingVehicle::new();
    let mut detector = ScriptedDetector::new(vec![vec![]]);

    let err = run_mission(&mut vehicle, &mut detector, &config).unwrap_err();
    assert!(matches!(err, MissionError::Detector(_)));
    assert_eq!(vehicle.trace.last(), Some(&VehicleCall::Land));
}

#[test]
fn continuous_scan_sweeps_unlogged_and_stops_on_detection() {
    let sweep = Velocity::yaw(20);
    let config = MissionConfig {
        targets: vec![0],
        search_mode: SearchMode::ContinuousScan(sweep),
        ..MissionConfig::default()
    };
    let frames = vec![vec![], vec![], centered(0, 515.0)];
    let mut vehicle = RecordingVehicle::new();
    let mut detector = ScriptedDetector::new(frames);

    let report = run_mission(&mut vehicle, &mut detector, &config).unwrap();

    // Two sweep setpoints, then the stop issued the instant the marker
    // appeared; none of them reached the flight log.
    let setpoints: Vec<_> = vehicle
        .trace
        .iter()
        .filter_map(|call| match call {
            VehicleCall::SetVelocity(v) => Some(*v),
            _ => None,
        })
        .collect();
    assert_eq!(setpoints, vec![sweep, sweep, Velocity::STOP]);
    assert_eq!(report.outbound.commands(), &[MoveForward(30)]);
}

#[test]
fn altitude_adjustment_runs_right_after_takeoff() {
    let config = MissionConfig {
        targets: vec![0],
        altitude_adjust_cm: -20,
        ..MissionConfig::default()
    };
    let mut vehicle = RecordingVehicle::new();
    let mut detector = ScriptedDetector::new(vec![centered(0, 515.0)]);

    run_mission(&mut vehicle, &mut detector, &config).unwrap();
    assert_eq!(
        &vehicle.trace[..2],
        &[VehicleCall::Takeoff, VehicleCall::MoveDown(20)]
    );
}
