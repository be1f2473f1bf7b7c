//! Target sequencer and mission runner.
//!
//! One synchronous per-frame cycle (acquire frame, detect, decide, command)
//! with no overlapping commands in flight. The flight log is owned here and
//! written only by the currently active per-target state machine.

use serde::{Deserialize, Serialize};

use tagnav_core::find_target;

use crate::vehicle::{issue, replay};
use crate::{
    compact, return_route, step, DetectorError, FlightLog, MarkerDetector, MissionConfig,
    MotionCommand, NavigationState, TargetResolution, Vehicle, VehicleError,
};

/// Mission-level failures. Per-target loss is not among them; the sequencer
/// absorbs it and moves on.
#[derive(thiserror::Error, Debug)]
pub enum MissionError {
    #[error("battery at {percent}%, below the {min_percent}% takeoff minimum")]
    LowBattery { percent: u8, min_percent: u8 },
    #[error(transparent)]
    Vehicle(#[from] VehicleError),
    #[error(transparent)]
    Detector(#[from] DetectorError),
}

/// What a completed mission did, usable as a replay oracle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissionReport {
    /// Per-target outcomes in visit order.
    pub outcomes: Vec<(u32, TargetResolution)>,
    /// Raw outbound flight log.
    pub outbound: FlightLog,
    /// Outbound log after rotation-run compaction.
    pub compacted: Vec<MotionCommand>,
    /// Return route as replayed, about-face turn included.
    pub return_route: Vec<MotionCommand>,
}

/// Fly the whole mission: battery gate, takeoff, per-target resolution in
/// list order, then the compacted/reversed return leg, then landing.
///
/// Landing is guaranteed on every exit path past takeoff, including detector
/// and command failures.
pub fn run_mission<V: Vehicle, D: MarkerDetector>(
    vehicle: &mut V,
    detector: &mut D,
    config: &MissionConfig,
) -> Result<MissionReport, MissionError> {
    let percent = vehicle.battery()?;
    if percent < config.min_battery_percent {
        log::warn!(
            "battery at {percent}%, below the {}% minimum; aborting before takeoff",
            config.min_battery_percent
        );
        // The vehicle never left the ground, but make sure of it.
        vehicle.land()?;
        return Err(MissionError::LowBattery {
            percent,
            min_percent: config.min_battery_percent,
        });
    }
    log::info!("battery at {percent}%, starting mission");

    let mut outcomes = Vec::with_capacity(config.targets.len());
    let mut outbound = FlightLog::new();
    let mut compacted = Vec::new();
    let mut route = Vec::new();

    airborne(vehicle, |vehicle| {
        adjust_altitude(vehicle, config.altitude_adjust_cm)?;

        for &target in &config.targets {
            log::info!("searching for target {target}");
            let resolution = resolve_target(vehicle, detector, config, target, &mut outbound)?;
            match resolution {
                TargetResolution::Arrived => log::info!("target {target} resolved"),
                TargetResolution::Lost => log::warn!("target {target} lost, skipping ahead"),
            }
            outcomes.push((target, resolution));
        }

        compacted = compact(outbound.commands());
        route = return_route(&compacted);
        log::info!(
            "outbound log: {} entries, compacted to {}; flying back over {} commands",
            outbound.len(),
            compacted.len(),
            route.len()
        );
        replay(vehicle, &route)?;
        Ok(())
    })?;

    Ok(MissionReport {
        outcomes,
        outbound,
        compacted,
        return_route: route,
    })
}

/// Run the flight body with the airborne resource scoped: take off first,
/// land on the way out no matter how the body exits.
fn airborne<V, F>(vehicle: &mut V, flight: F) -> Result<(), MissionError>
where
    V: Vehicle,
    F: FnOnce(&mut V) -> Result<(), MissionError>,
{
    vehicle.takeoff()?;
    log::info!("airborne");

    let flown = flight(vehicle);
    let landing = vehicle.land();
    if let Err(err) = &landing {
        log::error!("landing failed: {err}");
    }

    flown?;
    landing?;
    log::info!("landed");
    Ok(())
}

fn adjust_altitude<V: Vehicle>(vehicle: &mut V, cm: i32) -> Result<(), VehicleError> {
    match cm.cmp(&0) {
        std::cmp::Ordering::Greater => vehicle.move_up(cm as u32),
        std::cmp::Ordering::Less => vehicle.move_down(cm.unsigned_abs()),
        std::cmp::Ordering::Equal => Ok(()),
    }
}

/// Drive one target to resolution, appending every issued motion to the log.
fn resolve_target<V: Vehicle, D: MarkerDetector>(
    vehicle: &mut V,
    detector: &mut D,
    config: &MissionConfig,
    target: u32,
    log: &mut FlightLog,
) -> Result<TargetResolution, MissionError> {
    let mut state = NavigationState::new();
    loop {
        let detections = detector.next_detections()?;
        let detection = find_target(&detections, target);

        let outcome = step(state, detection, config);
        if let Some(velocity) = outcome.velocity {
            vehicle.set_velocity(velocity)?;
        }
        for &command in &outcome.commands {
            issue(vehicle, command)?;
            log.record(command);
        }

        state = outcome.state;
        if let Some(resolution) = outcome.resolution {
            return Ok(resolution);
        }
    }
}
