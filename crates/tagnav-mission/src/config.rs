//! Mission configuration.
//!
//! All navigation constants live here and are read once at mission start.
//! Defaults reproduce the reference flight setup; any subset can be
//! overridden from a JSON document thanks to the container-level
//! `serde(default)`.

use serde::{Deserialize, Serialize};

use tagnav_core::{Calibration, ProximityEstimator};

use crate::Velocity;

/// How the vehicle sweeps for a target it has never seen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    /// Discrete clockwise rotation steps, each recorded in the flight log.
    RotateStep,
    /// Continuous velocity sweep, cancelled with a zero setpoint the instant
    /// a detection appears. Velocity setpoints are not logged.
    ContinuousScan(Velocity),
}

/// Named configuration values consumed by the mission runner.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MissionConfig {
    /// Target marker ids, visited strictly in list order (duplicates allowed).
    pub targets: Vec<u32>,
    /// Camera calibration; `None` selects the apparent-size proximity
    /// strategy.
    pub calibration: Option<Calibration>,
    /// Horizontal dead band around the frame center (pixels).
    pub alignment_tolerance_px: f32,
    /// Apparent-diagonal arrival threshold for the uncalibrated strategy
    /// (pixels).
    pub close_size_px: f32,
    /// Search sweep rotation per frame without a detection (degrees).
    pub search_rotation_deg: u32,
    /// Corrective rotation per misaligned frame (degrees).
    pub align_rotation_deg: u32,
    /// Misalignment retries tolerated before the escape maneuver.
    pub retry_bound: u32,
    /// Escape overshoot past the target, in the correction direction
    /// (degrees).
    pub escape_overshoot_deg: u32,
    /// Escape rotation back toward the target, opposite direction (degrees).
    pub escape_return_deg: u32,
    /// Fixed advance per cycle for the uncalibrated strategy (centimeters).
    pub forward_step_cm: u32,
    /// Calibrated advances at or below this floor count as arrived
    /// (centimeters).
    pub arrival_floor_cm: u32,
    /// Processed frame width; alignment measures offsets from its center
    /// (pixels).
    pub frame_width_px: u32,
    /// Takeoff is refused below this battery charge (percent).
    pub min_battery_percent: u8,
    /// Altitude change right after takeoff: positive up, negative down
    /// (centimeters).
    pub altitude_adjust_cm: i32,
    pub search_mode: SearchMode,
}

impl Default for MissionConfig {
    fn default() -> Self {
        Self {
            targets: Vec::new(),
            calibration: Some(Calibration {
                real_width: 20.0,
                focal_length_px: 77.4,
            }),
            alignment_tolerance_px: 30.0,
            close_size_px: 225.0,
            search_rotation_deg: 10,
            align_rotation_deg: 10,
            retry_bound: 4,
            escape_overshoot_deg: 40,
            escape_return_deg: 35,
            forward_step_cm: 20,
            arrival_floor_cm: 20,
            frame_width_px: 640,
            min_battery_percent: 20,
            altitude_adjust_cm: 0,
            search_mode: SearchMode::RotateStep,
        }
    }
}

impl MissionConfig {
    /// Horizontal frame center the alignment offset is measured against.
    pub fn frame_center_x(&self) -> f32 {
        self.frame_width_px as f32 / 2.0
    }

    /// Proximity strategy derived from the configured calibration.
    pub fn estimator(&self) -> ProximityEstimator {
        ProximityEstimator {
            calibration: self.calibration,
            close_size_px: self.close_size_px,
            forward_step_cm: self.forward_step_cm,
            arrival_floor_cm: self.arrival_floor_cm,
        }
    }
}
