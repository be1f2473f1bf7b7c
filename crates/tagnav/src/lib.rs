//! High-level facade crate for the `tagnav-*` workspace.
//!
//! This crate provides:
//! - stable, convenient re-exports of the core and mission crates
//! - the `tagnav` CLI (feature `cli`) for offline route planning and
//!   mission simulation against recorded scenarios.
//!
//! ## Quickstart
//!
//! ```
//! use tagnav::mission::sim::{square_detection, RecordingVehicle, ScriptedDetector};
//! use tagnav::{run_mission, MissionConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = MissionConfig {
//!     targets: vec![0],
//!     ..MissionConfig::default()
//! };
//! // One frame with target 0 centered about 30 cm out.
//! let mut detector = ScriptedDetector::new(vec![vec![square_detection(0, 320.0, 240.0, 515.0)]]);
//! let mut vehicle = RecordingVehicle::new();
//!
//! let report = run_mission(&mut vehicle, &mut detector, &config)?;
//! println!("outbound: {} command(s)", report.outbound.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `tagnav::core`: detections, proximity estimation, the mission logger.
//! - `tagnav::mission`: state machine, sequencer, log compaction, return
//!   route, vehicle/detector traits, simulation doubles.

pub use tagnav_core as core;
pub use tagnav_mission as mission;

pub use tagnav_core::{Calibration, Detection, Proximity, ProximityEstimator};
pub use tagnav_mission::{
    run_mission, FlightLog, MarkerDetector, MissionConfig, MissionError, MissionReport,
    MotionCommand, Vehicle,
};
