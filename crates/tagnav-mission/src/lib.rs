//! Marker-guided mission control.
//!
//! Everything between "take off" and "land": the per-target
//! search/align/approach state machine, the target sequencer, the flight-log
//! compactor, and the dead-reckoning return-path reconstructor. The marker
//! detector and the vehicle link are consumed through the [`MarkerDetector`]
//! and [`Vehicle`] traits so the whole mission runs unchanged against
//! hardware or against the scripted doubles in [`sim`].

mod command;
mod config;
mod detector;
mod mission;
mod route;
mod state;
mod vehicle;

pub mod sim;

pub use command::{FlightLog, MotionCommand};
pub use config::{MissionConfig, SearchMode};
pub use detector::{DetectorError, MarkerDetector};
pub use mission::{run_mission, MissionError, MissionReport};
pub use route::{compact, invert, return_route, trim_lock_on_noise, ABOUT_FACE_DEG};
pub use state::{step, NavigationState, StepOutcome, TargetResolution};
pub use vehicle::{issue, replay, Vehicle, VehicleError, Velocity};
