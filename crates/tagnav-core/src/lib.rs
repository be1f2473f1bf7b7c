//! Core types for fiducial-marker navigation.
//!
//! This crate is intentionally small and purely geometric. It does *not*
//! depend on any concrete marker detector, video pipeline, or vehicle link:
//! it defines what a detection looks like once decoded from a frame, and how
//! apparent marker size turns into a proximity verdict.

mod detection;
mod logger;
mod proximity;

pub use detection::{find_target, Detection};
pub use proximity::{
    Calibration, Proximity, ProximityEstimator, ProximityMetric, CALIBRATION_UNIT_SCALE,
};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
