//! Marker proximity estimation.
//!
//! Two interchangeable strategies decide "close enough" and "how far to
//! travel": a pinhole distance estimate when camera calibration is available,
//! and a raw apparent-size threshold when it is not. Callers pick a strategy
//! once by building a [`ProximityEstimator`] with or without a
//! [`Calibration`].

use serde::{Deserialize, Serialize};

use crate::Detection;

/// Calibration constants are expressed in decimeters; distances reported by
/// [`Calibration::distance_cm`] are scaled into centimeters.
pub const CALIBRATION_UNIT_SCALE: f32 = 10.0;

/// Pinhole-model constants for distance estimation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Calibration {
    /// Physical marker width (decimeters).
    pub real_width: f32,
    /// Focal-length estimate (pixels).
    pub focal_length_px: f32,
}

impl Calibration {
    /// Distance to the marker in centimeters given its apparent width.
    ///
    /// `d = real_width * focal_length / apparent_width`, scaled from the
    /// calibration's native unit to centimeters.
    pub fn distance_cm(&self, apparent_width_px: f32) -> f32 {
        (self.real_width * self.focal_length_px / apparent_width_px) * CALIBRATION_UNIT_SCALE
    }
}

/// The scalar a proximity verdict was derived from.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProximityMetric {
    /// Calibrated distance estimate, centimeters.
    DistanceCm(f32),
    /// Apparent marker diagonal, pixels.
    ApparentPx(f32),
}

/// Proximity verdict for one detection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Proximity {
    pub metric: ProximityMetric,
    /// Forward travel still worth commanding; `None` means arrived.
    pub travel_cm: Option<u32>,
}

impl Proximity {
    pub fn is_close_enough(&self) -> bool {
        self.travel_cm.is_none()
    }

    /// Whether this verdict came from the calibrated-distance strategy.
    ///
    /// A calibrated advance covers the whole remaining distance in one
    /// command; the apparent-size strategy advances by fixed steps instead.
    pub fn is_distance_based(&self) -> bool {
        matches!(self.metric, ProximityMetric::DistanceCm(_))
    }
}

/// Unified proximity strategy: calibrated distance when a [`Calibration`] is
/// present, apparent-size threshold otherwise.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProximityEstimator {
    /// Absence selects the apparent-size strategy.
    pub calibration: Option<Calibration>,
    /// Apparent-diagonal threshold marking arrival (pixels).
    pub close_size_px: f32,
    /// Fixed advance per cycle for the apparent-size strategy (centimeters).
    pub forward_step_cm: u32,
    /// Calibrated advances below this floor mean "already arrived" (centimeters).
    pub arrival_floor_cm: u32,
}

impl ProximityEstimator {
    pub fn estimate(&self, detection: &Detection) -> Proximity {
        match self.calibration {
            Some(cal) => {
                let distance = cal.distance_cm(detection.width_px());
                let travel = (distance > self.arrival_floor_cm as f32)
                    .then_some(distance as u32);
                Proximity {
                    metric: ProximityMetric::DistanceCm(distance),
                    travel_cm: travel,
                }
            }
            None => {
                let size = detection.diagonal_px();
                let travel = (size < self.close_size_px).then_some(self.forward_step_cm);
                Proximity {
                    metric: ProximityMetric::ApparentPx(size),
                    travel_cm: travel,
                }
            }
        }
    }
}
