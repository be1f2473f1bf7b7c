//! Decoded fiducial-marker detections.
//!
//! A [`Detection`] is produced fresh for every processed frame by an external
//! detector and never mutated; derived quantities (center, apparent sizes)
//! are computed on demand from the corner quadrilateral.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// One decoded marker in a single video frame.
///
/// Corners are ordered the way ArUco-style detectors report them:
/// top-left, top-right, bottom-right, bottom-left in marker space.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// Marker identifier from the dictionary.
    pub id: u32,
    /// Image-plane corner quadrilateral, in pixels.
    pub corners: [Point2<f32>; 4],
}

impl Detection {
    /// Marker center: midpoint of the main diagonal.
    pub fn center(&self) -> Point2<f32> {
        nalgebra::center(&self.corners[0], &self.corners[2])
    }

    /// Apparent size along the main diagonal, in pixels.
    pub fn diagonal_px(&self) -> f32 {
        nalgebra::distance(&self.corners[0], &self.corners[2])
    }

    /// Apparent width of the top edge, in pixels.
    pub fn width_px(&self) -> f32 {
        nalgebra::distance(&self.corners[0], &self.corners[1])
    }

    /// Apparent height of the right edge, in pixels.
    pub fn height_px(&self) -> f32 {
        nalgebra::distance(&self.corners[1], &self.corners[2])
    }
}

/// Scan a frame's detections for a specific marker id.
///
/// Detectors make no ordering guarantee, so this is a plain linear scan.
/// Returns the first match when the frame contains duplicates.
pub fn find_target(detections: &[Detection], id: u32) -> Option<&Detection> {
    detections.iter().find(|d| d.id == id)
}
