//! Marker detector interface.

use tagnav_core::Detection;

/// Errors surfaced by the detector/video side.
///
/// A frame with no marker in it is *not* an error; it is an empty detection
/// list, absorbed by the search state.
#[derive(thiserror::Error, Debug)]
pub enum DetectorError {
    #[error("video stream ended")]
    StreamEnded,
    #[error("frame capture failed: {0}")]
    Capture(String),
}

/// One synchronous acquire-and-detect cycle.
pub trait MarkerDetector {
    /// Grab the next frame and return every marker decoded from it, in no
    /// particular order.
    fn next_detections(&mut self) -> Result<Vec<Detection>, DetectorError>;
}
