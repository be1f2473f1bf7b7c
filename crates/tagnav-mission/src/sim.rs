//! Simulation doubles: a scripted detector and a recording vehicle.
//!
//! The issued-command trace is the observable side effect of a mission, so
//! tests and the offline `simulate` tool both run the real mission loop
//! against these doubles and assert on (or print) the trace.

use std::collections::VecDeque;

use nalgebra::Point2;

use tagnav_core::Detection;

use crate::{DetectorError, MarkerDetector, Vehicle, VehicleError, Velocity};

/// Detector double that replays a fixed per-frame script.
///
/// Returns [`DetectorError::StreamEnded`] once the script runs out, so a
/// mission that would search forever terminates (and still lands).
#[derive(Clone, Debug, Default)]
pub struct ScriptedDetector {
    frames: VecDeque<Vec<Detection>>,
}

impl ScriptedDetector {
    pub fn new<I>(frames: I) -> Self
    where
        I: IntoIterator<Item = Vec<Detection>>,
    {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    pub fn frames_left(&self) -> usize {
        self.frames.len()
    }
}

impl MarkerDetector for ScriptedDetector {
    fn next_detections(&mut self) -> Result<Vec<Detection>, DetectorError> {
        self.frames.pop_front().ok_or(DetectorError::StreamEnded)
    }
}

/// Axis-aligned square detection, handy for scripting frames.
pub fn square_detection(id: u32, center_x: f32, center_y: f32, side_px: f32) -> Detection {
    let h = side_px / 2.0;
    Detection {
        id,
        corners: [
            Point2::new(center_x - h, center_y - h),
            Point2::new(center_x + h, center_y - h),
            Point2::new(center_x + h, center_y + h),
            Point2::new(center_x - h, center_y + h),
        ],
    }
}

/// Every call a [`RecordingVehicle`] accepted, in order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VehicleCall {
    Takeoff,
    Land,
    MoveForward(u32),
    MoveBack(u32),
    MoveLeft(u32),
    MoveRight(u32),
    MoveUp(u32),
    MoveDown(u32),
    RotateCw(u32),
    RotateCcw(u32),
    SetVelocity(Velocity),
}

/// Vehicle double that records every accepted command.
///
/// `fail_after` injects a [`VehicleError::Rejected`] once the trace reaches
/// the given length; takeoff, landing, and telemetry stay functional so the
/// cleanup path remains observable.
#[derive(Clone, Debug)]
pub struct RecordingVehicle {
    pub trace: Vec<VehicleCall>,
    pub battery_percent: u8,
    pub fail_after: Option<usize>,
}

impl RecordingVehicle {
    pub fn new() -> Self {
        Self::with_battery(100)
    }

    pub fn with_battery(battery_percent: u8) -> Self {
        Self {
            trace: Vec::new(),
            battery_percent,
            fail_after: None,
        }
    }

    /// Motion commands issued, with takeoff/land/velocity bookkeeping
    /// filtered out.
    pub fn motion_trace(&self) -> Vec<VehicleCall> {
        self.trace
            .iter()
            .copied()
            .filter(|call| {
                !matches!(
                    call,
                    VehicleCall::Takeoff | VehicleCall::Land | VehicleCall::SetVelocity(_)
                )
            })
            .collect()
    }

    fn record_motion(&mut self, call: VehicleCall) -> Result<(), VehicleError> {
        if self.fail_after.is_some_and(|n| self.trace.len() >= n) {
            return Err(VehicleError::Rejected(format!(
                "injected failure at command {}",
                self.trace.len()
            )));
        }
        self.trace.push(call);
        Ok(())
    }
}

impl Default for RecordingVehicle {
    fn default() -> Self {
        Self::new()
    }
}

impl Vehicle for RecordingVehicle {
    fn takeoff(&mut self) -> Result<(), VehicleError> {
        self.trace.push(VehicleCall::Takeoff);
        Ok(())
    }

    fn land(&mut self) -> Result<(), VehicleError> {
        self.trace.push(VehicleCall::Land);
        Ok(())
    }

    fn move_forward(&mut self, cm: u32) -> Result<(), VehicleError> {
        self.record_motion(VehicleCall::MoveForward(cm))
    }

    fn move_back(&mut self, cm: u32) -> Result<(), VehicleError> {
        self.record_motion(VehicleCall::MoveBack(cm))
    }

    fn move_left(&mut self, cm: u32) -> Result<(), VehicleError> {
        self.record_motion(VehicleCall::MoveLeft(cm))
    }

    fn move_right(&mut self, cm: u32) -> Result<(), VehicleError> {
        self.record_motion(VehicleCall::MoveRight(cm))
    }

    fn move_up(&mut self, cm: u32) -> Result<(), VehicleError> {
        self.record_motion(VehicleCall::MoveUp(cm))
    }

    fn move_down(&mut self, cm: u32) -> Result<(), VehicleError> {
        self.record_motion(VehicleCall::MoveDown(cm))
    }

    fn rotate_cw(&mut self, deg: u32) -> Result<(), VehicleError> {
        self.record_motion(VehicleCall::RotateCw(deg))
    }

    fn rotate_ccw(&mut self, deg: u32) -> Result<(), VehicleError> {
        self.record_motion(VehicleCall::RotateCcw(deg))
    }

    fn set_velocity(&mut self, velocity: Velocity) -> Result<(), VehicleError> {
        self.trace.push(VehicleCall::SetVelocity(velocity));
        Ok(())
    }

    fn battery(&mut self) -> Result<u8, VehicleError> {
        Ok(self.battery_percent)
    }
}
