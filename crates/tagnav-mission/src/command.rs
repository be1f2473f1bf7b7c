//! Motion commands and the outbound flight log.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One discrete motion issued to the vehicle and worth replaying later.
///
/// Magnitudes are non-negative integers, matching the discrete command
/// granularity of the vehicle link. Immutable once recorded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotionCommand {
    /// In-place clockwise rotation, degrees.
    RotateCw(u32),
    /// In-place counter-clockwise rotation, degrees.
    RotateCcw(u32),
    /// Straight advance, centimeters.
    MoveForward(u32),
}

impl MotionCommand {
    /// The command undoing this one when replayed after an about-face turn.
    ///
    /// A forward move stays a forward move (the vehicle already faces back);
    /// rotations swap direction.
    pub fn inverted(self) -> Self {
        match self {
            Self::RotateCw(deg) => Self::RotateCcw(deg),
            Self::RotateCcw(deg) => Self::RotateCw(deg),
            Self::MoveForward(cm) => Self::MoveForward(cm),
        }
    }

    pub fn is_rotation(self) -> bool {
        matches!(self, Self::RotateCw(_) | Self::RotateCcw(_))
    }
}

impl fmt::Display for MotionCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RotateCw(deg) => write!(f, "rotate_cw {deg}"),
            Self::RotateCcw(deg) => write!(f, "rotate_ccw {deg}"),
            Self::MoveForward(cm) => write!(f, "move_forward {cm}"),
        }
    }
}

/// Append-only record of the motions issued during the outbound leg.
///
/// Owned by the sequencer for the lifetime of one mission; only the
/// currently active per-target state machine writes to it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlightLog(Vec<MotionCommand>);

impl FlightLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, command: MotionCommand) {
        self.0.push(command);
    }

    pub fn commands(&self) -> &[MotionCommand] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<MotionCommand>> for FlightLog {
    fn from(commands: Vec<MotionCommand>) -> Self {
        Self(commands)
    }
}

impl<'a> IntoIterator for &'a FlightLog {
    type Item = &'a MotionCommand;
    type IntoIter = std::slice::Iter<'a, MotionCommand>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
