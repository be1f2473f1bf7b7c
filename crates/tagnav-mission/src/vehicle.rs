//! Vehicle command link.
//!
//! Discrete commands are synchronous: the trait implementation returns once
//! the vehicle's internal controller judges the motion complete, so the core
//! never has two commands in flight.

use crate::MotionCommand;

/// Errors surfaced by the vehicle link.
#[derive(thiserror::Error, Debug)]
pub enum VehicleError {
    #[error("command rejected by the vehicle: {0}")]
    Rejected(String),
    #[error("vehicle link lost")]
    LinkLost,
}

/// Continuous velocity setpoint, one signed percentage per axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Velocity {
    pub lateral: i8,
    pub forward: i8,
    pub vertical: i8,
    pub yaw: i8,
}

impl Velocity {
    /// All-axes-zero setpoint, issued to cancel a continuous scan.
    pub const STOP: Velocity = Velocity {
        lateral: 0,
        forward: 0,
        vertical: 0,
        yaw: 0,
    };

    pub const fn yaw(yaw: i8) -> Velocity {
        Velocity {
            lateral: 0,
            forward: 0,
            vertical: 0,
            yaw,
        }
    }
}

/// Discrete and continuous commands plus telemetry, as consumed by the core.
pub trait Vehicle {
    fn takeoff(&mut self) -> Result<(), VehicleError>;
    fn land(&mut self) -> Result<(), VehicleError>;

    fn move_forward(&mut self, cm: u32) -> Result<(), VehicleError>;
    fn move_back(&mut self, cm: u32) -> Result<(), VehicleError>;
    fn move_left(&mut self, cm: u32) -> Result<(), VehicleError>;
    fn move_right(&mut self, cm: u32) -> Result<(), VehicleError>;
    fn move_up(&mut self, cm: u32) -> Result<(), VehicleError>;
    fn move_down(&mut self, cm: u32) -> Result<(), VehicleError>;

    fn rotate_cw(&mut self, deg: u32) -> Result<(), VehicleError>;
    fn rotate_ccw(&mut self, deg: u32) -> Result<(), VehicleError>;

    fn set_velocity(&mut self, velocity: Velocity) -> Result<(), VehicleError>;

    /// Battery charge, percent.
    fn battery(&mut self) -> Result<u8, VehicleError>;
}

/// Dispatch one recorded motion to the vehicle.
pub fn issue<V: Vehicle + ?Sized>(
    vehicle: &mut V,
    command: MotionCommand,
) -> Result<(), VehicleError> {
    match command {
        MotionCommand::RotateCw(deg) => vehicle.rotate_cw(deg),
        MotionCommand::RotateCcw(deg) => vehicle.rotate_ccw(deg),
        MotionCommand::MoveForward(cm) => vehicle.move_forward(cm),
    }
}

/// Replay a route command by command, dead reckoning.
pub fn replay<V: Vehicle + ?Sized>(
    vehicle: &mut V,
    route: &[MotionCommand],
) -> Result<(), VehicleError> {
    for &command in route {
        log::info!("replaying {command}");
        issue(vehicle, command)?;
    }
    Ok(())
}
