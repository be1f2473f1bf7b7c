//! Per-target alignment/approach state machine.
//!
//! `SEARCHING -> ALIGNING -> APPROACHING -> {ARRIVED, LOST}`, expressed as a
//! pure transition function over (state, detection-or-absence). The caller
//! executes the emitted commands and appends them to the flight log, which
//! keeps every transition unit-testable without a vehicle or detector.

use tagnav_core::Detection;

use crate::{MissionConfig, MotionCommand, SearchMode, Velocity};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Transient per-target navigation state.
///
/// Created fresh when the search for a target begins and discarded once the
/// target resolves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NavigationState {
    /// The marker sat inside the horizontal dead band at least once (or an
    /// escape maneuver forced the issue).
    pub aligned: bool,
    /// Consecutive corrective rotations without reaching the dead band.
    pub misalignment_retries: u32,
    /// Frames without a detection for this target.
    pub consecutive_misses: u32,
    /// The target was detected at least once during this attempt.
    pub seen: bool,
}

impl NavigationState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Terminal per-target outcome.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetResolution {
    /// Close enough; control returns to the sequencer.
    Arrived,
    /// Found earlier, now gone before arrival; the sequencer skips ahead.
    Lost,
}

/// Everything one transition wants the caller to do.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepOutcome {
    pub state: NavigationState,
    /// Discrete motions to issue *and* append to the flight log, in order.
    pub commands: Vec<MotionCommand>,
    /// Continuous setpoint to issue; never logged.
    pub velocity: Option<Velocity>,
    pub resolution: Option<TargetResolution>,
}

impl StepOutcome {
    fn carrying(state: NavigationState) -> Self {
        Self {
            state,
            ..Self::default()
        }
    }
}

/// Advance the state machine by one frame.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(config), fields(seen = state.seen, aligned = state.aligned))
)]
pub fn step(
    state: NavigationState,
    detection: Option<&Detection>,
    config: &MissionConfig,
) -> StepOutcome {
    let Some(detection) = detection else {
        return search_step(state, config);
    };

    let mut out = StepOutcome::carrying(state);
    out.state.consecutive_misses = 0;
    if !out.state.seen {
        out.state.seen = true;
        if let SearchMode::ContinuousScan(_) = config.search_mode {
            // Kill the sweep the instant the target shows up.
            out.velocity = Some(Velocity::STOP);
        }
    }

    let proceed = out.state.aligned || align_step(&mut out, detection, config);
    if proceed {
        approach_step(&mut out, detection, config);
    }
    out
}

/// No detection this frame: sweep, or give the target up if it had been seen.
fn search_step(state: NavigationState, config: &MissionConfig) -> StepOutcome {
    let mut out = StepOutcome::carrying(state);

    if state.seen {
        // A target is only searched from scratch before first detection.
        log::warn!(
            "target disappeared after {} miss(es), giving it up",
            state.consecutive_misses
        );
        out.resolution = Some(TargetResolution::Lost);
        return out;
    }

    out.state.consecutive_misses += 1;
    match config.search_mode {
        SearchMode::RotateStep => {
            out.commands
                .push(MotionCommand::RotateCw(config.search_rotation_deg));
        }
        SearchMode::ContinuousScan(velocity) => {
            out.velocity = Some(velocity);
        }
    }
    out
}

/// Center the marker horizontally; returns whether to fall through to the
/// approach phase this same cycle.
fn align_step(out: &mut StepOutcome, detection: &Detection, config: &MissionConfig) -> bool {
    let offset = detection.center().x - config.frame_center_x();
    if offset.abs() <= config.alignment_tolerance_px {
        log::debug!("target {} centered (offset {offset:+.1} px)", detection.id);
        out.state.aligned = true;
        return true;
    }

    // Marker left of center: correct counter-clockwise, else clockwise.
    let ccw = offset < 0.0;
    if out.state.misalignment_retries >= config.retry_bound {
        // Dead-zone oscillation: overshoot past the target, come back a bit
        // short, and call the alignment done.
        log::warn!(
            "alignment on target {} oscillating after {} retries, escape maneuver",
            detection.id,
            out.state.misalignment_retries
        );
        let (overshoot, back) = if ccw {
            (
                MotionCommand::RotateCcw(config.escape_overshoot_deg),
                MotionCommand::RotateCw(config.escape_return_deg),
            )
        } else {
            (
                MotionCommand::RotateCw(config.escape_overshoot_deg),
                MotionCommand::RotateCcw(config.escape_return_deg),
            )
        };
        out.commands.push(overshoot);
        out.commands.push(back);
        out.state.misalignment_retries = 0;
        out.state.aligned = true;
        return false;
    }

    let correction = if ccw {
        MotionCommand::RotateCcw(config.align_rotation_deg)
    } else {
        MotionCommand::RotateCw(config.align_rotation_deg)
    };
    log::debug!(
        "target {} off center by {offset:+.1} px, {correction}",
        detection.id
    );
    out.commands.push(correction);
    out.state.misalignment_retries += 1;
    false
}

/// Aligned: close the distance or declare arrival.
fn approach_step(out: &mut StepOutcome, detection: &Detection, config: &MissionConfig) {
    let proximity = config.estimator().estimate(detection);
    match proximity.travel_cm {
        None => {
            log::info!("arrived at target {} ({:?})", detection.id, proximity.metric);
            out.resolution = Some(TargetResolution::Arrived);
        }
        Some(cm) => {
            out.commands.push(MotionCommand::MoveForward(cm));
            if proximity.is_distance_based() {
                // One distance-proportional advance covers the rest.
                log::info!("advancing {cm} cm onto target {}", detection.id);
                out.resolution = Some(TargetResolution::Arrived);
            } else {
                log::debug!("stepping {cm} cm toward target {}", detection.id);
            }
        }
    }
}
