//! Flight-log compaction and return-path reconstruction.
//!
//! The outbound log accumulates many small rotations (search sweeps and
//! alignment corrections). Before the return leg it is compacted into
//! maximal same-direction rotation runs, trimmed of pre-lock-on search
//! noise, and replayed backwards with every rotation inverted.

use crate::MotionCommand;

/// About-face turn issued before replaying the return route.
pub const ABOUT_FACE_DEG: u32 = 180;

/// Merge maximal runs of consecutive same-direction rotations.
///
/// A run closes when the direction switches or a `MoveForward` appears;
/// forward moves pass through unmerged and in place. Single left-to-right
/// fold with one pending accumulator, idempotent. Run totals saturate at
/// `u32::MAX` so untrusted logs cannot overflow the fold.
pub fn compact(commands: &[MotionCommand]) -> Vec<MotionCommand> {
    use crate::MotionCommand::{MoveForward, RotateCcw, RotateCw};

    let mut out = Vec::with_capacity(commands.len());
    let mut pending: Option<MotionCommand> = None;

    for &command in commands {
        match (pending, command) {
            (Some(RotateCw(run)), RotateCw(deg)) => {
                pending = Some(RotateCw(run.saturating_add(deg)))
            }
            (Some(RotateCcw(run)), RotateCcw(deg)) => {
                pending = Some(RotateCcw(run.saturating_add(deg)))
            }
            (prior, MoveForward(_)) => {
                out.extend(prior);
                pending = None;
                out.push(command);
            }
            (prior, rotation) => {
                out.extend(prior);
                pending = Some(rotation);
            }
        }
    }
    out.extend(pending);
    out
}

/// Drop the rotation noise recorded before the first lock-on.
///
/// Literal rule carried over from the reference route optimizer: discard
/// every entry up to and including the first `MoveForward`, then discard one
/// further leading entry. Kept as a named policy so the second drop can be
/// revisited without touching the reversal logic.
pub fn trim_lock_on_noise(commands: &[MotionCommand]) -> &[MotionCommand] {
    let first_advance = commands.iter().position(|c| !c.is_rotation());

    match first_advance {
        Some(idx) => commands.get(idx + 2..).unwrap_or(&[]),
        None => &[],
    }
}

/// Invert a log for replay after an about-face turn.
pub fn invert(commands: &[MotionCommand]) -> Vec<MotionCommand> {
    commands.iter().rev().map(|c| c.inverted()).collect()
}

/// Build the full return route from a compacted outbound log.
///
/// One unconditional 180° turn to face the return direction, then the
/// trimmed log reversed with every rotation inverted. Replay is dead
/// reckoning; no detector feedback is applied on the way back.
pub fn return_route(compacted: &[MotionCommand]) -> Vec<MotionCommand> {
    let trimmed = trim_lock_on_noise(compacted);
    let mut route = Vec::with_capacity(trimmed.len() + 1);
    route.push(MotionCommand::RotateCw(ABOUT_FACE_DEG));
    route.extend(invert(trimmed));
    route
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MotionCommand::{MoveForward, RotateCcw, RotateCw};

    #[test]
    fn merges_same_direction_runs_only() {
        let log = [
            RotateCw(10),
            RotateCw(10),
            RotateCcw(5),
            RotateCcw(5),
            RotateCw(20),
        ];
        assert_eq!(
            compact(&log),
            vec![RotateCw(20), RotateCcw(10), RotateCw(20)]
        );
    }

    #[test]
    fn forward_moves_close_runs_and_pass_through() {
        let log = [
            RotateCw(10),
            MoveForward(30),
            MoveForward(30),
            RotateCw(10),
            RotateCw(5),
        ];
        assert_eq!(
            compact(&log),
            vec![RotateCw(10), MoveForward(30), MoveForward(30), RotateCw(15)]
        );
    }

    #[test]
    fn run_totals_are_preserved() {
        let log = [
            RotateCw(10),
            RotateCw(10),
            RotateCw(10),
            RotateCw(10),
            RotateCcw(40),
            RotateCw(35),
            MoveForward(50),
            RotateCw(15),
            MoveForward(30),
        ];
        let compacted = compact(&log);
        assert_eq!(
            compacted,
            vec![
                RotateCw(40),
                RotateCcw(40),
                RotateCw(35),
                MoveForward(50),
                RotateCw(15),
                MoveForward(30),
            ]
        );

        let total = |cmds: &[MotionCommand]| -> i64 {
            cmds.iter()
                .map(|c| match c {
                    RotateCw(d) => i64::from(*d),
                    RotateCcw(d) => -i64::from(*d),
                    MoveForward(_) => 0,
                })
                .sum()
        };
        assert_eq!(total(&log), total(&compacted));
    }

    #[test]
    fn compaction_is_idempotent() {
        let log = [
            RotateCw(10),
            RotateCw(10),
            RotateCcw(40),
            MoveForward(50),
            RotateCw(15),
        ];
        let once = compact(&log);
        let twice = compact(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn compacting_empty_log_is_empty() {
        assert!(compact(&[]).is_empty());
    }

    #[test]
    fn oversized_rotation_runs_saturate_instead_of_overflowing() {
        // Untrusted logs (the `route` tool reads arbitrary JSON) must not
        // panic the fold.
        let log = [RotateCw(u32::MAX), RotateCw(10), RotateCcw(u32::MAX - 5), RotateCcw(10)];
        assert_eq!(
            compact(&log),
            vec![RotateCw(u32::MAX), RotateCcw(u32::MAX)]
        );
    }

    #[test]
    fn trim_drops_through_first_advance_plus_one() {
        let compacted = [
            RotateCw(40),
            RotateCcw(40),
            RotateCw(35),
            MoveForward(50),
            RotateCw(15),
            MoveForward(30),
        ];
        assert_eq!(trim_lock_on_noise(&compacted), &[MoveForward(30)]);
    }

    #[test]
    fn trim_of_rotation_only_log_is_empty() {
        let rotations = [RotateCw(40), RotateCcw(20)];
        assert!(trim_lock_on_noise(&rotations).is_empty());
        assert!(trim_lock_on_noise(&[]).is_empty());
        // A log ending right at the first advance leaves nothing either.
        assert!(trim_lock_on_noise(&[RotateCw(10), MoveForward(30)]).is_empty());
    }

    #[test]
    fn return_route_starts_with_about_face() {
        let compacted = [RotateCw(10), MoveForward(50), RotateCw(15), MoveForward(30)];
        assert_eq!(
            return_route(&compacted),
            vec![RotateCw(180), MoveForward(30)]
        );
    }

    /// Dead-reckoning pose integrator: clockwise rotations decrease heading,
    /// forward moves travel along it.
    fn integrate(pose: (f64, f64, f64), cmds: &[MotionCommand]) -> (f64, f64, f64) {
        let (mut heading_deg, mut x, mut y) = pose;
        for c in cmds {
            match c {
                RotateCw(d) => heading_deg -= f64::from(*d),
                RotateCcw(d) => heading_deg += f64::from(*d),
                MoveForward(cm) => {
                    let rad = heading_deg.to_radians();
                    x += f64::from(*cm) * rad.cos();
                    y += f64::from(*cm) * rad.sin();
                }
            }
        }
        (heading_deg, x, y)
    }

    #[test]
    fn inversion_law_closes_the_loop() {
        // An arbitrary trimmed outbound leg.
        let outbound = [
            RotateCw(35),
            MoveForward(50),
            RotateCcw(15),
            MoveForward(30),
            RotateCw(90),
            MoveForward(120),
        ];

        let mut back = vec![RotateCw(ABOUT_FACE_DEG)];
        back.extend(invert(&outbound));

        let after_out = integrate((0.0, 0.0, 0.0), &outbound);
        let (heading, x, y) = integrate(after_out, &back);

        // Position closes exactly; heading ends facing back along the start
        // direction, so the net rotation excluding the about-face is zero.
        assert!(x.abs() < 1e-9 && y.abs() < 1e-9, "net displacement ({x}, {y})");
        let net_excluding_about_face = (heading + f64::from(ABOUT_FACE_DEG)).rem_euclid(360.0);
        assert!(net_excluding_about_face.abs() < 1e-9);
    }

    #[test]
    fn inverted_rotations_cancel_outbound_rotations() {
        let outbound = [RotateCw(40), RotateCcw(10), MoveForward(20), RotateCw(5)];
        let spin = |cmds: &[MotionCommand]| -> i64 {
            cmds.iter()
                .map(|c| match c {
                    RotateCw(d) => i64::from(*d),
                    RotateCcw(d) => -i64::from(*d),
                    MoveForward(_) => 0,
                })
                .sum()
        };
        assert_eq!(spin(&outbound) + spin(&invert(&outbound)), 0);
    }
}
