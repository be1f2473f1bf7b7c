//! Compact a hand-written flight log and print the return route.
//!
//! Run with `cargo run -p tagnav --example plan_return`.

use std::str::FromStr;

use log::{info, LevelFilter};

use tagnav::core::init_with_level;
use tagnav::mission::{compact, return_route};
use tagnav::MotionCommand::{MoveForward, RotateCcw, RotateCw};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let level = LevelFilter::from_str("info").unwrap_or(LevelFilter::Info);
    init_with_level(level)?;

    // The outbound leg of a small two-target flight: search sweeps,
    // alignment corrections, an escape maneuver, two advances.
    let outbound = vec![
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

    let compacted = compact(&outbound);
    info!(
        "compacted {} outbound commands into {}",
        outbound.len(),
        compacted.len()
    );
    for command in &compacted {
        println!("outbound: {command}");
    }

    for command in return_route(&compacted) {
        println!("return:   {command}");
    }
    Ok(())
}
