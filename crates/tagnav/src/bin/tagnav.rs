//! Offline tools for marker-guided missions.
//!
//! `route` turns a recorded flight log into the compacted return route;
//! `simulate` runs the full mission loop against a scripted detector and a
//! recording vehicle, printing the issued-command trace.

use std::fs;
use std::path::{Path, PathBuf};

#[cfg(not(feature = "tracing"))]
use std::str::FromStr;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use tagnav::mission::sim::{RecordingVehicle, ScriptedDetector};
use tagnav::mission::{compact, return_route};
use tagnav::{run_mission, Detection, MissionConfig, MotionCommand};

#[cfg(not(feature = "tracing"))]
use log::LevelFilter;

#[derive(Parser)]
#[command(name = "tagnav", version, about = "Offline tools for marker-guided missions")]
struct Cli {
    /// Log level: error, warn, info, debug, trace.
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compact a recorded flight log and print the return route.
    Route {
        /// Flight log: JSON array of motion commands.
        log: PathBuf,
        /// Emit JSON instead of one command per line.
        #[arg(long)]
        json: bool,
    },
    /// Run a mission against a scripted detector and a recording vehicle.
    Simulate {
        /// Scenario: mission config, battery level, per-frame detections.
        scenario: PathBuf,
        /// Emit the full mission report as JSON.
        #[arg(long)]
        json: bool,
    },
}

/// Everything a dry run needs, in one JSON document.
#[derive(Debug, Deserialize)]
struct Scenario {
    #[serde(default)]
    config: MissionConfig,
    #[serde(default = "full_battery")]
    battery_percent: u8,
    /// Detections per frame, consumed one frame per decision cycle.
    frames: Vec<Vec<Detection>>,
}

fn full_battery() -> u8 {
    100
}

#[derive(Debug, Serialize)]
struct RoutePlan {
    compacted: Vec<MotionCommand>,
    return_route: Vec<MotionCommand>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    #[cfg(not(feature = "tracing"))]
    {
        let level = LevelFilter::from_str(&cli.log_level).unwrap_or(LevelFilter::Info);
        tagnav::core::init_with_level(level)?;
    }
    #[cfg(feature = "tracing")]
    tagnav::core::init_tracing(false);

    match cli.command {
        Command::Route { log, json } => plan_route(&log, json),
        Command::Simulate { scenario, json } => simulate(&scenario, json),
    }
}

fn plan_route(log_path: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let raw = fs::read_to_string(log_path)?;
    let outbound: Vec<MotionCommand> = serde_json::from_str(&raw)?;
    log::info!("loaded {} outbound command(s)", outbound.len());

    let compacted = compact(&outbound);
    let plan = RoutePlan {
        return_route: return_route(&compacted),
        compacted,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        for command in &plan.return_route {
            println!("{command}");
        }
    }
    Ok(())
}

fn simulate(scenario_path: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let raw = fs::read_to_string(scenario_path)?;
    let scenario: Scenario = serde_json::from_str(&raw)?;
    log::info!(
        "scenario: {} target(s), {} scripted frame(s), battery {}%",
        scenario.config.targets.len(),
        scenario.frames.len(),
        scenario.battery_percent
    );

    let mut vehicle = RecordingVehicle::with_battery(scenario.battery_percent);
    let mut detector = ScriptedDetector::new(scenario.frames);
    let report = run_mission(&mut vehicle, &mut detector, &scenario.config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for (target, resolution) in &report.outcomes {
            println!("target {target}: {resolution:?}");
        }
        println!("outbound: {} command(s)", report.outbound.len());
        for command in &report.return_route {
            println!("return: {command}");
        }
    }
    Ok(())
}
