use std::fs;
use std::rc::Rc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use porterbot::bridge::ScriptBridge;
use porterbot::cli::CliArgs;
use porterbot::client::EntityInfo;
use porterbot::config::BridgeConfig;
use porterbot::sim::SimulatedRobotHandle;

fn main() {
    let args = match CliArgs::parse_from_env() {
        Ok(parsed) => parsed,
        Err(err) => {
            eprintln!("[cli] {err}");
            std::process::exit(2);
        }
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    if let Err(err) = run(&args) {
        eprintln!("Application error: {err:?}");
        std::process::exit(1);
    }
}

/// Runs one script file against the simulated robot and reports what got
/// dispatched. The real robot client plugs in behind the same trait.
fn run(args: &CliArgs) -> Result<()> {
    let script_path = args.script_path()?;
    let source = fs::read_to_string(script_path)
        .with_context(|| format!("Reading script '{}'", script_path.display()))?;
    let config = match &args.config {
        Some(path) => BridgeConfig::load(path)?,
        None => BridgeConfig::default(),
    };

    let robot = SimulatedRobotHandle::with_floor_plan(demo_locations(), demo_shelves());
    let mut bridge = ScriptBridge::with_config(Rc::new(robot.clone()), &config);

    info!("running '{}'", script_path.display());
    bridge.run(&source);

    for command in robot.journal() {
        info!("dispatched {command:?}");
    }
    Ok(())
}

fn demo_locations() -> Vec<EntityInfo> {
    vec![
        EntityInfo::new("L01", "kitchen"),
        EntityInfo::new("L02", "living room"),
        EntityInfo::new("L03", "charger"),
    ]
}

fn demo_shelves() -> Vec<EntityInfo> {
    vec![EntityInfo::new("S01", "snack shelf"), EntityInfo::new("S02", "laundry shelf")]
}
