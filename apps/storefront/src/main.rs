//! # Session Replay
//!
//! Replays a recorded storefront session and prints where it ended up.
//!
//! ## Usage
//! ```bash
//! # Replay a script file
//! cargo run -p petpoint-storefront --bin petpoint-replay -- session.json
//!
//! # Read the script from stdin, pretty-print the snapshot
//! cat session.json | cargo run -p petpoint-storefront --bin petpoint-replay -- - --pretty
//! ```
//!
//! The snapshot goes to stdout as JSON; logs go to stderr.

use std::env;

use chrono::Utc;
use petpoint_storefront::replay::{run_script, ReplayScript};
use petpoint_storefront::{init_tracing, Storefront};
use tracing::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut path = String::from("-");
    let mut pretty = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--pretty" | "-p" => pretty = true,
            "--help" | "-h" => {
                println!("PetPoint Session Replay");
                println!();
                println!("Usage: petpoint-replay [OPTIONS] [SCRIPT]");
                println!();
                println!("Arguments:");
                println!("  [SCRIPT]        Session script, or - for stdin (default: -)");
                println!();
                println!("Options:");
                println!("  -p, --pretty    Pretty-print the snapshot");
                println!("  -h, --help      Show this help message");
                return Ok(());
            }
            other => path = other.to_string(),
        }
        i += 1;
    }

    init_tracing();

    let script = ReplayScript::load(&path)?;
    info!(path = %path, steps = script.steps.len(), "replaying session");

    let storefront = Storefront::from_env();
    let snapshot = run_script(&storefront, script, Utc::now());

    let json = if pretty {
        serde_json::to_string_pretty(&snapshot)?
    } else {
        serde_json::to_string(&snapshot)?
    };
    println!("{json}");

    Ok(())
}
