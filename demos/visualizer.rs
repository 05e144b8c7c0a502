//! Interactive A* visualiser in the terminal.
//!
//! Run: cargo run --bin visualizer [config.json]
//!
//! The optional JSON file may set any of `grid_size`, `topology`
//! (`"FourDirectional"` / `"EightDirectional"`), `step_interval_ms`,
//! `steps_per_tick` and `mouse`; missing fields keep their defaults.

use std::error::Error;
use std::fs;

use gridstar_term::VisualizerConfig;

fn load_config() -> Result<VisualizerConfig, Box<dyn Error>> {
    match std::env::args().nth(1) {
        Some(path) => {
            let text = fs::read_to_string(&path)
                .map_err(|e| format!("cannot read {path}: {e}"))?;
            Ok(serde_json::from_str(&text)?)
        }
        None => Ok(VisualizerConfig::default()),
    }
}

fn main() {
    let result = load_config().and_then(|config| gridstar_term::run(&config));
    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
