//! Headless simulator: plays one scripted round and prints JSON lines.
//!
//! Flags override the `WHACK_*` environment; see `tui_whack::sim`.

use std::io::{self, BufWriter};

use anyhow::Result;
use log::info;

use tui_whack::config::AppConfig;
use tui_whack::logging;
use tui_whack::sim::{parse_sim_args, run_sim, SimConfig};

fn main() -> Result<()> {
    let app = AppConfig::from_env();
    logging::init_stderr(&app)?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = parse_sim_args(&args, SimConfig::from_app(&app))?;
    info!(
        "simulating grid={} difficulty={} seed={} strategy={:?}",
        config.settings.grid_size,
        config.settings.difficulty.as_str(),
        config.seed,
        config.strategy
    );

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let snap = run_sim(&config, &mut out)?;
    info!("final score {}", snap.score);
    Ok(())
}
