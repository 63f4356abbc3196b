//! Headless round simulator.
//!
//! Plays one round against a virtual clock with a scripted player and writes
//! JSON lines: one `frame` per observable change, then a `summary`.
//!
//! ```text
//! whack-sim [--grid N] [--difficulty easy|medium|hard] [--seed S]
//!           [--strategy perfect|sloppy|idle] [--step-ms MS]
//! ```

use std::io::Write;

use anyhow::{anyhow, bail, Result};
use log::debug;
use serde::Serialize;

use crate::config::AppConfig;
use crate::core::{parse_grid_size, GameSnapshot, GameState, Settings};
use crate::types::{Difficulty, RoundOutcome, ROUND_SECONDS};

/// Scripted player behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Whack every active cell on every step
    Perfect,
    /// Whack every active cell on every other step
    Sloppy,
    /// Never whack anything
    Idle,
}

impl Strategy {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "perfect" => Some(Strategy::Perfect),
            "sloppy" => Some(Strategy::Sloppy),
            "idle" => Some(Strategy::Idle),
            _ => None,
        }
    }

    fn clicks_on(&self, step: u64) -> bool {
        match self {
            Strategy::Perfect => true,
            Strategy::Sloppy => step % 2 == 0,
            Strategy::Idle => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimConfig {
    pub settings: Settings,
    pub seed: u64,
    pub strategy: Strategy,
    pub step_ms: u64,
}

impl SimConfig {
    pub fn from_app(config: &AppConfig) -> Self {
        Self {
            settings: config.settings,
            seed: config.seed,
            strategy: Strategy::Perfect,
            step_ms: 50,
        }
    }
}

/// Parse simulator flags on top of `base` (usually from the environment).
pub fn parse_sim_args(args: &[String], base: SimConfig) -> Result<SimConfig> {
    let mut config = base;
    let mut i = 0usize;
    while i < args.len() {
        let flag = args[i].as_str();
        let value = args
            .get(i + 1)
            .ok_or_else(|| anyhow!("whack-sim: missing value for {}", flag))?;
        match flag {
            "--grid" => {
                config.settings.grid_size = parse_grid_size(value)
                    .ok_or_else(|| anyhow!("whack-sim: invalid --grid value: {}", value))?;
            }
            "--difficulty" => {
                config.settings.difficulty = Difficulty::from_str(value)
                    .ok_or_else(|| anyhow!("whack-sim: invalid --difficulty value: {}", value))?;
            }
            "--seed" => {
                config.seed = value
                    .parse::<u64>()
                    .map_err(|_| anyhow!("whack-sim: invalid --seed value: {}", value))?;
            }
            "--strategy" => {
                config.strategy = Strategy::from_str(value)
                    .ok_or_else(|| anyhow!("whack-sim: invalid --strategy value: {}", value))?;
            }
            "--step-ms" => {
                config.step_ms = value
                    .parse::<u64>()
                    .ok()
                    .filter(|&ms| ms > 0)
                    .ok_or_else(|| anyhow!("whack-sim: invalid --step-ms value: {}", value))?;
            }
            other => bail!("whack-sim: unknown argument: {}", other),
        }
        i += 2;
    }
    Ok(config)
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum SimLine<'a> {
    Frame {
        t_ms: u64,
        snapshot: &'a GameSnapshot,
    },
    Summary {
        seed: u64,
        score: u32,
        duration_ms: u64,
        outcome: Option<RoundOutcome>,
    },
}

fn emit(out: &mut impl Write, line: &SimLine<'_>) -> Result<()> {
    serde_json::to_writer(&mut *out, line)?;
    out.write_all(b"\n")?;
    Ok(())
}

/// Play one round and stream JSON lines into `out`. Returns the final snapshot.
pub fn run_sim(config: &SimConfig, out: &mut impl Write) -> Result<GameSnapshot> {
    let mut game = GameState::with_settings(config.settings, config.seed);
    if !game.start(0) {
        bail!("whack-sim: cannot start a round with grid size 0");
    }

    // A round cannot outlive its countdown; the cap guards the loop.
    let limit_ms = ROUND_SECONDS as u64 * 1000 + config.step_ms;
    let mut t_ms = 0u64;
    let mut step = 0u64;
    let mut last: Option<GameSnapshot> = None;

    loop {
        game.advance_to(t_ms);

        if game.running() && config.strategy.clicks_on(step) {
            let targets = game.snapshot().active;
            for index in targets {
                game.click(index);
            }
        }

        let snap = game.snapshot();
        if last.as_ref() != Some(&snap) {
            emit(out, &SimLine::Frame { t_ms, snapshot: &snap })?;
            last = Some(snap);
        }

        if !game.running() || t_ms >= limit_ms {
            break;
        }
        t_ms += config.step_ms;
        step += 1;
    }

    let snap = game.snapshot();
    debug!("simulation finished at {}ms with score {}", t_ms, snap.score);
    emit(
        out,
        &SimLine::Summary {
            seed: config.seed,
            score: snap.score,
            duration_ms: t_ms,
            outcome: snap.last_outcome,
        },
    )?;
    out.flush()?;
    Ok(snap)
}
