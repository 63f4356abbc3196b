//! Environment configuration for the binaries.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `WHACK_GRID_SIZE` | 3 | Grid edge (clamped to 3..=10, `<= 0` disables start) |
//! | `WHACK_DIFFICULTY` | easy | `easy`, `medium` or `hard` |
//! | `WHACK_SEED` | wall clock | RNG seed for cell placement |
//! | `WHACK_LOG_PATH` | unset | Log file; the interactive game logs nowhere without it |
//! | `WHACK_LOG` | info | `env_logger` filter |
//!
//! Unparseable values are ignored and the default is kept.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::core::{parse_grid_size, Settings};
use crate::types::Difficulty;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub settings: Settings,
    pub seed: u64,
    pub log_path: Option<String>,
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            settings: Settings::default(),
            seed: clock_seed(),
            log_path: None,
            log_filter: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup` (the environment, or a map in tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(size) = lookup("WHACK_GRID_SIZE").and_then(|s| parse_grid_size(&s)) {
            config.settings.grid_size = size;
        }
        if let Some(d) = lookup("WHACK_DIFFICULTY").and_then(|s| Difficulty::from_str(&s)) {
            config.settings.difficulty = d;
        }
        if let Some(seed) = lookup("WHACK_SEED").and_then(|s| s.trim().parse::<u64>().ok()) {
            config.seed = seed;
        }
        config.log_path = lookup("WHACK_LOG_PATH")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        if let Some(filter) = lookup("WHACK_LOG").filter(|s| !s.trim().is_empty()) {
            config.log_filter = filter;
        }

        config
    }
}

/// Seed derived from the wall clock.
pub fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(1)
}
