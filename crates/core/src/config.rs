//! Config module - rules configuration with environment overrides
//!
//! Environment variables (all optional):
//! - `TETRIS_RULES_SEED`: bag seed (u32)
//! - `TETRIS_RULES_ROTATION`: `simple` or `srs`
//! - `TETRIS_RULES_LINES_PER_LEVEL`
//! - `TETRIS_RULES_INITIAL_LEVEL`
//! - `TETRIS_RULES_BASE_INTERVAL_MS`
//!
//! Values that do not parse are ignored with a warning and the default is kept.

use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::rotation::RotationSystem;
use crate::scoring::ScoringConfig;
use crate::types::RulesError;

pub const ENV_SEED: &str = "TETRIS_RULES_SEED";
pub const ENV_ROTATION: &str = "TETRIS_RULES_ROTATION";
pub const ENV_LINES_PER_LEVEL: &str = "TETRIS_RULES_LINES_PER_LEVEL";
pub const ENV_INITIAL_LEVEL: &str = "TETRIS_RULES_INITIAL_LEVEL";
pub const ENV_BASE_INTERVAL_MS: &str = "TETRIS_RULES_BASE_INTERVAL_MS";

/// Seed used when none is configured
pub const DEFAULT_SEED: u32 = 1;

/// Everything a session needs besides the host's timer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub scoring: ScoringConfig,
    pub rotation_system: RotationSystem,
    pub seed: u32,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            scoring: ScoringConfig::default(),
            rotation_system: RotationSystem::default(),
            seed: DEFAULT_SEED,
        }
    }
}

impl RulesConfig {
    /// Defaults overridden by `TETRIS_RULES_*` environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable name
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(seed) = parse_var(&lookup, ENV_SEED) {
            config.seed = seed;
        }
        if let Some(system) = parse_var(&lookup, ENV_ROTATION) {
            config.rotation_system = system;
        }
        if let Some(lines) = parse_var(&lookup, ENV_LINES_PER_LEVEL) {
            config.scoring.lines_per_level = lines;
        }
        if let Some(level) = parse_var(&lookup, ENV_INITIAL_LEVEL) {
            config.scoring.initial_level = level;
        }
        if let Some(ms) = parse_var(&lookup, ENV_BASE_INTERVAL_MS) {
            config.scoring.base_interval_ms = ms;
        }

        config
    }

    pub fn validate(&self) -> Result<(), RulesError> {
        self.scoring.validate()
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            log::warn!("ignoring {}={:?}: not a valid value", key, raw);
            None
        }
    }
}
