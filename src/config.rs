//! Tunable engine constants.
//!
//! The builtin values ship as `data/engine_config.json`; a file passed with
//! `--config` replaces them wholesale, with missing keys falling back to the
//! defaults below.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use bevy_utils::tracing::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const BUILTIN_ENGINE_CONFIG: &str = include_str!("data/engine_config.json");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Days an ordinary event stays ineligible after it fires.
    pub cooldown_days: u32,
    /// Chance that an ordinary event is drawn on a day with no chain follow-up.
    pub event_chance: f64,
    /// Weight used for events that leave `probability` unset.
    pub default_weight: f64,
    /// Chains older than this are evicted during day advancement.
    pub chain_max_age_days: u32,
    pub max_days: u32,
    /// Write the continue slot after every turn instead of only at game end.
    pub persist_every_turn: bool,
    pub drain: DrainConfig,
    pub endings: EndingThresholds,
    pub initial: InitialStatsConfig,
    pub actions: ActionConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cooldown_days: 5,
            event_chance: 0.6,
            default_weight: 0.1,
            chain_max_age_days: 60,
            max_days: 100,
            persist_every_turn: false,
            drain: DrainConfig::default(),
            endings: EndingThresholds::default(),
            initial: InitialStatsConfig::default(),
            actions: ActionConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrainConfig {
    pub knowledge: f64,
    pub morale: f64,
    pub safety: f64,
    pub fatigue: f64,
}

impl Default for DrainConfig {
    fn default() -> Self {
        Self {
            knowledge: 0.3,
            morale: 0.5,
            safety: 0.2,
            fatigue: 1.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndingThresholds {
    pub success_flight_hours: f64,
    pub success_knowledge: f64,
    pub success_safety: f64,
    pub bankrupt_money: f64,
    pub exhausted_fatigue: f64,
}

impl Default for EndingThresholds {
    fn default() -> Self {
        Self {
            success_flight_hours: 40.0,
            success_knowledge: 85.0,
            success_safety: 80.0,
            bankrupt_money: 500.0,
            exhausted_fatigue: 100.0,
        }
    }
}

/// Inclusive uniform ranges for a fresh game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InitialStatsConfig {
    pub morale: (i64, i64),
    pub money: (i64, i64),
    pub fatigue: (i64, i64),
}

impl Default for InitialStatsConfig {
    fn default() -> Self {
        Self {
            morale: (70, 80),
            money: (17_000, 20_000),
            fatigue: (5, 15),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionConfig {
    pub study_cost: f64,
    pub simulator_cost: f64,
    pub tutoring_chance: f64,
    pub part_time_chance: f64,
}

impl Default for ActionConfig {
    fn default() -> Self {
        Self {
            study_cost: 30.0,
            simulator_cost: 75.0,
            tutoring_chance: 0.1,
            part_time_chance: 0.1,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse engine config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read engine config from {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl EngineConfig {
    pub fn builtin() -> Self {
        Self::from_json_str(BUILTIN_ENGINE_CONFIG).unwrap_or_else(|err| {
            warn!(target: "ppl::config", error = %err, "builtin config unreadable, using defaults");
            Self::default()
        })
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_matches_defaults() {
        assert_eq!(EngineConfig::builtin(), EngineConfig::default());
    }

    #[test]
    fn partial_json_keeps_remaining_defaults() {
        let config = EngineConfig::from_json_str(r#"{ "cooldown_days": 7 }"#).unwrap();
        assert_eq!(config.cooldown_days, 7);
        assert_eq!(config.drain, DrainConfig::default());
        assert_eq!(config.max_days, 100);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = EngineConfig::from_file(Path::new("/nonexistent/engine.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/engine.json"));
    }
}
