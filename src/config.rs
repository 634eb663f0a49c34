use serde::{Deserialize, Serialize};
use std::path::Path;
use anyhow::Result;

use crate::domains::escape_planning::{HeuristicMode, PlannerOptions, PursuitKind};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub planner: PlannerConfig,
    pub logging: LoggingConfig,
    pub scenarios: ScenarioConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub heuristic: HeuristicMode,
    pub guard_moves_per_turn: u32,
    pub pursuit: PursuitKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub file: Option<String>,
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    pub data_dir: Option<String>,
    pub default_scenario: String,
}

impl Config {
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = tokio::fs::read_to_string(path).await?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        if config.planner.guard_moves_per_turn == 0 {
            anyhow::bail!("planner.guard_moves_per_turn must be at least 1");
        }
        Ok(config)
    }
}

impl PlannerConfig {
    pub fn options(&self) -> PlannerOptions {
        PlannerOptions {
            heuristic: self.heuristic,
            guard_moves_per_turn: self.guard_moves_per_turn,
        }
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        let options = PlannerOptions::default();
        Self {
            heuristic: options.heuristic,
            guard_moves_per_turn: options.guard_moves_per_turn,
            pursuit: PursuitKind::Greedy,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file: None,
            level: "info".to_string(),
        }
    }
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            default_scenario: "corridor.json".to_string(),
        }
    }
}
