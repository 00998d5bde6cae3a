//! Engine settings domain models.

use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};

/// How the history orchestrator walks the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReplayStrategy {
    /// Rebuild every day's state from the first transaction.
    FullReplay,
    /// Carry per-holding running state from one day to the next.
    #[default]
    Incremental,
}

/// How dividend reinvestment links that point at a missing transaction are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReinvestmentMode {
    /// Dangling links contribute zero reinvested shares.
    #[default]
    Lenient,
    /// Dangling links fail the calculation.
    Strict,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineSettings {
    #[serde(default)]
    pub replay_strategy: ReplayStrategy,
    #[serde(default)]
    pub reinvestment_mode: ReinvestmentMode,
    #[serde(default = "default_parallel_portfolios")]
    pub parallel_portfolios: bool,
}

fn default_parallel_portfolios() -> bool {
    true
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            replay_strategy: ReplayStrategy::default(),
            reinvestment_mode: ReinvestmentMode::default(),
            parallel_portfolios: default_parallel_portfolios(),
        }
    }
}

impl EngineSettings {
    /// Parses a JSON settings blob. Missing fields take their defaults.
    pub fn from_json(raw: &str) -> Result<Self> {
        if raw.trim().is_empty() {
            return Err(Error::InvalidConfigValue(
                "engine settings blob is empty".to_string(),
            ));
        }
        let settings: EngineSettings = serde_json::from_str(raw).map_err(|e| {
            Error::InvalidConfigValue(format!("engine settings could not be parsed: {}", e))
        })?;
        Ok(settings)
    }

    pub fn is_strict_reinvestment(&self) -> bool {
        self.reinvestment_mode == ReinvestmentMode::Strict
    }
}

/// Partial update of the engine settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineSettingsUpdate {
    pub replay_strategy: Option<ReplayStrategy>,
    pub reinvestment_mode: Option<ReinvestmentMode>,
    pub parallel_portfolios: Option<bool>,
}

impl EngineSettings {
    pub fn apply(&mut self, update: &EngineSettingsUpdate) {
        if let Some(strategy) = update.replay_strategy {
            self.replay_strategy = strategy;
        }
        if let Some(mode) = update.reinvestment_mode {
            self.reinvestment_mode = mode;
        }
        if let Some(parallel) = update.parallel_portfolios {
            self.parallel_portfolios = parallel;
        }
    }
}
