//! Tournament settings: court count and the win condition the score
//! validator enforces.

use std::env;

use serde::{Deserialize, Serialize};

use crate::domain::scoring::{ScoringRules, WinCondition, DEFAULT_MAX_SCORE, SCORE_CEILING};
use crate::errors::domain::DomainError;

pub const ENV_NUM_COURTS: &str = "COURTSIDE_NUM_COURTS";
pub const ENV_WIN_CONDITION: &str = "COURTSIDE_WIN_CONDITION";
pub const ENV_TARGET_SCORE: &str = "COURTSIDE_TARGET_SCORE";
pub const ENV_MAX_SCORE: &str = "COURTSIDE_MAX_SCORE";

const DEFAULT_NUM_COURTS: u32 = 2;
const DEFAULT_TARGET_SCORE: i32 = 11;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentConfig {
    pub num_courts: u32,
    pub win_condition: WinCondition,
    pub target_score: i32,
    #[serde(default = "default_max_score")]
    pub max_score: i32,
}

fn default_max_score() -> i32 {
    DEFAULT_MAX_SCORE
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            num_courts: DEFAULT_NUM_COURTS,
            win_condition: WinCondition::FirstToTarget,
            target_score: DEFAULT_TARGET_SCORE,
            max_score: DEFAULT_MAX_SCORE,
        }
    }
}

impl TournamentConfig {
    pub fn new(num_courts: u32, win_condition: WinCondition, target_score: i32) -> Self {
        Self {
            num_courts,
            win_condition,
            target_score,
            max_score: DEFAULT_MAX_SCORE,
        }
    }

    /// Parse and validate a JSON document.
    pub fn from_json(raw: &str) -> Result<Self, DomainError> {
        let config: Self = serde_json::from_str(raw)
            .map_err(|e| DomainError::configuration(format!("invalid tournament config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Read `COURTSIDE_*` variables; unset ones keep their defaults.
    pub fn from_env() -> Result<Self, DomainError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`TournamentConfig::from_env`] with an explicit source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DomainError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(raw) = lookup(ENV_NUM_COURTS) {
            config.num_courts = parse_var(ENV_NUM_COURTS, &raw)?;
        }
        if let Some(raw) = lookup(ENV_WIN_CONDITION) {
            config.win_condition = raw.parse()?;
        }
        if let Some(raw) = lookup(ENV_TARGET_SCORE) {
            config.target_score = parse_var(ENV_TARGET_SCORE, &raw)?;
        }
        if let Some(raw) = lookup(ENV_MAX_SCORE) {
            config.max_score = parse_var(ENV_MAX_SCORE, &raw)?;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.num_courts < 1 {
            return Err(DomainError::configuration(
                "tournament needs at least one court",
            ));
        }
        if self.target_score < 1 {
            return Err(DomainError::configuration(format!(
                "target score must be at least 1 (got {})",
                self.target_score
            )));
        }
        if self.max_score < self.target_score {
            return Err(DomainError::configuration(format!(
                "max score {} is below target score {}",
                self.max_score, self.target_score
            )));
        }
        if self.max_score > SCORE_CEILING {
            return Err(DomainError::configuration(format!(
                "max score {} exceeds the ceiling of {SCORE_CEILING}",
                self.max_score
            )));
        }
        Ok(())
    }

    pub fn scoring_rules(&self) -> ScoringRules {
        ScoringRules::new(self.win_condition, self.target_score).with_max_score(self.max_score)
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, DomainError> {
    raw.trim()
        .parse()
        .map_err(|_| DomainError::configuration(format!("{key} has invalid value '{raw}'")))
}
