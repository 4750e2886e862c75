use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Match lifecycle.
///
/// `Waiting` → `InProgress` → `Completed`; `Disputed` is reachable from
/// `InProgress` and `Completed` only. Nothing returns to `Waiting`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Waiting,
    InProgress,
    Completed,
    Disputed,
}

impl MatchStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            MatchStatus::Waiting => "waiting",
            MatchStatus::InProgress => "in_progress",
            MatchStatus::Completed => "completed",
            MatchStatus::Disputed => "disputed",
        }
    }

    pub fn can_transition_to(&self, next: MatchStatus) -> bool {
        use MatchStatus::*;
        matches!(
            (*self, next),
            (Waiting, InProgress)
                | (Waiting, Completed)
                | (InProgress, Completed)
                | (Completed, Completed)
                | (InProgress, Disputed)
                | (Completed, Disputed)
                | (Disputed, Disputed)
        )
    }

    /// Status a match takes once a valid score is recorded.
    pub fn after_score_recorded(&self) -> MatchStatus {
        match self {
            MatchStatus::Disputed => MatchStatus::Disputed,
            _ => MatchStatus::Completed,
        }
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatus(pub String);

impl fmt::Display for UnknownStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown match status '{}'", self.0)
    }
}

impl std::error::Error for UnknownStatus {}

impl FromStr for MatchStatus {
    type Err = UnknownStatus;

    /// Accepts `in_progress`, `in-progress`, `inProgress`, any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "waiting" => Ok(MatchStatus::Waiting),
            "inprogress" => Ok(MatchStatus::InProgress),
            "completed" => Ok(MatchStatus::Completed),
            "disputed" => Ok(MatchStatus::Disputed),
            _ => Err(UnknownStatus(s.to_string())),
        }
    }
}
