//! Append-only score history.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::domain::ids::{MatchId, PlayerId, ScoreChangeId};
use crate::domain::matches::MatchScore;

/// One accepted score mutation, before the sink assigns an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreChange {
    pub match_id: MatchId,
    pub old_score: Option<MatchScore>,
    pub old_version: i32,
    pub new_score: MatchScore,
    pub new_version: i32,
    pub actor_id: PlayerId,
    #[serde(with = "time::serde::rfc3339")]
    pub recorded_at: OffsetDateTime,
    pub reason: Option<String>,
}

/// A persisted history entry. Never updated or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreChangeRecord {
    pub id: ScoreChangeId,
    #[serde(flatten)]
    pub change: ScoreChange,
}
