use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::domain::ids::{CourtId, MatchId, PartnershipId, PlayerId, TournamentId};
use crate::domain::scoring::{determine_winner, Team};
use crate::domain::status::MatchStatus;
use crate::errors::domain::{DomainError, InfraErrorKind};

/// A recorded score. Both sides present or the match has no score at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchScore {
    pub team1: i32,
    pub team2: i32,
}

impl MatchScore {
    pub fn new(team1: i32, team2: i32) -> Self {
        Self { team1, team2 }
    }

    pub fn winner(&self) -> Option<Team> {
        determine_winner(self.team1, self.team2)
    }

    /// Rebuild from two nullable columns; exactly one NULL is corrupt data.
    pub fn from_columns(
        team1: Option<i32>,
        team2: Option<i32>,
    ) -> Result<Option<Self>, DomainError> {
        match (team1, team2) {
            (Some(a), Some(b)) => Ok(Some(Self::new(a, b))),
            (None, None) => Ok(None),
            _ => Err(DomainError::infra(
                InfraErrorKind::DataCorruption,
                "match score has exactly one side recorded",
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub tournament_id: TournamentId,
    pub partnership1_id: PartnershipId,
    pub partnership2_id: PartnershipId,
    pub court_id: CourtId,
    pub round_number: u32,
    pub score: Option<MatchScore>,
    pub status: MatchStatus,
    /// Bumped by exactly one on every accepted write.
    pub version: i32,
    pub recorded_by: Option<PlayerId>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub recorded_at: Option<OffsetDateTime>,
}

impl Match {
    pub fn team1_score(&self) -> Option<i32> {
        self.score.map(|s| s.team1)
    }

    pub fn team2_score(&self) -> Option<i32> {
        self.score.map(|s| s.team2)
    }

    pub fn winner(&self) -> Option<PartnershipId> {
        match self.score?.winner()? {
            Team::One => Some(self.partnership1_id),
            Team::Two => Some(self.partnership2_id),
        }
    }
}

/// Conditional score write: applies only while the stored version equals
/// `expected_version`.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreUpdate {
    pub match_id: MatchId,
    pub expected_version: i32,
    pub score: MatchScore,
    pub status: MatchStatus,
    pub actor_id: PlayerId,
    pub recorded_at: OffsetDateTime,
}

/// Conditional status-only write, same version discipline as [`ScoreUpdate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusUpdate {
    pub match_id: MatchId,
    pub expected_version: i32,
    pub status: MatchStatus,
}
