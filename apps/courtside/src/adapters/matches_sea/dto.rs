//! DTOs for the matches_sea adapter.

use time::OffsetDateTime;

use crate::domain::{MatchStatus, ScheduledMatch, ScoreUpdate, StatusUpdate};

/// New match row; always starts `waiting`, unscored, at version 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchCreate {
    pub tournament_id: i64,
    pub partnership1_id: i64,
    pub partnership2_id: i64,
    pub court_id: i64,
    pub round_number: i32,
}

impl MatchCreate {
    pub fn from_scheduled(tournament_id: i64, scheduled: &ScheduledMatch) -> Self {
        Self {
            tournament_id,
            partnership1_id: scheduled.partnership1_id,
            partnership2_id: scheduled.partnership2_id,
            court_id: scheduled.court_id,
            round_number: i32::try_from(scheduled.round_number).unwrap_or(i32::MAX),
        }
    }
}

/// Conditional score write.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchScoreWrite {
    pub id: i64,
    pub expected_version: i32,
    pub team1_score: i32,
    pub team2_score: i32,
    pub status: MatchStatus,
    pub recorded_by: i64,
    pub recorded_at: OffsetDateTime,
}

impl From<&ScoreUpdate> for MatchScoreWrite {
    fn from(update: &ScoreUpdate) -> Self {
        Self {
            id: update.match_id,
            expected_version: update.expected_version,
            team1_score: update.score.team1,
            team2_score: update.score.team2,
            status: update.status,
            recorded_by: update.actor_id,
            recorded_at: update.recorded_at,
        }
    }
}

/// Conditional status-only write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchStatusWrite {
    pub id: i64,
    pub expected_version: i32,
    pub status: MatchStatus,
}

impl From<&StatusUpdate> for MatchStatusWrite {
    fn from(update: &StatusUpdate) -> Self {
        Self {
            id: update.match_id,
            expected_version: update.expected_version,
            status: update.status,
        }
    }
}
