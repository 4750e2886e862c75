use async_trait::async_trait;

use crate::domain::{Match, MatchId, ScheduledMatch, ScoreUpdate, StatusUpdate, TournamentId};
use crate::errors::domain::DomainError;

#[async_trait]
pub trait MatchRepo: Send + Sync {
    /// Insert a whole schedule: every match or none. New rows start
    /// `waiting`, unscored, at version 0.
    async fn insert_matches(
        &self,
        tournament_id: TournamentId,
        matches: &[ScheduledMatch],
    ) -> Result<Vec<Match>, DomainError>;

    async fn find_match(&self, id: MatchId) -> Result<Option<Match>, DomainError>;

    /// Matches ordered by (round, court).
    async fn list_matches(&self, tournament_id: TournamentId) -> Result<Vec<Match>, DomainError>;

    /// Compare-and-swap the score. Succeeds only while the stored version
    /// equals `update.expected_version`; bumps the version by one.
    ///
    /// Errors: `NotFound(Match)` for an unknown id,
    /// `Conflict(OptimisticLock)` on a version mismatch.
    async fn cas_update_score(&self, update: ScoreUpdate) -> Result<Match, DomainError>;

    /// Same discipline as [`MatchRepo::cas_update_score`], status only.
    async fn cas_update_status(&self, update: StatusUpdate) -> Result<Match, DomainError>;
}
