//! Out-of-band status changes that do not touch the score.

use tracing::{info, instrument};

use crate::domain::{Match, MatchId, MatchStatus, StatusUpdate};
use crate::errors::domain::{DomainError, NotFoundKind, ValidationKind};
use crate::repos::MatchRepo;

pub struct MatchStatusService<'a, M: ?Sized> {
    matches: &'a M,
}

impl<'a, M> MatchStatusService<'a, M>
where
    M: MatchRepo + ?Sized,
{
    pub fn new(matches: &'a M) -> Self {
        Self { matches }
    }

    /// `waiting` → `in_progress`.
    pub async fn mark_started(
        &self,
        match_id: MatchId,
        expected_version: i32,
    ) -> Result<Match, DomainError> {
        self.transition(match_id, expected_version, MatchStatus::InProgress)
            .await
    }

    /// `in_progress` or `completed` → `disputed`.
    pub async fn flag_disputed(
        &self,
        match_id: MatchId,
        expected_version: i32,
    ) -> Result<Match, DomainError> {
        self.transition(match_id, expected_version, MatchStatus::Disputed)
            .await
    }

    #[instrument(skip(self))]
    async fn transition(
        &self,
        match_id: MatchId,
        expected_version: i32,
        next: MatchStatus,
    ) -> Result<Match, DomainError> {
        let current = self.matches.find_match(match_id).await?.ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Match, format!("Match {match_id} not found"))
        })?;
        if current.version != expected_version {
            return Err(DomainError::optimistic_lock(
                expected_version,
                current.version,
            ));
        }
        if current.status == next || !current.status.can_transition_to(next) {
            return Err(DomainError::validation(
                ValidationKind::InvalidStatusTransition,
                format!("match {match_id} cannot go from {} to {next}", current.status),
            ));
        }

        let updated = self
            .matches
            .cas_update_status(StatusUpdate {
                match_id,
                expected_version,
                status: next,
            })
            .await?;
        info!(
            from = %current.status,
            to = %updated.status,
            version = updated.version,
            "match status changed"
        );
        Ok(updated)
    }
}
