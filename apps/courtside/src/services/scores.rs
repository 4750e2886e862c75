//! Score Update Coordinator: the only write path for match scores.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::{debug, error, instrument, warn};

use crate::domain::{
    validate_score, Match, MatchId, MatchScore, PlayerId, ScoreChange, ScoreChangeRecord,
    ScoreUpdate, ScoreWarning, ScoringRules,
};
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::repos::{AuditLog, AuditSink, MatchEditPolicy, MatchRepo};

/// One proposed score from an actor who last saw the match at
/// `expected_version`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSubmission {
    pub match_id: MatchId,
    pub team1_score: i32,
    pub team2_score: i32,
    pub expected_version: i32,
    pub actor_id: PlayerId,
    #[serde(default)]
    pub reason: Option<String>,
}

/// What happened to the history entry of an accepted score.
#[derive(Debug, Clone, PartialEq)]
pub enum AuditOutcome {
    Recorded(ScoreChangeRecord),
    /// The score is committed but the sink failed. `pending` can be
    /// appended again as is.
    Failed {
        pending: ScoreChange,
        error: DomainError,
    },
}

impl AuditOutcome {
    pub fn is_recorded(&self) -> bool {
        matches!(self, AuditOutcome::Recorded(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreReceipt {
    pub updated: Match,
    pub warnings: Vec<ScoreWarning>,
    pub audit: AuditOutcome,
}

pub struct ScoreCoordinator<'a, M: ?Sized, A: ?Sized, P: ?Sized> {
    matches: &'a M,
    audit: &'a A,
    policy: &'a P,
    rules: ScoringRules,
}

impl<'a, M, A, P> ScoreCoordinator<'a, M, A, P>
where
    M: MatchRepo + ?Sized,
    A: AuditSink + AuditLog + ?Sized,
    P: MatchEditPolicy + ?Sized,
{
    pub fn new(matches: &'a M, audit: &'a A, policy: &'a P, rules: ScoringRules) -> Self {
        Self {
            matches,
            audit,
            policy,
            rules,
        }
    }

    pub fn rules(&self) -> &ScoringRules {
        &self.rules
    }

    /// Authorize, validate, compare-and-swap, then append history.
    ///
    /// Any error leaves the match and its history untouched. Conflicts are
    /// returned, never retried here.
    #[instrument(
        skip(self, submission),
        fields(
            match_id = submission.match_id,
            actor_id = submission.actor_id,
            expected_version = submission.expected_version
        )
    )]
    pub async fn submit_score(
        &self,
        submission: ScoreSubmission,
    ) -> Result<ScoreReceipt, DomainError> {
        let ScoreSubmission {
            match_id,
            team1_score,
            team2_score,
            expected_version,
            actor_id,
            reason,
        } = submission;

        if !self.policy.can_edit_match(actor_id, match_id).await? {
            warn!("score submission denied");
            return Err(DomainError::permission_denied(format!(
                "player {actor_id} may not edit match {match_id}"
            )));
        }

        let warnings = validate_score(team1_score, team2_score, &self.rules).into_result()?;

        let current = self.matches.find_match(match_id).await?.ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Match, format!("Match {match_id} not found"))
        })?;
        if current.version != expected_version {
            warn!(actual = current.version, "stale score submission");
            return Err(DomainError::optimistic_lock(
                expected_version,
                current.version,
            ));
        }

        let new_score = MatchScore::new(team1_score, team2_score);
        let new_version = expected_version + 1;
        let recorded_at = OffsetDateTime::now_utc();
        let updated = self
            .matches
            .cas_update_score(ScoreUpdate {
                match_id,
                expected_version,
                score: new_score,
                status: current.status.after_score_recorded(),
                actor_id,
                recorded_at,
            })
            .await
            .inspect_err(|e| {
                if e.is_concurrency_conflict() {
                    warn!(error = %e, "lost score race");
                }
            })?;

        let change = ScoreChange {
            match_id,
            old_score: current.score,
            old_version: expected_version,
            new_score,
            new_version,
            actor_id,
            recorded_at,
            reason,
        };
        let audit = match self.audit.append(&change).await {
            Ok(record) => AuditOutcome::Recorded(record),
            Err(e) => {
                error!(
                    error = %e,
                    new_version,
                    "score committed but history append failed"
                );
                AuditOutcome::Failed {
                    pending: change,
                    error: e,
                }
            }
        };

        debug!(
            new_version,
            status = %updated.status,
            warnings = warnings.len(),
            "score accepted"
        );
        Ok(ScoreReceipt {
            updated,
            warnings,
            audit,
        })
    }

    /// Accepted score changes for a match, oldest first.
    pub async fn history(&self, match_id: MatchId) -> Result<Vec<ScoreChangeRecord>, DomainError> {
        self.audit.history_for_match(match_id).await
    }
}
