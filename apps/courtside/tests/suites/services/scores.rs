use async_trait::async_trait;
use courtside::domain::{
    Match, MatchId, MatchScore, MatchStatus, PlayerId, ScheduledMatch, ScoreChange,
    ScoreChangeRecord, ScoreIssue, ScoreUpdate, ScoreWarning, StatusUpdate, TournamentId,
};
use courtside::errors::domain::{ConflictKind, InfraErrorKind, NotFoundKind};
use courtside::repos::{AuditLog, AuditSink, MatchRepo, PlayerRepo, TournamentRepo};
use courtside::services::matches::MatchStatusService;
use courtside::services::scores::{AuditOutcome, ScoreCoordinator, ScoreSubmission};
use courtside::{AllowAll, DomainError, InMemoryStore, ParticipantOrOwner};
use tokio::sync::Barrier;

use crate::support::{first_to, seeded_tournament, win_by_2};

fn submission(m: &Match, team1: i32, team2: i32, actor_id: PlayerId) -> ScoreSubmission {
    ScoreSubmission {
        match_id: m.id,
        team1_score: team1,
        team2_score: team2,
        expected_version: m.version,
        actor_id,
        reason: None,
    }
}

async fn first_match(store: &InMemoryStore) -> (Vec<courtside::domain::Player>, Match) {
    let (roster, generated) = seeded_tournament(store, 4, 1).await.unwrap();
    (roster, generated.matches[0].clone())
}

/// Sink that always fails; reads return nothing.
struct BrokenAudit;

#[async_trait]
impl AuditSink for BrokenAudit {
    async fn append(&self, _change: &ScoreChange) -> Result<ScoreChangeRecord, DomainError> {
        Err(DomainError::infra(
            InfraErrorKind::DbUnavailable,
            "audit store offline",
        ))
    }
}

#[async_trait]
impl AuditLog for BrokenAudit {
    async fn history_for_match(
        &self,
        _match_id: MatchId,
    ) -> Result<Vec<ScoreChangeRecord>, DomainError> {
        Ok(Vec::new())
    }
}

/// Match store that can hold readers until both have read, and can land a
/// second write right after each successful score write.
struct Contended<'a> {
    inner: &'a InMemoryStore,
    readers: Option<Barrier>,
    interleave_status_write: bool,
}

impl<'a> Contended<'a> {
    fn paired_readers(inner: &'a InMemoryStore) -> Self {
        Self {
            inner,
            readers: Some(Barrier::new(2)),
            interleave_status_write: false,
        }
    }

    fn interleaved_writer(inner: &'a InMemoryStore) -> Self {
        Self {
            inner,
            readers: None,
            interleave_status_write: true,
        }
    }
}

#[async_trait]
impl MatchRepo for Contended<'_> {
    async fn insert_matches(
        &self,
        tournament_id: TournamentId,
        matches: &[ScheduledMatch],
    ) -> Result<Vec<Match>, DomainError> {
        self.inner.insert_matches(tournament_id, matches).await
    }

    async fn find_match(&self, id: MatchId) -> Result<Option<Match>, DomainError> {
        let found = self.inner.find_match(id).await?;
        if let Some(readers) = &self.readers {
            readers.wait().await;
        }
        Ok(found)
    }

    async fn list_matches(&self, tournament_id: TournamentId) -> Result<Vec<Match>, DomainError> {
        self.inner.list_matches(tournament_id).await
    }

    async fn cas_update_score(&self, update: ScoreUpdate) -> Result<Match, DomainError> {
        let match_id = update.match_id;
        let written = self.inner.cas_update_score(update).await?;
        if !self.interleave_status_write {
            return Ok(written);
        }
        self.inner
            .cas_update_status(StatusUpdate {
                match_id,
                expected_version: written.version,
                status: MatchStatus::Disputed,
            })
            .await?;
        // Hand back the row as a late re-read would see it.
        self.inner
            .find_match(match_id)
            .await?
            .ok_or_else(|| DomainError::not_found(NotFoundKind::Match, "gone"))
    }

    async fn cas_update_status(&self, update: StatusUpdate) -> Result<Match, DomainError> {
        self.inner.cas_update_status(update).await
    }
}

#[tokio::test]
async fn accepted_score_bumps_version_and_records_history() {
    let store = InMemoryStore::new();
    let (roster, m) = first_match(&store).await;
    let coordinator = ScoreCoordinator::new(&store, &store, &AllowAll, first_to(11));

    let receipt = coordinator
        .submit_score(submission(&m, 11, 9, roster[0].id))
        .await
        .unwrap();

    assert_eq!(receipt.updated.version, 1);
    assert_eq!(receipt.updated.score, Some(MatchScore::new(11, 9)));
    assert_eq!(receipt.updated.status, MatchStatus::Completed);
    assert_eq!(receipt.updated.recorded_by, Some(roster[0].id));
    assert_eq!(receipt.updated.winner(), Some(m.partnership1_id));
    assert!(receipt.warnings.is_empty());
    assert!(receipt.audit.is_recorded());

    let history = coordinator.history(m.id).await.unwrap();
    assert_eq!(history.len(), 1);
    let change = &history[0].change;
    assert_eq!(change.old_score, None);
    assert_eq!(change.old_version, 0);
    assert_eq!(change.new_score, MatchScore::new(11, 9));
    assert_eq!(change.new_version, 1);
    assert_eq!(change.actor_id, roster[0].id);
}

#[tokio::test]
async fn correction_chains_versions_in_history() {
    let store = InMemoryStore::new();
    let (roster, m) = first_match(&store).await;
    let coordinator = ScoreCoordinator::new(&store, &store, &AllowAll, win_by_2(11));

    let first = coordinator
        .submit_score(submission(&m, 11, 8, roster[0].id))
        .await
        .unwrap();
    let mut correction = submission(&first.updated, 13, 11, roster[1].id);
    correction.reason = Some("typo on court".into());
    let second = coordinator.submit_score(correction).await.unwrap();

    assert_eq!(second.updated.version, 2);
    let history = coordinator.history(m.id).await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[1].change.old_score, Some(MatchScore::new(11, 8)));
    assert_eq!(history[1].change.old_version, 1);
    assert_eq!(history[1].change.new_version, 2);
    assert_eq!(history[1].change.reason.as_deref(), Some("typo on court"));
}

#[tokio::test]
async fn invalid_score_reports_every_issue_and_changes_nothing() {
    let store = InMemoryStore::new();
    let (roster, m) = first_match(&store).await;
    let coordinator = ScoreCoordinator::new(&store, &store, &AllowAll, first_to(11));

    let err = coordinator
        .submit_score(submission(&m, 9, 9, roster[0].id))
        .await
        .unwrap_err();

    match err {
        DomainError::InvalidScore(issues) => {
            assert!(issues.contains(&ScoreIssue::Tie));
            assert!(issues.contains(&ScoreIssue::TargetNotReached { target: 11 }));
        }
        other => panic!("expected InvalidScore, got {other:?}"),
    }
    let stored = store.find_match(m.id).await.unwrap().unwrap();
    assert_eq!(stored, m);
    assert_eq!(store.score_change_count(), 0);
}

#[tokio::test]
async fn warnings_ride_along_with_success() {
    let store = InMemoryStore::new();
    let (roster, m) = first_match(&store).await;
    let coordinator = ScoreCoordinator::new(&store, &store, &AllowAll, first_to(11));

    let receipt = coordinator
        .submit_score(submission(&m, 25, 3, roster[0].id))
        .await
        .unwrap();

    assert!(receipt
        .warnings
        .contains(&ScoreWarning::UnusuallyHighScore {
            score: 25,
            target: 11
        }));
    assert!(receipt
        .warnings
        .contains(&ScoreWarning::LargeMargin { margin: 22 }));
}

#[tokio::test]
async fn stale_version_is_a_conflict() {
    let store = InMemoryStore::new();
    let (roster, m) = first_match(&store).await;
    let coordinator = ScoreCoordinator::new(&store, &store, &AllowAll, first_to(11));

    coordinator
        .submit_score(submission(&m, 11, 9, roster[0].id))
        .await
        .unwrap();
    let err = coordinator
        .submit_score(submission(&m, 11, 7, roster[1].id))
        .await
        .unwrap_err();

    assert!(err.is_concurrency_conflict());
    assert!(matches!(
        err,
        DomainError::Conflict(
            ConflictKind::OptimisticLock {
                expected: 0,
                actual: 1
            },
            _
        )
    ));
    assert_eq!(store.score_change_count(), 1);
}

#[tokio::test]
async fn simultaneous_submissions_have_one_winner() {
    let store = InMemoryStore::new();
    let (roster, m) = first_match(&store).await;
    // Both submissions read version 0 before either writes.
    let contended = Contended::paired_readers(&store);
    let coordinator = ScoreCoordinator::new(&contended, &store, &AllowAll, first_to(11));

    let (a, b) = tokio::join!(
        coordinator.submit_score(submission(&m, 11, 9, roster[0].id)),
        coordinator.submit_score(submission(&m, 11, 6, roster[2].id)),
    );

    let outcomes = [a, b];
    let wins = outcomes.iter().filter(|r| r.is_ok()).count();
    let conflicts: Vec<&DomainError> = outcomes.iter().filter_map(|r| r.as_ref().err()).collect();
    assert_eq!(wins, 1);
    assert_eq!(conflicts.len(), 1);
    assert_eq!(*conflicts[0], DomainError::optimistic_lock(0, 1));

    let stored = store.find_match(m.id).await.unwrap().unwrap();
    assert_eq!(stored.version, 1);
    assert_eq!(coordinator.history(m.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn history_version_comes_from_the_write_not_a_later_read() {
    let store = InMemoryStore::new();
    let (roster, m) = first_match(&store).await;
    let contended = Contended::interleaved_writer(&store);
    let coordinator = ScoreCoordinator::new(&contended, &store, &AllowAll, first_to(11));

    let receipt = coordinator
        .submit_score(submission(&m, 11, 9, roster[0].id))
        .await
        .unwrap();
    assert_eq!(receipt.updated.version, 2);

    let history = coordinator.history(m.id).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].change.old_version, 0);
    assert_eq!(history[0].change.new_version, 1);
    assert_eq!(history[0].change.new_score, MatchScore::new(11, 9));
}

#[tokio::test]
async fn outsider_is_denied_without_side_effects() {
    let store = InMemoryStore::new();
    let (_, m) = first_match(&store).await;
    let outsider = crate::support::register_players(&store, 1).await.remove(0);
    let policy = ParticipantOrOwner::new(&store);
    let coordinator = ScoreCoordinator::new(&store, &store, &policy, first_to(11));

    let err = coordinator
        .submit_score(submission(&m, 11, 9, outsider.id))
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::PermissionDenied(_)));
    assert_eq!(store.find_match(m.id).await.unwrap().unwrap().version, 0);
    assert_eq!(store.score_change_count(), 0);
}

#[tokio::test]
async fn participants_and_owners_may_edit() {
    let store = InMemoryStore::new();
    let (_, m) = first_match(&store).await;
    let policy = ParticipantOrOwner::new(&store);
    let coordinator = ScoreCoordinator::new(&store, &store, &policy, first_to(11));

    let partnership = store
        .find_partnership(m.partnership2_id)
        .await
        .unwrap()
        .unwrap();
    let receipt = coordinator
        .submit_score(submission(&m, 7, 11, partnership.player2_id))
        .await
        .unwrap();

    let owner = store
        .create_player(
            courtside::domain::NewPlayer::new(
                "Organizer",
                courtside_test_support::unique_email("owner"),
            )
            .owner(),
        )
        .await
        .unwrap();
    let corrected = coordinator
        .submit_score(submission(&receipt.updated, 11, 7, owner.id))
        .await
        .unwrap();
    assert_eq!(corrected.updated.version, 2);
}

#[tokio::test]
async fn plain_closure_works_as_policy() {
    let store = InMemoryStore::new();
    let (roster, m) = first_match(&store).await;
    let nobody = |_: PlayerId, _: MatchId| false;
    let coordinator = ScoreCoordinator::new(&store, &store, &nobody, first_to(11));

    let err = coordinator
        .submit_score(submission(&m, 11, 9, roster[0].id))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::PermissionDenied(_)));
}

#[tokio::test]
async fn unknown_match_is_not_found() {
    let store = InMemoryStore::new();
    let coordinator = ScoreCoordinator::new(&store, &store, &AllowAll, first_to(11));

    let err = coordinator
        .submit_score(ScoreSubmission {
            match_id: 404,
            team1_score: 11,
            team2_score: 4,
            expected_version: 0,
            actor_id: 1,
            reason: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound(NotFoundKind::Match, _)));
}

#[tokio::test]
async fn audit_failure_keeps_score_and_returns_pending_entry() {
    let store = InMemoryStore::new();
    let (roster, m) = first_match(&store).await;
    let coordinator = ScoreCoordinator::new(&store, &BrokenAudit, &AllowAll, first_to(11));

    let receipt = coordinator
        .submit_score(submission(&m, 11, 9, roster[0].id))
        .await
        .unwrap();

    assert_eq!(receipt.updated.version, 1);
    let pending = match receipt.audit {
        AuditOutcome::Failed { pending, error } => {
            assert!(matches!(
                error,
                DomainError::Infra(InfraErrorKind::DbUnavailable, _)
            ));
            pending
        }
        AuditOutcome::Recorded(_) => panic!("broken sink cannot record"),
    };
    assert_eq!(pending.new_version, 1);
    assert_eq!(pending.old_version, 0);

    // Caller retries against a working sink.
    let record = store.append(&pending).await.unwrap();
    assert_eq!(record.change, pending);
    assert_eq!(store.history_for_match(m.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn scoring_a_disputed_match_keeps_it_disputed() {
    let store = InMemoryStore::new();
    let (roster, m) = first_match(&store).await;
    let status = MatchStatusService::new(&store);
    let started = status.mark_started(m.id, m.version).await.unwrap();
    let disputed = status
        .flag_disputed(started.id, started.version)
        .await
        .unwrap();

    let coordinator = ScoreCoordinator::new(&store, &store, &AllowAll, first_to(11));
    let receipt = coordinator
        .submit_score(submission(&disputed, 11, 9, roster[0].id))
        .await
        .unwrap();

    assert_eq!(receipt.updated.status, MatchStatus::Disputed);
    assert_eq!(receipt.updated.version, 3);
}
