use courtside::domain::{group_by_round, MatchScore, MatchStatus, ScoreUpdate, StatusUpdate};
use courtside::errors::domain::{ConflictKind, NotFoundKind};
use courtside::repos::{MatchRepo, TournamentRepo};
use courtside::services::scores::{ScoreCoordinator, ScoreSubmission};
use courtside::{AllowAll, DomainError, SeaStore};
use time::OffsetDateTime;

use crate::support::{first_to, migrated_db, seeded_tournament, TOURNAMENT};

fn score_update(match_id: i64, expected_version: i32, actor_id: i64) -> ScoreUpdate {
    ScoreUpdate {
        match_id,
        expected_version,
        score: MatchScore::new(11, 9),
        status: MatchStatus::Completed,
        actor_id,
        recorded_at: OffsetDateTime::now_utc(),
    }
}

#[tokio::test]
async fn generated_schedule_is_persisted_in_round_order() {
    let db = migrated_db().await;
    let store = SeaStore::new(&db);

    let (_, generated) = seeded_tournament(&store, 4, 2).await.unwrap();

    let stored = store.list_matches(TOURNAMENT).await.unwrap();
    assert_eq!(stored, generated.matches);
    let sizes: Vec<usize> = group_by_round(&stored)
        .iter()
        .map(|r| r.matches.len())
        .collect();
    assert_eq!(sizes, vec![2, 1]);
    assert!(stored
        .iter()
        .all(|m| m.status == MatchStatus::Waiting && m.version == 0 && m.score.is_none()));

    let partnerships = store.list_partnerships(TOURNAMENT).await.unwrap();
    assert_eq!(partnerships, generated.partnerships);
    let courts = store.list_courts(TOURNAMENT).await.unwrap();
    assert_eq!(courts, generated.courts);
}

#[tokio::test]
async fn conditional_update_bumps_version() {
    let db = migrated_db().await;
    let store = SeaStore::new(&db);
    let (roster, generated) = seeded_tournament(&store, 4, 1).await.unwrap();
    let m = &generated.matches[0];

    let updated = store
        .cas_update_score(score_update(m.id, 0, roster[0].id))
        .await
        .unwrap();

    assert_eq!(updated.version, 1);
    assert_eq!(updated.score, Some(MatchScore::new(11, 9)));
    assert_eq!(updated.status, MatchStatus::Completed);
    assert_eq!(updated.recorded_by, Some(roster[0].id));
    assert!(updated.recorded_at.is_some());
}

#[tokio::test]
async fn stale_conditional_update_reports_both_versions() {
    let db = migrated_db().await;
    let store = SeaStore::new(&db);
    let (roster, generated) = seeded_tournament(&store, 4, 1).await.unwrap();
    let m = &generated.matches[0];

    store
        .cas_update_score(score_update(m.id, 0, roster[0].id))
        .await
        .unwrap();
    let err = store
        .cas_update_score(score_update(m.id, 0, roster[1].id))
        .await
        .unwrap_err();

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
    let stored = store.find_match(m.id).await.unwrap().unwrap();
    assert_eq!(stored.version, 1);
    assert_eq!(stored.recorded_by, Some(roster[0].id));
}

#[tokio::test]
async fn conditional_update_of_missing_match_is_not_found() {
    let db = migrated_db().await;
    let store = SeaStore::new(&db);

    let err = store
        .cas_update_status(StatusUpdate {
            match_id: 4_242,
            expected_version: 0,
            status: MatchStatus::InProgress,
        })
        .await
        .unwrap_err();
    assert!(
        matches!(err, DomainError::NotFound(NotFoundKind::Match, ref d) if d.contains("4242")),
        "got {err:?}"
    );
}

#[tokio::test]
async fn status_update_leaves_score_alone() {
    let db = migrated_db().await;
    let store = SeaStore::new(&db);
    let (_, generated) = seeded_tournament(&store, 4, 1).await.unwrap();
    let m = &generated.matches[0];

    let updated = store
        .cas_update_status(StatusUpdate {
            match_id: m.id,
            expected_version: 0,
            status: MatchStatus::InProgress,
        })
        .await
        .unwrap();
    assert_eq!(updated.status, MatchStatus::InProgress);
    assert_eq!(updated.version, 1);
    assert_eq!(updated.score, None);
}

#[tokio::test]
async fn racing_coordinators_commit_once() {
    let db = migrated_db().await;
    let store = SeaStore::new(&db);
    let (roster, generated) = seeded_tournament(&store, 4, 1).await.unwrap();
    let m = &generated.matches[0];
    let coordinator = ScoreCoordinator::new(&store, &store, &AllowAll, first_to(11));

    let submit = |team2: i32, actor_id: i64| ScoreSubmission {
        match_id: m.id,
        team1_score: 11,
        team2_score: team2,
        expected_version: 0,
        actor_id,
        reason: None,
    };
    let (a, b) = tokio::join!(
        coordinator.submit_score(submit(9, roster[0].id)),
        coordinator.submit_score(submit(5, roster[3].id)),
    );

    let outcomes = [a, b];
    assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
    assert_eq!(
        outcomes
            .iter()
            .filter(|r| matches!(r, Err(e) if e.is_concurrency_conflict()))
            .count(),
        1
    );
    assert_eq!(coordinator.history(m.id).await.unwrap().len(), 1);
    assert_eq!(store.find_match(m.id).await.unwrap().unwrap().version, 1);
}
