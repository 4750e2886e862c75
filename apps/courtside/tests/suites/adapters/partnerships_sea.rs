use courtside::adapters::partnerships_sea;
use courtside::domain::{CourtDraft, PartnershipDraft};
use courtside::errors::domain::{ConflictKind, ValidationKind};
use courtside::repos::TournamentRepo;
use courtside::{DomainError, SeaStore};

use crate::support::{migrated_db, register_players, TOURNAMENT};

fn draft(player1_id: i64, player2_id: i64) -> PartnershipDraft {
    PartnershipDraft {
        player1_id,
        player2_id,
        label: format!("{player1_id} & {player2_id}"),
    }
}

#[tokio::test]
async fn reversed_pair_hits_the_unordered_index() {
    let db = migrated_db().await;
    let store = SeaStore::new(&db);
    let players = register_players(&store, 2).await;
    let (a, b) = (players[0].id, players[1].id);

    store
        .create_partnerships(TOURNAMENT, &[draft(a, b)])
        .await
        .unwrap();
    let err = store
        .create_partnerships(TOURNAMENT, &[draft(b, a)])
        .await
        .unwrap_err();

    assert!(
        matches!(
            err,
            DomainError::Conflict(ConflictKind::DuplicatePartnership, _)
        ),
        "got {err:?}"
    );
    assert_eq!(store.list_partnerships(TOURNAMENT).await.unwrap().len(), 1);
}

#[tokio::test]
async fn self_pair_is_rejected_before_any_write() {
    let db = migrated_db().await;
    let store = SeaStore::new(&db);
    let players = register_players(&store, 3).await;

    let err = store
        .create_partnerships(
            TOURNAMENT,
            &[
                draft(players[0].id, players[1].id),
                draft(players[2].id, players[2].id),
            ],
        )
        .await
        .unwrap_err();

    assert!(
        matches!(
            err,
            DomainError::Validation(ValidationKind::SelfPartnership, _)
        ),
        "got {err:?}"
    );
    assert!(store.list_partnerships(TOURNAMENT).await.unwrap().is_empty());
}

#[tokio::test]
async fn schema_refuses_self_pair_written_directly() {
    let db = migrated_db().await;
    let players = register_players(&SeaStore::new(&db), 1).await;
    let id = players[0].id;

    let err = partnerships_sea::create_many(&db, TOURNAMENT, &[draft(id, id)])
        .await
        .unwrap_err();

    assert!(
        matches!(
            DomainError::from(err),
            DomainError::Validation(ValidationKind::SelfPartnership, _)
        ),
        "self pair must violate the check constraint"
    );
}

#[tokio::test]
async fn court_number_is_unique_per_tournament() {
    let db = migrated_db().await;
    let store = SeaStore::new(&db);
    let court = CourtDraft {
        number: 1,
        name: "Court 1".into(),
    };

    store
        .create_courts(TOURNAMENT, std::slice::from_ref(&court))
        .await
        .unwrap();
    let err = store
        .create_courts(TOURNAMENT, std::slice::from_ref(&court))
        .await
        .unwrap_err();

    assert!(
        matches!(err, DomainError::Conflict(ConflictKind::DuplicateCourt, _)),
        "got {err:?}"
    );
    assert_eq!(store.list_courts(TOURNAMENT).await.unwrap().len(), 1);
}
