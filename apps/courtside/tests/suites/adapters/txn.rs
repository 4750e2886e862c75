use courtside::db::{begin, settle};
use courtside::domain::NewPlayer;
use courtside::errors::domain::ValidationKind;
use courtside::repos::PlayerRepo;
use courtside::{DomainError, SeaStore};
use courtside_test_support::unique_email;

use crate::support::migrated_db;

#[tokio::test]
async fn settle_commits_on_ok() {
    let db = migrated_db().await;
    let txn = begin(&db).await.unwrap();
    let out = SeaStore::new(&txn)
        .create_player(NewPlayer::new("Ola", unique_email("ola")))
        .await;
    let player = settle(txn, out).await.unwrap();

    let found = SeaStore::new(&db).find_player(player.id).await.unwrap();
    assert_eq!(found, Some(player));
}

#[tokio::test]
async fn settle_rolls_back_on_err() {
    let db = migrated_db().await;
    let txn = begin(&db).await.unwrap();
    let store = SeaStore::new(&txn);
    let created = store
        .create_player(NewPlayer::new("Ira", unique_email("ira")))
        .await
        .unwrap();
    let out: Result<(), DomainError> = Err(DomainError::validation(
        ValidationKind::Other("Abort".into()),
        "caller aborted",
    ));

    let err = settle(txn, out).await.unwrap_err();
    assert!(matches!(err, DomainError::Validation(_, _)));

    let found = SeaStore::new(&db).find_player(created.id).await.unwrap();
    assert_eq!(found, None);
}
