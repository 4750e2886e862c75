use std::collections::HashSet;

use proptest::prelude::*;

use crate::domain::partnerships::{
    check_drafts, check_roster_size, partnership_count, PartnershipDraft, MAX_ROSTER, MIN_ROSTER,
};
use crate::domain::test_gens::{player, roster, roster_strategy};
use crate::domain::test_prelude;
use crate::domain::generate_partnerships;
use crate::errors::domain::{ConflictKind, DomainError, ValidationKind};

#[test]
fn four_players_make_six_partnerships_in_roster_order() {
    let drafts = generate_partnerships(&roster(4)).unwrap();
    let pairs: Vec<(i64, i64)> = drafts
        .iter()
        .map(|d| (d.player1_id, d.player2_id))
        .collect();
    assert_eq!(pairs, vec![(1, 2), (1, 3), (1, 4), (2, 3), (2, 4), (3, 4)]);
    assert_eq!(drafts[0].label, "P1 & P2");
}

#[test]
fn order_follows_the_given_roster_not_ids() {
    let roster = vec![player(9), player(3), player(5), player(1)];
    let drafts = generate_partnerships(&roster).unwrap();
    assert_eq!((drafts[0].player1_id, drafts[0].player2_id), (9, 3));
    assert_eq!((drafts[5].player1_id, drafts[5].player2_id), (5, 1));
}

#[test]
fn three_and_seventeen_players_are_capacity_errors() {
    for n in [0, 3, 17, 18] {
        let err = generate_partnerships(&roster(n)).unwrap_err();
        assert_eq!(
            err,
            DomainError::Capacity {
                size: n,
                min: MIN_ROSTER,
                max: MAX_ROSTER
            }
        );
    }
}

#[test]
fn bounds_are_inclusive() {
    assert!(check_roster_size(MIN_ROSTER).is_ok());
    assert!(check_roster_size(MAX_ROSTER).is_ok());
    assert_eq!(generate_partnerships(&roster(16)).unwrap().len(), 120);
}

#[test]
fn duplicate_roster_entry_is_rejected() {
    let roster = vec![player(1), player(2), player(3), player(2)];
    let err = generate_partnerships(&roster).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::DuplicatePlayer, _)
    ));
}

fn draft(player1_id: i64, player2_id: i64) -> PartnershipDraft {
    PartnershipDraft {
        player1_id,
        player2_id,
        label: String::new(),
    }
}

#[test]
fn pair_key_ignores_order() {
    assert_eq!(draft(7, 2).pair_key(), draft(2, 7).pair_key());
}

#[test]
fn batch_checks_catch_self_and_reversed_pairs() {
    assert!(check_drafts(&[draft(1, 2), draft(3, 4)]).is_ok());
    assert!(matches!(
        check_drafts(&[draft(1, 2), draft(3, 3)]),
        Err(DomainError::Validation(ValidationKind::SelfPartnership, _))
    ));
    assert!(matches!(
        check_drafts(&[draft(1, 2), draft(2, 1)]),
        Err(DomainError::Conflict(ConflictKind::DuplicatePartnership, _))
    ));
}

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// C(N,2) partnerships, no self-pairs, no duplicate unordered pairs.
    #[test]
    fn prop_complete_pairing(roster in roster_strategy()) {
        let drafts = generate_partnerships(&roster).unwrap();
        prop_assert_eq!(drafts.len(), partnership_count(roster.len()));

        let mut seen = HashSet::new();
        for d in &drafts {
            prop_assert_ne!(d.player1_id, d.player2_id);
            let key = (d.player1_id.min(d.player2_id), d.player1_id.max(d.player2_id));
            prop_assert!(seen.insert(key), "duplicate pair {:?}", key);
        }
        prop_assert!(check_drafts(&drafts).is_ok());
    }

    /// Same roster order, same output.
    #[test]
    fn prop_generation_is_reproducible(roster in roster_strategy()) {
        let first = generate_partnerships(&roster).unwrap();
        let second = generate_partnerships(&roster).unwrap();
        prop_assert_eq!(first, second);
    }
}
