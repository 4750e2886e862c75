//! Property tests for the scheduler (pure domain, no store).

use std::collections::{HashMap, HashSet};

use proptest::prelude::*;

use crate::domain::schedule::disjoint_pairs;
use crate::domain::test_gens::{court_count, courts, persist, roster_strategy};
use crate::domain::test_prelude;
use crate::domain::{build_schedule, generate_partnerships, RoundPacking};

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// No match pits two partnerships that share a player.
    #[test]
    fn prop_no_self_play(roster in roster_strategy(), c in court_count()) {
        let partnerships = persist(generate_partnerships(&roster).unwrap());
        let by_id: HashMap<i64, _> = partnerships.iter().map(|p| (p.id, p)).collect();

        for packing in [RoundPacking::Sequential, RoundPacking::PlayerDisjoint] {
            let schedule = build_schedule(&partnerships, &courts(c), packing).unwrap();
            for m in &schedule.matches {
                let a = by_id[&m.partnership1_id];
                let b = by_id[&m.partnership2_id];
                prop_assert!(!a.shares_player_with(b));
            }
        }
    }

    /// Sequential packing: at most C per round, rounds = ceil(pairs / C),
    /// each disjoint pair exactly once.
    #[test]
    fn prop_sequential_round_shape(roster in roster_strategy(), c in court_count()) {
        let partnerships = persist(generate_partnerships(&roster).unwrap());
        let expected_matches = disjoint_pairs(&partnerships).len();
        let schedule =
            build_schedule(&partnerships, &courts(c), RoundPacking::Sequential).unwrap();

        prop_assert_eq!(schedule.matches.len(), expected_matches);
        let c = c as usize;
        prop_assert_eq!(schedule.round_count() as usize, expected_matches.div_ceil(c));

        for r in 1..=schedule.round_count() {
            prop_assert!(schedule.round(r).count() <= c);
        }

        let unique: HashSet<_> = schedule
            .matches
            .iter()
            .map(|m| (m.partnership1_id, m.partnership2_id))
            .collect();
        prop_assert_eq!(unique.len(), expected_matches);
    }

    /// Player-disjoint packing: nobody is on two courts in one round, and
    /// no court is double-booked.
    #[test]
    fn prop_player_disjoint_rounds(roster in roster_strategy(), c in court_count()) {
        let partnerships = persist(generate_partnerships(&roster).unwrap());
        let by_id: HashMap<i64, _> = partnerships.iter().map(|p| (p.id, p)).collect();
        let schedule =
            build_schedule(&partnerships, &courts(c), RoundPacking::PlayerDisjoint).unwrap();

        prop_assert_eq!(schedule.matches.len(), disjoint_pairs(&partnerships).len());

        for r in 1..=schedule.round_count() {
            let mut players = HashSet::new();
            let mut used_courts = HashSet::new();
            for m in schedule.round(r) {
                prop_assert!(used_courts.insert(m.court_id));
                for pid in [by_id[&m.partnership1_id], by_id[&m.partnership2_id]]
                    .iter()
                    .flat_map(|p| p.players())
                {
                    prop_assert!(players.insert(pid), "player {} twice in round {}", pid, r);
                }
            }
            prop_assert!(used_courts.len() <= c as usize);
        }
    }
}
