//! Rounds are not stored; they are the matches sharing a round number.

use std::collections::BTreeMap;

use crate::domain::matches::Match;
use crate::domain::status::MatchStatus;

#[derive(Debug, Clone, PartialEq)]
pub struct Round<'a> {
    pub number: u32,
    pub matches: Vec<&'a Match>,
}

impl Round<'_> {
    pub fn is_finished(&self) -> bool {
        self.matches.iter().all(|m| m.score.is_some())
    }

    pub fn has_dispute(&self) -> bool {
        self.matches
            .iter()
            .any(|m| m.status == MatchStatus::Disputed)
    }
}

/// Group matches by round number, ascending. Within a round, input order is kept.
pub fn group_by_round(matches: &[Match]) -> Vec<Round<'_>> {
    let mut by_round: BTreeMap<u32, Vec<&Match>> = BTreeMap::new();
    for m in matches {
        by_round.entry(m.round_number).or_default().push(m);
    }
    by_round
        .into_iter()
        .map(|(number, matches)| Round { number, matches })
        .collect()
}
