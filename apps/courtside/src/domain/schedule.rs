//! Round-robin match scheduling.
//!
//! A pure computation over already-persisted partnerships and courts: the
//! full schedule is produced before anything is written.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::courts::Court;
use crate::domain::ids::{CourtId, PartnershipId, PlayerId};
use crate::domain::partnerships::Partnership;
use crate::errors::domain::DomainError;

/// How disjoint pairings are packed into rounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundPacking {
    /// Fill courts in enumeration order; a new round starts every `C`
    /// matches. Rounds = ceil(matches / C), but a player may be booked on
    /// two courts in the same round.
    #[default]
    Sequential,
    /// Place each match in the earliest round with a free court and none of
    /// its four players already on court. May need more rounds.
    PlayerDisjoint,
}

/// A match before the store assigns it an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledMatch {
    pub partnership1_id: PartnershipId,
    pub partnership2_id: PartnershipId,
    pub court_id: CourtId,
    pub court_number: u32,
    pub round_number: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub matches: Vec<ScheduledMatch>,
    pub num_courts: usize,
}

impl Schedule {
    pub fn round_count(&self) -> u32 {
        self.matches
            .iter()
            .map(|m| m.round_number)
            .max()
            .unwrap_or(0)
    }

    pub fn round(&self, round_number: u32) -> impl Iterator<Item = &ScheduledMatch> {
        self.matches
            .iter()
            .filter(move |m| m.round_number == round_number)
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

/// Index pairs `(i, j)`, `i < j`, of partnerships with no player in common.
pub fn disjoint_pairs(partnerships: &[Partnership]) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for i in 0..partnerships.len() {
        for j in (i + 1)..partnerships.len() {
            if !partnerships[i].shares_player_with(&partnerships[j]) {
                pairs.push((i, j));
            }
        }
    }
    pairs
}

pub fn build_schedule(
    partnerships: &[Partnership],
    courts: &[Court],
    packing: RoundPacking,
) -> Result<Schedule, DomainError> {
    if courts.is_empty() {
        return Err(DomainError::configuration("num_courts must be at least 1"));
    }

    let mut courts: Vec<&Court> = courts.iter().collect();
    courts.sort_by_key(|c| c.number);

    let pairs = disjoint_pairs(partnerships);
    let matches = match packing {
        RoundPacking::Sequential => pack_sequential(partnerships, &courts, &pairs),
        RoundPacking::PlayerDisjoint => pack_player_disjoint(partnerships, &courts, &pairs),
    };

    Ok(Schedule {
        matches,
        num_courts: courts.len(),
    })
}

fn scheduled(
    partnerships: &[Partnership],
    (i, j): (usize, usize),
    court: &Court,
    round_number: u32,
) -> ScheduledMatch {
    ScheduledMatch {
        partnership1_id: partnerships[i].id,
        partnership2_id: partnerships[j].id,
        court_id: court.id,
        court_number: court.number,
        round_number,
    }
}

fn pack_sequential(
    partnerships: &[Partnership],
    courts: &[&Court],
    pairs: &[(usize, usize)],
) -> Vec<ScheduledMatch> {
    let num_courts = courts.len();
    let mut round_number = 1;
    let mut out = Vec::with_capacity(pairs.len());

    for (court_index, &pair) in pairs.iter().enumerate() {
        out.push(scheduled(
            partnerships,
            pair,
            courts[court_index % num_courts],
            round_number,
        ));
        if (court_index + 1) % num_courts == 0 {
            round_number += 1;
        }
    }
    out
}

#[derive(Default)]
struct RoundSlots {
    booked: usize,
    players: HashSet<PlayerId>,
}

fn pack_player_disjoint(
    partnerships: &[Partnership],
    courts: &[&Court],
    pairs: &[(usize, usize)],
) -> Vec<ScheduledMatch> {
    let mut rounds: Vec<RoundSlots> = Vec::new();
    let mut out = Vec::with_capacity(pairs.len());

    for &(i, j) in pairs {
        let players = [partnerships[i].players(), partnerships[j].players()].concat();

        let slot = rounds.iter().position(|r| {
            r.booked < courts.len() && players.iter().all(|p| !r.players.contains(p))
        });
        let slot = match slot {
            Some(idx) => idx,
            None => {
                rounds.push(RoundSlots::default());
                rounds.len() - 1
            }
        };

        let round = &mut rounds[slot];
        let court = courts[round.booked];
        round.booked += 1;
        round.players.extend(players);

        out.push(scheduled(partnerships, (i, j), court, slot as u32 + 1));
    }

    // Report in play order.
    out.sort_by_key(|m| (m.round_number, m.court_number));
    out
}
