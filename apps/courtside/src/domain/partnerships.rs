//! Partnership generation: every unordered pair of roster players.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::ids::{PartnershipId, PlayerId, TournamentId};
use crate::domain::players::Player;
use crate::errors::domain::{ConflictKind, DomainError, ValidationKind};

pub const MIN_ROSTER: usize = 4;
pub const MAX_ROSTER: usize = 16;

/// A persisted partnership. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partnership {
    pub id: PartnershipId,
    pub tournament_id: TournamentId,
    pub player1_id: PlayerId,
    pub player2_id: PlayerId,
    pub label: String,
}

impl Partnership {
    pub fn players(&self) -> [PlayerId; 2] {
        [self.player1_id, self.player2_id]
    }

    pub fn includes(&self, player_id: PlayerId) -> bool {
        self.player1_id == player_id || self.player2_id == player_id
    }

    pub fn shares_player_with(&self, other: &Partnership) -> bool {
        other.includes(self.player1_id) || other.includes(self.player2_id)
    }

    pub fn pair_key(&self) -> (PlayerId, PlayerId) {
        unordered(self.player1_id, self.player2_id)
    }
}

/// A partnership before the store assigns it an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartnershipDraft {
    pub player1_id: PlayerId,
    pub player2_id: PlayerId,
    pub label: String,
}

impl PartnershipDraft {
    /// Same key for (a, b) and (b, a).
    pub fn pair_key(&self) -> (PlayerId, PlayerId) {
        unordered(self.player1_id, self.player2_id)
    }
}

fn unordered(a: PlayerId, b: PlayerId) -> (PlayerId, PlayerId) {
    (a.min(b), a.max(b))
}

/// Reject a self-pair or a pair listed twice, in either order, within one batch.
pub fn check_drafts(drafts: &[PartnershipDraft]) -> Result<(), DomainError> {
    let mut seen = HashSet::with_capacity(drafts.len());
    for draft in drafts {
        if draft.player1_id == draft.player2_id {
            return Err(DomainError::validation(
                ValidationKind::SelfPartnership,
                format!("Player {} cannot partner themselves", draft.player1_id),
            ));
        }
        if !seen.insert(draft.pair_key()) {
            return Err(DomainError::conflict(
                ConflictKind::DuplicatePartnership,
                format!(
                    "Players {} and {} are paired twice",
                    draft.player1_id, draft.player2_id
                ),
            ));
        }
    }
    Ok(())
}

/// C(n, 2).
pub fn partnership_count(roster_size: usize) -> usize {
    roster_size * roster_size.saturating_sub(1) / 2
}

pub fn check_roster_size(size: usize) -> Result<(), DomainError> {
    if !(MIN_ROSTER..=MAX_ROSTER).contains(&size) {
        return Err(DomainError::Capacity {
            size,
            min: MIN_ROSTER,
            max: MAX_ROSTER,
        });
    }
    Ok(())
}

/// Produce every unordered pair of roster players, in roster order.
///
/// Output order follows the nested `i < j` walk over the roster, so the same
/// roster order always yields the same draft order.
pub fn generate_partnerships(roster: &[Player]) -> Result<Vec<PartnershipDraft>, DomainError> {
    check_roster_size(roster.len())?;

    let mut seen = HashSet::with_capacity(roster.len());
    for player in roster {
        if !seen.insert(player.id) {
            return Err(DomainError::validation(
                ValidationKind::DuplicatePlayer,
                format!("Player {} appears more than once in the roster", player.id),
            ));
        }
    }

    let mut drafts = Vec::with_capacity(partnership_count(roster.len()));
    for (i, first) in roster.iter().enumerate() {
        for second in &roster[i + 1..] {
            drafts.push(PartnershipDraft {
                player1_id: first.id,
                player2_id: second.id,
                label: format!("{} & {}", first.display_name, second.display_name),
            });
        }
    }
    Ok(drafts)
}
