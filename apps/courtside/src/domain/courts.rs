use serde::{Deserialize, Serialize};

use crate::domain::ids::{CourtId, TournamentId};
use crate::errors::domain::DomainError;

/// A numbered court. Holds one match per round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Court {
    pub id: CourtId,
    pub tournament_id: TournamentId,
    pub number: u32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourtDraft {
    pub number: u32,
    pub name: String,
}

/// "Court 1" through "Court N".
pub fn court_drafts(num_courts: u32) -> Result<Vec<CourtDraft>, DomainError> {
    if num_courts == 0 {
        return Err(DomainError::configuration("num_courts must be at least 1"));
    }
    Ok((1..=num_courts)
        .map(|number| CourtDraft {
            number,
            name: format!("Court {number}"),
        })
        .collect())
}
