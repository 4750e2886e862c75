use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::domain::{Player, PlayerId};
use crate::errors::domain::{DomainError, NotFoundKind, ValidationKind};
use crate::repos::PlayerRepo;

/// Resolve `ids` to players, keeping the given order. The order seeds the
/// partnership generator, so it is the tournament's canonical roster order.
pub async fn load_roster<P>(players: &P, ids: &[PlayerId]) -> Result<Vec<Player>, DomainError>
where
    P: PlayerRepo + ?Sized,
{
    let mut seen = HashSet::with_capacity(ids.len());
    if let Some(dup) = ids.iter().find(|id| !seen.insert(**id)) {
        return Err(DomainError::validation(
            ValidationKind::DuplicatePlayer,
            format!("player {dup} appears more than once in the roster"),
        ));
    }

    let mut by_id: HashMap<PlayerId, Player> = players
        .find_players(ids)
        .await?
        .into_iter()
        .map(|p| (p.id, p))
        .collect();

    let roster = ids
        .iter()
        .map(|id| {
            by_id.remove(id).ok_or_else(|| {
                DomainError::not_found(NotFoundKind::Player, format!("Player {id} not found"))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug!(roster_size = roster.len(), "roster loaded");
    Ok(roster)
}
