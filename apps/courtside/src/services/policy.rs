//! Match edit policies.

use async_trait::async_trait;

use crate::domain::{MatchId, PlayerId};
use crate::errors::domain::DomainError;
use crate::repos::{MatchEditPolicy, MatchRepo, PlayerRepo, TournamentRepo};

/// Grants every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

#[async_trait]
impl MatchEditPolicy for AllowAll {
    async fn can_edit_match(
        &self,
        _actor_id: PlayerId,
        _match_id: MatchId,
    ) -> Result<bool, DomainError> {
        Ok(true)
    }
}

/// The four players on court may edit the match, and so may owners.
/// Unknown matches and unknown actors are denied.
#[derive(Debug)]
pub struct ParticipantOrOwner<'a, S: ?Sized> {
    store: &'a S,
}

impl<'a, S: ?Sized> ParticipantOrOwner<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<S> MatchEditPolicy for ParticipantOrOwner<'_, S>
where
    S: MatchRepo + TournamentRepo + PlayerRepo + ?Sized,
{
    async fn can_edit_match(
        &self,
        actor_id: PlayerId,
        match_id: MatchId,
    ) -> Result<bool, DomainError> {
        let Some(actor) = self.store.find_player(actor_id).await? else {
            return Ok(false);
        };
        if actor.is_owner {
            return Ok(true);
        }
        let Some(m) = self.store.find_match(match_id).await? else {
            return Ok(false);
        };
        let (first, second) = futures::future::try_join(
            self.store.find_partnership(m.partnership1_id),
            self.store.find_partnership(m.partnership2_id),
        )
        .await?;
        Ok([first, second]
            .iter()
            .flatten()
            .any(|p| p.includes(actor_id)))
    }
}
