use async_trait::async_trait;

use crate::domain::{MatchId, PlayerId};
use crate::errors::domain::DomainError;

/// Authorization predicate consulted before any score write.
#[async_trait]
pub trait MatchEditPolicy: Send + Sync {
    async fn can_edit_match(
        &self,
        actor_id: PlayerId,
        match_id: MatchId,
    ) -> Result<bool, DomainError>;
}

/// Plain predicates work as policies.
#[async_trait]
impl<F> MatchEditPolicy for F
where
    F: Fn(PlayerId, MatchId) -> bool + Send + Sync,
{
    async fn can_edit_match(
        &self,
        actor_id: PlayerId,
        match_id: MatchId,
    ) -> Result<bool, DomainError> {
        Ok(self(actor_id, match_id))
    }
}
