use async_trait::async_trait;

use crate::domain::{NewPlayer, Player, PlayerId};
use crate::errors::domain::DomainError;

#[async_trait]
pub trait PlayerRepo: Send + Sync {
    /// Insert a normalized player. Duplicate email → `Conflict(UniqueEmail)`.
    async fn create_player(&self, player: NewPlayer) -> Result<Player, DomainError>;

    async fn find_player(&self, id: PlayerId) -> Result<Option<Player>, DomainError>;

    /// Players for the given ids; missing ids are simply absent from the result.
    async fn find_players(&self, ids: &[PlayerId]) -> Result<Vec<Player>, DomainError>;
}
