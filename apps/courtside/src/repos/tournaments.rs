use async_trait::async_trait;

use crate::domain::{
    Court, CourtDraft, Partnership, PartnershipDraft, PartnershipId, TournamentId,
};
use crate::errors::domain::DomainError;

/// Partnerships and courts owned by a tournament.
#[async_trait]
pub trait TournamentRepo: Send + Sync {
    /// Persist drafts in order; the returned partnerships keep that order.
    async fn create_partnerships(
        &self,
        tournament_id: TournamentId,
        drafts: &[PartnershipDraft],
    ) -> Result<Vec<Partnership>, DomainError>;

    /// Partnerships in creation order.
    async fn list_partnerships(
        &self,
        tournament_id: TournamentId,
    ) -> Result<Vec<Partnership>, DomainError>;

    async fn find_partnership(
        &self,
        id: PartnershipId,
    ) -> Result<Option<Partnership>, DomainError>;

    async fn create_courts(
        &self,
        tournament_id: TournamentId,
        drafts: &[CourtDraft],
    ) -> Result<Vec<Court>, DomainError>;

    /// Courts ordered by number.
    async fn list_courts(&self, tournament_id: TournamentId) -> Result<Vec<Court>, DomainError>;
}
