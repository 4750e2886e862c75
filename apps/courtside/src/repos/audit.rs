use async_trait::async_trait;

use crate::domain::{MatchId, ScoreChange, ScoreChangeRecord};
use crate::errors::domain::DomainError;

/// Append-only write side of the score history.
#[async_trait]
pub trait AuditSink: Send + Sync {
    async fn append(&self, change: &ScoreChange) -> Result<ScoreChangeRecord, DomainError>;
}

/// Read side of the score history.
#[async_trait]
pub trait AuditLog: Send + Sync {
    /// Entries for one match in append order.
    async fn history_for_match(
        &self,
        match_id: MatchId,
    ) -> Result<Vec<ScoreChangeRecord>, DomainError>;
}
