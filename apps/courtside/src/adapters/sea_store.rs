//! SeaORM-backed implementation of every repository trait.
//!
//! `SeaStore` borrows a connection or a transaction; wrap a transaction to
//! make several repository calls atomic:
//!
//! ```ignore
//! let txn = courtside::db::begin(&conn).await?;
//! let out = service_call(&SeaStore::new(&txn)).await;
//! courtside::db::settle(txn, out).await?;
//! ```

use async_trait::async_trait;
use sea_orm::{ConnectionTrait, TransactionTrait};

use crate::adapters::matches_sea::{MatchCreate, MatchScoreWrite, MatchStatusWrite};
use crate::adapters::{
    courts_sea, matches_sea, partnerships_sea, players_sea, score_changes_sea,
};
use crate::db::txn;
use crate::domain::{
    check_drafts, Court, CourtDraft, Match, MatchId, MatchScore, MatchStatus, NewPlayer,
    Partnership, PartnershipDraft, PartnershipId, Player, PlayerId, ScheduledMatch, ScoreChange,
    ScoreChangeRecord, ScoreUpdate, StatusUpdate, TournamentId,
};
use crate::entities::{courts, matches, partnerships, players, score_changes};
use crate::errors::domain::{DomainError, InfraErrorKind};
use crate::repos::{AuditLog, AuditSink, MatchRepo, PlayerRepo, TournamentRepo};

#[derive(Debug)]
pub struct SeaStore<'c, C> {
    conn: &'c C,
}

impl<C> Clone for SeaStore<'_, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for SeaStore<'_, C> {}

impl<'c, C> SeaStore<'c, C>
where
    C: ConnectionTrait + TransactionTrait + Send + Sync,
{
    pub fn new(conn: &'c C) -> Self {
        Self { conn }
    }

    pub fn conn(&self) -> &'c C {
        self.conn
    }
}

fn corrupt(detail: String) -> DomainError {
    DomainError::infra(InfraErrorKind::DataCorruption, detail)
}

impl From<players::Model> for Player {
    fn from(model: players::Model) -> Self {
        Self {
            id: model.id,
            display_name: model.display_name,
            email: model.email,
            is_owner: model.is_owner,
        }
    }
}

impl From<partnerships::Model> for Partnership {
    fn from(model: partnerships::Model) -> Self {
        Self {
            id: model.id,
            tournament_id: model.tournament_id,
            player1_id: model.player1_id,
            player2_id: model.player2_id,
            label: model.label,
        }
    }
}

impl TryFrom<courts::Model> for Court {
    type Error = DomainError;

    fn try_from(model: courts::Model) -> Result<Self, Self::Error> {
        let number = u32::try_from(model.number)
            .map_err(|_| corrupt(format!("court {} has number {}", model.id, model.number)))?;
        Ok(Self {
            id: model.id,
            tournament_id: model.tournament_id,
            number,
            name: model.name,
        })
    }
}

impl TryFrom<matches::Model> for Match {
    type Error = DomainError;

    fn try_from(model: matches::Model) -> Result<Self, Self::Error> {
        let status: MatchStatus = model
            .status
            .parse()
            .map_err(|e| corrupt(format!("match {}: {e}", model.id)))?;
        let round_number = u32::try_from(model.round_number).map_err(|_| {
            corrupt(format!(
                "match {} has round number {}",
                model.id, model.round_number
            ))
        })?;
        Ok(Self {
            id: model.id,
            tournament_id: model.tournament_id,
            partnership1_id: model.partnership1_id,
            partnership2_id: model.partnership2_id,
            court_id: model.court_id,
            round_number,
            score: MatchScore::from_columns(model.team1_score, model.team2_score)?,
            status,
            version: model.version,
            recorded_by: model.recorded_by,
            recorded_at: model.recorded_at,
        })
    }
}

impl TryFrom<score_changes::Model> for ScoreChangeRecord {
    type Error = DomainError;

    fn try_from(model: score_changes::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            change: ScoreChange {
                match_id: model.match_id,
                old_score: MatchScore::from_columns(model.old_team1_score, model.old_team2_score)?,
                old_version: model.old_version,
                new_score: MatchScore::new(model.new_team1_score, model.new_team2_score),
                new_version: model.new_version,
                actor_id: model.actor_id,
                recorded_at: model.recorded_at,
                reason: model.reason,
            },
        })
    }
}

#[async_trait]
impl<'c, C> PlayerRepo for SeaStore<'c, C>
where
    C: ConnectionTrait + TransactionTrait + Send + Sync,
{
    async fn create_player(&self, player: NewPlayer) -> Result<Player, DomainError> {
        let player = player.normalized()?;
        let model = players_sea::create_player(self.conn, player).await?;
        Ok(model.into())
    }

    async fn find_player(&self, id: PlayerId) -> Result<Option<Player>, DomainError> {
        let model = players_sea::find_by_id(self.conn, id).await?;
        Ok(model.map(Player::from))
    }

    async fn find_players(&self, ids: &[PlayerId]) -> Result<Vec<Player>, DomainError> {
        let models = players_sea::find_by_ids(self.conn, ids).await?;
        Ok(models.into_iter().map(Player::from).collect())
    }
}

#[async_trait]
impl<'c, C> TournamentRepo for SeaStore<'c, C>
where
    C: ConnectionTrait + TransactionTrait + Send + Sync,
{
    async fn create_partnerships(
        &self,
        tournament_id: TournamentId,
        drafts: &[PartnershipDraft],
    ) -> Result<Vec<Partnership>, DomainError> {
        check_drafts(drafts)?;
        let tx = txn::begin(self.conn).await?;
        let out = partnerships_sea::create_many(&tx, tournament_id, drafts)
            .await
            .map_err(DomainError::from);
        let models = txn::settle(tx, out).await?;
        Ok(models.into_iter().map(Partnership::from).collect())
    }

    async fn list_partnerships(
        &self,
        tournament_id: TournamentId,
    ) -> Result<Vec<Partnership>, DomainError> {
        let models = partnerships_sea::list_by_tournament(self.conn, tournament_id).await?;
        Ok(models.into_iter().map(Partnership::from).collect())
    }

    async fn find_partnership(
        &self,
        id: PartnershipId,
    ) -> Result<Option<Partnership>, DomainError> {
        let model = partnerships_sea::find_by_id(self.conn, id).await?;
        Ok(model.map(Partnership::from))
    }

    async fn create_courts(
        &self,
        tournament_id: TournamentId,
        drafts: &[CourtDraft],
    ) -> Result<Vec<Court>, DomainError> {
        let tx = txn::begin(self.conn).await?;
        let out = courts_sea::create_many(&tx, tournament_id, drafts)
            .await
            .map_err(DomainError::from);
        let models = txn::settle(tx, out).await?;
        models.into_iter().map(Court::try_from).collect()
    }

    async fn list_courts(&self, tournament_id: TournamentId) -> Result<Vec<Court>, DomainError> {
        let models = courts_sea::list_by_tournament(self.conn, tournament_id).await?;
        models.into_iter().map(Court::try_from).collect()
    }
}

#[async_trait]
impl<'c, C> MatchRepo for SeaStore<'c, C>
where
    C: ConnectionTrait + TransactionTrait + Send + Sync,
{
    async fn insert_matches(
        &self,
        tournament_id: TournamentId,
        scheduled: &[ScheduledMatch],
    ) -> Result<Vec<Match>, DomainError> {
        let rows: Vec<MatchCreate> = scheduled
            .iter()
            .map(|m| MatchCreate::from_scheduled(tournament_id, m))
            .collect();

        let tx = txn::begin(self.conn).await?;
        let out = matches_sea::insert_many(&tx, &rows)
            .await
            .map_err(DomainError::from);
        let models = txn::settle(tx, out).await?;
        models.into_iter().map(Match::try_from).collect()
    }

    async fn find_match(&self, id: MatchId) -> Result<Option<Match>, DomainError> {
        matches_sea::find_by_id(self.conn, id)
            .await?
            .map(Match::try_from)
            .transpose()
    }

    async fn list_matches(&self, tournament_id: TournamentId) -> Result<Vec<Match>, DomainError> {
        let models = matches_sea::list_by_tournament(self.conn, tournament_id).await?;
        models.into_iter().map(Match::try_from).collect()
    }

    // Update and re-read run in one transaction: the row returned is the
    // one this write produced.
    async fn cas_update_score(&self, update: ScoreUpdate) -> Result<Match, DomainError> {
        let tx = txn::begin(self.conn).await?;
        let out = matches_sea::update_score(&tx, MatchScoreWrite::from(&update))
            .await
            .map_err(DomainError::from);
        Match::try_from(txn::settle(tx, out).await?)
    }

    async fn cas_update_status(&self, update: StatusUpdate) -> Result<Match, DomainError> {
        let tx = txn::begin(self.conn).await?;
        let out = matches_sea::update_status(&tx, MatchStatusWrite::from(&update))
            .await
            .map_err(DomainError::from);
        Match::try_from(txn::settle(tx, out).await?)
    }
}

#[async_trait]
impl<'c, C> AuditSink for SeaStore<'c, C>
where
    C: ConnectionTrait + TransactionTrait + Send + Sync,
{
    async fn append(&self, change: &ScoreChange) -> Result<ScoreChangeRecord, DomainError> {
        let model = score_changes_sea::append(self.conn, change).await?;
        ScoreChangeRecord::try_from(model)
    }
}

#[async_trait]
impl<'c, C> AuditLog for SeaStore<'c, C>
where
    C: ConnectionTrait + TransactionTrait + Send + Sync,
{
    async fn history_for_match(
        &self,
        match_id: MatchId,
    ) -> Result<Vec<ScoreChangeRecord>, DomainError> {
        let models = score_changes_sea::list_for_match(self.conn, match_id).await?;
        models
            .into_iter()
            .map(ScoreChangeRecord::try_from)
            .collect()
    }
}
