//! SeaORM adapter for partnerships.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};

use crate::domain::PartnershipDraft;
use crate::entities::partnerships;

/// Insert one row per draft, in order. Callers wanting all-or-nothing run
/// this on a transaction.
pub async fn create_many<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    tournament_id: i64,
    drafts: &[PartnershipDraft],
) -> Result<Vec<partnerships::Model>, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let mut created = Vec::with_capacity(drafts.len());
    for draft in drafts {
        let active = partnerships::ActiveModel {
            id: NotSet,
            tournament_id: Set(tournament_id),
            player1_id: Set(draft.player1_id),
            player2_id: Set(draft.player2_id),
            label: Set(draft.label.clone()),
            created_at: Set(now),
        };
        created.push(active.insert(conn).await?);
    }
    Ok(created)
}

pub async fn list_by_tournament<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    tournament_id: i64,
) -> Result<Vec<partnerships::Model>, sea_orm::DbErr> {
    partnerships::Entity::find()
        .filter(partnerships::Column::TournamentId.eq(tournament_id))
        .order_by_asc(partnerships::Column::Id)
        .all(conn)
        .await
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    partnership_id: i64,
) -> Result<Option<partnerships::Model>, sea_orm::DbErr> {
    partnerships::Entity::find_by_id(partnership_id).one(conn).await
}
