//! SeaORM adapter for courts.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};

use crate::domain::CourtDraft;
use crate::entities::courts;

pub async fn create_many<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    tournament_id: i64,
    drafts: &[CourtDraft],
) -> Result<Vec<courts::Model>, sea_orm::DbErr> {
    let mut created = Vec::with_capacity(drafts.len());
    for draft in drafts {
        let number = i32::try_from(draft.number)
            .map_err(|_| sea_orm::DbErr::Custom(format!("court number {} out of range", draft.number)))?;
        let active = courts::ActiveModel {
            id: NotSet,
            tournament_id: Set(tournament_id),
            number: Set(number),
            name: Set(draft.name.clone()),
        };
        created.push(active.insert(conn).await?);
    }
    Ok(created)
}

pub async fn list_by_tournament<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    tournament_id: i64,
) -> Result<Vec<courts::Model>, sea_orm::DbErr> {
    courts::Entity::find()
        .filter(courts::Column::TournamentId.eq(tournament_id))
        .order_by_asc(courts::Column::Number)
        .all(conn)
        .await
}
