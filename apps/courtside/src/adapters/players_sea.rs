//! SeaORM adapter for players.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};

use crate::domain::NewPlayer;
use crate::entities::players;

/// Expects an already normalized player.
pub async fn create_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player: NewPlayer,
) -> Result<players::Model, sea_orm::DbErr> {
    let active = players::ActiveModel {
        id: NotSet,
        display_name: Set(player.display_name),
        email: Set(player.email),
        is_owner: Set(player.is_owner),
        created_at: Set(time::OffsetDateTime::now_utc()),
    };
    active.insert(conn).await
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
) -> Result<Option<players::Model>, sea_orm::DbErr> {
    players::Entity::find_by_id(player_id).one(conn).await
}

pub async fn find_by_ids<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_ids: &[i64],
) -> Result<Vec<players::Model>, sea_orm::DbErr> {
    if player_ids.is_empty() {
        return Ok(Vec::new());
    }
    players::Entity::find()
        .filter(players::Column::Id.is_in(player_ids.iter().copied()))
        .order_by_asc(players::Column::Id)
        .all(conn)
        .await
}
