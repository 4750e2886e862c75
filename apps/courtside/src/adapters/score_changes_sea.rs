//! SeaORM adapter for the score history: insert and read only.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};

use crate::domain::ScoreChange;
use crate::entities::score_changes;

pub async fn append<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    change: &ScoreChange,
) -> Result<score_changes::Model, sea_orm::DbErr> {
    let active = score_changes::ActiveModel {
        id: NotSet,
        match_id: Set(change.match_id),
        old_team1_score: Set(change.old_score.map(|s| s.team1)),
        old_team2_score: Set(change.old_score.map(|s| s.team2)),
        old_version: Set(change.old_version),
        new_team1_score: Set(change.new_score.team1),
        new_team2_score: Set(change.new_score.team2),
        new_version: Set(change.new_version),
        actor_id: Set(change.actor_id),
        reason: Set(change.reason.clone()),
        recorded_at: Set(change.recorded_at),
    };
    active.insert(conn).await
}

/// History for one match in append order.
pub async fn list_for_match<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<Vec<score_changes::Model>, sea_orm::DbErr> {
    score_changes::Entity::find()
        .filter(score_changes::Column::MatchId.eq(match_id))
        .order_by_asc(score_changes::Column::Id)
        .all(conn)
        .await
}
