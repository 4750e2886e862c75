//! SeaORM adapter for matches - generic over ConnectionTrait.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};

use crate::domain::MatchStatus;
use crate::entities::matches;
use crate::infra::db_errors::{match_not_found_err, optimistic_lock_err};

pub mod dto;

pub use dto::{MatchCreate, MatchScoreWrite, MatchStatusWrite};

/// Conditional update: apply the caller's columns plus `version + 1` only
/// where `id` and `version` both match, then refetch.
///
/// Zero affected rows is resolved by re-reading the row: missing →
/// `MATCH_NOT_FOUND`, present → `OPTIMISTIC_LOCK` with the stored version.
async fn optimistic_update_then_fetch<C, F>(
    conn: &C,
    id: i64,
    expected_version: i32,
    configure_update: F,
) -> Result<matches::Model, sea_orm::DbErr>
where
    C: ConnectionTrait + Send + Sync,
    F: FnOnce(sea_orm::UpdateMany<matches::Entity>) -> sea_orm::UpdateMany<matches::Entity>,
{
    let now = time::OffsetDateTime::now_utc();

    let result = configure_update(matches::Entity::update_many())
        .col_expr(matches::Column::UpdatedAt, Expr::val(now).into())
        .col_expr(
            matches::Column::Version,
            Expr::col(matches::Column::Version).add(1),
        )
        .filter(matches::Column::Id.eq(id))
        .filter(matches::Column::Version.eq(expected_version))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        return match matches::Entity::find_by_id(id).one(conn).await? {
            Some(current) => Err(optimistic_lock_err(expected_version, current.version)),
            None => Err(match_not_found_err(id)),
        };
    }

    matches::Entity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| match_not_found_err(id))
}

/// Insert every row on `conn`. Atomicity is the caller's transaction.
pub async fn insert_many<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    rows: &[MatchCreate],
) -> Result<Vec<matches::Model>, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let mut created = Vec::with_capacity(rows.len());
    for row in rows {
        let active = matches::ActiveModel {
            id: NotSet,
            tournament_id: Set(row.tournament_id),
            partnership1_id: Set(row.partnership1_id),
            partnership2_id: Set(row.partnership2_id),
            court_id: Set(row.court_id),
            round_number: Set(row.round_number),
            team1_score: Set(None),
            team2_score: Set(None),
            status: Set(MatchStatus::Waiting.as_str().to_string()),
            version: Set(0),
            recorded_by: Set(None),
            recorded_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };
        created.push(active.insert(conn).await?);
    }
    Ok(created)
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<Option<matches::Model>, sea_orm::DbErr> {
    matches::Entity::find_by_id(match_id).one(conn).await
}

/// Matches of a tournament by round, then court.
pub async fn list_by_tournament<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    tournament_id: i64,
) -> Result<Vec<matches::Model>, sea_orm::DbErr> {
    matches::Entity::find()
        .filter(matches::Column::TournamentId.eq(tournament_id))
        .order_by_asc(matches::Column::RoundNumber)
        .order_by_asc(matches::Column::CourtId)
        .all(conn)
        .await
}

pub async fn update_score<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: MatchScoreWrite,
) -> Result<matches::Model, sea_orm::DbErr> {
    optimistic_update_then_fetch(conn, dto.id, dto.expected_version, |update| {
        update
            .col_expr(
                matches::Column::Team1Score,
                Expr::val(Some(dto.team1_score)).into(),
            )
            .col_expr(
                matches::Column::Team2Score,
                Expr::val(Some(dto.team2_score)).into(),
            )
            .col_expr(
                matches::Column::Status,
                Expr::val(dto.status.as_str()).into(),
            )
            .col_expr(
                matches::Column::RecordedBy,
                Expr::val(Some(dto.recorded_by)).into(),
            )
            .col_expr(
                matches::Column::RecordedAt,
                Expr::val(Some(dto.recorded_at)).into(),
            )
    })
    .await
}

pub async fn update_status<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: MatchStatusWrite,
) -> Result<matches::Model, sea_orm::DbErr> {
    optimistic_update_then_fetch(conn, dto.id, dto.expected_version, |update| {
        update.col_expr(
            matches::Column::Status,
            Expr::val(dto.status.as_str()).into(),
        )
    })
    .await
}
