use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Scores are both NULL until the first accepted submission. `status`
/// holds the snake_case form of `domain::MatchStatus`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "matches")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub tournament_id: i64,
    pub partnership1_id: i64,
    pub partnership2_id: i64,
    pub court_id: i64,
    pub round_number: i32,
    pub team1_score: Option<i32>,
    pub team2_score: Option<i32>,
    pub status: String,
    pub version: i32,
    pub recorded_by: Option<i64>,
    pub recorded_at: Option<OffsetDateTime>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::courts::Entity",
        from = "Column::CourtId",
        to = "super::courts::Column::Id"
    )]
    Court,
    #[sea_orm(has_many = "super::score_changes::Entity")]
    ScoreChanges,
}

impl Related<super::courts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Court.def()
    }
}

impl Related<super::score_changes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ScoreChanges.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
