use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "partnerships")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub tournament_id: i64,
    pub player1_id: i64,
    pub player2_id: i64,
    pub label: String,
    pub created_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::players::Entity",
        from = "Column::Player1Id",
        to = "super::players::Column::Id"
    )]
    Player1,
    #[sea_orm(
        belongs_to = "super::players::Entity",
        from = "Column::Player2Id",
        to = "super::players::Column::Id"
    )]
    Player2,
}

impl ActiveModelBehavior for ActiveModel {}
