use sea_orm::Statement;
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, Expr, ForeignKeyAction, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
enum Players {
    Table,
    Id,
    DisplayName,
    Email,
    IsOwner,
    CreatedAt,
}

#[derive(Iden)]
enum Partnerships {
    Table,
    Id,
    TournamentId,
    Player1Id,
    Player2Id,
    Label,
    CreatedAt,
}

#[derive(Iden)]
enum Courts {
    Table,
    Id,
    TournamentId,
    Number,
    Name,
}

#[derive(Iden)]
enum Matches {
    Table,
    Id,
    TournamentId,
    Partnership1Id,
    Partnership2Id,
    CourtId,
    RoundNumber,
    Team1Score,
    Team2Score,
    Status,
    Version,
    RecordedBy,
    RecordedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum ScoreChanges {
    Table,
    Id,
    MatchId,
    OldTeam1Score,
    OldTeam2Score,
    OldVersion,
    NewTeam1Score,
    NewTeam2Score,
    NewVersion,
    ActorId,
    Reason,
    RecordedAt,
}

fn id_col<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .big_integer()
        .not_null()
        .primary_key()
        .auto_increment()
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // players
        manager
            .create_table(
                Table::create()
                    .table(Players::Table)
                    .if_not_exists()
                    .col(id_col(Players::Id))
                    .col(ColumnDef::new(Players::DisplayName).string().not_null())
                    .col(
                        ColumnDef::new(Players::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Players::IsOwner)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Players::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // partnerships
        manager
            .create_table(
                Table::create()
                    .table(Partnerships::Table)
                    .if_not_exists()
                    .col(id_col(Partnerships::Id))
                    .col(
                        ColumnDef::new(Partnerships::TournamentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Partnerships::Player1Id)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Partnerships::Player2Id)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Partnerships::Label).string().not_null())
                    .check(
                        Expr::col(Partnerships::Player1Id).ne(Expr::col(Partnerships::Player2Id)),
                    )
                    .col(
                        ColumnDef::new(Partnerships::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_partnerships_player1_id")
                            .from(Partnerships::Table, Partnerships::Player1Id)
                            .to(Players::Table, Players::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_partnerships_player2_id")
                            .from(Partnerships::Table, Partnerships::Player2Id)
                            .to(Players::Table, Players::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Unordered pair: (a, b) and (b, a) collide.
        let backend = manager.get_database_backend();
        let pair_index = match backend {
            sea_orm::DatabaseBackend::Postgres => {
                "CREATE UNIQUE INDEX IF NOT EXISTS ux_partnerships_tournament_pair \
                 ON partnerships (tournament_id, LEAST(player1_id, player2_id), GREATEST(player1_id, player2_id))"
            }
            sea_orm::DatabaseBackend::Sqlite => {
                "CREATE UNIQUE INDEX IF NOT EXISTS ux_partnerships_tournament_pair \
                 ON partnerships (tournament_id, MIN(player1_id, player2_id), MAX(player1_id, player2_id))"
            }
            _ => {
                return Err(DbErr::Custom("Unsupported database backend".into()));
            }
        };
        manager
            .get_connection()
            .execute(Statement::from_string(backend, pair_index))
            .await?;

        // courts
        manager
            .create_table(
                Table::create()
                    .table(Courts::Table)
                    .if_not_exists()
                    .col(id_col(Courts::Id))
                    .col(ColumnDef::new(Courts::TournamentId).big_integer().not_null())
                    .col(ColumnDef::new(Courts::Number).integer().not_null())
                    .col(ColumnDef::new(Courts::Name).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_courts_tournament_number")
                    .table(Courts::Table)
                    .col(Courts::TournamentId)
                    .col(Courts::Number)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // matches
        manager
            .create_table(
                Table::create()
                    .table(Matches::Table)
                    .if_not_exists()
                    .col(id_col(Matches::Id))
                    .col(ColumnDef::new(Matches::TournamentId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Matches::Partnership1Id)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Matches::Partnership2Id)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Matches::CourtId).big_integer().not_null())
                    .col(ColumnDef::new(Matches::RoundNumber).integer().not_null())
                    .col(ColumnDef::new(Matches::Team1Score).integer().null())
                    .col(ColumnDef::new(Matches::Team2Score).integer().null())
                    .col(
                        ColumnDef::new(Matches::Status)
                            .string_len(16)
                            .not_null()
                            .default("waiting"),
                    )
                    .col(
                        ColumnDef::new(Matches::Version)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Matches::RecordedBy).big_integer().null())
                    .col(
                        ColumnDef::new(Matches::RecordedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Matches::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Matches::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_matches_partnership1_id")
                            .from(Matches::Table, Matches::Partnership1Id)
                            .to(Partnerships::Table, Partnerships::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_matches_partnership2_id")
                            .from(Matches::Table, Matches::Partnership2Id)
                            .to(Partnerships::Table, Partnerships::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_matches_court_id")
                            .from(Matches::Table, Matches::CourtId)
                            .to(Courts::Table, Courts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_matches_tournament_round")
                    .table(Matches::Table)
                    .col(Matches::TournamentId)
                    .col(Matches::RoundNumber)
                    .to_owned(),
            )
            .await?;

        // score_changes (append-only)
        manager
            .create_table(
                Table::create()
                    .table(ScoreChanges::Table)
                    .if_not_exists()
                    .col(id_col(ScoreChanges::Id))
                    .col(ColumnDef::new(ScoreChanges::MatchId).big_integer().not_null())
                    .col(ColumnDef::new(ScoreChanges::OldTeam1Score).integer().null())
                    .col(ColumnDef::new(ScoreChanges::OldTeam2Score).integer().null())
                    .col(ColumnDef::new(ScoreChanges::OldVersion).integer().not_null())
                    .col(
                        ColumnDef::new(ScoreChanges::NewTeam1Score)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ScoreChanges::NewTeam2Score)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ScoreChanges::NewVersion).integer().not_null())
                    .col(ColumnDef::new(ScoreChanges::ActorId).big_integer().not_null())
                    .col(ColumnDef::new(ScoreChanges::Reason).text().null())
                    .col(
                        ColumnDef::new(ScoreChanges::RecordedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_score_changes_match_id")
                            .from(ScoreChanges::Table, ScoreChanges::MatchId)
                            .to(Matches::Table, Matches::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_score_changes_match_id")
                    .table(ScoreChanges::Table)
                    .col(ScoreChanges::MatchId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ScoreChanges::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Matches::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Courts::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Partnerships::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Players::Table).if_exists().to_owned())
            .await?;
        Ok(())
    }
}
