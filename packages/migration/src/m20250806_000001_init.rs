use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, ForeignKeyAction, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
enum Lobbies {
    Table,
    Id,
    HostPlayerId,
    GuestPlayerId,
    GameMode,
    LegsToWin,
    DoubleOut,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Matches {
    Table,
    Id,
    Player1Id,
    Player2Id,
    GameMode,
    LegsToWin,
    DoubleOut,
    Player1LegsWon,
    Player2LegsWon,
    CurrentLegNumber,
    Status,
    WinnerId,
    LockVersion,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Legs {
    Table,
    Id,
    MatchId,
    LegNumber,
    Player1StartScore,
    Player2StartScore,
    WinnerId,
    CreatedAt,
    CompletedAt,
}

#[derive(Iden)]
enum Visits {
    Table,
    Id,
    LegId,
    PlayerId,
    VisitNumber,
    Dart1Segment,
    Dart1Multiplier,
    Dart2Segment,
    Dart2Multiplier,
    Dart3Segment,
    Dart3Multiplier,
    TotalScored,
    RemainingBefore,
    RemainingAfter,
    IsBust,
    IsCheckout,
    IdempotencyKey,
    CreatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Status and game-mode columns are plain strings so the same schema
        // runs on Postgres and SQLite.
        manager
            .create_table(
                Table::create()
                    .table(Lobbies::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Lobbies::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Lobbies::HostPlayerId).big_integer().not_null())
                    .col(ColumnDef::new(Lobbies::GuestPlayerId).big_integer().null())
                    .col(ColumnDef::new(Lobbies::GameMode).string().not_null())
                    .col(ColumnDef::new(Lobbies::LegsToWin).small_integer().not_null())
                    .col(ColumnDef::new(Lobbies::DoubleOut).boolean().not_null())
                    .col(ColumnDef::new(Lobbies::Status).string().not_null())
                    .col(
                        ColumnDef::new(Lobbies::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Lobbies::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_lobbies_status")
                    .table(Lobbies::Table)
                    .col(Lobbies::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Matches::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Matches::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Matches::Player1Id).big_integer().not_null())
                    .col(ColumnDef::new(Matches::Player2Id).big_integer().not_null())
                    .col(ColumnDef::new(Matches::GameMode).string().not_null())
                    .col(ColumnDef::new(Matches::LegsToWin).small_integer().not_null())
                    .col(ColumnDef::new(Matches::DoubleOut).boolean().not_null())
                    .col(
                        ColumnDef::new(Matches::Player1LegsWon)
                            .small_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Matches::Player2LegsWon)
                            .small_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Matches::CurrentLegNumber)
                            .small_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Matches::Status).string().not_null())
                    .col(ColumnDef::new(Matches::WinnerId).big_integer().null())
                    .col(ColumnDef::new(Matches::LockVersion).integer().not_null())
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
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Legs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Legs::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Legs::MatchId).big_integer().not_null())
                    .col(ColumnDef::new(Legs::LegNumber).small_integer().not_null())
                    .col(
                        ColumnDef::new(Legs::Player1StartScore)
                            .small_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Legs::Player2StartScore)
                            .small_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Legs::WinnerId).big_integer().null())
                    .col(
                        ColumnDef::new(Legs::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Legs::CompletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_legs_match")
                            .from(Legs::Table, Legs::MatchId)
                            .to(Matches::Table, Matches::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_legs_match_leg_number")
                    .table(Legs::Table)
                    .col(Legs::MatchId)
                    .col(Legs::LegNumber)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Visits::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Visits::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Visits::LegId).big_integer().not_null())
                    .col(ColumnDef::new(Visits::PlayerId).big_integer().not_null())
                    .col(ColumnDef::new(Visits::VisitNumber).small_integer().not_null())
                    .col(ColumnDef::new(Visits::Dart1Segment).small_integer().not_null())
                    .col(
                        ColumnDef::new(Visits::Dart1Multiplier)
                            .small_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Visits::Dart2Segment).small_integer().null())
                    .col(ColumnDef::new(Visits::Dart2Multiplier).small_integer().null())
                    .col(ColumnDef::new(Visits::Dart3Segment).small_integer().null())
                    .col(ColumnDef::new(Visits::Dart3Multiplier).small_integer().null())
                    .col(ColumnDef::new(Visits::TotalScored).small_integer().not_null())
                    .col(
                        ColumnDef::new(Visits::RemainingBefore)
                            .small_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Visits::RemainingAfter)
                            .small_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Visits::IsBust).boolean().not_null())
                    .col(ColumnDef::new(Visits::IsCheckout).boolean().not_null())
                    .col(ColumnDef::new(Visits::IdempotencyKey).string().null())
                    .col(
                        ColumnDef::new(Visits::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_visits_leg")
                            .from(Visits::Table, Visits::LegId)
                            .to(Legs::Table, Legs::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_visits_leg_visit_number")
                    .table(Visits::Table)
                    .col(Visits::LegId)
                    .col(Visits::VisitNumber)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_visits_idempotency_key")
                    .table(Visits::Table)
                    .col(Visits::IdempotencyKey)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Visits::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Legs::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Matches::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Lobbies::Table).to_owned())
            .await?;
        Ok(())
    }
}
