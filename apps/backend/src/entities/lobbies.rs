use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Game mode, i.e. the countdown a leg starts from.
///
/// Stored as a string so the same entity runs on Postgres and SQLite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum GameMode {
    #[sea_orm(string_value = "301")]
    Mode301,
    #[sea_orm(string_value = "501")]
    Mode501,
}

impl GameMode {
    /// Starting score of each leg in this mode.
    pub fn starting_score(self) -> i16 {
        match self {
            GameMode::Mode301 => 301,
            GameMode::Mode501 => 501,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum LobbyStatus {
    #[sea_orm(string_value = "OPEN")]
    Open,
    #[sea_orm(string_value = "MATCHED")]
    Matched,
    #[sea_orm(string_value = "CANCELLED")]
    Cancelled,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "lobbies")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "host_player_id")]
    pub host_player_id: i64,
    #[sea_orm(column_name = "guest_player_id")]
    pub guest_player_id: Option<i64>,
    #[sea_orm(column_name = "game_mode")]
    pub game_mode: GameMode,
    #[sea_orm(column_name = "legs_to_win", column_type = "SmallInteger")]
    pub legs_to_win: i16,
    #[sea_orm(column_name = "double_out")]
    pub double_out: bool,
    pub status: LobbyStatus,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
    #[sea_orm(column_name = "updated_at")]
    pub updated_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
