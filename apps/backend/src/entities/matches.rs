use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::lobbies::GameMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum MatchStatus {
    #[sea_orm(string_value = "IN_PROGRESS")]
    InProgress,
    #[sea_orm(string_value = "COMPLETED")]
    Completed,
    #[sea_orm(string_value = "FORFEITED")]
    Forfeited,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "matches")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "player1_id")]
    pub player1_id: i64,
    #[sea_orm(column_name = "player2_id")]
    pub player2_id: i64,
    #[sea_orm(column_name = "game_mode")]
    pub game_mode: GameMode,
    #[sea_orm(column_name = "legs_to_win", column_type = "SmallInteger")]
    pub legs_to_win: i16,
    #[sea_orm(column_name = "double_out")]
    pub double_out: bool,
    #[sea_orm(column_name = "player1_legs_won", column_type = "SmallInteger")]
    pub player1_legs_won: i16,
    #[sea_orm(column_name = "player2_legs_won", column_type = "SmallInteger")]
    pub player2_legs_won: i16,
    #[sea_orm(column_name = "current_leg_number", column_type = "SmallInteger")]
    pub current_leg_number: i16,
    pub status: MatchStatus,
    #[sea_orm(column_name = "winner_id")]
    pub winner_id: Option<i64>,
    #[sea_orm(column_name = "lock_version")]
    pub lock_version: i32,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
    #[sea_orm(column_name = "updated_at")]
    pub updated_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::legs::Entity")]
    Legs,
}

impl Related<super::legs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Legs.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
