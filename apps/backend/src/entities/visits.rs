use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// One recorded visit. Append-only: never mutated after insert.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "visits")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "leg_id")]
    pub leg_id: i64,
    #[sea_orm(column_name = "player_id")]
    pub player_id: i64,
    #[sea_orm(column_name = "visit_number", column_type = "SmallInteger")]
    pub visit_number: i16,
    #[sea_orm(column_name = "dart1_segment", column_type = "SmallInteger")]
    pub dart1_segment: i16,
    #[sea_orm(column_name = "dart1_multiplier", column_type = "SmallInteger")]
    pub dart1_multiplier: i16,
    #[sea_orm(column_name = "dart2_segment", column_type = "SmallInteger")]
    pub dart2_segment: Option<i16>,
    #[sea_orm(column_name = "dart2_multiplier", column_type = "SmallInteger")]
    pub dart2_multiplier: Option<i16>,
    #[sea_orm(column_name = "dart3_segment", column_type = "SmallInteger")]
    pub dart3_segment: Option<i16>,
    #[sea_orm(column_name = "dart3_multiplier", column_type = "SmallInteger")]
    pub dart3_multiplier: Option<i16>,
    #[sea_orm(column_name = "total_scored", column_type = "SmallInteger")]
    pub total_scored: i16,
    #[sea_orm(column_name = "remaining_before", column_type = "SmallInteger")]
    pub remaining_before: i16,
    #[sea_orm(column_name = "remaining_after", column_type = "SmallInteger")]
    pub remaining_after: i16,
    #[sea_orm(column_name = "is_bust")]
    pub is_bust: bool,
    #[sea_orm(column_name = "is_checkout")]
    pub is_checkout: bool,
    #[sea_orm(column_name = "idempotency_key")]
    pub idempotency_key: Option<String>,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::legs::Entity",
        from = "Column::LegId",
        to = "super::legs::Column::Id"
    )]
    Leg,
}

impl Related<super::legs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Leg.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
