//! SeaORM adapter for the visit repository - generic over ConnectionTrait.
//!
//! Visits are append-only: this adapter exposes insert and reads, nothing
//! else.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, Order, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use crate::entities::visits;

pub mod dto;

pub use dto::VisitCreate;

// Adapter functions return DbErr; the repos layer maps to DomainError.

/// All visits of a leg in recorded order.
pub async fn find_all_by_leg<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    leg_id: i64,
) -> Result<Vec<visits::Model>, sea_orm::DbErr> {
    visits::Entity::find()
        .filter(visits::Column::LegId.eq(leg_id))
        .order_by(visits::Column::VisitNumber, Order::Asc)
        .all(conn)
        .await
}

/// Count visits recorded for a leg.
pub async fn count_by_leg<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    leg_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    visits::Entity::find()
        .filter(visits::Column::LegId.eq(leg_id))
        .count(conn)
        .await
}

/// Look up a visit by its client-generated idempotency key.
pub async fn find_by_idempotency_key<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    key: &str,
) -> Result<Option<visits::Model>, sea_orm::DbErr> {
    visits::Entity::find()
        .filter(visits::Column::IdempotencyKey.eq(key))
        .one(conn)
        .await
}

pub async fn create_visit<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: VisitCreate,
) -> Result<visits::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let visit_active = visits::ActiveModel {
        id: NotSet,
        leg_id: Set(dto.leg_id),
        player_id: Set(dto.player_id),
        visit_number: Set(dto.visit_number),
        dart1_segment: Set(dto.dart1.0),
        dart1_multiplier: Set(dto.dart1.1),
        dart2_segment: Set(dto.dart2.map(|dart| dart.0)),
        dart2_multiplier: Set(dto.dart2.map(|dart| dart.1)),
        dart3_segment: Set(dto.dart3.map(|dart| dart.0)),
        dart3_multiplier: Set(dto.dart3.map(|dart| dart.1)),
        total_scored: Set(dto.total_scored),
        remaining_before: Set(dto.remaining_before),
        remaining_after: Set(dto.remaining_after),
        is_bust: Set(dto.is_bust),
        is_checkout: Set(dto.is_checkout),
        idempotency_key: Set(dto.idempotency_key),
        created_at: Set(now),
    };

    visit_active.insert(conn).await
}
