//! SeaORM adapter for the leg repository - generic over ConnectionTrait.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, Order, QueryFilter,
    QueryOrder, Set,
};

use crate::entities::legs;

pub mod dto;

pub use dto::LegCreate;

// Adapter functions return DbErr; the repos layer maps to DomainError.

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    leg_id: i64,
) -> Result<Option<legs::Model>, sea_orm::DbErr> {
    legs::Entity::find_by_id(leg_id).one(conn).await
}

/// Find leg by ID or return RecordNotFound.
pub async fn require_leg<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    leg_id: i64,
) -> Result<legs::Model, sea_orm::DbErr> {
    find_by_id(conn, leg_id)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound("Leg not found".to_string()))
}

/// All legs of a match in playing order.
pub async fn find_all_by_match<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<Vec<legs::Model>, sea_orm::DbErr> {
    legs::Entity::find()
        .filter(legs::Column::MatchId.eq(match_id))
        .order_by(legs::Column::LegNumber, Order::Asc)
        .all(conn)
        .await
}

/// The highest-numbered (current) leg of a match.
pub async fn find_current_leg<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<Option<legs::Model>, sea_orm::DbErr> {
    legs::Entity::find()
        .filter(legs::Column::MatchId.eq(match_id))
        .order_by(legs::Column::LegNumber, Order::Desc)
        .one(conn)
        .await
}

pub async fn create_leg<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: LegCreate,
) -> Result<legs::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let leg_active = legs::ActiveModel {
        id: NotSet,
        match_id: Set(dto.match_id),
        leg_number: Set(dto.leg_number),
        player1_start_score: Set(dto.player1_start_score),
        player2_start_score: Set(dto.player2_start_score),
        winner_id: NotSet,
        created_at: Set(now),
        completed_at: NotSet,
    };

    leg_active.insert(conn).await
}

/// Stamp the leg winner. Conditional on no winner being recorded yet, so a
/// completed leg stays immutable; returns the rows affected.
pub async fn complete_leg<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    leg_id: i64,
    winner_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();

    let result = legs::Entity::update_many()
        .col_expr(legs::Column::WinnerId, Expr::val(Some(winner_id)).into())
        .col_expr(legs::Column::CompletedAt, Expr::val(Some(now)).into())
        .filter(legs::Column::Id.eq(leg_id))
        .filter(legs::Column::WinnerId.is_null())
        .exec(conn)
        .await?;

    Ok(result.rows_affected)
}
