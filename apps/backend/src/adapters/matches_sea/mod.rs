//! SeaORM adapter for the match repository - generic over ConnectionTrait.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, Set,
};

use crate::entities::matches;
use crate::entities::matches::MatchStatus;

pub mod dto;

pub use dto::{MatchCreate, MatchProgress};

// Adapter functions return DbErr; the repos layer maps to DomainError.

/// Helper: apply an optimistic update with lock version check, then refetch.
///
/// Adds the lock_version increment and updated_at touch, filters by id and
/// the expected lock_version, and distinguishes NotFound from a lock
/// mismatch by refetching when zero rows were affected. Lock mismatches are
/// surfaced as a structured payload for the db_errors translation layer.
async fn optimistic_update_then_fetch<C, F>(
    conn: &C,
    id: i64,
    expected_lock_version: i32,
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
            matches::Column::LockVersion,
            Expr::col(matches::Column::LockVersion).add(1),
        )
        .filter(matches::Column::Id.eq(id))
        .filter(matches::Column::LockVersion.eq(expected_lock_version))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        let found = matches::Entity::find_by_id(id).one(conn).await?;
        if let Some(row) = found {
            let payload = format!(
                "OPTIMISTIC_LOCK:{{\"expected\":{},\"actual\":{}}}",
                expected_lock_version, row.lock_version
            );
            return Err(sea_orm::DbErr::Custom(payload));
        }
        return Err(sea_orm::DbErr::RecordNotFound("Match not found".to_string()));
    }

    matches::Entity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound("Match not found".to_string()))
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<Option<matches::Model>, sea_orm::DbErr> {
    matches::Entity::find_by_id(match_id).one(conn).await
}

/// Find match by ID or return RecordNotFound.
pub async fn require_match<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<matches::Model, sea_orm::DbErr> {
    find_by_id(conn, match_id)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound("Match not found".to_string()))
}

pub async fn create_match<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: MatchCreate,
) -> Result<matches::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let match_active = matches::ActiveModel {
        id: NotSet,
        player1_id: Set(dto.player1_id),
        player2_id: Set(dto.player2_id),
        game_mode: Set(dto.game_mode),
        legs_to_win: Set(dto.legs_to_win),
        double_out: Set(dto.double_out),
        player1_legs_won: Set(0),
        player2_legs_won: Set(0),
        current_leg_number: Set(1),
        status: Set(MatchStatus::InProgress),
        winner_id: NotSet,
        lock_version: Set(1),
        created_at: Set(now),
        updated_at: Set(now),
    };

    match_active.insert(conn).await
}

/// Apply a progression update (leg counters, current leg, terminal status)
/// under the optimistic lock.
pub async fn update_progress<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: MatchProgress,
) -> Result<matches::Model, sea_orm::DbErr> {
    optimistic_update_then_fetch(conn, dto.id, dto.expected_lock_version, |mut update| {
        if let Some(legs) = dto.player1_legs_won {
            update = update.col_expr(matches::Column::Player1LegsWon, Expr::val(legs).into());
        }
        if let Some(legs) = dto.player2_legs_won {
            update = update.col_expr(matches::Column::Player2LegsWon, Expr::val(legs).into());
        }
        if let Some(leg_number) = dto.current_leg_number {
            update = update.col_expr(
                matches::Column::CurrentLegNumber,
                Expr::val(leg_number).into(),
            );
        }
        if let Some(status) = dto.status {
            update = update.col_expr(matches::Column::Status, Expr::val(status).into());
        }
        if let Some(winner_id) = dto.winner_id {
            update = update.col_expr(matches::Column::WinnerId, Expr::val(Some(winner_id)).into());
        }
        update
    })
    .await
}
