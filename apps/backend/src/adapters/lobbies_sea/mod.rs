//! SeaORM adapter for the lobby repository - generic over ConnectionTrait.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, Order, QueryFilter,
    QueryOrder, Set,
};

use crate::entities::lobbies;
use crate::entities::lobbies::LobbyStatus;

pub mod dto;

pub use dto::LobbyCreate;

// Adapter functions return DbErr; the repos layer maps to DomainError.

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    lobby_id: i64,
) -> Result<Option<lobbies::Model>, sea_orm::DbErr> {
    lobbies::Entity::find_by_id(lobby_id).one(conn).await
}

/// Find lobby by ID or return RecordNotFound.
pub async fn require_lobby<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    lobby_id: i64,
) -> Result<lobbies::Model, sea_orm::DbErr> {
    find_by_id(conn, lobby_id)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound("Lobby not found".to_string()))
}

/// List open lobbies, oldest first, optionally excluding a host's own lobby.
pub async fn list_open<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    exclude_host: Option<i64>,
) -> Result<Vec<lobbies::Model>, sea_orm::DbErr> {
    let mut query = lobbies::Entity::find().filter(lobbies::Column::Status.eq(LobbyStatus::Open));
    if let Some(host_id) = exclude_host {
        query = query.filter(lobbies::Column::HostPlayerId.ne(host_id));
    }
    query
        .order_by(lobbies::Column::CreatedAt, Order::Asc)
        .all(conn)
        .await
}

pub async fn create_lobby<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: LobbyCreate,
) -> Result<lobbies::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let lobby_active = lobbies::ActiveModel {
        id: NotSet,
        host_player_id: Set(dto.host_player_id),
        guest_player_id: NotSet,
        game_mode: Set(dto.game_mode),
        legs_to_win: Set(dto.legs_to_win),
        double_out: Set(dto.double_out),
        status: Set(LobbyStatus::Open),
        created_at: Set(now),
        updated_at: Set(now),
    };

    lobby_active.insert(conn).await
}

/// Atomically claim an open lobby for a guest.
///
/// Single conditional UPDATE: the row must still be `open` with no guest
/// bound. Zero rows affected means another guest won the race (or the lobby
/// is gone); `Ok(None)` lets the caller distinguish via a refetch. This is
/// the one compare-and-swap the whole system depends on.
pub async fn claim_lobby<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    lobby_id: i64,
    guest_id: i64,
) -> Result<Option<lobbies::Model>, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();

    let result = lobbies::Entity::update_many()
        .col_expr(
            lobbies::Column::GuestPlayerId,
            Expr::val(Some(guest_id)).into(),
        )
        .col_expr(lobbies::Column::Status, Expr::val(LobbyStatus::Matched).into())
        .col_expr(lobbies::Column::UpdatedAt, Expr::val(now).into())
        .filter(lobbies::Column::Id.eq(lobby_id))
        .filter(lobbies::Column::Status.eq(LobbyStatus::Open))
        .filter(lobbies::Column::GuestPlayerId.is_null())
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        return Ok(None);
    }

    find_by_id(conn, lobby_id)
        .await?
        .map(Some)
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound("Lobby not found".to_string()))
}

/// Conditionally cancel an open lobby. Returns the number of rows affected;
/// zero means the lobby was no longer open (the caller refetches to decide
/// whether that is a matched conflict or an idempotent repeat).
pub async fn cancel_open_lobby<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    lobby_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();

    let result = lobbies::Entity::update_many()
        .col_expr(
            lobbies::Column::Status,
            Expr::val(LobbyStatus::Cancelled).into(),
        )
        .col_expr(lobbies::Column::UpdatedAt, Expr::val(now).into())
        .filter(lobbies::Column::Id.eq(lobby_id))
        .filter(lobbies::Column::Status.eq(LobbyStatus::Open))
        .exec(conn)
        .await?;

    Ok(result.rows_affected)
}
