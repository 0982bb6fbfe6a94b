//! Lobby repository functions for the domain layer.

use sea_orm::{ConnectionTrait, DatabaseTransaction};

use crate::adapters::lobbies_sea as lobbies_adapter;
use crate::entities::lobbies;
use crate::entities::lobbies::{GameMode, LobbyStatus};
use crate::errors::domain::DomainError;

pub use lobbies_adapter::LobbyCreate;

/// Lobby domain model, converted from the database model when loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct Lobby {
    pub id: i64,
    pub host_player_id: i64,
    pub guest_player_id: Option<i64>,
    pub game_mode: GameMode,
    pub legs_to_win: i16,
    pub double_out: bool,
    pub status: LobbyStatus,
    pub created_at: time::OffsetDateTime,
    pub updated_at: time::OffsetDateTime,
}

impl Lobby {
    pub fn is_open(&self) -> bool {
        self.status == LobbyStatus::Open
    }
}

// Free functions (generic) mirroring the adapter surface

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    lobby_id: i64,
) -> Result<Option<Lobby>, DomainError> {
    let lobby = lobbies_adapter::find_by_id(conn, lobby_id).await?;
    Ok(lobby.map(Lobby::from))
}

/// Find lobby by ID or return a domain-level not-found error.
pub async fn require_lobby<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    lobby_id: i64,
) -> Result<Lobby, DomainError> {
    let lobby = lobbies_adapter::require_lobby(conn, lobby_id).await?;
    Ok(Lobby::from(lobby))
}

/// Snapshot of open lobbies, oldest first. `exclude_host` serves the
/// "available to join" view; `None` lists every open lobby.
pub async fn list_open<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    exclude_host: Option<i64>,
) -> Result<Vec<Lobby>, DomainError> {
    let lobbies = lobbies_adapter::list_open(conn, exclude_host).await?;
    Ok(lobbies.into_iter().map(Lobby::from).collect())
}

pub async fn create_lobby(
    txn: &DatabaseTransaction,
    dto: LobbyCreate,
) -> Result<Lobby, DomainError> {
    let lobby = lobbies_adapter::create_lobby(txn, dto).await?;
    Ok(Lobby::from(lobby))
}

/// Atomically claim an open lobby for a guest. `None` means the conditional
/// update hit zero rows: the race was lost or the lobby is gone.
pub async fn claim_lobby(
    txn: &DatabaseTransaction,
    lobby_id: i64,
    guest_id: i64,
) -> Result<Option<Lobby>, DomainError> {
    let lobby = lobbies_adapter::claim_lobby(txn, lobby_id, guest_id).await?;
    Ok(lobby.map(Lobby::from))
}

/// Conditionally cancel an open lobby; returns rows affected.
pub async fn cancel_open_lobby(
    txn: &DatabaseTransaction,
    lobby_id: i64,
) -> Result<u64, DomainError> {
    let rows = lobbies_adapter::cancel_open_lobby(txn, lobby_id).await?;
    Ok(rows)
}

// Conversions between SeaORM models and domain models

impl From<lobbies::Model> for Lobby {
    fn from(model: lobbies::Model) -> Self {
        Self {
            id: model.id,
            host_player_id: model.host_player_id,
            guest_player_id: model.guest_player_id,
            game_mode: model.game_mode,
            legs_to_win: model.legs_to_win,
            double_out: model.double_out,
            status: model.status,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
