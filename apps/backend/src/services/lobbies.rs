//! Lobby lifecycle orchestration.
//!
//! A lobby is an open invitation: created by a host, consumed by exactly one
//! joining guest (producing a match and its opening leg), or cancelled by
//! the host. The open→matched transition is a storage-level conditional
//! update; two guests racing for the same lobby can never both win.

use sea_orm::{ConnectionTrait, DatabaseTransaction};
use tracing::{debug, info};

use crate::domain::rules::validate_legs_to_win;
use crate::entities::lobbies::{GameMode, LobbyStatus};
use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError, ValidationKind};
use crate::infra::notify::{null_notifier, ChangedTable, RowChange, SharedNotifier};
use crate::repos::legs::{self, Leg, LegCreate};
use crate::repos::lobbies::{self, Lobby, LobbyCreate};
use crate::repos::matches::{self, Match, MatchCreate};

/// A successful join: the match and its opening leg.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinedMatch {
    pub match_record: Match,
    pub opening_leg: Leg,
}

/// Lobby service - generic over ConnectionTrait for reads, transactional
/// for writes.
#[derive(Clone)]
pub struct LobbyService {
    notifier: SharedNotifier,
}

impl LobbyService {
    pub fn new() -> Self {
        Self {
            notifier: null_notifier(),
        }
    }

    pub fn with_notifier(notifier: SharedNotifier) -> Self {
        Self { notifier }
    }

    /// Open a new lobby. The caller becomes its host.
    pub async fn create_lobby(
        &self,
        txn: &DatabaseTransaction,
        host_player_id: i64,
        game_mode: GameMode,
        legs_to_win: i16,
        double_out: bool,
    ) -> Result<Lobby, AppError> {
        validate_legs_to_win(legs_to_win)?;

        let dto = LobbyCreate::new(host_player_id, game_mode)
            .with_legs_to_win(legs_to_win)
            .with_double_out(double_out);
        let lobby = lobbies::create_lobby(txn, dto).await?;

        info!(
            lobby_id = lobby.id,
            host_player_id,
            game_mode = ?game_mode,
            legs_to_win,
            double_out,
            "lobby opened"
        );
        self.notifier
            .row_changed(RowChange::new(ChangedTable::Lobbies, lobby.id))
            .await;

        Ok(lobby)
    }

    /// Snapshot of open lobbies. Pass the caller's id to exclude their own
    /// lobby for an "available to join" view; pass `None` for all.
    pub async fn list_open_lobbies<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        exclude_host: Option<i64>,
    ) -> Result<Vec<Lobby>, AppError> {
        let open = lobbies::list_open(conn, exclude_host).await?;
        Ok(open)
    }

    /// Join an open lobby, producing the match and its opening leg.
    ///
    /// The claim is a single conditional update; losing the race surfaces as
    /// `LOBBY_TAKEN` and the caller must re-list and pick a different lobby,
    /// never blind-retry the same id.
    pub async fn join_lobby(
        &self,
        txn: &DatabaseTransaction,
        lobby_id: i64,
        guest_id: i64,
    ) -> Result<JoinedMatch, AppError> {
        debug!(lobby_id, guest_id, "join requested");

        let lobby = lobbies::require_lobby(txn, lobby_id).await?;
        if lobby.host_player_id == guest_id {
            return Err(DomainError::validation(
                ValidationKind::InvalidJoin,
                "host cannot join their own lobby",
            )
            .into());
        }

        let claimed = lobbies::claim_lobby(txn, lobby_id, guest_id)
            .await?
            .ok_or_else(|| {
                DomainError::conflict(
                    ConflictKind::LobbyTaken,
                    format!("lobby {lobby_id} is no longer open"),
                )
            })?;

        let match_record = matches::create_match(
            txn,
            MatchCreate {
                player1_id: claimed.host_player_id,
                player2_id: guest_id,
                game_mode: claimed.game_mode,
                legs_to_win: claimed.legs_to_win,
                double_out: claimed.double_out,
            },
        )
        .await?;

        let starting_score = claimed.game_mode.starting_score();
        let opening_leg =
            legs::create_leg(txn, LegCreate::fresh(match_record.id, 1, starting_score)).await?;

        info!(
            lobby_id,
            match_id = match_record.id,
            player1_id = match_record.player1_id,
            player2_id = match_record.player2_id,
            "lobby matched, match started"
        );
        self.notifier
            .row_changed(RowChange::new(ChangedTable::Lobbies, lobby_id))
            .await;
        self.notifier
            .row_changed(RowChange::new(ChangedTable::Matches, match_record.id))
            .await;
        self.notifier
            .row_changed(RowChange::new(ChangedTable::Legs, opening_leg.id))
            .await;

        Ok(JoinedMatch {
            match_record,
            opening_leg,
        })
    }

    /// Cancel an open lobby. Host-only; repeating a cancel is a no-op
    /// success, while cancelling a matched lobby fails cleanly.
    pub async fn cancel_lobby(
        &self,
        txn: &DatabaseTransaction,
        lobby_id: i64,
        caller_id: i64,
    ) -> Result<(), AppError> {
        let lobby = lobbies::require_lobby(txn, lobby_id).await?;

        if lobby.host_player_id != caller_id {
            return Err(DomainError::validation(
                ValidationKind::NotHost,
                "only the host may cancel a lobby",
            )
            .into());
        }

        match lobby.status {
            LobbyStatus::Cancelled => Ok(()), // idempotent repeat
            LobbyStatus::Matched => Err(DomainError::conflict(
                ConflictKind::AlreadyMatched,
                format!("lobby {lobby_id} already produced a match"),
            )
            .into()),
            LobbyStatus::Open => {
                let rows = lobbies::cancel_open_lobby(txn, lobby_id).await?;
                if rows == 0 {
                    // Lost a race while we held an `open` snapshot: a guest
                    // matched it or a concurrent cancel landed first.
                    let current = lobbies::require_lobby(txn, lobby_id).await?;
                    if current.status == LobbyStatus::Cancelled {
                        return Ok(());
                    }
                    return Err(DomainError::conflict(
                        ConflictKind::AlreadyMatched,
                        format!("lobby {lobby_id} already produced a match"),
                    )
                    .into());
                }

                info!(lobby_id, "lobby cancelled");
                self.notifier
                    .row_changed(RowChange::new(ChangedTable::Lobbies, lobby_id))
                    .await;
                Ok(())
            }
        }
    }
}

impl Default for LobbyService {
    fn default() -> Self {
        Self::new()
    }
}
