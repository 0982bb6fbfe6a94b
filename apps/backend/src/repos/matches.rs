//! Match repository functions for the domain layer.

use sea_orm::{ConnectionTrait, DatabaseTransaction};

use crate::adapters::matches_sea as matches_adapter;
use crate::domain::rules::PlayerSlot;
use crate::entities::lobbies::GameMode;
use crate::entities::matches;
use crate::entities::matches::MatchStatus;
use crate::errors::domain::DomainError;

pub use matches_adapter::{MatchCreate, MatchProgress};

/// Match domain model, converted from the database model when loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    pub id: i64,
    pub player1_id: i64,
    pub player2_id: i64,
    pub game_mode: GameMode,
    pub legs_to_win: i16,
    pub double_out: bool,
    pub player1_legs_won: i16,
    pub player2_legs_won: i16,
    pub current_leg_number: i16,
    pub status: MatchStatus,
    pub winner_id: Option<i64>,
    pub lock_version: i32,
    pub created_at: time::OffsetDateTime,
    pub updated_at: time::OffsetDateTime,
}

impl Match {
    pub fn is_in_progress(&self) -> bool {
        self.status == MatchStatus::InProgress
    }

    /// Which slot a player occupies, if they are in this match at all.
    pub fn slot_of(&self, player_id: i64) -> Option<PlayerSlot> {
        if player_id == self.player1_id {
            Some(PlayerSlot::One)
        } else if player_id == self.player2_id {
            Some(PlayerSlot::Two)
        } else {
            None
        }
    }

    pub fn player_in(&self, slot: PlayerSlot) -> i64 {
        match slot {
            PlayerSlot::One => self.player1_id,
            PlayerSlot::Two => self.player2_id,
        }
    }

    pub fn legs_won_by(&self, slot: PlayerSlot) -> i16 {
        match slot {
            PlayerSlot::One => self.player1_legs_won,
            PlayerSlot::Two => self.player2_legs_won,
        }
    }
}

// Free functions (generic) mirroring the adapter surface

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<Option<Match>, DomainError> {
    let record = matches_adapter::find_by_id(conn, match_id).await?;
    Ok(record.map(Match::from))
}

/// Find match by ID or return a domain-level not-found error.
pub async fn require_match<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<Match, DomainError> {
    let record = matches_adapter::require_match(conn, match_id).await?;
    Ok(Match::from(record))
}

pub async fn create_match(
    txn: &DatabaseTransaction,
    dto: MatchCreate,
) -> Result<Match, DomainError> {
    let record = matches_adapter::create_match(txn, dto).await?;
    Ok(Match::from(record))
}

/// Apply a progression update under the optimistic lock.
pub async fn update_progress(
    txn: &DatabaseTransaction,
    dto: MatchProgress,
) -> Result<Match, DomainError> {
    let record = matches_adapter::update_progress(txn, dto).await?;
    Ok(Match::from(record))
}

// Conversions between SeaORM models and domain models

impl From<matches::Model> for Match {
    fn from(model: matches::Model) -> Self {
        Self {
            id: model.id,
            player1_id: model.player1_id,
            player2_id: model.player2_id,
            game_mode: model.game_mode,
            legs_to_win: model.legs_to_win,
            double_out: model.double_out,
            player1_legs_won: model.player1_legs_won,
            player2_legs_won: model.player2_legs_won,
            current_leg_number: model.current_leg_number,
            status: model.status,
            winner_id: model.winner_id,
            lock_version: model.lock_version,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
