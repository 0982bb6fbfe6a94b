//! DTOs for the matches_sea adapter.

use crate::entities::lobbies::GameMode;
use crate::entities::matches::MatchStatus;

/// DTO for creating a match from a consumed lobby.
#[derive(Debug, Clone)]
pub struct MatchCreate {
    pub player1_id: i64,
    pub player2_id: i64,
    pub game_mode: GameMode,
    pub legs_to_win: i16,
    pub double_out: bool,
}

/// Unified DTO for updating match progression under the optimistic lock.
///
/// Any combination of leg counters, current leg number, and terminal status
/// can be applied atomically with a single lock_version increment.
/// `expected_lock_version` must equal the row's current value.
#[derive(Debug, Clone)]
pub struct MatchProgress {
    pub id: i64,
    pub expected_lock_version: i32,
    pub player1_legs_won: Option<i16>,
    pub player2_legs_won: Option<i16>,
    pub current_leg_number: Option<i16>,
    pub status: Option<MatchStatus>,
    pub winner_id: Option<i64>,
}

impl MatchProgress {
    pub fn new(id: i64, expected_lock_version: i32) -> Self {
        Self {
            id,
            expected_lock_version,
            player1_legs_won: None,
            player2_legs_won: None,
            current_leg_number: None,
            status: None,
            winner_id: None,
        }
    }

    pub fn with_player1_legs_won(mut self, legs: i16) -> Self {
        self.player1_legs_won = Some(legs);
        self
    }

    pub fn with_player2_legs_won(mut self, legs: i16) -> Self {
        self.player2_legs_won = Some(legs);
        self
    }

    pub fn with_current_leg_number(mut self, leg_number: i16) -> Self {
        self.current_leg_number = Some(leg_number);
        self
    }

    pub fn with_status(mut self, status: MatchStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_winner(mut self, winner_id: i64) -> Self {
        self.winner_id = Some(winner_id);
        self
    }
}
