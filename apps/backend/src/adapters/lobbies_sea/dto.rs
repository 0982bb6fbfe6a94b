//! DTOs for the lobbies_sea adapter.

use crate::entities::lobbies::GameMode;

/// DTO for opening a new lobby.
#[derive(Debug, Clone)]
pub struct LobbyCreate {
    pub host_player_id: i64,
    pub game_mode: GameMode,
    pub legs_to_win: i16,
    pub double_out: bool,
}

impl LobbyCreate {
    pub fn new(host_player_id: i64, game_mode: GameMode) -> Self {
        Self {
            host_player_id,
            game_mode,
            legs_to_win: 1,
            double_out: true,
        }
    }

    pub fn with_legs_to_win(mut self, legs_to_win: i16) -> Self {
        self.legs_to_win = legs_to_win;
        self
    }

    pub fn with_double_out(mut self, double_out: bool) -> Self {
        self.double_out = double_out;
        self
    }
}
