//! DTOs for the legs_sea adapter.

/// DTO for opening a new leg.
#[derive(Debug, Clone)]
pub struct LegCreate {
    pub match_id: i64,
    pub leg_number: i16,
    pub player1_start_score: i16,
    pub player2_start_score: i16,
}

impl LegCreate {
    /// Both players start a leg from the game mode's countdown.
    pub fn fresh(match_id: i64, leg_number: i16, starting_score: i16) -> Self {
        Self {
            match_id,
            leg_number,
            player1_start_score: starting_score,
            player2_start_score: starting_score,
        }
    }
}
