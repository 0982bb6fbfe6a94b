//! Match-format rules: player slots, turn order, leg arithmetic.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::domain::{DomainError, ValidationKind};

pub const MIN_LEGS_TO_WIN: i16 = 1;

/// Which side of the match a player occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerSlot {
    One,
    Two,
}

impl PlayerSlot {
    pub fn other(self) -> Self {
        match self {
            PlayerSlot::One => PlayerSlot::Two,
            PlayerSlot::Two => PlayerSlot::One,
        }
    }
}

impl fmt::Display for PlayerSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerSlot::One => write!(f, "player1"),
            PlayerSlot::Two => write!(f, "player2"),
        }
    }
}

/// Turn order is a pure function of the persisted visit count for the leg:
/// even count means player1 throws, odd means player2. The count restarts at
/// zero with each new leg, so player1 opens every leg (continue-parity rule;
/// whether the previous leg's loser should open instead is a pending product
/// decision).
pub fn slot_to_throw(recorded_visits: u64) -> PlayerSlot {
    if recorded_visits % 2 == 0 {
        PlayerSlot::One
    } else {
        PlayerSlot::Two
    }
}

/// Maximum legs a best-of match can run to.
pub fn max_legs(legs_to_win: i16) -> i16 {
    2 * legs_to_win - 1
}

pub fn validate_legs_to_win(legs_to_win: i16) -> Result<(), DomainError> {
    if legs_to_win < MIN_LEGS_TO_WIN {
        return Err(DomainError::validation(
            ValidationKind::InvalidConfig,
            format!("legs_to_win must be at least {MIN_LEGS_TO_WIN}, got {legs_to_win}"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parity_alternates_from_player1() {
        assert_eq!(slot_to_throw(0), PlayerSlot::One);
        assert_eq!(slot_to_throw(1), PlayerSlot::Two);
        assert_eq!(slot_to_throw(2), PlayerSlot::One);
        assert_eq!(slot_to_throw(7), PlayerSlot::Two);
    }

    #[test]
    fn best_of_arithmetic() {
        assert_eq!(max_legs(1), 1);
        assert_eq!(max_legs(2), 3);
        assert_eq!(max_legs(3), 5);
    }

    #[test]
    fn legs_to_win_lower_bound() {
        assert!(validate_legs_to_win(0).is_err());
        assert!(validate_legs_to_win(-3).is_err());
        assert!(validate_legs_to_win(1).is_ok());
    }
}
