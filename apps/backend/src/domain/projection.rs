//! Leg projection: live state recomputed from the persisted visit list.
//!
//! Clients never hold authoritative turn or score state. On every render or
//! reconnect, the current remaining scores, whose turn it is, and the leg
//! winner are folded from the append-only visit history.

use super::rules::{slot_to_throw, PlayerSlot};

/// The slice of a persisted visit the projection needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisitSummary {
    pub slot: PlayerSlot,
    pub total_scored: i16,
    /// Darts actually thrown (1..=3); busts still count their darts here.
    pub darts_thrown: u8,
    pub is_checkout: bool,
}

/// Derived state of one leg.
#[derive(Debug, Clone, PartialEq)]
pub struct LegProjection {
    pub player1_remaining: i16,
    pub player2_remaining: i16,
    pub visit_count: usize,
    /// `None` once the leg has a winner.
    pub next_to_throw: Option<PlayerSlot>,
    pub winner: Option<PlayerSlot>,
    /// Three-dart averages; `None` before a player's first visit.
    pub player1_average: Option<f64>,
    pub player2_average: Option<f64>,
}

impl LegProjection {
    pub fn remaining_for(&self, slot: PlayerSlot) -> i16 {
        match slot {
            PlayerSlot::One => self.player1_remaining,
            PlayerSlot::Two => self.player2_remaining,
        }
    }
}

/// Fold a leg's visits (in recorded order) into its live state.
pub fn project_leg(
    player1_start: i16,
    player2_start: i16,
    visits: &[VisitSummary],
) -> LegProjection {
    let mut remaining = [player1_start, player2_start];
    let mut scored = [0i64, 0i64];
    let mut darts = [0u32, 0u32];
    let mut winner = None;

    for visit in visits {
        let idx = match visit.slot {
            PlayerSlot::One => 0,
            PlayerSlot::Two => 1,
        };
        remaining[idx] -= visit.total_scored;
        scored[idx] += i64::from(visit.total_scored);
        darts[idx] += u32::from(visit.darts_thrown);
        if visit.is_checkout {
            winner = Some(visit.slot);
        }
    }

    let average = |idx: usize| {
        if darts[idx] == 0 {
            None
        } else {
            Some(scored[idx] as f64 / f64::from(darts[idx]) * 3.0)
        }
    };

    LegProjection {
        player1_remaining: remaining[0],
        player2_remaining: remaining[1],
        visit_count: visits.len(),
        next_to_throw: if winner.is_some() {
            None
        } else {
            Some(slot_to_throw(visits.len() as u64))
        },
        winner,
        player1_average: average(0),
        player2_average: average(1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visit(slot: PlayerSlot, total: i16) -> VisitSummary {
        VisitSummary {
            slot,
            total_scored: total,
            darts_thrown: 3,
            is_checkout: false,
        }
    }

    #[test]
    fn empty_leg_awaits_player1() {
        let p = project_leg(501, 501, &[]);
        assert_eq!(p.player1_remaining, 501);
        assert_eq!(p.player2_remaining, 501);
        assert_eq!(p.next_to_throw, Some(PlayerSlot::One));
        assert_eq!(p.winner, None);
        assert_eq!(p.player1_average, None);
    }

    #[test]
    fn remaining_tracks_each_slot_separately() {
        let visits = [
            visit(PlayerSlot::One, 180),
            visit(PlayerSlot::Two, 60),
            visit(PlayerSlot::One, 100),
        ];
        let p = project_leg(501, 501, &visits);
        assert_eq!(p.player1_remaining, 221);
        assert_eq!(p.player2_remaining, 441);
        assert_eq!(p.next_to_throw, Some(PlayerSlot::Two));
    }

    #[test]
    fn busts_leave_remaining_untouched_but_count_darts() {
        let visits = [VisitSummary {
            slot: PlayerSlot::One,
            total_scored: 0,
            darts_thrown: 2,
            is_checkout: false,
        }];
        let p = project_leg(301, 301, &visits);
        assert_eq!(p.player1_remaining, 301);
        assert_eq!(p.player1_average, Some(0.0));
    }

    #[test]
    fn checkout_closes_the_leg() {
        let visits = [
            visit(PlayerSlot::One, 180),
            visit(PlayerSlot::Two, 45),
            VisitSummary {
                slot: PlayerSlot::One,
                total_scored: 121,
                darts_thrown: 3,
                is_checkout: true,
            },
        ];
        let p = project_leg(301, 301, &visits);
        assert_eq!(p.winner, Some(PlayerSlot::One));
        assert_eq!(p.next_to_throw, None);
        assert_eq!(p.player1_remaining, 0);
    }

    #[test]
    fn three_dart_average() {
        let visits = [
            visit(PlayerSlot::One, 180),
            visit(PlayerSlot::Two, 60),
            visit(PlayerSlot::One, 60),
        ];
        let p = project_leg(501, 501, &visits);
        assert_eq!(p.player1_average, Some(120.0));
        assert_eq!(p.player2_average, Some(60.0));
    }
}
