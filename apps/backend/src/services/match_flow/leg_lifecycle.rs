//! Leg completion: stamp the winner, advance the match or finish it.

use sea_orm::DatabaseTransaction;
use tracing::info;

use super::MatchFlowService;
use crate::domain::rules::PlayerSlot;
use crate::entities::matches::MatchStatus;
use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError};
use crate::infra::notify::{ChangedTable, RowChange};
use crate::repos::legs::{self, Leg, LegCreate};
use crate::repos::matches::{self, Match, MatchProgress};

impl MatchFlowService {
    /// Close a leg a player just checked out. Bumps the winner's counter
    /// under the match's optimistic lock; at `legs_to_win` the match
    /// completes, otherwise the next leg opens with fresh starting scores
    /// (the visit count restarts, so player1 throws first again).
    pub(super) async fn close_leg(
        &self,
        txn: &DatabaseTransaction,
        match_record: &Match,
        leg: &Leg,
        winner_slot: PlayerSlot,
    ) -> Result<Match, AppError> {
        let winner_id = match_record.player_in(winner_slot);

        let rows = legs::complete_leg(txn, leg.id, winner_id).await?;
        if rows == 0 {
            return Err(DomainError::conflict(
                ConflictKind::Other("LegAlreadyComplete".into()),
                format!("leg {} already has a winner", leg.id),
            )
            .into());
        }
        self.notifier
            .row_changed(RowChange::new(ChangedTable::Legs, leg.id))
            .await;

        let legs_won = match_record.legs_won_by(winner_slot) + 1;
        let mut dto = MatchProgress::new(match_record.id, match_record.lock_version);
        dto = match winner_slot {
            PlayerSlot::One => dto.with_player1_legs_won(legs_won),
            PlayerSlot::Two => dto.with_player2_legs_won(legs_won),
        };

        if legs_won >= match_record.legs_to_win {
            dto = dto.with_status(MatchStatus::Completed).with_winner(winner_id);
            let updated = matches::update_progress(txn, dto).await?;

            info!(
                match_id = match_record.id,
                winner_id,
                legs_won,
                "match completed"
            );
            self.notifier
                .row_changed(RowChange::new(ChangedTable::Matches, match_record.id))
                .await;
            return Ok(updated);
        }

        let next_leg_number = leg.leg_number + 1;
        dto = dto.with_current_leg_number(next_leg_number);
        let updated = matches::update_progress(txn, dto).await?;

        let starting_score = match_record.game_mode.starting_score();
        let next_leg = legs::create_leg(
            txn,
            LegCreate::fresh(match_record.id, next_leg_number, starting_score),
        )
        .await?;

        info!(
            match_id = match_record.id,
            leg_won_by = winner_id,
            next_leg_number,
            "leg won, next leg opened"
        );
        self.notifier
            .row_changed(RowChange::new(ChangedTable::Matches, match_record.id))
            .await;
        self.notifier
            .row_changed(RowChange::new(ChangedTable::Legs, next_leg.id))
            .await;

        Ok(updated)
    }
}
