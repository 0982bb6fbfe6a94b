//! Visit recording: the core of the scoring state machine.

use sea_orm::DatabaseTransaction;
use tracing::{debug, info};
use uuid::Uuid;

use super::{visit_summaries, MatchFlowService};
use crate::domain::dart::Dart;
use crate::domain::projection::project_leg;
use crate::domain::scoring::score_visit;
use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError, ValidationKind};
use crate::infra::notify::{ChangedTable, RowChange};
use crate::repos::legs;
use crate::repos::matches;
use crate::repos::visits::{self, Visit, VisitWrite};

impl MatchFlowService {
    /// Record one visit for a player.
    ///
    /// Turn order comes from the persisted visit count, never from the
    /// caller; a submission out of turn is rejected with `NOT_YOUR_TURN` and
    /// must not be blind-retried. Bust and checkout are successful results
    /// carried in the returned visit. A checkout also closes the leg and
    /// advances (or completes) the match within the same transaction.
    ///
    /// `idempotency_key` is a client-generated token for retrying after an
    /// ambiguous failure: a key the store already holds replays the
    /// originally recorded visit instead of scoring twice.
    pub async fn record_visit(
        &self,
        txn: &DatabaseTransaction,
        leg_id: i64,
        player_id: i64,
        darts: &[Dart],
        idempotency_key: Option<Uuid>,
    ) -> Result<Visit, AppError> {
        debug!(leg_id, player_id, darts = darts.len(), "visit submitted");

        let leg = legs::require_leg(txn, leg_id).await?;
        let match_record = matches::require_match(txn, leg.match_id).await?;

        if !match_record.is_in_progress() {
            return Err(DomainError::validation(
                ValidationKind::MatchOver,
                format!("match {} is not in progress", match_record.id),
            )
            .into());
        }
        if leg.is_complete() {
            return Err(DomainError::validation(
                ValidationKind::LegOver,
                format!("leg {leg_id} already has a winner"),
            )
            .into());
        }

        let slot = match_record.slot_of(player_id).ok_or_else(|| {
            DomainError::validation(
                ValidationKind::Other("NOT_A_PARTICIPANT".into()),
                format!("player {player_id} is not in match {}", match_record.id),
            )
        })?;

        if let Some(key) = idempotency_key {
            let key_str = key.to_string();
            if let Some(existing) = visits::find_by_idempotency_key(txn, &key_str).await? {
                if existing.leg_id == leg_id && existing.player_id == player_id {
                    debug!(leg_id, player_id, %key, "idempotent replay of recorded visit");
                    return Ok(existing);
                }
                return Err(DomainError::conflict(
                    ConflictKind::Other("DuplicateIdempotencyKey".into()),
                    "idempotency key was already used for a different visit",
                )
                .into());
            }
        }

        // Turn order and remaining score are pure functions of the persisted
        // history, evaluated inside this transaction.
        let all_visits = visits::find_all_by_leg(txn, leg_id).await?;
        let summaries = visit_summaries(&match_record, &all_visits)?;
        let state = project_leg(leg.player1_start_score, leg.player2_start_score, &summaries);

        let expected = state.next_to_throw.ok_or_else(|| {
            DomainError::validation(
                ValidationKind::LegOver,
                format!("leg {leg_id} already has a winner"),
            )
        })?;
        if expected != slot {
            return Err(DomainError::validation(
                ValidationKind::OutOfTurn,
                format!("it is {expected}'s turn to throw"),
            )
            .into());
        }

        let remaining_before = state.remaining_for(slot);
        let outcome = score_visit(remaining_before, darts, match_record.double_out)?;

        let visit = visits::create_visit(
            txn,
            VisitWrite {
                leg_id,
                player_id,
                visit_number: (all_visits.len() + 1) as i16,
                darts: outcome.darts,
                total_scored: outcome.total_scored,
                remaining_before,
                remaining_after: outcome.remaining_after,
                is_bust: outcome.is_bust,
                is_checkout: outcome.is_checkout,
                idempotency_key: idempotency_key.map(|key| key.to_string()),
            },
        )
        .await?;

        info!(
            leg_id,
            player_id,
            visit_number = visit.visit_number,
            total_scored = visit.total_scored,
            remaining_after = visit.remaining_after,
            is_bust = visit.is_bust,
            is_checkout = visit.is_checkout,
            "visit recorded"
        );
        self.notifier
            .row_changed(RowChange::new(ChangedTable::Visits, visit.id))
            .await;

        if visit.is_checkout {
            self.close_leg(txn, &match_record, &leg, slot).await?;
        }

        Ok(visit)
    }
}
