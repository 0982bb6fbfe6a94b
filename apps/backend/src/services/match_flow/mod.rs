//! Match flow orchestration - bridges the pure scoring rules with
//! persistence.
//!
//! Owns a match from creation to completion: recording visits, closing legs,
//! advancing or finishing the match, forfeits, bot turns, and the snapshot
//! clients rebuild their view from.

mod leg_lifecycle;
mod visits;

use sea_orm::{ConnectionTrait, DatabaseTransaction};
use tracing::info;

use crate::ai::DartThrower;
use crate::domain::projection::{project_leg, LegProjection, VisitSummary};
use crate::entities::matches::MatchStatus;
use crate::error::AppError;
use crate::errors::domain::{DomainError, InfraErrorKind, ValidationKind};
use crate::infra::notify::{null_notifier, ChangedTable, RowChange, SharedNotifier};
use crate::repos::legs::{self, Leg};
use crate::repos::matches::{self, Match, MatchProgress};
use crate::repos::visits::{self, Visit};

/// A match with its legs and the current leg's derived state.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchSnapshot {
    pub match_record: Match,
    pub legs: Vec<Leg>,
    pub current_leg: Leg,
    pub current_leg_state: LegProjection,
}

/// Match flow service - generic over ConnectionTrait for reads,
/// transactional for writes.
#[derive(Clone)]
pub struct MatchFlowService {
    notifier: SharedNotifier,
}

impl MatchFlowService {
    pub fn new() -> Self {
        Self {
            notifier: null_notifier(),
        }
    }

    pub fn with_notifier(notifier: SharedNotifier) -> Self {
        Self { notifier }
    }

    /// Forfeit an in-progress match; the opponent wins. Forfeiting a
    /// finished match fails cleanly instead of corrupting state.
    pub async fn forfeit_match(
        &self,
        txn: &DatabaseTransaction,
        match_id: i64,
        forfeiter_id: i64,
    ) -> Result<Match, AppError> {
        let match_record = matches::require_match(txn, match_id).await?;

        if !match_record.is_in_progress() {
            return Err(DomainError::validation(
                ValidationKind::MatchOver,
                format!("match {match_id} is not in progress"),
            )
            .into());
        }

        let slot = match_record.slot_of(forfeiter_id).ok_or_else(|| {
            DomainError::validation(
                ValidationKind::Other("NOT_A_PARTICIPANT".into()),
                format!("player {forfeiter_id} is not in match {match_id}"),
            )
        })?;
        let winner_id = match_record.player_in(slot.other());

        let dto = MatchProgress::new(match_record.id, match_record.lock_version)
            .with_status(MatchStatus::Forfeited)
            .with_winner(winner_id);
        let updated = matches::update_progress(txn, dto).await?;

        info!(match_id, forfeiter_id, winner_id, "match forfeited");
        self.notifier
            .row_changed(RowChange::new(ChangedTable::Matches, match_id))
            .await;

        Ok(updated)
    }

    /// Take one bot turn: simulate a visit against the bot's live remaining
    /// score, then record it through the same path as a human visit.
    pub async fn play_bot_visit(
        &self,
        txn: &DatabaseTransaction,
        leg_id: i64,
        bot_player_id: i64,
        thrower: &dyn DartThrower,
    ) -> Result<Visit, AppError> {
        let leg = legs::require_leg(txn, leg_id).await?;
        let match_record = matches::require_match(txn, leg.match_id).await?;
        let slot = match_record.slot_of(bot_player_id).ok_or_else(|| {
            DomainError::validation(
                ValidationKind::Other("NOT_A_PARTICIPANT".into()),
                format!("player {bot_player_id} is not in match {}", leg.match_id),
            )
        })?;

        let all_visits = visits::find_all_by_leg(txn, leg_id).await?;
        let summaries = visit_summaries(&match_record, &all_visits)?;
        let state = project_leg(leg.player1_start_score, leg.player2_start_score, &summaries);

        let darts = thrower.throw_visit(state.remaining_for(slot), match_record.double_out)?;
        self.record_visit(txn, leg_id, bot_player_id, &darts, None).await
    }

    /// Load a match with its legs and the current leg's state recomputed
    /// from the persisted visit history. This is what clients rebuild their
    /// view from on every render or reconnect; nothing here is cached.
    pub async fn load_match_snapshot<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        match_id: i64,
    ) -> Result<MatchSnapshot, AppError> {
        let match_record = matches::require_match(conn, match_id).await?;
        let all_legs = legs::find_all_by_match(conn, match_id).await?;
        let current_leg = all_legs.last().cloned().ok_or_else(|| {
            DomainError::infra(
                InfraErrorKind::DataCorruption,
                format!("match {match_id} has no legs"),
            )
        })?;

        let all_visits = visits::find_all_by_leg(conn, current_leg.id).await?;
        let summaries = visit_summaries(&match_record, &all_visits)?;
        let current_leg_state = project_leg(
            current_leg.player1_start_score,
            current_leg.player2_start_score,
            &summaries,
        );

        Ok(MatchSnapshot {
            match_record,
            legs: all_legs,
            current_leg,
            current_leg_state,
        })
    }
}

impl Default for MatchFlowService {
    fn default() -> Self {
        Self::new()
    }
}

/// Attribute each stored visit to its match slot for projection.
pub(super) fn visit_summaries(
    match_record: &Match,
    all_visits: &[Visit],
) -> Result<Vec<VisitSummary>, AppError> {
    all_visits
        .iter()
        .map(|visit| {
            let slot = match_record.slot_of(visit.player_id).ok_or_else(|| {
                DomainError::infra(
                    InfraErrorKind::DataCorruption,
                    format!(
                        "visit {} belongs to player {} who is not in match {}",
                        visit.id, visit.player_id, match_record.id
                    ),
                )
            })?;
            Ok(VisitSummary {
                slot,
                total_scored: visit.total_scored,
                darts_thrown: visit.darts.len() as u8,
                is_checkout: visit.is_checkout,
            })
        })
        .collect()
}
