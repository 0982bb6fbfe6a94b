//! Leg repository functions for the domain layer.

use sea_orm::{ConnectionTrait, DatabaseTransaction};

use crate::adapters::legs_sea as legs_adapter;
use crate::entities::legs;
use crate::errors::domain::DomainError;

pub use legs_adapter::LegCreate;

/// Leg domain model, converted from the database model when loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct Leg {
    pub id: i64,
    pub match_id: i64,
    pub leg_number: i16,
    pub player1_start_score: i16,
    pub player2_start_score: i16,
    pub winner_id: Option<i64>,
    pub created_at: time::OffsetDateTime,
    pub completed_at: Option<time::OffsetDateTime>,
}

impl Leg {
    /// A leg is immutable once a winner is recorded.
    pub fn is_complete(&self) -> bool {
        self.winner_id.is_some()
    }
}

// Free functions (generic) mirroring the adapter surface

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    leg_id: i64,
) -> Result<Option<Leg>, DomainError> {
    let leg = legs_adapter::find_by_id(conn, leg_id).await?;
    Ok(leg.map(Leg::from))
}

/// Find leg by ID or return a domain-level not-found error.
pub async fn require_leg<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    leg_id: i64,
) -> Result<Leg, DomainError> {
    let leg = legs_adapter::require_leg(conn, leg_id).await?;
    Ok(Leg::from(leg))
}

/// All legs of a match in playing order.
pub async fn find_all_by_match<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<Vec<Leg>, DomainError> {
    let legs = legs_adapter::find_all_by_match(conn, match_id).await?;
    Ok(legs.into_iter().map(Leg::from).collect())
}

/// The highest-numbered (current) leg of a match.
pub async fn find_current_leg<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<Option<Leg>, DomainError> {
    let leg = legs_adapter::find_current_leg(conn, match_id).await?;
    Ok(leg.map(Leg::from))
}

pub async fn create_leg(txn: &DatabaseTransaction, dto: LegCreate) -> Result<Leg, DomainError> {
    let leg = legs_adapter::create_leg(txn, dto).await?;
    Ok(Leg::from(leg))
}

/// Stamp the leg winner; returns rows affected (zero when the leg already
/// had a winner).
pub async fn complete_leg(
    txn: &DatabaseTransaction,
    leg_id: i64,
    winner_id: i64,
) -> Result<u64, DomainError> {
    let rows = legs_adapter::complete_leg(txn, leg_id, winner_id).await?;
    Ok(rows)
}

// Conversions between SeaORM models and domain models

impl From<legs::Model> for Leg {
    fn from(model: legs::Model) -> Self {
        Self {
            id: model.id,
            match_id: model.match_id,
            leg_number: model.leg_number,
            player1_start_score: model.player1_start_score,
            player2_start_score: model.player2_start_score,
            winner_id: model.winner_id,
            created_at: model.created_at,
            completed_at: model.completed_at,
        }
    }
}
