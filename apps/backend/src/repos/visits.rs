//! Visit repository functions for the domain layer.
//!
//! Visits are append-only. The stored dart columns are reconstructed into
//! validated domain darts on load; a row that fails that reconstruction is
//! reported as data corruption rather than silently reinterpreted.

use sea_orm::{ConnectionTrait, DatabaseTransaction};

use crate::adapters::visits_sea as visits_adapter;
use crate::domain::dart::{Dart, Multiplier};
use crate::entities::visits;
use crate::errors::domain::{DomainError, InfraErrorKind};

/// Visit domain model (one turn of up to three darts).
#[derive(Debug, Clone, PartialEq)]
pub struct Visit {
    pub id: i64,
    pub leg_id: i64,
    pub player_id: i64,
    pub visit_number: i16,
    pub darts: Vec<Dart>,
    pub total_scored: i16,
    pub remaining_before: i16,
    pub remaining_after: i16,
    pub is_bust: bool,
    pub is_checkout: bool,
    pub idempotency_key: Option<String>,
    pub created_at: time::OffsetDateTime,
}

/// Write model for a new visit, carrying validated domain darts.
#[derive(Debug, Clone)]
pub struct VisitWrite {
    pub leg_id: i64,
    pub player_id: i64,
    pub visit_number: i16,
    pub darts: Vec<Dart>,
    pub total_scored: i16,
    pub remaining_before: i16,
    pub remaining_after: i16,
    pub is_bust: bool,
    pub is_checkout: bool,
    pub idempotency_key: Option<String>,
}

// Free functions (generic) mirroring the adapter surface

/// All visits of a leg in recorded order.
pub async fn find_all_by_leg<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    leg_id: i64,
) -> Result<Vec<Visit>, DomainError> {
    let rows = visits_adapter::find_all_by_leg(conn, leg_id).await?;
    rows.into_iter().map(from_model).collect()
}

/// Count visits recorded for a leg.
pub async fn count_by_leg<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    leg_id: i64,
) -> Result<u64, DomainError> {
    let count = visits_adapter::count_by_leg(conn, leg_id).await?;
    Ok(count)
}

/// Look up a visit by its client-generated idempotency key.
pub async fn find_by_idempotency_key<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    key: &str,
) -> Result<Option<Visit>, DomainError> {
    let row = visits_adapter::find_by_idempotency_key(conn, key).await?;
    row.map(from_model).transpose()
}

pub async fn create_visit(
    txn: &DatabaseTransaction,
    write: VisitWrite,
) -> Result<Visit, DomainError> {
    let mut darts = write.darts.iter();
    let dart1 = darts.next().map(pack_dart).ok_or_else(|| {
        DomainError::validation_other("a visit must carry at least one dart")
    })?;

    let dto = visits_adapter::VisitCreate {
        leg_id: write.leg_id,
        player_id: write.player_id,
        visit_number: write.visit_number,
        dart1,
        dart2: darts.next().map(pack_dart),
        dart3: darts.next().map(pack_dart),
        total_scored: write.total_scored,
        remaining_before: write.remaining_before,
        remaining_after: write.remaining_after,
        is_bust: write.is_bust,
        is_checkout: write.is_checkout,
        idempotency_key: write.idempotency_key,
    };

    let row = visits_adapter::create_visit(txn, dto).await?;
    from_model(row)
}

// Conversions between SeaORM models and domain models

fn pack_dart(dart: &Dart) -> (i16, i16) {
    (i16::from(dart.segment()), dart.multiplier().factor())
}

fn unpack_dart(segment: i16, multiplier: i16) -> Result<Dart, DomainError> {
    let multiplier = Multiplier::from_factor(multiplier)?;
    let segment = u8::try_from(segment).map_err(|_| {
        DomainError::infra(
            InfraErrorKind::DataCorruption,
            format!("stored dart segment {segment} out of range"),
        )
    })?;
    Dart::new(segment, multiplier)
}

fn from_model(model: visits::Model) -> Result<Visit, DomainError> {
    let mut darts = vec![unpack_dart(model.dart1_segment, model.dart1_multiplier)?];
    if let (Some(segment), Some(multiplier)) = (model.dart2_segment, model.dart2_multiplier) {
        darts.push(unpack_dart(segment, multiplier)?);
    }
    if let (Some(segment), Some(multiplier)) = (model.dart3_segment, model.dart3_multiplier) {
        darts.push(unpack_dart(segment, multiplier)?);
    }

    Ok(Visit {
        id: model.id,
        leg_id: model.leg_id,
        player_id: model.player_id,
        visit_number: model.visit_number,
        darts,
        total_scored: model.total_scored,
        remaining_before: model.remaining_before,
        remaining_after: model.remaining_after,
        is_bust: model.is_bust,
        is_checkout: model.is_checkout,
        idempotency_key: model.idempotency_key,
        created_at: model.created_at,
    })
}
