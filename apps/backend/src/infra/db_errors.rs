//! SeaORM -> DomainError translation helpers.
//!
//! Adapters return `sea_orm::DbErr`; the repos layer converts to
//! `crate::errors::domain::DomainError` through the `From` impl below, and
//! higher layers map `DomainError` to `AppError`.

use tracing::{error, warn};

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};

fn mentions_sqlstate(msg: &str, code: &str) -> bool {
    msg.contains(code) || msg.contains(&format!("SQLSTATE({code})"))
}

/// Map a RecordNotFound message produced by our adapters to the entity kind.
fn not_found_kind(msg: &str) -> NotFoundKind {
    if msg.starts_with("Lobby") {
        NotFoundKind::Lobby
    } else if msg.starts_with("Match") {
        NotFoundKind::Match
    } else if msg.starts_with("Leg") {
        NotFoundKind::Leg
    } else if msg.starts_with("Visit") {
        NotFoundKind::Visit
    } else {
        NotFoundKind::Other("Record".into())
    }
}

/// Translate a `DbErr` into a `DomainError` with sanitized detail.
pub fn map_db_err(e: sea_orm::DbErr) -> DomainError {
    let error_msg = e.to_string();

    match &e {
        sea_orm::DbErr::RecordNotFound(msg) => {
            return DomainError::not_found(not_found_kind(msg), msg.clone());
        }
        sea_orm::DbErr::Custom(msg) if msg.starts_with("OPTIMISTIC_LOCK:") => {
            // Try to parse structured version info
            if let Some(json_str) = msg.strip_prefix("OPTIMISTIC_LOCK:") {
                #[derive(serde::Deserialize)]
                struct LockInfo {
                    expected: i32,
                    actual: i32,
                }

                if let Ok(info) = serde_json::from_str::<LockInfo>(json_str) {
                    warn!(
                        expected = info.expected,
                        actual = info.actual,
                        "optimistic lock conflict detected"
                    );
                    return DomainError::conflict(
                        ConflictKind::OptimisticLock,
                        format!(
                            "Match was modified concurrently (expected version {}, actual version {}). Refresh and retry.",
                            info.expected, info.actual
                        ),
                    );
                }
            }

            warn!("optimistic lock conflict detected (version info unavailable)");
            return DomainError::conflict(
                ConflictKind::OptimisticLock,
                "Match was modified by another transaction; refresh and retry",
            );
        }
        sea_orm::DbErr::ConnectionAcquire(_) | sea_orm::DbErr::Conn(_) => {
            warn!(raw_error = %error_msg, "database unavailable");
            return DomainError::infra(InfraErrorKind::DbUnavailable, "Database unavailable");
        }
        _ => {}
    }

    if mentions_sqlstate(&error_msg, "23505")
        || error_msg.contains("duplicate key value violates unique constraint")
        || error_msg.contains("UNIQUE constraint failed")
    {
        warn!(raw_error = %error_msg, "unique constraint violation");

        if error_msg.contains("visits.idempotency_key")
            || error_msg.contains("uq_visits_idempotency_key")
        {
            return DomainError::conflict(
                ConflictKind::Other("DuplicateIdempotencyKey".into()),
                "A visit with this idempotency key was recorded concurrently",
            );
        }
        if error_msg.contains("uq_visits_leg_visit_number")
            || error_msg.contains("visits.leg_id")
        {
            // Two submissions raced to the same turn; the loser retries
            // after refreshing state.
            return DomainError::conflict(
                ConflictKind::Other("VisitNumberTaken".into()),
                "A visit for this turn was recorded concurrently; refresh and retry",
            );
        }

        return DomainError::conflict(
            ConflictKind::Other("Unique".into()),
            "Unique constraint violation",
        );
    }

    if mentions_sqlstate(&error_msg, "23503")
        || error_msg.contains("FOREIGN KEY constraint failed")
    {
        warn!(raw_error = %error_msg, "foreign key constraint violation");
        return DomainError::validation_other("Foreign key constraint violation");
    }

    if error_msg.contains("timeout")
        || error_msg.contains("pool")
        || error_msg.contains("unavailable")
    {
        warn!(raw_error = %error_msg, "database timeout or pool issue");
        return DomainError::infra(InfraErrorKind::Timeout, "Database timeout");
    }

    error!(raw_error = %error_msg, "unhandled database error");
    DomainError::infra(
        InfraErrorKind::Other("DbErr".into()),
        "Database operation failed",
    )
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        map_db_err(e)
    }
}
