//! Test state construction.

use crate::config::db::DbProfile;
use crate::error::AppError;
use crate::infra::state::{build_state, AppState};

/// Build an AppState backed by a fresh in-memory SQLite database with the
/// schema migrated. Each call gets its own isolated store, so tests never
/// share state and need no serialization.
pub async fn test_state() -> Result<AppState, AppError> {
    build_state().with_db(DbProfile::Test).build().await
}
