//! Transaction scope for engine operations.

use futures::future::BoxFuture;
use sea_orm::TransactionTrait;

use crate::error::AppError;
use crate::infra::state::AppState;

/// Execute a closure within a database transaction.
///
/// Begins a transaction, runs the closure, commits on Ok and performs a
/// best-effort rollback on Err (the original error is preserved). Callers
/// box the future:
///
/// ```ignore
/// with_txn(&state, |txn| Box::pin(async move { ... })).await
/// ```
pub async fn with_txn<R, F>(state: &AppState, f: F) -> Result<R, AppError>
where
    F: for<'t> FnOnce(&'t sea_orm::DatabaseTransaction) -> BoxFuture<'t, Result<R, AppError>>,
{
    let txn = state.db().begin().await?;
    let out = f(&txn).await;

    match out {
        Ok(val) => {
            txn.commit().await?;
            Ok(val)
        }
        Err(err) => {
            // Best-effort rollback; preserve original error
            let _ = txn.rollback().await;
            Err(err)
        }
    }
}
