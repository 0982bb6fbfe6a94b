//! Change-notification half of the persistence port.
//!
//! The engine persists rows and tells the notifier which rows changed;
//! delivering those events to interested clients (with at-least-once
//! semantics, filtered by record id) is an external collaborator's job.
//! A notification may occasionally precede a rollback; subscribers treat
//! events as "refetch this row", never as state themselves.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

/// Tables whose row changes clients can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangedTable {
    Lobbies,
    Matches,
    Legs,
    Visits,
}

/// A single row-change event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowChange {
    pub table: ChangedTable,
    pub row_id: i64,
}

impl RowChange {
    pub fn new(table: ChangedTable, row_id: i64) -> Self {
        Self { table, row_id }
    }
}

#[async_trait]
pub trait ChangeNotifier: Send + Sync {
    async fn row_changed(&self, change: RowChange);
}

/// Notifier that drops every event; the default for tests and embedders
/// that poll.
#[derive(Debug, Default)]
pub struct NullNotifier;

#[async_trait]
impl ChangeNotifier for NullNotifier {
    async fn row_changed(&self, _change: RowChange) {}
}

/// Notifier that logs events; useful for the demo binary and debugging.
#[derive(Debug, Default)]
pub struct LogNotifier;

#[async_trait]
impl ChangeNotifier for LogNotifier {
    async fn row_changed(&self, change: RowChange) {
        debug!(table = ?change.table, row_id = change.row_id, "row changed");
    }
}

/// Shared handle type services hold.
pub type SharedNotifier = Arc<dyn ChangeNotifier>;

/// The default no-op notifier handle.
pub fn null_notifier() -> SharedNotifier {
    Arc::new(NullNotifier)
}
