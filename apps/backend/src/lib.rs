#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod adapters;
pub mod ai;
pub mod config;
pub mod db;
pub mod domain;
pub mod entities;
pub mod error;
pub mod errors;
pub mod infra;
pub mod repos;
pub mod services;
pub mod telemetry;
pub mod test_support;

// Re-exports for public API
pub use ai::{DartThrower, SkillThrower};
pub use config::db::DbProfile;
pub use db::txn::with_txn;
pub use domain::checkout::suggest;
pub use domain::{Dart, Multiplier, PlayerSlot};
pub use entities::{GameMode, LobbyStatus, MatchStatus};
pub use error::AppError;
pub use errors::ErrorCode;
pub use infra::notify::{ChangeNotifier, ChangedTable, RowChange};
pub use infra::state::{build_state, AppState};
pub use services::lobbies::{JoinedMatch, LobbyService};
pub use services::match_flow::{MatchFlowService, MatchSnapshot};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    backend_test_support::logging::init();
}
