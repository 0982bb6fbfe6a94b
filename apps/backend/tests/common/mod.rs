//! Shared setup for integration tests.

#![allow(dead_code)] // not every test file uses every helper

use backend::entities::GameMode;
use backend::repos::visits::Visit;
use backend::test_support::state_builder::test_state;
use backend::{
    with_txn, AppError, AppState, Dart, JoinedMatch, LobbyService, MatchFlowService,
};
use backend_test_support::unique_helpers::unique_player_pair;
use uuid::Uuid;

#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

/// A freshly matched game: isolated state, both player ids, the consumed
/// lobby, and the match with its opening leg.
pub struct MatchFixture {
    pub state: AppState,
    pub host: i64,
    pub guest: i64,
    pub lobby_id: i64,
    pub joined: JoinedMatch,
}

/// Create a state, open a lobby, and join it.
pub async fn setup_match(
    game_mode: GameMode,
    legs_to_win: i16,
    double_out: bool,
) -> Result<MatchFixture, AppError> {
    let state = test_state().await?;
    let (host, guest) = unique_player_pair();
    let service = LobbyService::new();

    let svc = service.clone();
    let lobby = with_txn(&state, move |txn| {
        Box::pin(async move {
            svc.create_lobby(txn, host, game_mode, legs_to_win, double_out)
                .await
        })
    })
    .await?;

    let svc = service.clone();
    let lobby_id = lobby.id;
    let joined = with_txn(&state, move |txn| {
        Box::pin(async move { svc.join_lobby(txn, lobby_id, guest).await })
    })
    .await?;

    Ok(MatchFixture {
        state,
        host,
        guest,
        lobby_id,
        joined,
    })
}

/// Record one visit inside its own transaction.
pub async fn record(
    state: &AppState,
    leg_id: i64,
    player_id: i64,
    darts: Vec<Dart>,
    idempotency_key: Option<Uuid>,
) -> Result<Visit, AppError> {
    let flow = MatchFlowService::new();
    with_txn(state, move |txn| {
        Box::pin(async move {
            flow.record_visit(txn, leg_id, player_id, &darts, idempotency_key)
                .await
        })
    })
    .await
}

// Dart shorthands

pub fn t20() -> Dart {
    Dart::treble(20).unwrap()
}

pub fn t(segment: u8) -> Dart {
    Dart::treble(segment).unwrap()
}

pub fn d(segment: u8) -> Dart {
    Dart::double(segment).unwrap()
}

pub fn s(segment: u8) -> Dart {
    Dart::single(segment).unwrap()
}

/// A low-scoring filler visit (3 points).
pub fn junk_visit() -> Vec<Dart> {
    vec![s(1), s(1), s(1)]
}
