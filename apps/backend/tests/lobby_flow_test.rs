//! Integration tests for the lobby lifecycle: create, list, join, cancel,
//! and the exactly-once join guarantee.

mod common;

use backend::entities::{GameMode, LobbyStatus};
use backend::test_support::state_builder::test_state;
use backend::{with_txn, AppError, ErrorCode, LobbyService};
use backend_test_support::unique_helpers::{unique_player_id, unique_player_pair};

#[tokio::test]
async fn create_lobby_persists_open_lobby() -> Result<(), AppError> {
    let state = test_state().await?;
    let host = unique_player_id();
    let service = LobbyService::new();

    let svc = service.clone();
    let lobby = with_txn(&state, move |txn| {
        Box::pin(async move { svc.create_lobby(txn, host, GameMode::Mode501, 3, true).await })
    })
    .await?;

    assert_eq!(lobby.host_player_id, host);
    assert_eq!(lobby.guest_player_id, None);
    assert_eq!(lobby.status, LobbyStatus::Open);
    assert_eq!(lobby.legs_to_win, 3);
    assert!(lobby.double_out);
    Ok(())
}

#[tokio::test]
async fn create_lobby_rejects_bad_config() -> Result<(), AppError> {
    let state = test_state().await?;
    let host = unique_player_id();
    let service = LobbyService::new();

    let svc = service.clone();
    let err = with_txn(&state, move |txn| {
        Box::pin(async move { svc.create_lobby(txn, host, GameMode::Mode301, 0, true).await })
    })
    .await
    .unwrap_err();

    assert_eq!(err.code(), ErrorCode::InvalidConfig);
    Ok(())
}

#[tokio::test]
async fn list_open_lobbies_excludes_caller_and_consumed() -> Result<(), AppError> {
    let state = test_state().await?;
    let (host_a, host_b) = unique_player_pair();
    let service = LobbyService::new();

    for host in [host_a, host_b] {
        let svc = service.clone();
        with_txn(&state, move |txn| {
            Box::pin(async move { svc.create_lobby(txn, host, GameMode::Mode501, 1, true).await })
        })
        .await?;
    }

    // "Available to join" view for host_a: only host_b's lobby.
    let available = service.list_open_lobbies(state.db(), Some(host_a)).await?;
    assert_eq!(available.len(), 1);
    assert_eq!(available[0].host_player_id, host_b);

    // Unfiltered view ("my lobby" is the same query without the filter).
    let all_open = service.list_open_lobbies(state.db(), None).await?;
    assert_eq!(all_open.len(), 2);

    // A joined lobby leaves the open list.
    let guest = unique_player_id();
    let svc = service.clone();
    let lobby_id = available[0].id;
    with_txn(&state, move |txn| {
        Box::pin(async move { svc.join_lobby(txn, lobby_id, guest).await })
    })
    .await?;

    let all_open = service.list_open_lobbies(state.db(), None).await?;
    assert_eq!(all_open.len(), 1);
    assert_eq!(all_open[0].host_player_id, host_a);
    Ok(())
}

#[tokio::test]
async fn join_lobby_creates_match_and_opening_leg() -> Result<(), AppError> {
    let fixture = common::setup_match(GameMode::Mode501, 2, true).await?;

    let record = &fixture.joined.match_record;
    assert_eq!(record.player1_id, fixture.host);
    assert_eq!(record.player2_id, fixture.guest);
    assert_eq!(record.legs_to_win, 2);
    assert!(record.is_in_progress());
    assert_eq!(record.player1_legs_won, 0);
    assert_eq!(record.player2_legs_won, 0);
    assert_eq!(record.current_leg_number, 1);

    let leg = &fixture.joined.opening_leg;
    assert_eq!(leg.match_id, record.id);
    assert_eq!(leg.leg_number, 1);
    assert_eq!(leg.player1_start_score, 501);
    assert_eq!(leg.player2_start_score, 501);
    assert_eq!(leg.winner_id, None);
    Ok(())
}

#[tokio::test]
async fn self_join_is_rejected() -> Result<(), AppError> {
    let state = test_state().await?;
    let host = unique_player_id();
    let service = LobbyService::new();

    let svc = service.clone();
    let lobby = with_txn(&state, move |txn| {
        Box::pin(async move { svc.create_lobby(txn, host, GameMode::Mode501, 1, true).await })
    })
    .await?;

    let svc = service.clone();
    let lobby_id = lobby.id;
    let err = with_txn(&state, move |txn| {
        Box::pin(async move { svc.join_lobby(txn, lobby_id, host).await })
    })
    .await
    .unwrap_err();

    assert_eq!(err.code(), ErrorCode::InvalidJoin);
    Ok(())
}

#[tokio::test]
async fn second_join_gets_lobby_taken() -> Result<(), AppError> {
    let state = test_state().await?;
    let host = unique_player_id();
    let (guest_a, guest_b) = unique_player_pair();
    let service = LobbyService::new();

    let svc = service.clone();
    let lobby = with_txn(&state, move |txn| {
        Box::pin(async move { svc.create_lobby(txn, host, GameMode::Mode301, 1, false).await })
    })
    .await?;
    let lobby_id = lobby.id;

    let svc = service.clone();
    let joined = with_txn(&state, move |txn| {
        Box::pin(async move { svc.join_lobby(txn, lobby_id, guest_a).await })
    })
    .await?;
    assert_eq!(joined.match_record.player2_id, guest_a);

    let svc = service.clone();
    let err = with_txn(&state, move |txn| {
        Box::pin(async move { svc.join_lobby(txn, lobby_id, guest_b).await })
    })
    .await
    .unwrap_err();
    assert_eq!(err.code(), ErrorCode::LobbyTaken);
    Ok(())
}

#[tokio::test]
async fn concurrent_joins_admit_exactly_one_guest() -> Result<(), AppError> {
    let state = test_state().await?;
    let host = unique_player_id();
    let (guest_a, guest_b) = unique_player_pair();
    let service = LobbyService::new();

    let svc = service.clone();
    let lobby = with_txn(&state, move |txn| {
        Box::pin(async move { svc.create_lobby(txn, host, GameMode::Mode501, 1, true).await })
    })
    .await?;
    let lobby_id = lobby.id;

    let join = |guest_id: i64| {
        let svc = service.clone();
        let state = state.clone();
        async move {
            with_txn(&state, move |txn| {
                Box::pin(async move { svc.join_lobby(txn, lobby_id, guest_id).await })
            })
            .await
        }
    };

    let (result_a, result_b) = tokio::join!(join(guest_a), join(guest_b));

    let (winner, loser) = match (&result_a, &result_b) {
        (Ok(_), Err(_)) => (result_a.as_ref().unwrap(), result_b.unwrap_err()),
        (Err(_), Ok(_)) => (result_b.as_ref().unwrap(), result_a.unwrap_err()),
        (Ok(_), Ok(_)) => panic!("both guests joined the same lobby"),
        (Err(_), Err(_)) => panic!("neither guest joined the lobby"),
    };

    assert_eq!(loser.code(), ErrorCode::LobbyTaken);
    assert!(
        winner.match_record.player2_id == guest_a || winner.match_record.player2_id == guest_b
    );
    Ok(())
}

#[tokio::test]
async fn cancel_is_host_only_and_idempotent() -> Result<(), AppError> {
    let state = test_state().await?;
    let (host, stranger) = unique_player_pair();
    let service = LobbyService::new();

    let svc = service.clone();
    let lobby = with_txn(&state, move |txn| {
        Box::pin(async move { svc.create_lobby(txn, host, GameMode::Mode501, 1, true).await })
    })
    .await?;
    let lobby_id = lobby.id;

    let svc = service.clone();
    let err = with_txn(&state, move |txn| {
        Box::pin(async move { svc.cancel_lobby(txn, lobby_id, stranger).await })
    })
    .await
    .unwrap_err();
    assert_eq!(err.code(), ErrorCode::NotHost);

    // Host cancels; repeating the cancel is a no-op success.
    for _ in 0..2 {
        let svc = service.clone();
        with_txn(&state, move |txn| {
            Box::pin(async move { svc.cancel_lobby(txn, lobby_id, host).await })
        })
        .await?;
    }

    let open = service.list_open_lobbies(state.db(), None).await?;
    assert!(open.is_empty());
    Ok(())
}

#[tokio::test]
async fn cancel_of_matched_lobby_fails_cleanly() -> Result<(), AppError> {
    let fixture = common::setup_match(GameMode::Mode501, 1, true).await?;
    let service = LobbyService::new();

    let open = service.list_open_lobbies(fixture.state.db(), None).await?;
    assert!(open.is_empty());

    let host = fixture.host;
    let lobby_id = fixture.lobby_id;
    let err = {
        let svc = service.clone();
        let state = fixture.state.clone();
        with_txn(&state, move |txn| {
            Box::pin(async move { svc.cancel_lobby(txn, lobby_id, host).await })
        })
        .await
        .unwrap_err()
    };
    assert_eq!(err.code(), ErrorCode::AlreadyMatched);

    // The guest binding survives untouched.
    let lobby = backend::repos::lobbies::require_lobby(fixture.state.db(), lobby_id).await?;
    assert_eq!(lobby.status, LobbyStatus::Matched);
    assert_eq!(lobby.guest_player_id, Some(fixture.guest));
    Ok(())
}
