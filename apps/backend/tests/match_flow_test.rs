//! Integration tests for the scoring state machine: turn order, busts,
//! checkouts, leg/match progression, idempotent retries, and forfeits.

mod common;

use backend::entities::{GameMode, MatchStatus};
use backend::repos::{legs, matches, visits};
use backend::{with_txn, AppError, ErrorCode, MatchFlowService, PlayerSlot};
use common::{d, junk_visit, record, s, t, t20};
use uuid::Uuid;

#[tokio::test]
async fn full_match_501_best_of_three() -> Result<(), AppError> {
    let fixture = common::setup_match(GameMode::Mode501, 2, true).await?;
    let state = &fixture.state;
    let match_id = fixture.joined.match_record.id;
    let flow = MatchFlowService::new();

    // Host takes a leg: 180, 180, 101, then D20 from 40. Guest fills with
    // junk in between.
    let mut leg_id = fixture.joined.opening_leg.id;
    for leg_round in 0..2 {
        let visit = record(state, leg_id, fixture.host, vec![t20(), t20(), t20()], None).await?;
        assert_eq!(visit.remaining_after, 321);

        record(state, leg_id, fixture.guest, junk_visit(), None).await?;

        let visit = record(state, leg_id, fixture.host, vec![t20(), t20(), t20()], None).await?;
        assert_eq!(visit.remaining_after, 141);

        record(state, leg_id, fixture.guest, junk_visit(), None).await?;

        let visit = record(state, leg_id, fixture.host, vec![t20(), t(13), s(2)], None).await?;
        assert_eq!(visit.remaining_after, 40);

        record(state, leg_id, fixture.guest, junk_visit(), None).await?;

        let visit = record(state, leg_id, fixture.host, vec![d(20)], None).await?;
        assert!(visit.is_checkout);
        assert_eq!(visit.remaining_after, 0);
        assert_eq!(visit.darts.len(), 1);

        // Turn parity within the finished leg: visit k (0-indexed) belongs
        // to player1 iff k is even.
        let leg_visits = visits::find_all_by_leg(state.db(), leg_id).await?;
        for (k, visit) in leg_visits.iter().enumerate() {
            let expected = if k % 2 == 0 {
                fixture.host
            } else {
                fixture.guest
            };
            assert_eq!(visit.player_id, expected, "visit {k}");
        }

        let leg = legs::require_leg(state.db(), leg_id).await?;
        assert_eq!(leg.winner_id, Some(fixture.host));
        assert!(leg.completed_at.is_some());

        let match_record = matches::require_match(state.db(), match_id).await?;
        assert_eq!(match_record.player1_legs_won, (leg_round + 1) as i16);
        assert_eq!(match_record.player2_legs_won, 0);

        if leg_round == 0 {
            // Fresh leg, fresh 501s, player1 to throw first again.
            assert!(match_record.is_in_progress());
            assert_eq!(match_record.current_leg_number, 2);

            let snapshot = flow.load_match_snapshot(state.db(), match_id).await?;
            leg_id = snapshot.current_leg.id;
            assert_eq!(snapshot.current_leg.leg_number, 2);
            assert_eq!(snapshot.current_leg_state.player1_remaining, 501);
            assert_eq!(snapshot.current_leg_state.player2_remaining, 501);
            assert_eq!(
                snapshot.current_leg_state.next_to_throw,
                Some(PlayerSlot::One)
            );
        } else {
            assert_eq!(match_record.status, MatchStatus::Completed);
            assert_eq!(match_record.winner_id, Some(fixture.host));
        }
    }

    // A finished match accepts no further visits.
    let err = record(state, leg_id, fixture.host, junk_visit(), None)
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::MatchOver);
    Ok(())
}

#[tokio::test]
async fn out_of_turn_submission_is_rejected() -> Result<(), AppError> {
    let fixture = common::setup_match(GameMode::Mode501, 1, true).await?;
    let state = &fixture.state;
    let leg_id = fixture.joined.opening_leg.id;

    // Player1 throws first; a guest submission is rejected outright.
    let err = record(state, leg_id, fixture.guest, junk_visit(), None)
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::NotYourTurn);

    // After player1's visit the guest may throw, but player1 may not repeat.
    record(state, leg_id, fixture.host, junk_visit(), None).await?;
    let err = record(state, leg_id, fixture.host, junk_visit(), None)
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::NotYourTurn);
    record(state, leg_id, fixture.guest, junk_visit(), None).await?;

    // The rejected submission left no trace.
    let all = visits::find_all_by_leg(state.db(), leg_id).await?;
    assert_eq!(all.len(), 2);
    Ok(())
}

#[tokio::test]
async fn landing_on_one_busts_whole_visit() -> Result<(), AppError> {
    let fixture = common::setup_match(GameMode::Mode301, 1, true).await?;
    let state = &fixture.state;
    let leg_id = fixture.joined.opening_leg.id;

    // 301 -> 121.
    record(state, leg_id, fixture.host, vec![t20(), t20(), t20()], None).await?;
    record(state, leg_id, fixture.guest, junk_visit(), None).await?;

    // 121 - 120 = 1: bust on the second dart; the third is never recorded.
    let visit = record(
        state,
        leg_id,
        fixture.host,
        vec![t20(), t20(), s(5)],
        None,
    )
    .await?;
    assert!(visit.is_bust);
    assert!(!visit.is_checkout);
    assert_eq!(visit.total_scored, 0);
    assert_eq!(visit.remaining_before, 121);
    assert_eq!(visit.remaining_after, 121);
    assert_eq!(visit.darts.len(), 2);

    // The bust consumed the turn.
    let snapshot = MatchFlowService::new()
        .load_match_snapshot(state.db(), fixture.joined.match_record.id)
        .await?;
    assert_eq!(snapshot.current_leg_state.player1_remaining, 121);
    assert_eq!(
        snapshot.current_leg_state.next_to_throw,
        Some(PlayerSlot::Two)
    );
    Ok(())
}

#[tokio::test]
async fn double_out_checkout_requires_double() -> Result<(), AppError> {
    let fixture = common::setup_match(GameMode::Mode301, 1, true).await?;
    let state = &fixture.state;
    let leg_id = fixture.joined.opening_leg.id;

    // 301 -> 40.
    record(state, leg_id, fixture.host, vec![t20(), t20(), t20()], None).await?;
    record(state, leg_id, fixture.guest, junk_visit(), None).await?;
    record(state, leg_id, fixture.host, vec![t20(), s(20), s(1)], None).await?;
    record(state, leg_id, fixture.guest, junk_visit(), None).await?;

    // Reaching zero without a double busts.
    let visit = record(state, leg_id, fixture.host, vec![s(20), s(20)], None).await?;
    assert!(visit.is_bust);
    assert_eq!(visit.remaining_after, 40);

    record(state, leg_id, fixture.guest, junk_visit(), None).await?;

    // D20 finishes the leg and the single-leg match.
    let visit = record(state, leg_id, fixture.host, vec![d(20)], None).await?;
    assert!(visit.is_checkout);

    let match_record = matches::require_match(state.db(), fixture.joined.match_record.id).await?;
    assert_eq!(match_record.status, MatchStatus::Completed);
    assert_eq!(match_record.winner_id, Some(fixture.host));

    // The completed leg rejects any further visit.
    let err = record(state, leg_id, fixture.guest, junk_visit(), None)
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::MatchOver);
    Ok(())
}

#[tokio::test]
async fn straight_out_finishes_without_double() -> Result<(), AppError> {
    let fixture = common::setup_match(GameMode::Mode301, 1, false).await?;
    let state = &fixture.state;
    let leg_id = fixture.joined.opening_leg.id;

    record(state, leg_id, fixture.host, vec![t20(), t20(), t20()], None).await?;
    record(state, leg_id, fixture.guest, junk_visit(), None).await?;
    // 121 left: T19, T20, then a plain single 4 finishes without a double.
    let visit = record(
        state,
        leg_id,
        fixture.host,
        vec![t(19), t20(), s(4)],
        None,
    )
    .await?;
    assert!(visit.is_checkout);
    assert_eq!(visit.remaining_after, 0);
    Ok(())
}

#[tokio::test]
async fn idempotency_key_replays_instead_of_double_scoring() -> Result<(), AppError> {
    let fixture = common::setup_match(GameMode::Mode501, 1, true).await?;
    let state = &fixture.state;
    let leg_id = fixture.joined.opening_leg.id;
    let key = Uuid::new_v4();

    let first = record(
        state,
        leg_id,
        fixture.host,
        vec![t20(), t20(), t20()],
        Some(key),
    )
    .await?;

    // A retry after an ambiguous failure resubmits the same key and gets
    // the originally recorded visit back.
    let replay = record(
        state,
        leg_id,
        fixture.host,
        vec![t20(), t20(), t20()],
        Some(key),
    )
    .await?;
    assert_eq!(first.id, replay.id);

    let all = visits::find_all_by_leg(state.db(), leg_id).await?;
    assert_eq!(all.len(), 1);

    let snapshot = MatchFlowService::new()
        .load_match_snapshot(state.db(), fixture.joined.match_record.id)
        .await?;
    assert_eq!(snapshot.current_leg_state.player1_remaining, 321);

    // The same key from the other player is a conflict, not a replay.
    let err = record(state, leg_id, fixture.guest, junk_visit(), Some(key))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::Conflict);
    Ok(())
}

#[tokio::test]
async fn forfeit_awards_the_opponent() -> Result<(), AppError> {
    let fixture = common::setup_match(GameMode::Mode501, 3, true).await?;
    let state = &fixture.state;
    let match_id = fixture.joined.match_record.id;
    let flow = MatchFlowService::new();

    // Mid-leg forfeit is allowed in any in-progress state.
    record(
        state,
        fixture.joined.opening_leg.id,
        fixture.host,
        junk_visit(),
        None,
    )
    .await?;

    let guest = fixture.guest;
    let svc = flow.clone();
    let updated = with_txn(state, move |txn| {
        Box::pin(async move { svc.forfeit_match(txn, match_id, guest).await })
    })
    .await?;
    assert_eq!(updated.status, MatchStatus::Forfeited);
    assert_eq!(updated.winner_id, Some(fixture.host));

    // Forfeiting a decided match fails cleanly.
    let host = fixture.host;
    let svc = flow.clone();
    let err = with_txn(state, move |txn| {
        Box::pin(async move { svc.forfeit_match(txn, match_id, host).await })
    })
    .await
    .unwrap_err();
    assert_eq!(err.code(), ErrorCode::MatchOver);
    Ok(())
}

#[tokio::test]
async fn malformed_darts_are_rejected_before_any_write() -> Result<(), AppError> {
    let fixture = common::setup_match(GameMode::Mode501, 1, true).await?;
    let state = &fixture.state;
    let leg_id = fixture.joined.opening_leg.id;

    let err = record(state, leg_id, fixture.host, vec![], None)
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidDart);

    let err = record(
        state,
        leg_id,
        fixture.host,
        vec![s(1), s(1), s(1), s(1)],
        None,
    )
    .await
    .unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidDart);

    let all = visits::find_all_by_leg(state.db(), leg_id).await?;
    assert!(all.is_empty());
    Ok(())
}
