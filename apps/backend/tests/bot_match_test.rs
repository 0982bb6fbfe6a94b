//! A complete bot-vs-bot match: the simulator drives the same recording
//! path as human visits, so a full match exercises every state transition.

mod common;

use std::sync::Arc;

use backend::entities::{GameMode, MatchStatus};
use backend::repos::{legs, visits};
use backend::{with_txn, AppError, MatchFlowService, SkillThrower};

#[tokio::test]
async fn bot_match_runs_to_completion() -> Result<(), AppError> {
    let fixture = common::setup_match(GameMode::Mode301, 2, true).await?;
    let state = &fixture.state;
    let match_id = fixture.joined.match_record.id;
    let flow = MatchFlowService::new();

    let host_thrower = Arc::new(SkillThrower::new(90, Some(11)).unwrap());
    let guest_thrower = Arc::new(SkillThrower::new(40, Some(22)).unwrap());

    let mut visits_played = 0u32;
    loop {
        let snapshot = flow.load_match_snapshot(state.db(), match_id).await?;
        if !snapshot.match_record.is_in_progress() {
            break;
        }

        let slot = snapshot
            .current_leg_state
            .next_to_throw
            .expect("in-progress match must have a thrower");
        let player_id = snapshot.match_record.player_in(slot);
        let thrower = if player_id == fixture.host {
            host_thrower.clone()
        } else {
            guest_thrower.clone()
        };

        let svc = flow.clone();
        let leg_id = snapshot.current_leg.id;
        with_txn(state, move |txn| {
            Box::pin(async move {
                svc.play_bot_visit(txn, leg_id, player_id, thrower.as_ref())
                    .await
            })
        })
        .await?;

        visits_played += 1;
        assert!(visits_played < 1_000, "match did not converge");
    }

    let snapshot = flow.load_match_snapshot(state.db(), match_id).await?;
    let record = &snapshot.match_record;
    assert_eq!(record.status, MatchStatus::Completed);

    let winner_id = record.winner_id.expect("completed match has a winner");
    assert!(winner_id == fixture.host || winner_id == fixture.guest);

    // Exactly one side reached legs_to_win; the loser stayed short of it.
    let (winner_legs, loser_legs) = if winner_id == record.player1_id {
        (record.player1_legs_won, record.player2_legs_won)
    } else {
        (record.player2_legs_won, record.player1_legs_won)
    };
    assert_eq!(winner_legs, record.legs_to_win);
    assert!(loser_legs < record.legs_to_win);

    // Every persisted visit obeys the scoring invariants, and every decided
    // leg ends on a checkout that hits exactly zero.
    let all_legs = legs::find_all_by_match(state.db(), match_id).await?;
    assert_eq!(all_legs.len() as i16, winner_legs + loser_legs);
    for leg in &all_legs {
        let leg_visits = visits::find_all_by_leg(state.db(), leg.id).await?;
        assert!(!leg_visits.is_empty());

        for visit in &leg_visits {
            if visit.is_bust {
                assert_eq!(visit.total_scored, 0);
                assert_eq!(visit.remaining_after, visit.remaining_before);
            } else {
                assert_eq!(
                    visit.remaining_after,
                    visit.remaining_before - visit.total_scored
                );
            }
        }

        assert!(leg.winner_id.is_some());
        let last = leg_visits.last().unwrap();
        assert!(last.is_checkout);
        assert_eq!(last.remaining_after, 0);
        assert_eq!(Some(last.player_id), leg.winner_id);
    }
    Ok(())
}
