//! darts-sim: drive a complete bot-vs-bot match through the engine.
//!
//! Connects to DATABASE_URL (default: in-memory SQLite), opens a lobby,
//! joins it, and lets two simulated players throw until the match is
//! decided. Useful as a smoke test of the whole stack and as an example of
//! embedding the engine.

use std::str::FromStr;
use std::sync::Arc;

use backend::config::db::TEST_DB_URL;
use backend::entities::GameMode;
use backend::infra::notify::LogNotifier;
use backend::{build_state, with_txn, AppError, LobbyService, MatchFlowService, SkillThrower};
use tracing::info;

const HOST_PLAYER: i64 = 1;
const GUEST_PLAYER: i64 = 2;

/// Hard cap on simulated visits; a match that runs this long is a bug.
const MAX_VISITS: u32 = 1_000;

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

async fn run() -> Result<(), AppError> {
    let url = std::env::var("DATABASE_URL").unwrap_or_else(|_| TEST_DB_URL.to_string());
    let state = build_state()
        .with_db_url(url)
        .with_notifier(Arc::new(LogNotifier))
        .build()
        .await?;

    let legs_to_win: i16 = env_or("DARTS_SIM_LEGS_TO_WIN", 2);
    let host_skill: u8 = env_or("DARTS_SIM_HOST_SKILL", 85);
    let guest_skill: u8 = env_or("DARTS_SIM_GUEST_SKILL", 60);
    let seed: Option<u64> = std::env::var("DARTS_SIM_SEED")
        .ok()
        .and_then(|value| value.parse().ok());

    let lobbies = LobbyService::with_notifier(state.notifier());
    let flow = MatchFlowService::with_notifier(state.notifier());

    let svc = lobbies.clone();
    let lobby = with_txn(&state, move |txn| {
        Box::pin(async move {
            svc.create_lobby(txn, HOST_PLAYER, GameMode::Mode501, legs_to_win, true)
                .await
        })
    })
    .await?;

    let svc = lobbies.clone();
    let lobby_id = lobby.id;
    let joined = with_txn(&state, move |txn| {
        Box::pin(async move { svc.join_lobby(txn, lobby_id, GUEST_PLAYER).await })
    })
    .await?;

    let match_id = joined.match_record.id;
    info!(match_id, host_skill, guest_skill, legs_to_win, "simulated match started");

    let host_thrower = Arc::new(SkillThrower::new(host_skill, seed)?);
    let guest_thrower = Arc::new(SkillThrower::new(
        guest_skill,
        seed.map(|s| s.wrapping_mul(0x9e37_79b9_7f4a_7c15)),
    )?);

    let mut visits_played = 0u32;
    loop {
        let snapshot = flow.load_match_snapshot(state.db(), match_id).await?;
        if !snapshot.match_record.is_in_progress() {
            info!(
                match_id,
                status = ?snapshot.match_record.status,
                winner_id = snapshot.match_record.winner_id,
                player1_legs = snapshot.match_record.player1_legs_won,
                player2_legs = snapshot.match_record.player2_legs_won,
                visits_played,
                "simulated match finished"
            );
            return Ok(());
        }

        let slot = snapshot
            .current_leg_state
            .next_to_throw
            .ok_or_else(|| AppError::internal("in-progress match has no thrower"))?;
        let player_id = snapshot.match_record.player_in(slot);
        let thrower = if player_id == HOST_PLAYER {
            host_thrower.clone()
        } else {
            guest_thrower.clone()
        };

        let svc = flow.clone();
        let leg_id = snapshot.current_leg.id;
        with_txn(&state, move |txn| {
            Box::pin(async move {
                svc.play_bot_visit(txn, leg_id, player_id, thrower.as_ref())
                    .await
            })
        })
        .await?;

        visits_played += 1;
        if visits_played >= MAX_VISITS {
            return Err(AppError::internal(format!(
                "simulation did not converge after {MAX_VISITS} visits"
            )));
        }
    }
}

#[tokio::main]
async fn main() {
    backend::telemetry::init_tracing();

    if let Err(e) = run().await {
        eprintln!("darts-sim failed: {e}");
        std::process::exit(1);
    }
}
