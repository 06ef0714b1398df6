use std::sync::Arc;

use daifugo::domain::UserId;
use daifugo::entities::rooms::{RoomId, RoundStatus};
use daifugo::infra::room_store::{spawn_room_reaper, InMemoryRoomStore};
use daifugo::realtime::hub::RealtimeHub;
use daifugo::services::RoomService;
use daifugo::telemetry;
use daifugo::{DomainError, EngineConfig};
use tracing::{info, warn};

const BOTS: [UserId; 4] = [101, 102, 103, 104];
/// Upper bound on turns; a round of 54 cards ends long before this.
const MAX_TURNS: usize = 2_000;

#[tokio::main]
async fn main() {
    telemetry::init_tracing();

    let config = match EngineConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    let store = Arc::new(InMemoryRoomStore::new());
    let hub = Arc::new(RealtimeHub::new(config.event_buffer));
    let reaper = spawn_room_reaper(
        Arc::clone(&store),
        Arc::clone(&hub),
        config.reaper_interval,
        config.room_ttl,
    );
    let service = RoomService::new(store, hub, config);

    if let Err(e) = simulate(&service).await {
        eprintln!("simulation failed: {e}");
        reaper.abort();
        std::process::exit(1);
    }
    reaper.abort();
}

async fn simulate(service: &RoomService<InMemoryRoomStore>) -> Result<(), DomainError> {
    let seats = BOTS.len().min(service.config().max_members);
    let room = service.create_room("simulation", BOTS[0]).await?;
    for &bot in &BOTS[1..seats] {
        service.join_room(room.id, bot).await?;
    }
    service.start_game(room.id, BOTS[0]).await?;

    for _ in 0..MAX_TURNS {
        let snapshot = service.get_room(room.id).await?;
        if snapshot.status == RoundStatus::Finished {
            if let Some(game) = &snapshot.game {
                let ranks: Vec<(UserId, usize)> = game
                    .finished_user_ids
                    .iter()
                    .enumerate()
                    .map(|(i, &uid)| (uid, i + 1))
                    .collect();
                let json = serde_json::to_string(&ranks).unwrap_or_default();
                info!(room_id = room.id, ranks = %json, "simulation finished");
            }
            return Ok(());
        }
        let Some(turn) = snapshot.game.as_ref().and_then(|g| g.turn_user_id) else {
            warn!(room_id = room.id, "no player to act");
            return Ok(());
        };
        take_turn(service, room.id, turn).await?;
    }
    warn!(room_id = room.id, MAX_TURNS, "simulation stopped before the round ended");
    Ok(())
}

/// Greedy bot: the weakest legal play, otherwise pass.
async fn take_turn(
    service: &RoomService<InMemoryRoomStore>,
    room_id: RoomId,
    user_id: UserId,
) -> Result<(), DomainError> {
    let view = service.player_view(room_id, user_id).await?;
    match view.legal_plays.into_iter().next() {
        Some(choice) => {
            service.play_cards(room_id, user_id, choice.card_ids).await?;
        }
        None => {
            service.pass_turn(room_id, user_id).await?;
        }
    }
    Ok(())
}
