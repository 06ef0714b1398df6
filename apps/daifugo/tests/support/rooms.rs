//! Service fixtures over a fresh in-memory store.
#![allow(dead_code)]

use std::sync::Arc;

use daifugo::domain::{Game, UserId};
use daifugo::entities::rooms::{RoomId, RoundStatus};
use daifugo::infra::room_store::InMemoryRoomStore;
use daifugo::realtime::hub::RealtimeHub;
use daifugo::repos::rooms::RoomRepository;
use daifugo::services::RoomService;
use daifugo::EngineConfig;
use daifugo_test_support::unique_str;

pub type Service = RoomService<InMemoryRoomStore>;

pub fn service() -> Service {
    RoomService::new(
        Arc::new(InMemoryRoomStore::new()),
        Arc::new(RealtimeHub::new(64)),
        EngineConfig::default(),
    )
}

/// A room holding `members` (first one owns it).
pub async fn room_with(service: &Service, members: &[UserId]) -> RoomId {
    let room = service
        .create_room(unique_str("room"), members[0])
        .await
        .expect("create room");
    for &uid in &members[1..] {
        service.join_room(room.id, uid).await.expect("join room");
    }
    room.id
}

/// A room with a round already dealt.
pub async fn started_room(service: &Service, members: &[UserId]) -> RoomId {
    let room_id = room_with(service, members).await;
    service
        .start_game(room_id, members[0])
        .await
        .expect("start game");
    room_id
}

pub async fn game_of(service: &Service, room_id: RoomId) -> Game {
    service
        .repo()
        .get_room_by_id(room_id)
        .await
        .expect("room exists")
        .game
        .expect("round dealt")
}

/// Drive the round to its end with the weakest legal play, else a pass.
/// Returns the number of actions taken.
pub async fn play_out(service: &Service, room_id: RoomId) -> usize {
    let mut actions = 0;
    loop {
        let snapshot = service.get_room(room_id).await.expect("room exists");
        if snapshot.status == RoundStatus::Finished {
            return actions;
        }
        assert!(actions < 2_000, "round did not finish");
        let turn = snapshot
            .game
            .and_then(|g| g.turn_user_id)
            .expect("someone is on turn");
        let view = service.player_view(room_id, turn).await.expect("player view");
        match view.legal_plays.into_iter().next() {
            Some(play) => {
                service
                    .play_cards(room_id, turn, play.card_ids)
                    .await
                    .expect("legal play accepted");
            }
            None => {
                service.pass_turn(room_id, turn).await.expect("pass accepted");
            }
        }
        actions += 1;
    }
}
