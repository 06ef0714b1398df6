use tracing::info;

use super::{log_rejection, RoomService};
use crate::domain::state::Game;
use crate::domain::{CardExchange, CardId, PassOutcome, PlayOutcome, UserId};
use crate::entities::rooms::{Room, RoomId, RoomSnapshot};
use crate::errors::domain::{DomainError, PreconditionKind};
use crate::realtime::protocol::RoomEventKind;
use crate::repos::rooms::RoomRepository;

/// A committed action: what the domain reported and the room right after.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied<T> {
    pub outcome: T,
    pub room: RoomSnapshot,
}

fn require_member(room: &Room, user_id: UserId) -> Result<(), DomainError> {
    if room.is_member(user_id) {
        Ok(())
    } else {
        Err(DomainError::precondition(
            PreconditionKind::NotAMember,
            format!("user {user_id} is not in room {}", room.id),
        ))
    }
}

fn active_game(room: &mut Room) -> Result<&mut Game, DomainError> {
    let room_id = room.id;
    room.game.as_mut().ok_or_else(|| {
        DomainError::precondition(
            PreconditionKind::NoActiveRound,
            format!("room {room_id} has no round"),
        )
    })
}

impl<R: RoomRepository> RoomService<R> {
    /// Deal a round for the room's members.
    pub async fn start_game(
        &self,
        room_id: RoomId,
        user_id: UserId,
    ) -> Result<RoomSnapshot, DomainError> {
        let joker_count = self.config.joker_count;
        let ((), room) = self
            .repo
            .mutate_room(room_id, move |room| {
                require_member(room, user_id)?;
                room.start_game(joker_count)
            })
            .await
            .inspect_err(|err| log_rejection("start", room_id, user_id, err))?;
        info!(room_id, user_id, "game started");
        self.hub.publish(RoomEventKind::GameStarted, &room);
        Ok(room.snapshot())
    }

    pub async fn play_cards(
        &self,
        room_id: RoomId,
        user_id: UserId,
        card_ids: Vec<CardId>,
    ) -> Result<Applied<PlayOutcome>, DomainError> {
        let (outcome, room) = self
            .repo
            .mutate_room(room_id, move |room| active_game(room)?.play(user_id, &card_ids))
            .await
            .inspect_err(|err| log_rejection("play", room_id, user_id, err))?;
        if outcome.round_finished {
            info!(room_id, "round complete");
        }
        self.hub.publish(RoomEventKind::CardsPlayed { user_id }, &room);
        Ok(Applied {
            outcome,
            room: room.snapshot(),
        })
    }

    pub async fn pass_turn(
        &self,
        room_id: RoomId,
        user_id: UserId,
    ) -> Result<Applied<PassOutcome>, DomainError> {
        let (outcome, room) = self
            .repo
            .mutate_room(room_id, move |room| active_game(room)?.pass(user_id))
            .await
            .inspect_err(|err| log_rejection("pass", room_id, user_id, err))?;
        self.hub.publish(RoomEventKind::Passed { user_id }, &room);
        Ok(Applied {
            outcome,
            room: room.snapshot(),
        })
    }

    /// Start the next round once the current one is over.
    pub async fn restart_game(
        &self,
        room_id: RoomId,
        user_id: UserId,
    ) -> Result<Applied<Vec<CardExchange>>, DomainError> {
        let (outcome, room) = self
            .repo
            .mutate_room(room_id, move |room| {
                require_member(room, user_id)?;
                room.restart_game()
            })
            .await
            .inspect_err(|err| log_rejection("restart", room_id, user_id, err))?;
        info!(room_id, user_id, exchanges = outcome.len(), "game restarted");
        self.hub.publish(RoomEventKind::GameRestarted, &room);
        Ok(Applied {
            outcome,
            room: room.snapshot(),
        })
    }
}
