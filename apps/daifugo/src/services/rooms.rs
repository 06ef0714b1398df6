use tracing::info;

use super::{log_rejection, RoomService};
use crate::domain::{PlayerView, UserId};
use crate::entities::rooms::{Departure, Room, RoomId, RoomSnapshot};
use crate::errors::domain::{DomainError, PreconditionKind};
use crate::realtime::protocol::RoomEventKind;
use crate::repos::rooms::RoomRepository;

impl<R: RoomRepository> RoomService<R> {
    pub async fn create_room(
        &self,
        name: impl Into<String>,
        owner_id: UserId,
    ) -> Result<RoomSnapshot, DomainError> {
        let mut room = Room::new(name, owner_id);
        self.repo.save_room(&mut room).await?;
        info!(room_id = room.id, owner_id, name = %room.name, "room created");
        self.hub.publish(RoomEventKind::Created, &room);
        Ok(room.snapshot())
    }

    pub async fn get_room(&self, room_id: RoomId) -> Result<RoomSnapshot, DomainError> {
        Ok(self.repo.get_room_by_id(room_id).await?.snapshot())
    }

    pub async fn list_rooms(&self) -> Result<Vec<RoomSnapshot>, DomainError> {
        let rooms = self.repo.list_rooms().await?;
        Ok(rooms.iter().map(Room::snapshot).collect())
    }

    pub async fn join_room(
        &self,
        room_id: RoomId,
        user_id: UserId,
    ) -> Result<RoomSnapshot, DomainError> {
        let max_members = self.config.max_members;
        let (joined, room) = self
            .repo
            .mutate_room(room_id, move |room| room.join(user_id, max_members))
            .await
            .inspect_err(|err| log_rejection("join", room_id, user_id, err))?;
        if joined {
            info!(room_id, user_id, "member joined");
            self.hub.publish(RoomEventKind::Joined { user_id }, &room);
        }
        Ok(room.snapshot())
    }

    /// Remove a member. The room is deleted once its last member is gone.
    pub async fn leave_room(
        &self,
        room_id: RoomId,
        user_id: UserId,
    ) -> Result<Departure, DomainError> {
        let (departure, room) = self
            .repo
            .mutate_room(room_id, move |room| room.leave(user_id))
            .await
            .inspect_err(|err| log_rejection("leave", room_id, user_id, err))?;
        info!(
            room_id,
            user_id,
            removed_from_round = departure.removed_from_round,
            new_owner = ?departure.new_owner,
            "member left"
        );

        if departure.room_empty {
            match self.repo.delete_room(room_id).await {
                Ok(()) => {}
                // Reaped or deleted concurrently.
                Err(err) if err.is_not_found() => {}
                Err(err) => return Err(err),
            }
            self.hub.publish(RoomEventKind::Deleted, &room);
            self.hub.close(room_id);
        } else {
            self.hub.publish(RoomEventKind::Left { user_id }, &room);
        }
        Ok(departure)
    }

    /// `user_id`'s own hand and options in the current round.
    pub async fn player_view(
        &self,
        room_id: RoomId,
        user_id: UserId,
    ) -> Result<PlayerView, DomainError> {
        let room = self.repo.get_room_by_id(room_id).await?;
        if !room.is_member(user_id) {
            return Err(DomainError::precondition(
                PreconditionKind::NotAMember,
                format!("user {user_id} is not in room {room_id}"),
            ));
        }
        let game = room.game.as_ref().ok_or_else(|| {
            DomainError::precondition(
                PreconditionKind::NoActiveRound,
                format!("room {room_id} has not started"),
            )
        })?;
        game.player_view(user_id)
    }
}
