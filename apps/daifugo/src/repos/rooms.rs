//! Room persistence contract.

use async_trait::async_trait;

use crate::entities::rooms::{Room, RoomId};
use crate::errors::domain::DomainError;

/// Storage for rooms. Every read returns a copy the caller owns; no caller
/// can observe or corrupt a room another caller is changing.
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// Persist `room`, assigning an id when it has none. Saving a room whose
    /// id is already stored overwrites it.
    async fn save_room(&self, room: &mut Room) -> Result<(), DomainError>;

    /// Overwrite an existing room. Unknown ids are `NotFound`.
    async fn update_room(&self, room: &Room) -> Result<(), DomainError>;

    async fn delete_room(&self, room_id: RoomId) -> Result<(), DomainError>;

    async fn get_room_by_id(&self, room_id: RoomId) -> Result<Room, DomainError>;

    /// All rooms, ordered by id.
    async fn list_rooms(&self) -> Result<Vec<Room>, DomainError>;

    /// Run `f` against a working copy of the room while holding its lock.
    /// The copy replaces the stored room only if `f` succeeds; the committed
    /// room is returned alongside `f`'s value.
    async fn mutate_room<T, F>(&self, room_id: RoomId, f: F) -> Result<(T, Room), DomainError>
    where
        T: Send + 'static,
        F: FnOnce(&mut Room) -> Result<T, DomainError> + Send + 'static;
}
