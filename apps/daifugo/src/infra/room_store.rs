//! In-memory room store with one lock per room.
//!
//! The map only hands out `Arc`s to per-room slots; its shard locks are never
//! held while waiting for a room lock. A room lock may be held while touching
//! the map. A slot set to `None` marks a room deleted
//! while some caller may still hold the `Arc`.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::Mutex;
use time::OffsetDateTime;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info};

use crate::entities::rooms::{Room, RoomId};
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::realtime::hub::RealtimeHub;
use crate::repos::rooms::RoomRepository;

type Slot = Arc<Mutex<Option<Room>>>;

#[derive(Debug, Default)]
pub struct InMemoryRoomStore {
    rooms: DashMap<RoomId, Slot>,
    last_id: AtomicI64,
}

fn room_not_found(room_id: RoomId) -> DomainError {
    DomainError::not_found(NotFoundKind::Room, format!("room {room_id}"))
}

impl InMemoryRoomStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    fn slot(&self, room_id: RoomId) -> Result<Slot, DomainError> {
        self.rooms
            .get(&room_id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| room_not_found(room_id))
    }

    fn insert(&self, room: &mut Room) {
        if room.id <= 0 {
            room.id = self.last_id.fetch_add(1, Ordering::Relaxed) + 1;
        } else {
            self.last_id.fetch_max(room.id, Ordering::Relaxed);
        }
        loop {
            let slot = Arc::clone(
                self.rooms
                    .entry(room.id)
                    .or_insert_with(|| Arc::new(Mutex::new(None)))
                    .value(),
            );
            let mut guard = slot.lock();
            // A reaper pass may have unmapped this slot since it was looked up.
            let mapped = self
                .rooms
                .get(&room.id)
                .is_some_and(|entry| Arc::ptr_eq(entry.value(), &slot));
            if mapped {
                *guard = Some(room.clone());
                return;
            }
        }
    }

    fn replace(&self, room: &Room) -> Result<(), DomainError> {
        let slot = self.slot(room.id)?;
        let mut guard = slot.lock();
        if guard.is_none() {
            return Err(room_not_found(room.id));
        }
        *guard = Some(room.clone());
        Ok(())
    }

    fn remove(&self, room_id: RoomId) -> Result<(), DomainError> {
        let (_, slot) = self
            .rooms
            .remove(&room_id)
            .ok_or_else(|| room_not_found(room_id))?;
        let existed = slot.lock().take().is_some();
        if !existed {
            return Err(room_not_found(room_id));
        }
        info!(room_id, "room deleted");
        Ok(())
    }

    fn read(&self, room_id: RoomId) -> Result<Room, DomainError> {
        let slot = self.slot(room_id)?;
        let guard = slot.lock();
        guard.clone().ok_or_else(|| room_not_found(room_id))
    }

    fn read_all(&self) -> Vec<Room> {
        let slots: Vec<Slot> = self
            .rooms
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect();
        let mut rooms: Vec<Room> = slots.iter().filter_map(|slot| slot.lock().clone()).collect();
        rooms.sort_by_key(|room| room.id);
        rooms
    }

    /// Exclusive-access primitive: `f` sees a private copy, which is committed
    /// only when `f` succeeds.
    fn mutate<T, F>(&self, room_id: RoomId, f: F) -> Result<(T, Room), DomainError>
    where
        F: FnOnce(&mut Room) -> Result<T, DomainError>,
    {
        let slot = self.slot(room_id)?;
        let mut guard = slot.lock();
        let mut working = guard.clone().ok_or_else(|| room_not_found(room_id))?;
        let value = f(&mut working)?;
        working.touch();
        *guard = Some(working.clone());
        Ok((value, working))
    }

    /// Delete rooms untouched for longer than `max_idle`; returns their ids.
    pub fn cleanup_expired(&self, max_idle: Duration) -> Vec<RoomId> {
        let now = OffsetDateTime::now_utc();
        match time::Duration::try_from(max_idle)
            .ok()
            .and_then(|idle| now.checked_sub(idle))
        {
            Some(cutoff) => self.cleanup_idle_before(cutoff),
            None => Vec::new(),
        }
    }

    /// Delete rooms whose last update is older than `cutoff`.
    pub fn cleanup_idle_before(&self, cutoff: OffsetDateTime) -> Vec<RoomId> {
        let slots: Vec<(RoomId, Slot)> = self
            .rooms
            .iter()
            .map(|entry| (*entry.key(), Arc::clone(entry.value())))
            .collect();

        let mut expired = Vec::new();
        for (room_id, slot) in slots {
            let mut guard = slot.lock();
            let stale = guard
                .as_ref()
                .is_some_and(|room| room.updated_at < cutoff);
            if stale {
                *guard = None;
                // Unmap while the slot is still locked so no save lands in it.
                self.rooms.remove_if(&room_id, |_, mapped| Arc::ptr_eq(mapped, &slot));
                drop(guard);
                expired.push(room_id);
            }
        }
        expired.sort_unstable();
        if !expired.is_empty() {
            info!(count = expired.len(), rooms = ?expired, "expired rooms removed");
        }
        expired
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomStore {
    async fn save_room(&self, room: &mut Room) -> Result<(), DomainError> {
        self.insert(room);
        debug!(room_id = room.id, "room saved");
        Ok(())
    }

    async fn update_room(&self, room: &Room) -> Result<(), DomainError> {
        self.replace(room)
    }

    async fn delete_room(&self, room_id: RoomId) -> Result<(), DomainError> {
        self.remove(room_id)
    }

    async fn get_room_by_id(&self, room_id: RoomId) -> Result<Room, DomainError> {
        self.read(room_id)
    }

    async fn list_rooms(&self) -> Result<Vec<Room>, DomainError> {
        Ok(self.read_all())
    }

    async fn mutate_room<T, F>(&self, room_id: RoomId, f: F) -> Result<(T, Room), DomainError>
    where
        T: Send + 'static,
        F: FnOnce(&mut Room) -> Result<T, DomainError> + Send + 'static,
    {
        self.mutate(room_id, f)
    }
}

/// Periodically delete idle rooms and close their notification channels.
pub fn spawn_room_reaper(
    store: Arc<InMemoryRoomStore>,
    hub: Arc<RealtimeHub>,
    period: Duration,
    max_idle: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            for room_id in store.cleanup_expired(max_idle) {
                hub.close(room_id);
            }
        }
    })
}
