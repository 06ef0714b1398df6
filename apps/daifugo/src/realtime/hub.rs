use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use tokio::sync::broadcast;
use tracing::debug;

use crate::entities::rooms::{Room, RoomId};
use crate::realtime::protocol::{RoomEvent, RoomEventKind};

/// One broadcast channel per room. Sends never wait: with no subscribers the
/// event is dropped, and subscribers that fall behind skip ahead.
#[derive(Debug)]
pub struct RealtimeHub {
    channels: DashMap<RoomId, broadcast::Sender<RoomEvent>>,
    last_event_id: AtomicU64,
    capacity: usize,
}

impl RealtimeHub {
    pub fn new(capacity: usize) -> Self {
        Self {
            channels: DashMap::new(),
            last_event_id: AtomicU64::new(0),
            capacity: capacity.max(1),
        }
    }

    pub fn subscribe(&self, room_id: RoomId) -> broadcast::Receiver<RoomEvent> {
        self.channels
            .entry(room_id)
            .or_insert_with(|| broadcast::channel(self.capacity).0)
            .subscribe()
    }

    /// Publish `kind` with a snapshot of `room`. Returns the number of
    /// subscribers the event reached.
    pub fn publish(&self, kind: RoomEventKind, room: &Room) -> usize {
        let Some(tx) = self.channels.get(&room.id) else {
            return 0;
        };
        let event = RoomEvent {
            id: self.last_event_id.fetch_add(1, Ordering::Relaxed) + 1,
            room_id: room.id,
            kind,
            snapshot: room.snapshot(),
        };
        let reached = tx.send(event).unwrap_or(0);
        debug!(room_id = room.id, reached, "room event published");
        reached
    }

    pub fn subscriber_count(&self, room_id: RoomId) -> usize {
        self.channels
            .get(&room_id)
            .map_or(0, |tx| tx.receiver_count())
    }

    /// Drop the room's channel; its subscribers see the stream end.
    pub fn close(&self, room_id: RoomId) {
        self.channels.remove(&room_id);
    }
}

impl Default for RealtimeHub {
    fn default() -> Self {
        Self::new(32)
    }
}
