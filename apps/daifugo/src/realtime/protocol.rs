use serde::{Deserialize, Serialize};

use crate::domain::UserId;
use crate::entities::rooms::{RoomId, RoomSnapshot};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RoomEventKind {
    Created,
    Joined { user_id: UserId },
    Left { user_id: UserId },
    GameStarted,
    CardsPlayed { user_id: UserId },
    Passed { user_id: UserId },
    GameRestarted,
    Deleted,
}

/// One notification: the room as it stood right after the change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomEvent {
    /// Process-unique, increasing across all rooms.
    pub id: u64,
    pub room_id: RoomId,
    pub kind: RoomEventKind,
    pub snapshot: RoomSnapshot,
}
