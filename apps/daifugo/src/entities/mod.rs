pub mod rooms;

pub use rooms::{Departure, Room, RoomId, RoomSnapshot, RoundStatus};
