#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod config;
pub mod domain;
pub mod entities;
pub mod errors;
pub mod infra;
pub mod realtime;
pub mod repos;
pub mod services;
pub mod telemetry;


// Re-exports for public API
pub use config::{ConfigError, EngineConfig};
pub use domain::{Card, CardId, Game, UserId};
pub use entities::rooms::{Room, RoomId, RoomSnapshot, RoundStatus};
pub use errors::{DomainError, ErrorCode};
pub use infra::room_store::{spawn_room_reaper, InMemoryRoomStore};
pub use realtime::hub::RealtimeHub;
pub use realtime::protocol::{RoomEvent, RoomEventKind};
pub use repos::rooms::RoomRepository;
pub use services::RoomService;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
