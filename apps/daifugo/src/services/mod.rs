//! Room and round use-cases on top of the store and the notification hub.
//!
//! Each action runs as one `mutate_room` call, so it applies completely or
//! not at all, and notifications go out only after the room lock is released.

mod game_flow;
mod rooms;

use std::sync::Arc;

use tracing::debug;

use crate::config::EngineConfig;
use crate::domain::UserId;
use crate::entities::rooms::RoomId;
use crate::errors::domain::DomainError;
use crate::realtime::hub::RealtimeHub;
use crate::repos::rooms::RoomRepository;

pub use game_flow::Applied;

pub struct RoomService<R: RoomRepository> {
    repo: Arc<R>,
    hub: Arc<RealtimeHub>,
    config: EngineConfig,
}

impl<R: RoomRepository> RoomService<R> {
    pub fn new(repo: Arc<R>, hub: Arc<RealtimeHub>, config: EngineConfig) -> Self {
        Self { repo, hub, config }
    }

    pub fn repo(&self) -> &Arc<R> {
        &self.repo
    }

    pub fn hub(&self) -> &Arc<RealtimeHub> {
        &self.hub
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

impl<R: RoomRepository> Clone for RoomService<R> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
            hub: Arc::clone(&self.hub),
            config: self.config.clone(),
        }
    }
}

fn log_rejection(action: &'static str, room_id: RoomId, user_id: UserId, err: &DomainError) {
    debug!(action, room_id, user_id, code = %err.code(), error = %err, "action rejected");
}
