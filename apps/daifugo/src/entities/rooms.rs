//! Room model: membership, the current round and ranks carried between rounds.

use std::collections::HashMap;

use rand::Rng;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::info;

use crate::domain::snapshot::GameSnapshot;
use crate::domain::state::Game;
use crate::domain::{CardExchange, UserId};
use crate::errors::domain::{DomainError, NotFoundKind, PreconditionKind};

pub type RoomId = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundStatus {
    NotStarted,
    InProgress,
    Finished,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// 0 until the store assigns an id.
    pub id: RoomId,
    pub name: String,
    pub owner_id: UserId,
    /// Join order; also the seating order of the next deal.
    pub member_ids: Vec<UserId>,
    pub game: Option<Game>,
    /// Finishing ranks of the last completed round, for the card exchange.
    pub prev_ranks: HashMap<UserId, u8>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// What happened when a member left.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Departure {
    pub removed_from_round: bool,
    pub new_owner: Option<UserId>,
    pub room_empty: bool,
}

impl Room {
    pub fn new(name: impl Into<String>, owner_id: UserId) -> Self {
        let now = OffsetDateTime::now_utc();
        Self {
            id: 0,
            name: name.into(),
            owner_id,
            member_ids: vec![owner_id],
            game: None,
            prev_ranks: HashMap::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_member(&self, user_id: UserId) -> bool {
        self.member_ids.contains(&user_id)
    }

    pub fn is_full(&self, max_members: usize) -> bool {
        self.member_ids.len() >= max_members
    }

    pub fn status(&self) -> RoundStatus {
        match &self.game {
            None => RoundStatus::NotStarted,
            Some(game) if game.is_finished() => RoundStatus::Finished,
            Some(_) => RoundStatus::InProgress,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = OffsetDateTime::now_utc();
    }

    /// Add `user_id` to the room. Returns `false` if they were already a
    /// member. Members joining mid-round are dealt in from the next round.
    pub fn join(&mut self, user_id: UserId, max_members: usize) -> Result<bool, DomainError> {
        // The last member leaving closes the room even before it is deleted.
        if self.member_ids.is_empty() {
            return Err(DomainError::not_found(
                NotFoundKind::Room,
                format!("room {} is closed", self.id),
            ));
        }
        if self.is_member(user_id) {
            return Ok(false);
        }
        if self.is_full(max_members) {
            return Err(DomainError::precondition(
                PreconditionKind::RoomFull,
                format!("room {} has {} members", self.id, self.member_ids.len()),
            ));
        }
        self.member_ids.push(user_id);
        Ok(true)
    }

    /// Remove `user_id`, pulling them out of a running round and handing
    /// ownership on if needed.
    pub fn leave(&mut self, user_id: UserId) -> Result<Departure, DomainError> {
        if !self.is_member(user_id) {
            return Err(DomainError::precondition(
                PreconditionKind::NotAMember,
                format!("user {user_id} is not in room {}", self.id),
            ));
        }

        let mut departure = Departure::default();
        if let Some(game) = self.game.as_mut() {
            if !game.is_finished() && game.player(user_id).is_some() {
                departure.removed_from_round = game.remove_player(user_id)?;
            }
        }

        self.member_ids.retain(|&uid| uid != user_id);
        self.prev_ranks.remove(&user_id);
        if self.owner_id == user_id {
            if let Some(&next) = self.member_ids.first() {
                self.owner_id = next;
                departure.new_owner = Some(next);
            }
        }
        departure.room_empty = self.member_ids.is_empty();
        Ok(departure)
    }

    /// Deal a round for the current members. A finished round's ranks seed
    /// the card exchange.
    pub fn start_game(&mut self, joker_count: usize) -> Result<(), DomainError> {
        self.start_game_with(joker_count, &mut rand::rng())
    }

    pub fn start_game_with<R: Rng + ?Sized>(
        &mut self,
        joker_count: usize,
        rng: &mut R,
    ) -> Result<(), DomainError> {
        match self.status() {
            RoundStatus::InProgress => {
                return Err(DomainError::precondition(
                    PreconditionKind::RoundInProgress,
                    format!("room {} already has a round running", self.id),
                ))
            }
            RoundStatus::Finished => self.record_ranks(),
            RoundStatus::NotStarted => {}
        }
        let (game, exchanges) =
            Game::with_previous_ranks(&self.member_ids, &self.prev_ranks, joker_count, rng)?;
        info!(
            room_id = self.id,
            members = ?self.member_ids,
            exchanges = exchanges.len(),
            "round started"
        );
        self.game = Some(game);
        Ok(())
    }

    /// Begin the next round after a finished one. The same table is reset in
    /// place; a changed member list gets a fresh deal seeded with the ranks.
    pub fn restart_game(&mut self) -> Result<Vec<CardExchange>, DomainError> {
        self.restart_game_with(&mut rand::rng())
    }

    pub fn restart_game_with<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<Vec<CardExchange>, DomainError> {
        let joker_count = match &self.game {
            None => {
                return Err(DomainError::precondition(
                    PreconditionKind::NoActiveRound,
                    format!("room {} has not played a round", self.id),
                ))
            }
            Some(game) if !game.is_finished() => {
                return Err(DomainError::precondition(
                    PreconditionKind::RoundInProgress,
                    format!("room {} round is still running", self.id),
                ))
            }
            Some(game) => game.joker_count,
        };
        self.record_ranks();

        let same_table = self.game.as_ref().is_some_and(|game| {
            game.players.iter().map(|p| p.user_id).eq(self.member_ids.iter().copied())
        });
        let exchanges = if same_table {
            match self.game.as_mut() {
                Some(game) => game.reset_with(rng),
                None => Vec::new(),
            }
        } else {
            let (game, exchanges) =
                Game::with_previous_ranks(&self.member_ids, &self.prev_ranks, joker_count, rng)?;
            self.game = Some(game);
            exchanges
        };
        info!(room_id = self.id, same_table, "round restarted");
        Ok(exchanges)
    }

    fn record_ranks(&mut self) {
        if let Some(game) = &self.game {
            self.prev_ranks = game
                .final_ranks()
                .into_iter()
                .filter(|(uid, _)| self.member_ids.contains(uid))
                .collect();
        }
    }

    pub fn snapshot(&self) -> RoomSnapshot {
        RoomSnapshot::from(self)
    }
}

/// Observer-safe view of a room: hands are reduced to counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSnapshot {
    pub id: RoomId,
    pub name: String,
    pub owner_id: UserId,
    pub member_ids: Vec<UserId>,
    pub status: RoundStatus,
    pub game: Option<GameSnapshot>,
    pub prev_ranks: HashMap<UserId, u8>,
    pub updated_at: OffsetDateTime,
}

impl From<&Room> for RoomSnapshot {
    fn from(room: &Room) -> Self {
        Self {
            id: room.id,
            name: room.name.clone(),
            owner_id: room.owner_id,
            member_ids: room.member_ids.clone(),
            status: room.status(),
            game: room.game.as_ref().map(GameSnapshot::from),
            prev_ranks: room.prev_ranks.clone(),
            updated_at: room.updated_at,
        }
    }
}
