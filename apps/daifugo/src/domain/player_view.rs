//! A single player's private view of the round: their own hand and options.

use serde::{Deserialize, Serialize};

use crate::domain::legal_plays::LegalPlay;
use crate::domain::state::Game;
use crate::domain::{Card, UserId};
use crate::errors::domain::DomainError;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    pub user_id: UserId,
    pub hand: Vec<Card>,
    pub rank: u8,
    pub is_your_turn: bool,
    pub can_pass: bool,
    pub legal_plays: Vec<LegalPlay>,
}

impl Game {
    pub fn player_view(&self, user_id: UserId) -> Result<PlayerView, DomainError> {
        let idx = self.require_player_index(user_id)?;
        let player = &self.players[idx];
        let is_your_turn = !self.is_finished() && idx == self.turn;
        Ok(PlayerView {
            user_id,
            hand: player.hand.clone(),
            rank: player.rank,
            is_your_turn,
            can_pass: is_your_turn && !self.field.is_empty(),
            legal_plays: self.legal_plays(user_id),
        })
    }
}
