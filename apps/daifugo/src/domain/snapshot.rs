//! Public snapshot API for observing a round without exposing hands.

use serde::{Deserialize, Serialize};

use crate::domain::hands::LastHand;
use crate::domain::state::{Game, Phase};
use crate::domain::{Card, UserId};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerPublic {
    pub user_id: UserId,
    pub hand_count: usize,
    pub rank: u8,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub phase: Phase,
    pub players: Vec<PlayerPublic>,
    pub field_cards: Vec<Card>,
    pub last_hand: Option<LastHand>,
    pub turn_user_id: Option<UserId>,
    pub is_revolution: bool,
    pub is_eleven_back: bool,
    pub pass_count: usize,
    pub finished_user_ids: Vec<UserId>,
    pub pending_demotion: Option<UserId>,
}

impl From<&Game> for GameSnapshot {
    fn from(game: &Game) -> Self {
        Self {
            phase: game.phase,
            players: game
                .players
                .iter()
                .map(|p| PlayerPublic {
                    user_id: p.user_id,
                    hand_count: p.hand.len(),
                    rank: p.rank,
                })
                .collect(),
            field_cards: game.field.cards().to_vec(),
            last_hand: game.field.last_hand(),
            turn_user_id: match game.phase {
                Phase::InProgress => game.turn_user(),
                Phase::Finished => None,
            },
            is_revolution: game.is_revolution,
            is_eleven_back: game.is_eleven_back(),
            pass_count: game.pass_count,
            finished_user_ids: game.finished_players.clone(),
            pending_demotion: game.pending_demotion,
        }
    }
}
