use serde::{Deserialize, Serialize};

use crate::domain::hands::LastHand;
use crate::domain::rules::contains_jack;
use crate::domain::{Card, CardId, UserId};
use crate::errors::domain::{DomainError, NotFoundKind};

/// Cards on the table together with their cached classification.
///
/// The two are only ever set or cleared together: an empty field has no
/// last hand, a non-empty field always has one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    cards: Vec<Card>,
    last_hand: Option<LastHand>,
}

impl Field {
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn last_hand(&self) -> Option<LastHand> {
        self.last_hand
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn place(&mut self, cards: Vec<Card>, hand: LastHand) {
        self.cards = cards;
        self.last_hand = Some(hand);
    }

    pub fn clear(&mut self) {
        self.cards.clear();
        self.last_hand = None;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub user_id: UserId,
    pub hand: Vec<Card>,
    /// 0 while still playing; finishing position once out.
    pub rank: u8,
}

impl Player {
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            hand: Vec::new(),
            rank: 0,
        }
    }

    pub fn has_cards(&self) -> bool {
        !self.hand.is_empty()
    }

    /// Resolve `ids` against the hand. Fails naming every id that is missing
    /// or repeated.
    pub fn take_cards(&self, ids: &[CardId]) -> Result<Vec<Card>, DomainError> {
        let mut picked: Vec<Card> = Vec::with_capacity(ids.len());
        let mut bad: Vec<CardId> = Vec::new();
        for &id in ids {
            if picked.iter().any(|c| c.id == id) {
                bad.push(id);
                continue;
            }
            match self.hand.iter().find(|c| c.id == id) {
                Some(card) => picked.push(*card),
                None => bad.push(id),
            }
        }
        if !bad.is_empty() {
            return Err(DomainError::CardsNotInHand { card_ids: bad });
        }
        Ok(picked)
    }

    pub fn remove_cards(&mut self, ids: &[CardId]) {
        self.hand.retain(|c| !ids.contains(&c.id));
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    InProgress,
    Finished,
}

/// One round of play. Player order is the turn rotation and survives resets;
/// only `remove_player` changes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub players: Vec<Player>,
    /// Append-only; position + 1 is the finishing rank.
    pub finished_players: Vec<UserId>,
    pub field: Field,
    /// Index into `players`.
    pub turn: usize,
    pub is_revolution: bool,
    /// Consecutive passes since the field was last played on.
    pub pass_count: usize,
    pub phase: Phase,
    /// Rank-1 player of the previous round, if any.
    pub champion: Option<UserId>,
    /// Champion stripped by miyako-ochi, appended last when the round ends.
    pub pending_demotion: Option<UserId>,
    /// Set once the first player of the round has played out.
    pub first_out_settled: bool,
    pub joker_count: usize,
}

impl Game {
    /// A round over already-dealt hands, starting at index 0 with a clear
    /// field. Used for fixtures and replays; `Game::new` deals a fresh deck.
    pub fn from_players(players: Vec<Player>, joker_count: usize) -> Self {
        Self {
            players,
            finished_players: Vec::new(),
            field: Field::default(),
            turn: 0,
            is_revolution: false,
            pass_count: 0,
            phase: Phase::InProgress,
            champion: None,
            pending_demotion: None,
            first_out_settled: false,
            joker_count,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    pub fn is_eleven_back(&self) -> bool {
        contains_jack(self.field.cards())
    }

    /// Revolution as used for comparisons: the global flag flipped while a
    /// Jack is on the table.
    pub fn effective_revolution(&self) -> bool {
        self.is_revolution != self.is_eleven_back()
    }

    pub fn turn_player(&self) -> Option<&Player> {
        self.players.get(self.turn)
    }

    pub fn turn_user(&self) -> Option<UserId> {
        self.turn_player().map(|p| p.user_id)
    }

    pub fn player_index(&self, user_id: UserId) -> Option<usize> {
        self.players.iter().position(|p| p.user_id == user_id)
    }

    pub fn player(&self, user_id: UserId) -> Option<&Player> {
        self.players.iter().find(|p| p.user_id == user_id)
    }

    pub fn require_player_index(&self, user_id: UserId) -> Result<usize, DomainError> {
        self.player_index(user_id).ok_or_else(|| {
            DomainError::not_found(
                NotFoundKind::Player,
                format!("user {user_id} is not playing this round"),
            )
        })
    }

    /// Players still holding cards.
    pub fn active_count(&self) -> usize {
        self.players.iter().filter(|p| p.has_cards()).count()
    }

    /// Finishing rank of `user_id` so far, including removed players.
    pub fn rank_of(&self, user_id: UserId) -> Option<u8> {
        self.finished_players
            .iter()
            .position(|&uid| uid == user_id)
            .map(|i| (i + 1) as u8)
    }

    /// `(user, rank)` in finishing order.
    pub fn final_ranks(&self) -> Vec<(UserId, u8)> {
        self.finished_players
            .iter()
            .enumerate()
            .map(|(i, &uid)| (uid, (i + 1) as u8))
            .collect()
    }
}
