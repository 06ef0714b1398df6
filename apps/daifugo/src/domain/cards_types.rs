//! Core card-related types: Card, Rank, Suit

use serde::{Deserialize, Serialize};

/// Identity of a card within one dealt deck.
pub type CardId = u32;
/// External, already-authenticated user identity.
pub type UserId = i64;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Suit {
    Spade,
    Heart,
    Diamond,
    Club,
    Joker,
}

impl Suit {
    /// The four standard suits in deck generation order.
    pub const STANDARD: [Suit; 4] = [Suit::Spade, Suit::Heart, Suit::Diamond, Suit::Club];
}

/// Card rank by face value; `Joker` is 0 and Ace..King are 1..=13.
///
/// The derived ordering is face order (A < 2 < ... < K), which is what runs use.
/// Play strength is a separate ordering, see `domain::strength`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Rank {
    Joker = 0,
    Ace = 1,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
}

impl Rank {
    pub const STANDARD: [Rank; 13] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    pub const fn value(self) -> u8 {
        self as u8
    }

    pub fn from_value(value: u8) -> Option<Rank> {
        match value {
            0 => Some(Rank::Joker),
            1..=13 => Some(Rank::STANDARD[value as usize - 1]),
            _ => None,
        }
    }
}

impl From<Rank> for u8 {
    fn from(rank: Rank) -> Self {
        rank.value()
    }
}

impl TryFrom<u8> for Rank {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Rank::from_value(value).ok_or_else(|| format!("rank out of range: {value}"))
    }
}

/// A dealt card. Equality includes the id, so two identical faces from
/// different positions in a deck are distinct cards.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub suit: Suit,
    pub rank: Rank,
}

impl Card {
    pub const fn new(id: CardId, suit: Suit, rank: Rank) -> Self {
        Self { id, suit, rank }
    }

    pub const fn joker(id: CardId) -> Self {
        Self {
            id,
            suit: Suit::Joker,
            rank: Rank::Joker,
        }
    }

    pub fn is_joker(&self) -> bool {
        self.suit == Suit::Joker
    }
}
