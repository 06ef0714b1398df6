//! Compact text form of card faces, used in logs and fixtures.
//!
//! A face is a rank char (`A 2..9 T J Q K`) followed by a suit char
//! (`S H D C`); jokers are written `JK`.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::domain::{Card, CardId, Rank, Suit};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid card token: {0:?}")]
pub struct ParseCardError(pub String);

/// Suit and rank without identity.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct CardFace {
    pub suit: Suit,
    pub rank: Rank,
}

impl CardFace {
    pub const fn with_id(self, id: CardId) -> Card {
        Card::new(id, self.suit, self.rank)
    }
}

impl From<Card> for CardFace {
    fn from(card: Card) -> Self {
        Self {
            suit: card.suit,
            rank: card.rank,
        }
    }
}

impl FromStr for CardFace {
    type Err = ParseCardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "JK" {
            return Ok(CardFace {
                suit: Suit::Joker,
                rank: Rank::Joker,
            });
        }
        let mut chars = s.chars();
        let (Some(rank_ch), Some(suit_ch), None) = (chars.next(), chars.next(), chars.next())
        else {
            return Err(ParseCardError(s.to_string()));
        };
        let rank = match rank_ch {
            'A' => Rank::Ace,
            '2' => Rank::Two,
            '3' => Rank::Three,
            '4' => Rank::Four,
            '5' => Rank::Five,
            '6' => Rank::Six,
            '7' => Rank::Seven,
            '8' => Rank::Eight,
            '9' => Rank::Nine,
            'T' => Rank::Ten,
            'J' => Rank::Jack,
            'Q' => Rank::Queen,
            'K' => Rank::King,
            _ => return Err(ParseCardError(s.to_string())),
        };
        let suit = match suit_ch {
            'S' => Suit::Spade,
            'H' => Suit::Heart,
            'D' => Suit::Diamond,
            'C' => Suit::Club,
            _ => return Err(ParseCardError(s.to_string())),
        };
        Ok(CardFace { suit, rank })
    }
}

impl fmt::Display for CardFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.suit == Suit::Joker {
            return f.write_str("JK");
        }
        let rank_ch = match self.rank {
            Rank::Joker => '?',
            Rank::Ace => 'A',
            Rank::Two => '2',
            Rank::Three => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
        };
        let suit_ch = match self.suit {
            Suit::Spade => 'S',
            Suit::Heart => 'H',
            Suit::Diamond => 'D',
            Suit::Club => 'C',
            Suit::Joker => 'J',
        };
        write!(f, "{rank_ch}{suit_ch}")
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", CardFace::from(*self), self.id)
    }
}

/// Render cards as space-separated faces, e.g. `"3S 3H JK"`.
pub fn faces(cards: &[Card]) -> String {
    cards
        .iter()
        .map(|c| CardFace::from(*c).to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parse face tokens into cards with sequential ids starting at `first_id`.
pub fn cards_from_tokens<I, S>(first_id: CardId, tokens: I) -> Result<Vec<Card>, ParseCardError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tokens
        .into_iter()
        .zip(first_id..)
        .map(|(tok, id)| tok.as_ref().parse::<CardFace>().map(|face| face.with_id(id)))
        .collect()
}
