//! Deck construction, shuffling and round-robin dealing.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::domain::{Card, CardId, Rank, Suit};

pub const STANDARD_CARDS: usize = 52;

/// An ordered deck. Created fresh for every round and consumed by `deal`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// 52 standard cards (spade, heart, diamond, club; Ace..King) followed by
    /// `joker_count` jokers. Ids run sequentially from 1 in that order.
    pub fn new(joker_count: usize) -> Self {
        let mut cards = Vec::with_capacity(STANDARD_CARDS + joker_count);
        let mut next_id: CardId = 1;
        for suit in Suit::STANDARD {
            for rank in Rank::STANDARD {
                cards.push(Card::new(next_id, suit, rank));
                next_id += 1;
            }
        }
        for _ in 0..joker_count {
            cards.push(Card::joker(next_id));
            next_id += 1;
        }
        Self { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Uniform in-place shuffle from the thread-local generator.
    pub fn shuffle(&mut self) {
        let mut rng = rand::rng();
        self.shuffle_with(&mut rng);
    }

    /// Fisher-Yates shuffle driven by `rng`; seeded generators give
    /// reproducible decks.
    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    /// Deal round-robin: card `i` goes to hand `i % n`, keeping dealt order
    /// within each hand. `n == 0` yields no hands.
    pub fn deal(self, n: usize) -> Vec<Vec<Card>> {
        if n == 0 {
            return Vec::new();
        }
        let mut hands: Vec<Vec<Card>> = (0..n)
            .map(|_| Vec::with_capacity(self.cards.len() / n + 1))
            .collect();
        for (i, card) in self.cards.into_iter().enumerate() {
            hands[i % n].push(card);
        }
        hands
    }
}
