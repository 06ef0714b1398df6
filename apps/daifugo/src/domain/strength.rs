//! Comparable card strength under revolution.
//!
//! Normal order from weakest to strongest is 3 4 5 6 7 8 9 10 J Q K A 2.
//! Revolution negates every non-joker strength; jokers stay on top.

use crate::domain::{Card, Rank};

/// Strength of a joker in every revolution state.
pub const JOKER_STRENGTH: i32 = 99;

/// Strength a rank plays at. `Rank::Joker` is always `JOKER_STRENGTH`.
pub fn rank_strength(rank: Rank, is_rev: bool) -> i32 {
    let base = match rank {
        Rank::Joker => return JOKER_STRENGTH,
        Rank::Ace => 14,
        Rank::Two => 15,
        other => i32::from(other.value()),
    };
    if is_rev {
        -base
    } else {
        base
    }
}

pub fn get_strength(card: &Card, is_rev: bool) -> i32 {
    if card.is_joker() {
        return JOKER_STRENGTH;
    }
    rank_strength(card.rank, is_rev)
}

/// Sort ascending by normal (non-revolution) strength; suit then id break ties
/// so the order is total and stable across calls.
pub fn sort_by_strength(hand: &mut [Card]) {
    hand.sort_by_key(|c| (get_strength(c, false), c.suit, c.id));
}
