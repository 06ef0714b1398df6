//! Hand classification: single, same-rank group ("pair") or same-suit run.
//!
//! Jokers are wildcards. A group may use any number of jokers; a run may use
//! jokers to fill gaps or extend its ends, but jokers alone never form a run.

use serde::{Deserialize, Serialize};

use crate::domain::strength::{get_strength, rank_strength, JOKER_STRENGTH};
use crate::domain::{Card, Rank};
use crate::errors::domain::RuleViolation;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandKind {
    Single,
    /// Two or more cards of one rank (not limited to two).
    Pair,
    Sequence,
}

/// Result of classifying a card multiset. Total: every input maps to a variant.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum HandClass {
    Invalid,
    Single(i32),
    Pair(i32),
    Sequence(i32),
}

impl HandClass {
    pub fn kind(self) -> Option<HandKind> {
        match self {
            HandClass::Invalid => None,
            HandClass::Single(_) => Some(HandKind::Single),
            HandClass::Pair(_) => Some(HandKind::Pair),
            HandClass::Sequence(_) => Some(HandKind::Sequence),
        }
    }

    pub fn strength(self) -> Option<i32> {
        match self {
            HandClass::Invalid => None,
            HandClass::Single(s) | HandClass::Pair(s) | HandClass::Sequence(s) => Some(s),
        }
    }
}

/// A classified, valid hand.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct LastHand {
    pub kind: HandKind,
    pub strength: i32,
}

pub fn classify(cards: &[Card], is_rev: bool) -> HandClass {
    match cards {
        [] => HandClass::Invalid,
        [single] => HandClass::Single(get_strength(single, is_rev)),
        _ => {
            if let Some(strength) = group_strength(cards, is_rev) {
                HandClass::Pair(strength)
            } else if let Some(strength) = sequence_strength(cards, is_rev) {
                HandClass::Sequence(strength)
            } else {
                HandClass::Invalid
            }
        }
    }
}

/// Classify, reporting invalid combinations as a rule violation.
pub fn analyze_hand(cards: &[Card], is_rev: bool) -> Result<LastHand, RuleViolation> {
    if cards.is_empty() {
        return Err(RuleViolation::EmptyPlay);
    }
    let class = classify(cards, is_rev);
    match (class.kind(), class.strength()) {
        (Some(kind), Some(strength)) => Ok(LastHand { kind, strength }),
        _ => Err(RuleViolation::InvalidCombination {
            card_ids: cards.iter().map(|c| c.id).collect(),
        }),
    }
}

pub fn is_pair(cards: &[Card]) -> bool {
    cards.len() >= 2 && shared_rank(cards).is_some()
}

pub fn is_sequence(cards: &[Card]) -> bool {
    run_bounds(cards).is_some()
}

/// `Some(None)` for an all-joker set, `Some(Some(rank))` when every
/// non-joker shares `rank`, `None` otherwise.
fn shared_rank(cards: &[Card]) -> Option<Option<Rank>> {
    let mut base: Option<Rank> = None;
    for card in cards.iter().filter(|c| !c.is_joker()) {
        match base {
            None => base = Some(card.rank),
            Some(rank) if rank != card.rank => return None,
            Some(_) => {}
        }
    }
    Some(base)
}

fn group_strength(cards: &[Card], is_rev: bool) -> Option<i32> {
    if cards.len() < 2 {
        return None;
    }
    match shared_rank(cards)? {
        Some(rank) => Some(rank_strength(rank, is_rev)),
        None => Some(JOKER_STRENGTH),
    }
}

/// Face-value bounds (inclusive) of the run these cards form, with jokers
/// first filling gaps, then extending upward to King, then downward to Ace.
fn run_bounds(cards: &[Card]) -> Option<(u8, u8)> {
    if cards.len() < 3 {
        return None;
    }
    let mut jokers = 0usize;
    let mut values: Vec<u8> = Vec::with_capacity(cards.len());
    let mut suit = None;
    for card in cards {
        if card.is_joker() {
            jokers += 1;
            continue;
        }
        match suit {
            None => suit = Some(card.suit),
            Some(s) if s != card.suit => return None,
            Some(_) => {}
        }
        values.push(card.rank.value());
    }
    values.sort_unstable();
    let (&low, &high) = (values.first()?, values.last()?);

    for pair in values.windows(2) {
        let gap = pair[1] - pair[0];
        if gap == 0 {
            return None;
        }
        let needed = usize::from(gap - 1);
        jokers = jokers.checked_sub(needed)?;
    }

    let (mut low, mut high) = (low, high);
    for _ in 0..jokers {
        if high < Rank::King.value() {
            high += 1;
        } else if low > Rank::Ace.value() {
            low -= 1;
        } else {
            return None;
        }
    }
    Some((low, high))
}

/// A run plays at the strongest rank it covers, jokers counted at the rank
/// they stand in for.
fn sequence_strength(cards: &[Card], is_rev: bool) -> Option<i32> {
    let (low, high) = run_bounds(cards)?;
    (low..=high)
        .filter_map(Rank::from_value)
        .map(|rank| rank_strength(rank, is_rev))
        .max()
}
