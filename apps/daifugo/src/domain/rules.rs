use crate::domain::hands::{analyze_hand, HandKind, LastHand};
use crate::domain::state::Field;
use crate::domain::{Card, Rank, Suit};
use crate::errors::domain::RuleViolation;

pub const DEFAULT_JOKERS: usize = 2;
pub const MIN_PLAYERS: usize = 2;
pub const DEFAULT_MAX_MEMBERS: usize = 4;
/// Group size at which a play toggles revolution.
pub const REVOLUTION_SIZE: usize = 4;
/// Cards the top-ranked player trades with the bottom-ranked one.
pub const TOP_EXCHANGE: usize = 2;
/// Cards the second-ranked player trades with the second-lowest one.
pub const SECOND_EXCHANGE: usize = 1;

pub fn contains_rank(cards: &[Card], rank: Rank) -> bool {
    cards.iter().any(|c| !c.is_joker() && c.rank == rank)
}

/// Eight-clear ("8-giri").
pub fn contains_eight(cards: &[Card]) -> bool {
    contains_rank(cards, Rank::Eight)
}

/// Eleven-back: a Jack on the table flips the effective revolution.
pub fn contains_jack(cards: &[Card]) -> bool {
    contains_rank(cards, Rank::Jack)
}

pub fn triggers_revolution(hand: &LastHand, count: usize) -> bool {
    hand.kind == HandKind::Pair && count >= REVOLUTION_SIZE
}

/// A lone spade 3 beats a lone joker.
pub fn is_spade_three_return(table: &[Card], candidate: &[Card]) -> bool {
    matches!(table, [t] if t.is_joker())
        && matches!(candidate, [c] if c.suit == Suit::Spade && c.rank == Rank::Three)
}

/// Check `candidate` against the table under the effective revolution state
/// `is_rev`, returning its classification when it may be played.
pub fn validate_play(
    field: &Field,
    candidate: &[Card],
    is_rev: bool,
) -> Result<LastHand, RuleViolation> {
    let hand = analyze_hand(candidate, is_rev)?;
    let Some(table) = field.last_hand() else {
        return Ok(hand);
    };
    if is_spade_three_return(field.cards(), candidate) {
        return Ok(hand);
    }
    if hand.kind != table.kind {
        return Err(RuleViolation::KindMismatch {
            expected: table.kind,
            actual: hand.kind,
        });
    }
    if candidate.len() != field.cards().len() {
        return Err(RuleViolation::CountMismatch {
            expected: field.cards().len(),
            actual: candidate.len(),
        });
    }
    if hand.strength <= table.strength {
        return Err(RuleViolation::NotStronger {
            table: table.strength,
            candidate: hand.strength,
        });
    }
    Ok(hand)
}
