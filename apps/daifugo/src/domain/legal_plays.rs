//! Enumerate plays a player could make right now.
//!
//! Covers singles and same-rank groups (jokers filling groups); runs are not
//! enumerated. Every returned play passes `Game::play` validation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::hands::HandKind;
use crate::domain::rules::validate_play;
use crate::domain::state::Game;
use crate::domain::{Card, CardId, Rank, UserId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalPlay {
    pub card_ids: Vec<CardId>,
    pub kind: HandKind,
    pub strength: i32,
}

impl Game {
    /// Legal plays for `user_id`, weakest first. Empty when it is not their
    /// turn or the round is over.
    pub fn legal_plays(&self, user_id: UserId) -> Vec<LegalPlay> {
        if self.is_finished() || self.turn_user() != Some(user_id) {
            return Vec::new();
        }
        let Some(player) = self.player(user_id) else {
            return Vec::new();
        };
        let is_rev = self.effective_revolution();

        let mut plays: Vec<LegalPlay> = candidates(&player.hand)
            .into_iter()
            .filter_map(|cards| {
                let hand = validate_play(&self.field, &cards, is_rev).ok()?;
                Some(LegalPlay {
                    card_ids: cards.iter().map(|c| c.id).collect(),
                    kind: hand.kind,
                    strength: hand.strength,
                })
            })
            .collect();
        plays.sort_by_key(|p| (p.strength, p.card_ids.len()));
        plays
    }
}

fn candidates(hand: &[Card]) -> Vec<Vec<Card>> {
    let jokers: Vec<Card> = hand.iter().copied().filter(Card::is_joker).collect();
    let mut by_rank: BTreeMap<Rank, Vec<Card>> = BTreeMap::new();
    for card in hand.iter().filter(|c| !c.is_joker()) {
        by_rank.entry(card.rank).or_default().push(*card);
    }

    let mut out: Vec<Vec<Card>> = hand.iter().map(|c| vec![*c]).collect();
    for naturals in by_rank.values() {
        for size in 2..=naturals.len() + jokers.len() {
            let used = size.min(naturals.len());
            let mut group = naturals[..used].to_vec();
            group.extend_from_slice(&jokers[..size - used]);
            out.push(group);
        }
    }
    for size in 2..=jokers.len() {
        out.push(jokers[..size].to_vec());
    }
    out
}
