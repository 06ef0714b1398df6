//! Round lifecycle: dealing, the rank-based card exchange, and mid-round removal.

use std::collections::HashMap;

use rand::Rng;
use tracing::info;

use crate::domain::dealing::Deck;
use crate::domain::rules::{MIN_PLAYERS, SECOND_EXCHANGE, TOP_EXCHANGE};
use crate::domain::state::{Game, Phase, Player};
use crate::domain::strength::sort_by_strength;
use crate::domain::{CardId, UserId};
use crate::errors::domain::{DomainError, PreconditionKind};

/// One trade performed at the start of a round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardExchange {
    /// Higher-ranked player, giving their weakest cards.
    pub giver: UserId,
    /// Lower-ranked player, giving back their strongest cards.
    pub receiver: UserId,
    pub given: Vec<CardId>,
    pub returned: Vec<CardId>,
}

impl Game {
    /// Deal a first round for `member_ids` in seating order.
    pub fn new(member_ids: &[UserId], joker_count: usize) -> Result<Self, DomainError> {
        let mut rng = rand::rng();
        let (game, _) = Self::with_previous_ranks(member_ids, &HashMap::new(), joker_count, &mut rng)?;
        Ok(game)
    }

    /// Deal a round for `member_ids`, carrying ranks from an earlier round
    /// into the card exchange. Members without an entry start unranked.
    /// Returns the game together with the trades the exchange performed.
    pub fn with_previous_ranks<R: Rng + ?Sized>(
        member_ids: &[UserId],
        prev_ranks: &HashMap<UserId, u8>,
        joker_count: usize,
        rng: &mut R,
    ) -> Result<(Self, Vec<CardExchange>), DomainError> {
        if member_ids.len() < MIN_PLAYERS {
            return Err(DomainError::precondition(
                PreconditionKind::TooFewMembers,
                format!("{} member(s), need at least {MIN_PLAYERS}", member_ids.len()),
            ));
        }
        let players = member_ids
            .iter()
            .map(|&uid| Player {
                rank: prev_ranks.get(&uid).copied().unwrap_or(0),
                ..Player::new(uid)
            })
            .collect();
        let mut game = Game::from_players(players, joker_count);
        let exchanges = game.reset_with(rng);
        Ok((game, exchanges))
    }

    /// Start the next round with the same players.
    pub fn reset(&mut self) -> Vec<CardExchange> {
        let mut rng = rand::rng();
        self.reset_with(&mut rng)
    }

    /// Re-deal, run the card exchange seeded by the ranks players carry, and
    /// give the opening lead to the previous rank-1 player.
    pub fn reset_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Vec<CardExchange> {
        let mut deck = Deck::new(self.joker_count);
        deck.shuffle_with(rng);
        let hands = deck.deal(self.players.len());
        for (player, mut hand) in self.players.iter_mut().zip(hands) {
            sort_by_strength(&mut hand);
            player.hand = hand;
        }

        let exchanges = exchange_cards(&mut self.players);
        let champion_idx = self.players.iter().position(|p| p.rank == 1);
        self.champion = champion_idx.map(|i| self.players[i].user_id);
        self.turn = champion_idx.unwrap_or(0);

        for player in &mut self.players {
            player.rank = 0;
        }
        self.finished_players.clear();
        self.field.clear();
        self.is_revolution = false;
        self.pass_count = 0;
        self.phase = Phase::InProgress;
        self.pending_demotion = None;
        self.first_out_settled = false;

        info!(
            players = self.players.len(),
            champion = ?self.champion,
            exchanges = exchanges.len(),
            "round dealt"
        );
        exchanges
    }

    /// Drop a player mid-round. Their hand is discarded, they take the next
    /// finishing rank, and they leave the rotation. Returns `false` when the
    /// player had already finished.
    pub fn remove_player(&mut self, user_id: UserId) -> Result<bool, DomainError> {
        let idx = self.require_player_index(user_id)?;
        let player = &self.players[idx];
        if self.is_finished()
            || player.rank > 0
            || self.finished_players.contains(&user_id)
            || self.pending_demotion == Some(user_id)
        {
            return Ok(false);
        }

        if self.passed_since_play().contains(&idx) {
            self.pass_count -= 1;
        }
        self.players.remove(idx);
        self.finished_players.push(user_id);
        info!(
            user_id,
            rank = self.finished_players.len(),
            "player removed from round"
        );

        if self.players.is_empty() {
            self.finalize_round();
            return Ok(true);
        }
        if idx < self.turn {
            self.turn -= 1;
        } else if idx == self.turn {
            self.turn = idx % self.players.len();
            if !self.players[self.turn].has_cards() {
                self.advance_turn();
            }
        }

        if self.active_count() <= 1 {
            self.finalize_round();
            return Ok(true);
        }
        // Everyone left has answered the table; the turn already sits with
        // the next player holding cards, who leads.
        if !self.field.is_empty() && self.pass_count >= self.active_count().saturating_sub(1) {
            self.clear_field();
            info!(user_id, "all remaining passed, field cleared");
        }
        Ok(true)
    }

    /// Seats that passed since the field was last played on, walking back
    /// from the turn over players still holding cards.
    fn passed_since_play(&self) -> Vec<usize> {
        let n = self.players.len();
        let mut seats = Vec::with_capacity(self.pass_count);
        let mut seat = self.turn;
        for _ in 0..n {
            if seats.len() == self.pass_count {
                break;
            }
            seat = (seat + n - 1) % n;
            if self.players[seat].has_cards() {
                seats.push(seat);
            }
        }
        seats
    }
}

/// Trade cards between ranked players: best with worst (two cards, 3+
/// players), second-best with second-worst (one card, 4+ players). Hands must
/// be sorted weakest first; they are re-sorted afterwards.
pub fn exchange_cards(players: &mut [Player]) -> Vec<CardExchange> {
    let mut ranked: Vec<usize> = (0..players.len()).filter(|&i| players[i].rank > 0).collect();
    ranked.sort_by_key(|&i| players[i].rank);

    let mut exchanges = Vec::new();
    if players.len() >= 3 && ranked.len() >= 2 {
        let (top, bottom) = (ranked[0], ranked[ranked.len() - 1]);
        exchanges.push(swap_cards(players, top, bottom, TOP_EXCHANGE));
    }
    if players.len() >= 4 && ranked.len() >= 4 {
        let (second, second_last) = (ranked[1], ranked[ranked.len() - 2]);
        exchanges.push(swap_cards(players, second, second_last, SECOND_EXCHANGE));
    }
    for exchange in &exchanges {
        info!(
            giver = exchange.giver,
            receiver = exchange.receiver,
            given = ?exchange.given,
            returned = ?exchange.returned,
            "card exchange"
        );
    }
    exchanges
}

fn swap_cards(players: &mut [Player], giver: usize, receiver: usize, count: usize) -> CardExchange {
    let count = count
        .min(players[giver].hand.len())
        .min(players[receiver].hand.len());
    let given: Vec<_> = players[giver].hand.drain(..count).collect();
    let len = players[receiver].hand.len();
    let returned: Vec<_> = players[receiver].hand.drain(len - count..).collect();

    let exchange = CardExchange {
        giver: players[giver].user_id,
        receiver: players[receiver].user_id,
        given: given.iter().map(|c| c.id).collect(),
        returned: returned.iter().map(|c| c.id).collect(),
    };

    players[giver].hand.extend(returned);
    players[receiver].hand.extend(given);
    sort_by_strength(&mut players[giver].hand);
    sort_by_strength(&mut players[receiver].hand);
    exchange
}
