//! Turn actions: play cards or pass.
//!
//! Every check runs before the first mutation, so a rejected action leaves
//! the game exactly as it was.

use tracing::info;

use crate::domain::cards_parsing::faces;
use crate::domain::hands::analyze_hand;
use crate::domain::rules::{contains_eight, contains_jack, triggers_revolution, validate_play};
use crate::domain::state::{Game, Phase};
use crate::domain::{CardId, UserId};
use crate::errors::domain::{DomainError, PreconditionKind, RuleViolation};

/// What a successful play changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayOutcome {
    pub revolution_toggled: bool,
    /// Eight-clear emptied the field.
    pub field_cleared: bool,
    /// Rank assigned to the player if this play emptied their hand.
    pub finished_rank: Option<u8>,
    /// Champion demoted by miyako-ochi on this play.
    pub demoted: Option<UserId>,
    pub round_finished: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassOutcome {
    /// Everyone folded back to the leader and the field was cleared.
    pub field_cleared: bool,
}

impl Game {
    /// Index of `user_id` if it is their turn in a running round.
    fn require_turn(&self, user_id: UserId) -> Result<usize, DomainError> {
        if self.phase == Phase::Finished {
            return Err(DomainError::precondition(
                PreconditionKind::RoundFinished,
                "the round is over",
            ));
        }
        let idx = self.require_player_index(user_id)?;
        if idx != self.turn {
            let expected = self.turn_user().unwrap_or_default();
            return Err(DomainError::OutOfTurn {
                expected,
                actual: user_id,
            });
        }
        Ok(idx)
    }

    pub fn play(&mut self, user_id: UserId, card_ids: &[CardId]) -> Result<PlayOutcome, DomainError> {
        let idx = self.require_turn(user_id)?;
        if card_ids.is_empty() {
            return Err(RuleViolation::EmptyPlay.into());
        }
        let cards = self.players[idx].take_cards(card_ids)?;
        let hand = validate_play(&self.field, &cards, self.effective_revolution())?;

        // Classification the field will carry once the play lands.
        let revolution_toggled = triggers_revolution(&hand, cards.len());
        let revolution_after = self.is_revolution != revolution_toggled;
        let cached = analyze_hand(&cards, revolution_after != contains_jack(&cards))?;
        let eight = contains_eight(&cards);

        self.players[idx].remove_cards(card_ids);
        info!(user_id, cards = %faces(&cards), "cards played");
        self.field.place(cards, cached);
        self.pass_count = 0;

        let mut outcome = PlayOutcome {
            revolution_toggled,
            ..PlayOutcome::default()
        };

        if revolution_toggled {
            self.is_revolution = revolution_after;
            info!(user_id, is_revolution = self.is_revolution, "revolution");
        }

        if !self.players[idx].has_cards() {
            outcome.finished_rank = Some(self.finish_player(idx));
            if !self.first_out_settled {
                self.first_out_settled = true;
                outcome.demoted = self.apply_miyako_ochi(user_id);
            }
        }

        if self.active_count() <= 1 {
            self.finalize_round();
            outcome.round_finished = true;
            return Ok(outcome);
        }

        if eight {
            self.clear_field();
            outcome.field_cleared = true;
            info!(user_id, "eight-clear");
            // A player who went out on an eight cannot lead again.
            if !self.players[idx].has_cards() {
                self.advance_turn();
            }
        } else {
            self.advance_turn();
        }
        Ok(outcome)
    }

    pub fn pass(&mut self, user_id: UserId) -> Result<PassOutcome, DomainError> {
        self.require_turn(user_id)?;
        if self.field.is_empty() {
            return Err(DomainError::precondition(
                PreconditionKind::EmptyTable,
                "cannot pass when leading",
            ));
        }

        self.pass_count += 1;
        let field_cleared = self.pass_count >= self.active_count().saturating_sub(1);
        if field_cleared {
            self.clear_field();
            info!(user_id, "all passed, field cleared");
        }
        self.advance_turn();
        Ok(PassOutcome { field_cleared })
    }

    pub(crate) fn clear_field(&mut self) {
        self.field.clear();
        self.pass_count = 0;
    }

    /// Move to the next player holding cards. A full lap without one leaves
    /// the turn where it was.
    pub(crate) fn advance_turn(&mut self) {
        let n = self.players.len();
        if n == 0 {
            return;
        }
        let start = self.turn;
        for step in 1..=n {
            let candidate = (start + step) % n;
            if self.players[candidate].has_cards() {
                self.turn = candidate;
                return;
            }
        }
    }

    /// Append the player at `idx` to the finishing order and return their rank.
    pub(crate) fn finish_player(&mut self, idx: usize) -> u8 {
        let player = &mut self.players[idx];
        self.finished_players.push(player.user_id);
        player.rank = self.finished_players.len() as u8;
        info!(user_id = player.user_id, rank = player.rank, "player finished");
        player.rank
    }

    /// When someone other than the defending champion goes out first, a
    /// champion still holding cards drops straight to last place.
    fn apply_miyako_ochi(&mut self, first_out: UserId) -> Option<UserId> {
        let champion = self.champion.filter(|&c| c != first_out)?;
        let player = self.players.iter_mut().find(|p| p.user_id == champion)?;
        if !player.has_cards() {
            return None;
        }
        player.hand.clear();
        self.pending_demotion = Some(champion);
        info!(user_id = champion, "miyako-ochi: champion demoted to last");
        Some(champion)
    }

    /// Close the round: the last player holding cards, then any demoted
    /// champion, join the finishing order, and ranks become 1..=N in order.
    pub(crate) fn finalize_round(&mut self) {
        let remaining: Vec<_> = self
            .players
            .iter()
            .filter(|p| p.has_cards())
            .map(|p| p.user_id)
            .collect();
        self.finished_players.extend(remaining);
        if let Some(demoted) = self.pending_demotion.take() {
            if !self.finished_players.contains(&demoted) {
                self.finished_players.push(demoted);
            }
        }
        for (i, &uid) in self.finished_players.iter().enumerate() {
            if let Some(p) = self.players.iter_mut().find(|p| p.user_id == uid) {
                p.rank = (i + 1) as u8;
            }
        }
        self.phase = Phase::Finished;
        info!(ranks = ?self.final_ranks(), "round finished");
    }
}
