//! Test-only game builders for domain unit tests.

use crate::domain::cards_parsing::{cards_from_tokens, CardFace};
use crate::domain::state::{Game, Player};
use crate::domain::{CardId, UserId};

/// Game over hand-picked cards. Seat `i` is user `i + 1`; card ids are
/// `i * 100 + 1..` so they never collide across hands.
pub fn make_game(hands: &[&[&str]]) -> Game {
    let players = hands
        .iter()
        .enumerate()
        .map(|(i, tokens)| Player {
            hand: cards_from_tokens((i as CardId) * 100 + 1, tokens.iter().copied())
                .expect("valid card tokens"),
            ..Player::new(i as UserId + 1)
        })
        .collect();
    Game::from_players(players, 2)
}

/// Ids of the cards matching `tokens` in `user_id`'s hand.
pub fn ids(game: &Game, user_id: UserId, tokens: &[&str]) -> Vec<CardId> {
    let hand = &game.player(user_id).expect("player in game").hand;
    let mut picked: Vec<CardId> = Vec::new();
    for tok in tokens {
        let face: CardFace = tok.parse().expect("valid card token");
        let card = hand
            .iter()
            .find(|c| CardFace::from(**c) == face && !picked.contains(&c.id))
            .expect("card in hand");
        picked.push(card.id);
    }
    picked
}
