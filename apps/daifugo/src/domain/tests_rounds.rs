use std::collections::HashMap;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::domain::dealing::Deck;
use crate::domain::state::{Game, Phase};
use crate::domain::strength::sort_by_strength;
use crate::domain::test_state_helpers::{ids, make_game};
use crate::domain::{CardId, UserId};
use crate::errors::domain::{DomainError, PreconditionKind};

fn hand_ids(game: &Game, user_id: UserId) -> Vec<CardId> {
    game.player(user_id)
        .map(|p| p.hand.iter().map(|c| c.id).collect())
        .unwrap_or_default()
}

#[test]
fn new_round_deals_every_card_once() {
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let (game, exchanges) =
        Game::with_previous_ranks(&[10, 20, 30, 40], &HashMap::new(), 2, &mut rng).unwrap();
    assert!(exchanges.is_empty());

    let sizes: Vec<usize> = game.players.iter().map(|p| p.hand.len()).collect();
    assert_eq!(sizes, vec![14, 14, 13, 13]);
    let mut all: Vec<CardId> = game.players.iter().flat_map(|p| p.hand.iter().map(|c| c.id)).collect();
    all.sort_unstable();
    assert_eq!(all, (1..=54).collect::<Vec<_>>());

    assert_eq!(game.turn, 0);
    assert_eq!(game.champion, None);
    assert!(game.field.is_empty());
    assert_eq!(game.phase, Phase::InProgress);
    assert!(game.players.iter().all(|p| p.rank == 0));
}

#[test]
fn a_round_needs_two_members() {
    let err = Game::new(&[1], 2).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Precondition(PreconditionKind::TooFewMembers, _)
    ));
}

#[test]
fn reset_trades_cards_by_previous_rank() {
    let seats: [UserId; 4] = [1, 2, 3, 4];
    // 2 won, 4 came second, 1 third, 3 last.
    let ranks = HashMap::from([(2, 1), (4, 2), (1, 3), (3, 4)]);

    // Reproduce the deal the seeded rng will produce.
    let mut deck = Deck::new(2);
    deck.shuffle_with(&mut ChaCha8Rng::seed_from_u64(5));
    let mut dealt = deck.deal(4);
    for hand in &mut dealt {
        sort_by_strength(hand);
    }
    let weakest = |seat: usize, n: usize| -> Vec<CardId> { dealt[seat][..n].iter().map(|c| c.id).collect() };
    let strongest = |seat: usize, n: usize| -> Vec<CardId> {
        let h = &dealt[seat];
        h[h.len() - n..].iter().map(|c| c.id).collect()
    };

    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let (game, exchanges) = Game::with_previous_ranks(&seats, &ranks, 2, &mut rng).unwrap();
    assert_eq!(exchanges.len(), 2);

    let top = hand_ids(&game, 2);
    let bottom = hand_ids(&game, 3);
    assert!(strongest(2, 2).iter().all(|id| top.contains(id)));
    assert!(weakest(1, 2).iter().all(|id| bottom.contains(id)));
    assert!(weakest(1, 2).iter().all(|id| !top.contains(id)));

    let second = hand_ids(&game, 4);
    let fourth = hand_ids(&game, 1);
    assert!(strongest(0, 1).iter().all(|id| second.contains(id)));
    assert!(weakest(3, 1).iter().all(|id| fourth.contains(id)));

    let sizes: Vec<usize> = game.players.iter().map(|p| p.hand.len()).collect();
    assert_eq!(sizes, vec![14, 14, 13, 13]);
    assert_eq!(game.champion, Some(2));
    assert_eq!(game.turn_user(), Some(2));
    assert!(game.players.iter().all(|p| p.rank == 0));
}

#[test]
fn three_players_only_swap_the_top_pair() {
    let mut game = make_game(&[&["3S"], &["4S", "5S"], &["6S", "7S"]]);
    game.play(1, &ids(&game, 1, &["3S"])).unwrap();
    game.play(2, &ids(&game, 2, &["4S"])).unwrap();
    game.play(3, &ids(&game, 3, &["6S"])).unwrap();
    assert!(game.pass(2).unwrap().field_cleared);
    game.play(3, &ids(&game, 3, &["7S"])).unwrap();
    assert!(game.is_finished());

    let exchanges = game.reset_with(&mut ChaCha8Rng::seed_from_u64(1));
    assert_eq!(exchanges.len(), 1);
    assert_eq!(exchanges[0].giver, 1);
    assert_eq!(exchanges[0].receiver, 2);
    assert_eq!(exchanges[0].given.len(), 2);
    assert_eq!(game.champion, Some(1));
    assert_eq!(game.turn_user(), Some(1));
    assert!(game.finished_players.is_empty());
    assert_eq!(game.pending_demotion, None);
    assert!(!game.first_out_settled);
}

#[test]
fn unranked_reset_skips_the_exchange() {
    let mut game = Game::new(&[1, 2, 3, 4], 0).unwrap();
    let exchanges = game.reset();
    assert!(exchanges.is_empty());
    assert_eq!(game.turn, 0);
    let total: usize = game.players.iter().map(|p| p.hand.len()).sum();
    assert_eq!(total, 52);
}

#[test]
fn removing_a_player_before_the_turn_keeps_the_same_player_up() {
    let mut game = make_game(&[&["3S", "4S"], &["5S", "6S"], &["7S", "9S"]]);
    game.turn = 2;
    assert!(game.remove_player(1).unwrap());
    assert_eq!(game.turn_user(), Some(3));
    assert_eq!(game.finished_players, vec![1]);
    assert_eq!(game.rank_of(1), Some(1));
    assert!(game.player(1).is_none());
}

#[test]
fn removing_the_player_on_turn_hands_it_to_the_next() {
    let mut game = make_game(&[&["3S", "4S"], &["5S", "6S"], &["7S", "9S"], &["TS", "QS"]]);
    game.turn = 3;
    assert!(game.remove_player(4).unwrap());
    assert_eq!(game.turn_user(), Some(1));

    game.turn = 1;
    assert!(game.remove_player(2).unwrap());
    assert_eq!(game.turn_user(), Some(3));
    assert!(!game.is_finished());
}

#[test]
fn removal_down_to_one_player_ends_the_round() {
    let mut game = make_game(&[&["3S", "4S"], &["5S", "6S"]]);
    assert!(game.remove_player(2).unwrap());
    assert!(game.is_finished());
    assert_eq!(game.final_ranks(), vec![(2, 1), (1, 2)]);
}

#[test]
fn removal_ignores_finished_players_and_rejects_strangers() {
    let mut game = make_game(&[&["3S"], &["4S", "5S"], &["6S", "7S"]]);
    game.play(1, &ids(&game, 1, &["3S"])).unwrap();
    let before = game.clone();
    assert!(!game.remove_player(1).unwrap());
    assert_eq!(game, before);
    assert!(game.remove_player(77).unwrap_err().is_not_found());
}

fn four_seats() -> Game {
    make_game(&[&["3S", "4S"], &["5S", "6S"], &["7S", "9S"], &["TS", "QS"]])
}

#[test]
fn removing_the_last_responder_clears_the_table_for_the_leader() {
    let mut game = four_seats();
    game.play(1, &ids(&game, 1, &["3S"])).unwrap();
    game.pass(2).unwrap();
    assert!(!game.pass(3).unwrap().field_cleared);
    assert_eq!(game.turn_user(), Some(4));

    assert!(game.remove_player(4).unwrap());
    assert!(game.field.is_empty());
    assert_eq!(game.pass_count, 0);
    assert_eq!(game.turn_user(), Some(1));

    let err = game.pass(1).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Precondition(PreconditionKind::EmptyTable, _)
    ));
    game.play(1, &ids(&game, 1, &["4S"])).unwrap();
}

#[test]
fn removing_a_player_who_passed_keeps_the_table() {
    let mut game = four_seats();
    game.play(1, &ids(&game, 1, &["3S"])).unwrap();
    game.pass(2).unwrap();

    assert!(game.remove_player(2).unwrap());
    assert_eq!(game.pass_count, 0);
    assert_eq!(game.field.cards().len(), 1);
    assert_eq!(game.turn_user(), Some(3));

    assert!(!game.pass(3).unwrap().field_cleared);
    assert!(game.pass(4).unwrap().field_cleared);
    assert_eq!(game.turn_user(), Some(1));
}

#[test]
fn removing_the_leader_after_the_others_passed_clears_the_table() {
    let mut game = four_seats();
    game.play(1, &ids(&game, 1, &["3S"])).unwrap();
    game.pass(2).unwrap();
    game.pass(3).unwrap();

    assert!(game.remove_player(1).unwrap());
    assert!(game.field.is_empty());
    assert_eq!(game.turn_user(), Some(4));
    assert!(!game.is_finished());
}
