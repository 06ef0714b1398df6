use crate::domain::hands::HandKind;
use crate::domain::state::Phase;
use crate::domain::test_state_helpers::{ids, make_game};
use crate::errors::domain::{DomainError, PreconditionKind, RuleViolation};

#[test]
fn out_of_turn_and_unknown_players_are_rejected() {
    let mut game = make_game(&[&["3S", "4S"], &["5S", "6S"]]);
    let five = ids(&game, 2, &["5S"]);
    assert_eq!(
        game.play(2, &five).unwrap_err(),
        DomainError::OutOfTurn {
            expected: 1,
            actual: 2
        }
    );
    assert!(game.play(9, &five).unwrap_err().is_not_found());
    assert!(matches!(
        game.pass(2),
        Err(DomainError::OutOfTurn { .. })
    ));
}

#[test]
fn cards_must_be_held_once() {
    let mut game = make_game(&[&["3S", "4S"], &["5S", "6S"]]);
    let theirs = ids(&game, 2, &["5S"]);
    assert_eq!(
        game.play(1, &theirs).unwrap_err(),
        DomainError::CardsNotInHand { card_ids: theirs }
    );
    let three = ids(&game, 1, &["3S"]);
    let doubled = vec![three[0], three[0]];
    assert_eq!(
        game.play(1, &doubled).unwrap_err(),
        DomainError::CardsNotInHand {
            card_ids: vec![three[0]]
        }
    );
    assert_eq!(
        game.play(1, &[]).unwrap_err(),
        DomainError::Rule(RuleViolation::EmptyPlay)
    );
}

#[test]
fn rejected_play_leaves_game_untouched() {
    let mut game = make_game(&[&["4S", "9D"], &["3H", "5H"], &["6C", "7C"]]);
    game.play(1, &ids(&game, 1, &["4S"])).unwrap();
    let before = game.clone();

    let three = ids(&game, 2, &["3H"]);
    assert!(matches!(
        game.play(2, &three),
        Err(DomainError::Rule(RuleViolation::NotStronger { .. }))
    ));
    let pair = ids(&game, 2, &["3H", "5H"]);
    assert!(game.play(2, &pair).is_err());
    assert_eq!(game, before);

    game.play(2, &ids(&game, 2, &["5H"])).unwrap();
    assert_eq!(game.turn, 2);
}

#[test]
fn four_of_a_kind_toggles_revolution() {
    let mut game = make_game(&[
        &["7S", "7H", "7D", "7C", "KS"],
        &["3H", "4H"],
        &["5D", "6D"],
    ]);
    let outcome = game
        .play(1, &ids(&game, 1, &["7S", "7H", "7D", "7C"]))
        .unwrap();
    assert!(outcome.revolution_toggled);
    assert!(game.is_revolution);
    assert_eq!(game.field.last_hand().map(|h| h.kind), Some(HandKind::Pair));

    game.pass(2).unwrap();
    let fold = game.pass(3).unwrap();
    assert!(fold.field_cleared);
    assert_eq!(game.turn, 0);

    game.play(1, &ids(&game, 1, &["KS"])).unwrap();
    // Under revolution a 3 outranks a King.
    game.play(2, &ids(&game, 2, &["3H"])).unwrap();
    assert_eq!(game.field.last_hand().map(|h| h.strength), Some(-3));
}

#[test]
fn eight_clears_and_keeps_the_lead() {
    let mut game = make_game(&[&["8S", "3C"], &["4H", "5H"]]);
    let outcome = game.play(1, &ids(&game, 1, &["8S"])).unwrap();
    assert!(outcome.field_cleared);
    assert!(game.field.is_empty());
    assert_eq!(game.turn, 0);
    assert_eq!(game.pass_count, 0);
}

#[test]
fn going_out_on_an_eight_passes_the_lead() {
    let mut game = make_game(&[&["8S"], &["4H"], &["5H"]]);
    let outcome = game.play(1, &ids(&game, 1, &["8S"])).unwrap();
    assert_eq!(outcome.finished_rank, Some(1));
    assert!(outcome.field_cleared);
    assert_eq!(game.turn, 1);
}

#[test]
fn passing_folds_back_to_the_leader() {
    let mut game = make_game(&[&["3S", "4S"], &["5S", "6S"], &["7S", "9S"]]);
    assert_eq!(
        game.pass(1).unwrap_err(),
        DomainError::precondition(PreconditionKind::EmptyTable, "cannot pass when leading")
    );
    game.play(1, &ids(&game, 1, &["3S"])).unwrap();
    assert!(!game.pass(2).unwrap().field_cleared);
    assert_eq!(game.pass_count, 1);
    assert!(game.pass(3).unwrap().field_cleared);
    assert!(game.field.is_empty());
    assert_eq!(game.turn_user(), Some(1));
}

#[test]
fn jack_on_table_reverses_comparison() {
    let mut game = make_game(&[&["JS", "3S"], &["9H", "QH"]]);
    game.play(1, &ids(&game, 1, &["JS"])).unwrap();
    assert!(game.is_eleven_back());
    assert!(game.effective_revolution());

    assert!(matches!(
        game.play(2, &ids(&game, 2, &["QH"])),
        Err(DomainError::Rule(RuleViolation::NotStronger { .. }))
    ));
    game.play(2, &ids(&game, 2, &["9H"])).unwrap();
    assert!(!game.is_eleven_back());
    assert!(!game.effective_revolution());
}

#[test]
fn spade_three_beats_a_lone_joker() {
    let mut game = make_game(&[&["JK", "4D"], &["3S", "5D"]]);
    game.play(1, &ids(&game, 1, &["JK"])).unwrap();
    game.play(2, &ids(&game, 2, &["3S"])).unwrap();
    assert_eq!(game.field.cards().len(), 1);
}

#[test]
fn round_ends_with_distinct_ranks() {
    let mut game = make_game(&[&["3S"], &["4S", "9S"], &["5S", "6S"]]);
    let out = game.play(1, &ids(&game, 1, &["3S"])).unwrap();
    assert_eq!(out.finished_rank, Some(1));
    assert_eq!(game.finished_players, vec![1]);

    game.play(2, &ids(&game, 2, &["4S"])).unwrap();
    game.play(3, &ids(&game, 3, &["5S"])).unwrap();
    assert_eq!(game.turn_user(), Some(2));
    let last = game.play(2, &ids(&game, 2, &["9S"])).unwrap();
    assert!(last.round_finished);

    assert_eq!(game.phase, Phase::Finished);
    assert_eq!(game.final_ranks(), vec![(1, 1), (2, 2), (3, 3)]);
    let mut ranks: Vec<u8> = game.players.iter().map(|p| p.rank).collect();
    ranks.sort_unstable();
    assert_eq!(ranks, vec![1, 2, 3]);

    assert_eq!(
        game.pass(3).unwrap_err(),
        DomainError::precondition(PreconditionKind::RoundFinished, "the round is over")
    );
}

#[test]
fn champion_who_is_not_first_out_drops_to_last() {
    let mut game = make_game(&[
        &["KS", "QS"],
        &["3S"],
        &["4S", "5S"],
        &["6S", "7S"],
    ]);
    game.champion = Some(1);
    game.turn = 1;

    let out = game.play(2, &ids(&game, 2, &["3S"])).unwrap();
    assert_eq!(out.finished_rank, Some(1));
    assert_eq!(out.demoted, Some(1));
    assert!(game.players[0].hand.is_empty());
    assert_eq!(game.pending_demotion, Some(1));
    assert_eq!(game.turn_user(), Some(3));

    game.play(3, &ids(&game, 3, &["4S"])).unwrap();
    game.play(4, &ids(&game, 4, &["6S"])).unwrap();
    // Seats 1 and 2 are out, so the turn skips them.
    assert_eq!(game.turn_user(), Some(3));
    assert!(game.pass(3).unwrap().field_cleared);
    let last = game.play(4, &ids(&game, 4, &["7S"])).unwrap();
    assert!(last.round_finished);

    assert_eq!(game.finished_players, vec![2, 4, 3, 1]);
    assert_eq!(game.player(1).map(|p| p.rank), Some(4));
    assert_eq!(game.pending_demotion, None);
}

#[test]
fn champion_going_out_first_keeps_their_rank() {
    let mut game = make_game(&[&["3S"], &["4S", "5S"], &["6S", "7S"]]);
    game.champion = Some(1);
    let out = game.play(1, &ids(&game, 1, &["3S"])).unwrap();
    assert_eq!(out.demoted, None);
    assert_eq!(game.rank_of(1), Some(1));
}
