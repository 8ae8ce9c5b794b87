use pls7_engine::game::{ActionKind, BlindEvent, Game, GameSetup, Phase};
use pls7_engine::player::{PlayerAction, PlayerStatus};
use pls7_engine::rules::GameRules;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

fn random_action(game: &Game, seat: usize, rng: &mut ChaCha20Rng) -> PlayerAction {
    let ctx = game.decision_context(seat);
    let roll: f64 = rng.random();
    if ctx.to_call() > 0 && roll < 0.15 {
        PlayerAction::Fold
    } else if roll < 0.75 || !ctx.can_raise() {
        PlayerAction::Call
    } else {
        let amount = rng.random_range(ctx.min_raise_to..=ctx.max_raise_to);
        if ctx.bet_to_call == 0 {
            PlayerAction::Bet(amount)
        } else {
            PlayerAction::Raise(amount)
        }
    }
}

/// Plays one hand with random legal actions, checking chip conservation
/// after every action and the round-length bound after every street.
fn play_random_hand(game: &mut Game, rng: &mut ChaCha20Rng) {
    let total = game.total_chips_in_play();
    let seated = game.players().len() as u32;
    game.start_new_hand();
    assert_eq!(game.total_chips_in_play(), total);

    while game.phase().is_betting() {
        if game.count_non_folded_players() <= 1 {
            break;
        }
        game.prepare_new_betting_round();
        let (mut actions, mut raises) = (0u32, 0u32);
        while !game.is_betting_round_over() {
            let seat = game.current_turn_pos();
            if !game.current_player().is_active() {
                game.advance_turn();
                continue;
            }
            let action = random_action(game, seat, rng);
            let ev = game.process_action(seat, action).unwrap();
            if matches!(ev.action, ActionKind::Bet | ActionKind::Raise) {
                raises += 1;
            }
            actions += 1;
            assert_eq!(game.total_chips_in_play(), total);
            assert!(actions <= seated * (1 + raises));
            game.advance_turn();
        }
        game.advance().unwrap();
    }
    if game.count_non_folded_players() <= 1 {
        game.award_pot_to_last_player();
    }
    game.cleanup_hand();
    assert_eq!(game.pot(), 0);
    assert_eq!(game.total_chips_in_play(), total);
}

fn fold_to_big_blind(game: &mut Game) {
    game.start_new_hand();
    game.prepare_new_betting_round();
    while !game.is_betting_round_over() {
        let seat = game.current_turn_pos();
        let action = if game.to_call(seat) > 0 {
            PlayerAction::Fold
        } else {
            PlayerAction::Check
        };
        game.process_action(seat, action).unwrap();
        game.advance_turn();
    }
    let results = game.award_pot_to_last_player();
    assert_eq!(results.len(), 1);
    game.cleanup_hand();
}

#[test]
fn chips_are_conserved_across_sessions() {
    let presets = [
        GameRules::no_limit_holdem(),
        GameRules::pot_limit_sampo(),
        GameRules::pot_limit_sampo_hi_lo(),
    ];
    for (i, rules) in presets.into_iter().enumerate() {
        let mut setup = GameSetup::humans(&["A", "B", "C", "D"], 2_000, 50, 100, rules, 100 + i as u64);
        setup.blind_up_interval = 5;
        let mut game = Game::new(setup).unwrap();
        let mut rng = ChaCha20Rng::seed_from_u64(7 + i as u64);
        for _ in 0..300 {
            if game.is_game_over() {
                break;
            }
            play_random_hand(&mut game, &mut rng);
            for p in game.players() {
                if p.is_eliminated() {
                    assert_eq!(p.chips, 0);
                }
            }
        }
        assert_eq!(game.total_chips_in_play(), 8_000);
    }
}

#[test]
fn six_handed_sampo_runs_many_hands() {
    let setup = GameSetup::humans(
        &["YOU", "CPU 1", "CPU 2", "CPU 3", "CPU 4", "CPU 5"],
        10_000,
        100,
        200,
        GameRules::pot_limit_sampo_hi_lo(),
        5,
    );
    let mut game = Game::new(setup).unwrap();
    let mut rng = ChaCha20Rng::seed_from_u64(5);
    for _ in 0..100 {
        if game.is_game_over() {
            break;
        }
        play_random_hand(&mut game, &mut rng);
    }
    assert_eq!(game.total_chips_in_play(), 60_000);
}

#[test]
fn button_rotates_each_hand() {
    let mut game =
        Game::new(GameSetup::humans(&["A", "B", "C"], 10_000, 50, 100, GameRules::no_limit_holdem(), 3)).unwrap();
    let mut dealers = Vec::new();
    for _ in 0..4 {
        fold_to_big_blind(&mut game);
        dealers.push(game.dealer_pos());
    }
    assert_eq!(dealers, vec![0, 1, 2, 0]);
    assert_eq!(game.hand_count(), 4);
    assert_eq!(game.phase(), Phase::HandOver);
}

#[test]
fn blinds_double_on_the_interval() {
    let mut setup = GameSetup::humans(&["A", "B", "C"], 10_000, 50, 100, GameRules::no_limit_holdem(), 9);
    setup.blind_up_interval = 2;
    let mut game = Game::new(setup).unwrap();

    let mut events = Vec::new();
    for _ in 0..5 {
        events.push(game.start_new_hand());
        game.prepare_new_betting_round();
        while !game.is_betting_round_over() {
            let seat = game.current_turn_pos();
            game.process_action(seat, PlayerAction::Fold).unwrap();
            game.advance_turn();
        }
        game.award_pot_to_last_player();
        game.cleanup_hand();
    }
    assert_eq!(
        events,
        vec![
            None,
            None,
            Some(BlindEvent {
                small_blind: 100,
                big_blind: 200
            }),
            None,
            Some(BlindEvent {
                small_blind: 200,
                big_blind: 400
            }),
        ]
    );
    assert_eq!(game.big_blind(), 400);
}

#[test]
fn uncontested_pot_goes_to_last_player() {
    let mut game =
        Game::new(GameSetup::humans(&["A", "B", "C"], 1_000, 50, 100, GameRules::no_limit_holdem(), 4)).unwrap();
    fold_to_big_blind(&mut game);
    assert_eq!(game.players()[2].chips, 1_050);
    assert_eq!(game.players()[1].chips, 950);
    assert_eq!(game.players()[0].chips, 1_000);
    assert_eq!(game.players()[0].last_action, "Fold");
}

#[test]
fn all_folded_but_one_ends_the_round_early() {
    let mut game =
        Game::new(GameSetup::humans(&["A", "B", "C", "D"], 1_000, 50, 100, GameRules::no_limit_holdem(), 4)).unwrap();
    game.start_new_hand();
    game.prepare_new_betting_round();
    game.process_action(3, PlayerAction::Raise(300)).unwrap();
    game.advance_turn();
    game.process_action(0, PlayerAction::Fold).unwrap();
    game.advance_turn();
    assert!(!game.is_betting_round_over());
    game.process_action(1, PlayerAction::Fold).unwrap();
    game.advance_turn();
    game.process_action(2, PlayerAction::Fold).unwrap();
    assert!(game.is_betting_round_over());
    assert_eq!(game.count_non_folded_players(), 1);
}

#[test]
fn raise_reopens_action_for_the_big_blind() {
    let mut game =
        Game::new(GameSetup::humans(&["A", "B", "C"], 5_000, 50, 100, GameRules::no_limit_holdem(), 8)).unwrap();
    game.start_new_hand();
    game.prepare_new_betting_round();
    game.process_action(0, PlayerAction::Call).unwrap();
    game.advance_turn();
    game.process_action(1, PlayerAction::Call).unwrap();
    game.advance_turn();
    game.process_action(2, PlayerAction::Raise(400)).unwrap();
    assert!(!game.is_betting_round_over());
    assert_eq!(game.action_closer_pos(), 1);
    game.advance_turn();
    game.process_action(0, PlayerAction::Call).unwrap();
    game.advance_turn();
    game.process_action(1, PlayerAction::Call).unwrap();
    assert!(game.is_betting_round_over());
    assert_eq!(game.pot(), 1_200);
    assert!(game.players().iter().all(|p| p.status == PlayerStatus::Playing));
}

#[test]
fn game_without_community_cards_goes_straight_to_showdown() {
    let mut rules = GameRules::no_limit_holdem();
    rules.hole_cards.count = 5;
    rules.community_cards.count = 0;
    let mut game = Game::new(GameSetup::humans(&["A", "B"], 1_000, 50, 100, rules, 2)).unwrap();
    game.start_new_hand();
    game.prepare_new_betting_round();
    while !game.is_betting_round_over() {
        let seat = game.current_turn_pos();
        game.process_action(seat, PlayerAction::Call).unwrap();
        game.advance_turn();
    }
    let results = game.advance().unwrap().expect("showdown");
    assert_eq!(game.phase(), Phase::Showdown);
    let paid: u32 = results.iter().map(|r| r.amount_won).sum();
    assert_eq!(paid, 200);
    game.cleanup_hand();
    assert_eq!(game.total_chips_in_play(), 2_000);
}
