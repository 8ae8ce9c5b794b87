use pls7_engine::cards::{Card, Rank as R, Suit as S};
use pls7_engine::game::{Game, GameSetup, HandResult, Phase};
use pls7_engine::player::{PlayerAction as A, PlayerStatus};
use pls7_engine::rules::GameRules;

fn c(r: R, s: S) -> Card {
    Card::new(r, s)
}

/// Deals and passes every remaining street with checks, then stages the
/// given hands and board and goes to showdown.
fn check_down_and_show(game: &mut Game, hands: Vec<Vec<Card>>, board: Vec<Card>) -> Vec<HandResult> {
    loop {
        game.advance().unwrap();
        if game.phase() == Phase::River {
            game.prepare_new_betting_round();
            check_around(game);
            break;
        }
        game.prepare_new_betting_round();
        check_around(game);
    }
    for (seat, hand) in hands.into_iter().enumerate() {
        game.players_mut()[seat].hand = hand;
    }
    game.set_community_cards(board);
    game.advance().unwrap().expect("showdown awards")
}

fn check_around(game: &mut Game) {
    while !game.is_betting_round_over() {
        let seat = game.current_turn_pos();
        game.process_action(seat, A::Check).unwrap();
        game.advance_turn();
    }
}

fn limp_heads_up(rules: GameRules) -> Game {
    let mut game = Game::new(GameSetup::humans(&["YOU", "CPU 1"], 1_000, 50, 100, rules, 21)).unwrap();
    game.start_new_hand();
    game.prepare_new_betting_round();
    // heads-up: seat 0 deals and posts the big blind, seat 1 limps in
    game.process_action(1, A::Call).unwrap();
    game.advance_turn();
    game.process_action(0, A::Check).unwrap();
    assert!(game.is_betting_round_over());
    game
}

#[test]
fn hi_lo_pot_splits_between_high_and_low() {
    let mut game = limp_heads_up(GameRules::pot_limit_sampo_hi_lo());
    let results = check_down_and_show(
        &mut game,
        vec![
            vec![c(R::Ace, S::Spades), c(R::Ace, S::Hearts), c(R::King, S::Clubs)],
            vec![c(R::Ace, S::Diamonds), c(R::Two, S::Clubs), c(R::Three, S::Diamonds)],
        ],
        vec![
            c(R::Four, S::Spades),
            c(R::Six, S::Hearts),
            c(R::Nine, S::Clubs),
            c(R::Jack, S::Diamonds),
            c(R::Queen, S::Spades),
        ],
    );

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].seat, 0);
    assert_eq!(results[0].amount_won, 100);
    assert_eq!(results[0].hand_desc, "Pair of Aces");
    assert_eq!(results[1].seat, 1);
    assert_eq!(results[1].amount_won, 100);
    assert_eq!(results[1].hand_desc, "6-4-3-2-A low");
    assert_eq!(game.pot(), 0);
    assert_eq!(game.total_chips_in_play(), 2_000);
}

#[test]
fn high_hand_scoops_without_a_qualifying_low() {
    let mut game = limp_heads_up(GameRules::pot_limit_sampo_hi_lo());
    let results = check_down_and_show(
        &mut game,
        vec![
            vec![c(R::Ace, S::Spades), c(R::Ace, S::Hearts), c(R::King, S::Clubs)],
            vec![c(R::Ace, S::Diamonds), c(R::Two, S::Clubs), c(R::Three, S::Diamonds)],
        ],
        vec![
            c(R::Eight, S::Spades),
            c(R::Nine, S::Hearts),
            c(R::Ten, S::Clubs),
            c(R::Jack, S::Diamonds),
            c(R::King, S::Spades),
        ],
    );

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].seat, 0);
    assert_eq!(results[0].amount_won, 200);
    assert_eq!(game.players()[0].chips, 1_100);
    assert_eq!(game.players()[1].chips, 900);
}

#[test]
fn tied_hands_split_the_pot() {
    let mut game = limp_heads_up(GameRules::no_limit_holdem());
    let results = check_down_and_show(
        &mut game,
        vec![
            vec![c(R::Two, S::Clubs), c(R::Three, S::Diamonds)],
            vec![c(R::Two, S::Hearts), c(R::Four, S::Diamonds)],
        ],
        vec![
            c(R::Ace, S::Spades),
            c(R::King, S::Spades),
            c(R::Queen, S::Spades),
            c(R::Jack, S::Spades),
            c(R::Ten, S::Spades),
        ],
    );
    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r.amount_won == 100));
    assert!(results.iter().all(|r| r.hand_desc == "Royal Flush"));
}

#[test]
fn side_pot_goes_to_the_best_hand_that_covered_it() {
    let mut game = Game::new(GameSetup::humans(
        &["short", "mid", "big"],
        1_000,
        50,
        100,
        GameRules::no_limit_holdem(),
        31,
    ))
    .unwrap();
    game.players_mut()[0].chips = 500;
    game.start_new_hand();
    game.prepare_new_betting_round();

    // dealer 0 shoves 500, small blind 1 re-raises all-in, big blind 2 calls all-in
    game.process_action(0, A::Raise(500)).unwrap();
    game.advance_turn();
    game.process_action(1, A::Raise(1_000)).unwrap();
    game.advance_turn();
    game.process_action(2, A::Call).unwrap();
    assert!(game.is_betting_round_over());
    assert!(game.players().iter().all(|p| p.status == PlayerStatus::AllIn));
    assert_eq!(game.pot(), 2_500);

    let hands = vec![
        vec![c(R::Ace, S::Spades), c(R::Ace, S::Hearts)],
        vec![c(R::King, S::Spades), c(R::King, S::Hearts)],
        vec![c(R::Queen, S::Spades), c(R::Queen, S::Hearts)],
    ];
    let board = vec![
        c(R::Two, S::Clubs),
        c(R::Seven, S::Diamonds),
        c(R::Nine, S::Spades),
        c(R::Jack, S::Hearts),
        c(R::Four, S::Clubs),
    ];
    for _ in 0..3 {
        game.advance().unwrap();
        game.prepare_new_betting_round();
        assert!(game.is_betting_round_over());
    }
    assert_eq!(game.phase(), Phase::River);
    assert_eq!(game.community_cards().len(), 5);
    for (seat, hand) in hands.into_iter().enumerate() {
        game.players_mut()[seat].hand = hand;
    }
    game.set_community_cards(board);
    let results = game.advance().unwrap().expect("showdown awards");

    // side pot first, then the main pot
    assert_eq!(results.len(), 2);
    assert_eq!((results[0].seat, results[0].amount_won), (1, 1_000));
    assert_eq!((results[1].seat, results[1].amount_won), (0, 1_500));

    let messages = game.cleanup_hand();
    assert_eq!(messages, vec!["big has been eliminated.".to_string()]);
    assert_eq!(game.players()[0].chips, 1_500);
    assert_eq!(game.players()[1].chips, 1_000);
    assert!(game.players()[2].is_eliminated());
}

#[test]
fn busted_player_is_eliminated_and_game_ends() {
    let mut game =
        Game::new(GameSetup::humans(&["YOU", "CPU 1"], 1_000, 50, 100, GameRules::no_limit_holdem(), 13)).unwrap();
    game.start_new_hand();
    game.prepare_new_betting_round();
    game.process_action(1, A::Raise(1_000)).unwrap();
    game.advance_turn();
    game.process_action(0, A::Call).unwrap();
    assert!(game.is_betting_round_over());

    for _ in 0..3 {
        game.advance().unwrap();
        game.prepare_new_betting_round();
    }
    game.players_mut()[0].hand = vec![c(R::Ace, S::Spades), c(R::Ace, S::Hearts)];
    game.players_mut()[1].hand = vec![c(R::Seven, S::Clubs), c(R::Two, S::Diamonds)];
    game.set_community_cards(vec![
        c(R::King, S::Spades),
        c(R::Nine, S::Diamonds),
        c(R::Five, S::Clubs),
        c(R::Four, S::Hearts),
        c(R::Jack, S::Spades),
    ]);
    let results = game.advance().unwrap().expect("showdown awards");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].amount_won, 2_000);

    let messages = game.cleanup_hand();
    assert_eq!(messages, vec!["CPU 1 has been eliminated.".to_string()]);
    assert!(game.is_game_over());
    assert_eq!(game.start_new_hand(), None);
    assert_eq!(game.phase(), Phase::HandOver);
}
