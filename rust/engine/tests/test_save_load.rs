use std::fs;

use pls7_engine::errors::{GameError, SaveError};
use pls7_engine::game::{Game, GameSetup, Phase, SeatSetup};
use pls7_engine::player::PlayerAction;
use pls7_engine::profile::AiProfile;
use pls7_engine::rules::GameRules;
use pls7_engine::save::{load_game_file, SaveManager};

fn profile() -> AiProfile {
    AiProfile {
        name: "Tight-Aggressive".into(),
        play_hand_threshold: 0.4,
        raise_hand_threshold: 0.7,
        bluffing_frequency: 0.05,
        aggression_factor: 0.3,
        min_raise_multiplier: 0.4,
        max_raise_multiplier: 0.8,
    }
}

fn new_game() -> Game {
    let mut setup = GameSetup::humans(&["YOU", "CPU 1", "CPU 2"], 5_000, 50, 100, GameRules::pot_limit_sampo_hi_lo(), 77);
    for seat in &mut setup.players[1..] {
        *seat = SeatSetup {
            name: seat.name.clone(),
            is_cpu: true,
            profile: Some(profile()),
        };
    }
    setup.blind_up_interval = 3;
    Game::new(setup).unwrap()
}

fn play_fold_hand(game: &mut Game) {
    game.start_new_hand();
    game.prepare_new_betting_round();
    while !game.is_betting_round_over() {
        let seat = game.current_turn_pos();
        game.process_action(seat, PlayerAction::Fold).unwrap();
        game.advance_turn();
    }
    game.award_pot_to_last_player();
    game.cleanup_hand();
}

#[test]
fn snapshot_is_refused_mid_hand() {
    let mut game = new_game();
    game.start_new_hand();
    assert_eq!(game.snapshot().unwrap_err(), GameError::SnapshotMidHand);

    let dir = tempfile::tempdir().unwrap();
    let manager = SaveManager::new(dir.path()).unwrap();
    let err = manager.save_game(&game, "mid").unwrap_err();
    assert!(matches!(err, SaveError::Game(GameError::SnapshotMidHand)));
}

#[test]
fn saved_game_resumes_at_hand_over_with_same_stream() {
    let mut game = new_game();
    play_fold_hand(&mut game);
    play_fold_hand(&mut game);

    let dir = tempfile::tempdir().unwrap();
    let manager = SaveManager::new(dir.path().join("saves")).unwrap();
    let path = manager.save_game(&game, "session").unwrap();
    assert!(path.ends_with("session.json"));

    let mut restored = manager.load_game("session").unwrap();
    assert_eq!(restored.phase(), Phase::HandOver);
    assert_eq!(restored.hand_count(), 2);
    assert_eq!(restored.dealer_pos(), game.dealer_pos());
    assert_eq!(restored.rules(), game.rules());
    assert_eq!(restored.blind_up_interval(), 3);
    for (a, b) in game.players().iter().zip(restored.players()) {
        assert_eq!(a.name, b.name);
        assert_eq!(a.chips, b.chips);
        assert_eq!(a.is_cpu, b.is_cpu);
        assert_eq!(a.profile, b.profile);
    }

    game.start_new_hand();
    restored.start_new_hand();
    assert_eq!(game.dealer_pos(), restored.dealer_pos());
    for (a, b) in game.players().iter().zip(restored.players()) {
        assert_eq!(a.hand, b.hand);
    }
}

#[test]
fn empty_name_gets_a_timestamp_and_loads_as_newest() {
    let mut game = new_game();
    play_fold_hand(&mut game);
    let dir = tempfile::tempdir().unwrap();
    let manager = SaveManager::new(dir.path()).unwrap();
    let path = manager.save_game(&game, "").unwrap();
    let name = path.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("save_"));
    assert!(name.ends_with(".json"));

    let restored = manager.load_game("").unwrap();
    assert_eq!(restored.hand_count(), 1);
}

#[test]
fn list_validate_and_delete() {
    let mut game = new_game();
    play_fold_hand(&mut game);
    let dir = tempfile::tempdir().unwrap();
    let manager = SaveManager::new(dir.path()).unwrap();
    manager.save_game(&game, "good").unwrap();
    fs::write(dir.path().join("broken.json"), "{ not json").unwrap();
    fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

    let saves = manager.list_saves().unwrap();
    assert_eq!(saves.len(), 2);
    let good = saves.iter().find(|s| s.filename == "good.json").unwrap();
    assert_eq!(good.metadata.as_ref().map(|m| m.hand_count), Some(1));
    let broken = saves.iter().find(|s| s.filename == "broken.json").unwrap();
    assert!(broken.metadata.is_none());

    assert!(manager.validate_save_file("good").is_ok());
    assert!(matches!(
        manager.validate_save_file("broken"),
        Err(SaveError::Json(_))
    ));
    assert!(matches!(
        manager.validate_save_file("missing"),
        Err(SaveError::NotFound(_))
    ));

    manager.delete_save("good.json").unwrap();
    assert!(matches!(
        manager.delete_save("good"),
        Err(SaveError::NotFound(_))
    ));
    assert_eq!(manager.list_saves().unwrap().len(), 1);
}

#[test]
fn save_names_cannot_escape_the_save_directory() {
    let root = tempfile::tempdir().unwrap();
    let outside = root.path().join("outside.json");
    fs::write(&outside, "{}").unwrap();
    let manager = SaveManager::new(root.path().join("saves")).unwrap();

    assert!(matches!(
        manager.delete_save("../outside"),
        Err(SaveError::NotFound(_))
    ));
    assert!(matches!(
        manager.validate_save_file("../outside.json"),
        Err(SaveError::NotFound(_))
    ));
    assert!(manager.load_game("../outside").is_err());
    assert!(outside.exists());
}

#[test]
fn unsupported_version_is_rejected() {
    let mut game = new_game();
    play_fold_hand(&mut game);
    let mut snapshot = game.snapshot().unwrap();
    snapshot.version = "2.0".into();
    assert!(matches!(
        Game::restore(snapshot),
        Err(SaveError::UnsupportedVersion(v)) if v == "2.0"
    ));
}

#[test]
fn tampered_chip_counts_are_rejected() {
    let mut game = new_game();
    play_fold_hand(&mut game);
    let mut snapshot = game.snapshot().unwrap();
    snapshot.players[0].chips += 1;
    assert!(matches!(Game::restore(snapshot), Err(SaveError::Invalid(_))));
}

#[test]
fn load_from_explicit_path() {
    let mut game = new_game();
    play_fold_hand(&mut game);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("manual.json");
    fs::write(&path, game.snapshot().unwrap().to_json().unwrap()).unwrap();
    let restored = load_game_file(&path).unwrap();
    assert_eq!(restored.total_chips_in_play(), 15_000);

    assert!(matches!(
        load_game_file(&dir.path().join("nope.json")),
        Err(SaveError::NotFound(_))
    ));
}
