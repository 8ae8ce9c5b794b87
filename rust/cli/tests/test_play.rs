//! The interactive root command driven with scripted input.

mod helpers;

use helpers::{run_cli, saved_game};

#[test]
fn new_game_prints_header_and_quits() {
    let dir = tempfile::tempdir().unwrap();
    let save_dir = dir.path().to_string_lossy().into_owned();
    let res = run_cli(&["--seed", "42", "--save-dir", &save_dir], "q\nq\n");

    assert_eq!(res.exit_code, 0, "stderr={}", res.stderr);
    assert!(res.stdout.contains("======== Pot-Limit Sampo Hi-Lo ========"));
    assert!(res.stdout.contains("Difficulty: medium | Seed: 42"));
    assert!(res.stdout.contains("Thanks for playing!"));
}

#[test]
fn same_seed_same_table() {
    let dir = tempfile::tempdir().unwrap();
    let save_dir = dir.path().to_string_lossy().into_owned();
    let args = ["--seed", "1234", "--rule", "nlh", "--save-dir", &save_dir];
    let first = run_cli(&args, "q\nq\n");
    let second = run_cli(&args, "q\nq\n");
    assert_eq!(first.exit_code, 0);
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn rules_file_selects_the_variant() {
    let dir = tempfile::tempdir().unwrap();
    let rules = dir.path().join("plo.toml");
    std::fs::write(
        &rules,
        r#"
name = "Pot-Limit Omaha"
abbreviation = "PLO"
betting_limit = "pot_limit"

[hole_cards]
count = 4
must_use = 2

[community_cards]
count = 5
"#,
    )
    .unwrap();
    let save_dir = dir.path().to_string_lossy().into_owned();
    let rule = rules.to_string_lossy().into_owned();
    let res = run_cli(&["--rule", &rule, "--seed", "3", "--save-dir", &save_dir], "q\nq\n");
    assert_eq!(res.exit_code, 0, "stderr={}", res.stderr);
    assert!(res.stdout.contains("======== Pot-Limit Omaha ========"));
}

#[test]
fn load_resumes_the_newest_save() {
    let dir = tempfile::tempdir().unwrap();
    saved_game(dir.path(), "resume");
    let save_dir = dir.path().to_string_lossy().into_owned();

    let res = run_cli(&["--load", "--save-dir", &save_dir], "q\nq\n");
    assert_eq!(res.exit_code, 0, "stderr={}", res.stderr);
    assert!(res.stdout.contains("Game loaded successfully! Starting new hand with Hand #1"));
    assert!(res.stdout.contains("Players: 6, Total chips in play: 60,000"));
}

#[test]
fn load_file_accepts_a_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = saved_game(dir.path(), "by_path");
    let other = tempfile::tempdir().unwrap();
    let save_dir = other.path().to_string_lossy().into_owned();
    let file = path.to_string_lossy().into_owned();

    let res = run_cli(&["--load-file", &file, "--save-dir", &save_dir], "q\nq\n");
    assert_eq!(res.exit_code, 0, "stderr={}", res.stderr);
    assert!(res.stdout.contains("Game loaded successfully!"));
}
