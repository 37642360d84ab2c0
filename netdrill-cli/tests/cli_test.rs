use netdrill_cli::{
    run, Command, Config, Difficulty, MemoryScoreStore, Mode, ScoreBoard, ScoreKey, DRILLS,
};
use pretty_assertions::assert_eq;
use std::io::Cursor;

fn seeded() -> Config {
    Config {
        seed: Some(42),
        ..Config::default()
    }
}

fn play(drill: &str, mode: Mode) -> Command {
    Command::Play {
        drill: drill.to_string(),
        mode,
        difficulty: Difficulty::Standard,
    }
}

fn run_with(command: &Command, config: &Config, board: &ScoreBoard<MemoryScoreStore>, input: &str) -> String {
    let mut output = Vec::new();
    run(command, config, board, Cursor::new(input.to_string()), &mut output).unwrap();
    String::from_utf8(output).unwrap()
}

#[test]
fn test_scored_run_is_recorded() {
    let board = ScoreBoard::new(MemoryScoreStore::new(), 10);
    let output = run_with(&play("next-hop", Mode::Classic), &seeded(), &board, "q\nana\n");

    let key = ScoreKey::new("next-hop", Mode::Classic, Difficulty::Standard);
    let entries = board.top(&key).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].player, "ana");
    assert_eq!(entries[0].score, 0);
    assert!(output.contains("#1 on the next-hop/classic/standard board!"));
}

#[test]
fn test_practice_is_never_recorded() {
    let board = ScoreBoard::new(MemoryScoreStore::new(), 10);
    run_with(&play("cidr-flash", Mode::Practice), &seeded(), &board, "q\n");
    assert!(board.boards(None).unwrap().is_empty());
}

#[test]
fn test_same_seed_same_questions() {
    let first = run_with(
        &play("subnet-breakdown", Mode::Classic),
        &seeded(),
        &ScoreBoard::new(MemoryScoreStore::new(), 10),
        "q\n",
    );
    let second = run_with(
        &play("subnet-breakdown", Mode::Classic),
        &seeded(),
        &ScoreBoard::new(MemoryScoreStore::new(), 10),
        "q\n",
    );
    assert_eq!(first, second);
    assert!(first.contains("Break down "));
}

#[test]
fn test_reset_needs_confirmation() {
    let board = ScoreBoard::new(MemoryScoreStore::new(), 10);
    let key = ScoreKey::new("ieee802", Mode::Streak, Difficulty::Expert);
    board.record(&key, "bo", 300).unwrap();

    let reset = Command::Reset {
        drill: "ieee802".to_string(),
    };
    let output = run_with(&reset, &seeded(), &board, "reset\n");
    assert!(output.contains("Canceled."));
    assert_eq!(board.top(&key).unwrap().len(), 1);

    let output = run_with(&reset, &seeded(), &board, "RESET\n");
    assert!(output.contains("Cleared 1 board(s) for ieee802."));
    assert!(board.top(&key).unwrap().is_empty());
}

#[test]
fn test_scores_listing() {
    let board = ScoreBoard::new(MemoryScoreStore::new(), 10);
    let scores = Command::Scores { drill: None };
    assert!(run_with(&scores, &seeded(), &board, "").contains("No high scores yet."));

    let key = ScoreKey::new("magic-number", Mode::Speedrun, Difficulty::Casual);
    board.record(&key, "ana", 450).unwrap();
    board.record(&key, "bo", 900).unwrap();

    let output = run_with(&scores, &seeded(), &board, "");
    assert!(output.contains("== magic-number/speedrun/casual =="));
    let bo = output.find("bo").unwrap();
    let ana = output.find("ana").unwrap();
    assert!(bo < ana, "higher score listed first:\n{}", output);
}

#[test]
fn test_list_shows_every_drill() {
    let board = ScoreBoard::new(MemoryScoreStore::new(), 10);
    let output = run_with(&Command::List, &seeded(), &board, "");
    for (id, _) in DRILLS {
        assert!(output.contains(id), "{} missing", id);
    }
}
