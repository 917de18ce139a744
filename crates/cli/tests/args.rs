//! Integration tests for the CLI's mode-flag argument group: exactly one of `--find`,
//! `--cfind`, `--play`, `--botgame`, `--train`, `--test`, `--web` must be given per invocation.

use clap::Parser;
use connect_four_ai_cli::Cli;
use std::path::Path;

#[test]
fn rejects_zero_mode_flags() {
    assert!(Cli::try_parse_from(["connect-four-ai"]).is_err());
}

#[test]
fn rejects_two_mode_flags_together() {
    assert!(Cli::try_parse_from(["connect-four-ai", "--find", "--play"]).is_err());
}

#[test]
fn accepts_exactly_one_mode_flag() {
    let cli = Cli::try_parse_from(["connect-four-ai", "--find"]).unwrap();
    assert!(cli.find);
    assert!(!cli.play);
}

#[test]
fn short_flags_select_the_same_modes_as_their_long_forms() {
    let cli = Cli::try_parse_from(["connect-four-ai", "-b"]).unwrap();
    assert!(cli.botgame);
}

#[test]
fn train_is_also_selectable_via_its_tr_alias() {
    let cli = Cli::try_parse_from(["connect-four-ai", "--tr"]).unwrap();
    assert!(cli.train);
}

#[test]
fn test_mode_carries_its_file_argument() {
    let cli = Cli::try_parse_from(["connect-four-ai", "--test", "cases.txt"]).unwrap();
    assert_eq!(cli.test.as_deref(), Some(Path::new("cases.txt")));
}

#[test]
fn book_and_warmup_paths_are_accepted_alongside_any_mode() {
    let cli = Cli::try_parse_from([
        "connect-four-ai",
        "--web",
        "--book",
        "7x6.book",
        "--warmup",
        "warmup.book",
        "--port",
        "9000",
    ])
    .unwrap();
    assert!(cli.web);
    assert_eq!(cli.book.as_deref(), Some(Path::new("7x6.book")));
    assert_eq!(cli.warmup.as_deref(), Some(Path::new("warmup.book")));
    assert_eq!(cli.port, Some(9000));
}
