//! Command parsing integration tests

use indexmap::IndexMap;
use proptest::prelude::*;
use textgame_parser::parser::MAX_WORDS;
use textgame_parser::{Command, CommandParser, ParseError, Parser, Vocabulary, parse_command};

fn vocabulary() -> Vocabulary {
    let mut vocabulary = Vocabulary::with_defaults();
    let mut extra: IndexMap<&str, Vec<&str>> = IndexMap::new();
    extra.insert("lamp", vec!["lantern", "torch"]);
    extra.insert("look", vec!["l"]);
    vocabulary.update_synonyms(extra);
    vocabulary
}

// =============================================================================
// Synonyms
// =============================================================================

#[test]
fn verbs_and_nouns_are_canonical() {
    let vocab = vocabulary();
    assert_eq!(parse_command("get torch", &vocab), Ok(Command::new("take", "lamp")));
    assert_eq!(parse_command("walk n", &vocab), Ok(Command::new("go", "north")));
    assert_eq!(parse_command("attack troll", &vocab), Ok(Command::new("fight", "troll")));
    assert_eq!(parse_command("lock e", &vocab), Ok(Command::new("close", "east")));
    assert_eq!(parse_command("l", &vocab), Ok(Command::new("look", "")));
}

#[test]
fn whitespace_is_collapsed() {
    let vocab = vocabulary();
    assert_eq!(parse_command("  take \t lantern  ", &vocab), Ok(Command::new("take", "lamp")));
    assert_eq!(parse_command("   ", &vocab), Ok(Command::default()));
}

#[test]
fn lookups_are_case_sensitive() {
    let vocab = vocabulary();
    assert_eq!(parse_command("N", &vocab), Ok(Command::new("N", "")));
}

#[test]
fn removed_synonyms_pass_through() {
    let mut vocab = vocabulary();
    assert_eq!(vocab.remove_synonym("torch"), Some("lamp".to_string()));
    assert_eq!(parse_command("take torch", &vocab), Ok(Command::new("take", "torch")));
    assert_eq!(vocab.remove_synonym("torch"), None);
}

#[test]
fn later_synonyms_win() {
    let mut vocab = vocabulary();
    vocab.add_synonym("candle", "torch");
    assert_eq!(vocab.lookup("torch"), "candle");
    assert_eq!(vocab.lookup("lantern"), "lamp");
}

// =============================================================================
// Word Count
// =============================================================================

#[test]
fn three_words_are_too_many() {
    let vocab = vocabulary();
    assert_eq!(
        parse_command("take the lamp", &vocab),
        Err(ParseError::TooManyArguments(3))
    );
    let err = parse_command("put lamp in box", &vocab).unwrap_err();
    assert_eq!(err.to_string(), "expected at most 2 words, got 4");
}

#[test]
fn parser_trait_matches_the_function() {
    let vocab = vocabulary();
    for input in ["e", "take lantern", "a b c", ""] {
        assert_eq!(CommandParser.parse(input, &vocab), parse_command(input, &vocab));
    }
}

proptest! {
    #[test]
    fn word_count_decides_success(words in prop::collection::vec("[a-z]{1,8}", 0..6)) {
        let vocab = Vocabulary::new();
        let input = words.join(" ");
        let parsed = parse_command(&input, &vocab);
        if words.len() <= MAX_WORDS {
            let command = parsed.unwrap();
            prop_assert_eq!(command.verb, words.first().cloned().unwrap_or_default());
            prop_assert_eq!(command.noun, words.get(1).cloned().unwrap_or_default());
        } else {
            prop_assert_eq!(parsed, Err(ParseError::TooManyArguments(words.len())));
        }
    }
}
