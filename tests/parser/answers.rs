//! Answer parsing integration tests

use textgame_parser::{
    MultipleChoiceParser, Parser, Vocabulary, YesNoAnswer, YesNoParser, parse_choice, parse_yes_no,
};

#[test]
fn yes_and_no_with_synonyms() {
    let vocab = Vocabulary::with_defaults();
    assert_eq!(parse_yes_no("yes", &vocab), YesNoAnswer::Yes);
    assert_eq!(parse_yes_no(" y ", &vocab), YesNoAnswer::Yes);
    assert_eq!(parse_yes_no("no", &vocab), YesNoAnswer::No);
    assert_eq!(parse_yes_no("maybe", &vocab), YesNoAnswer::Invalid);
    assert_eq!(parse_yes_no("", &vocab), YesNoAnswer::Invalid);
}

#[test]
fn custom_answers() {
    let mut vocab = Vocabulary::new();
    assert_eq!(parse_yes_no("y", &vocab), YesNoAnswer::Invalid);
    vocab.add_synonym("yes", "sure");
    vocab.add_synonym("no", "nope");
    assert_eq!(YesNoParser.parse("sure", &vocab), YesNoAnswer::Yes);
    assert_eq!(YesNoParser.parse("nope", &vocab), YesNoAnswer::No);
}

#[test]
fn choices_are_trimmed_keys() {
    let vocab = Vocabulary::with_defaults();
    assert_eq!(parse_choice(" 2\n"), "2");
    assert_eq!(parse_choice("bread"), "bread");
    assert_eq!(MultipleChoiceParser.parse("  3 ", &vocab), "3");
}
