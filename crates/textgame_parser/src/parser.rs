//! The three input parsers.
//!
//! Which parser runs is decided by the caller's current mode. None of them
//! fail on unknown words: deciding whether a verb or an answer key means
//! anything is up to whoever consumes the parsed value.

use log::debug;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::stdlib::{NO, YES};
use crate::vocabulary::Vocabulary;

/// Maximum number of words in a command.
pub const MAX_WORDS: usize = 2;

/// A parsed two-word command.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Command {
    /// Canonical verb, empty for blank input.
    pub verb: String,
    /// Canonical noun, empty if only a verb was given.
    pub noun: String,
}

impl Command {
    /// Creates a command.
    #[must_use]
    pub fn new(verb: impl Into<String>, noun: impl Into<String>) -> Self {
        Self {
            verb: verb.into(),
            noun: noun.into(),
        }
    }
}

/// Why a command could not be parsed.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// The input had more words than a command can take.
    #[error("expected at most {MAX_WORDS} words, got {0}")]
    TooManyArguments(usize),
}

/// A parsed answer to a yes/no question.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum YesNoAnswer {
    /// The player agreed.
    Yes,
    /// The player declined.
    No,
    /// Anything else.
    Invalid,
}

/// Splits `input` into verb and noun and resolves synonyms of both.
///
/// Blank input gives an empty verb and noun; a single word gives an empty noun.
///
/// # Errors
///
/// Returns [`ParseError::TooManyArguments`] for more than two words.
pub fn parse_command(input: &str, vocabulary: &Vocabulary) -> Result<Command, ParseError> {
    let words: Vec<&str> = input.split_whitespace().collect();
    let (verb, noun) = match words.as_slice() {
        [] => ("", ""),
        [verb] => (*verb, ""),
        [verb, noun] => (*verb, *noun),
        _ => {
            debug!("rejecting {input:?}: {} words", words.len());
            return Err(ParseError::TooManyArguments(words.len()));
        }
    };
    let command = Command::new(vocabulary.lookup(verb), vocabulary.lookup(noun));
    debug!("parsed {input:?} as {command:?}");
    Ok(command)
}

/// Maps an answer to [`YesNoAnswer`] after trimming and synonym lookup.
#[must_use]
pub fn parse_yes_no(input: &str, vocabulary: &Vocabulary) -> YesNoAnswer {
    match vocabulary.lookup(input.trim()) {
        YES => YesNoAnswer::Yes,
        NO => YesNoAnswer::No,
        _ => YesNoAnswer::Invalid,
    }
}

/// Returns the trimmed answer key. Whether it is valid depends on the question.
#[must_use]
pub fn parse_choice(input: &str) -> String {
    input.trim().to_string()
}

/// Turns raw input into a typed request.
pub trait Parser {
    /// What the parser produces.
    type Output;

    /// Parses one line of input.
    fn parse(&self, input: &str, vocabulary: &Vocabulary) -> Self::Output;
}

/// Parser for two-word commands.
#[derive(Clone, Copy, Debug, Default)]
pub struct CommandParser;

impl Parser for CommandParser {
    type Output = Result<Command, ParseError>;

    fn parse(&self, input: &str, vocabulary: &Vocabulary) -> Self::Output {
        parse_command(input, vocabulary)
    }
}

/// Parser for answers to yes/no questions.
#[derive(Clone, Copy, Debug, Default)]
pub struct YesNoParser;

impl Parser for YesNoParser {
    type Output = YesNoAnswer;

    fn parse(&self, input: &str, vocabulary: &Vocabulary) -> Self::Output {
        parse_yes_no(input, vocabulary)
    }
}

/// Parser for answers to multiple choice questions.
#[derive(Clone, Copy, Debug, Default)]
pub struct MultipleChoiceParser;

impl Parser for MultipleChoiceParser {
    type Output = String;

    fn parse(&self, input: &str, _vocabulary: &Vocabulary) -> Self::Output {
        parse_choice(input)
    }
}
