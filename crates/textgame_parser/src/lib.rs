//! Input parsing for textgame.
//!
//! Player input is parsed differently depending on what the game is waiting
//! for:
//!
//! ```text
//! "grab lamp"  ──CommandParser──────▶ Command { verb: "take", noun: "lamp" }
//! "y"          ──YesNoParser────────▶ YesNoAnswer::Yes
//! " 2 "        ──MultipleChoiceParser▶ "2"
//! ```
//!
//! # Modules
//!
//! - [`vocabulary`] - Synonym table consulted by the command and yes/no parsers
//! - [`parser`] - The three parsers and their output types
//! - [`stdlib`] - Default synonyms and canonical words

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod parser;
pub mod stdlib;
pub mod vocabulary;

pub use parser::{
    Command, CommandParser, MultipleChoiceParser, ParseError, Parser, YesNoAnswer, YesNoParser,
    parse_choice, parse_command, parse_yes_no,
};
pub use vocabulary::Vocabulary;
