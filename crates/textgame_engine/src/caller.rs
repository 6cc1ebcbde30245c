//! The mode machine.
//!
//! The caller holds the current [`Mode`] and one [`ModeHandler`] per mode.
//! Each input goes to the handler of the current mode. The kind of the reply
//! names the next mode, which is entered only if the input was handled
//! successfully; the new mode's handler then receives the whole response so
//! it can answer the question on the next input.
//!
//! ```text
//!            YesNoQuestion                 answer
//!  Normal ───────────────────▶ YesNo ─────────────────▶ Normal
//!    │                           │ ▲
//!    │ MultipleChoiceQuestion    │ └── nested question / invalid answer
//!    ▼                           │
//!  MultipleChoice ◀──────────────┘
//! ```

use std::collections::HashMap;
use std::fmt;

use log::{debug, info};
use textgame_foundation::{Error, ErrorKind, Message, Result};
use textgame_parser::{CommandParser, MultipleChoiceParser, Parser, YesNoParser};

use crate::interpreter::{
    CommandInterpreter, Interpreter, MultipleChoiceInterpreter, YesNoInterpreter,
};
use crate::registry::Registries;
use crate::reply::{ReplyKind, Response};
use crate::state::State;

/// What the game is waiting for.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    /// A command.
    #[default]
    Normal,
    /// An answer to a yes/no question.
    YesNo,
    /// An answer to a multiple choice question.
    MultipleChoice,
    /// Input for a mode registered by the host.
    Custom(String),
}

impl From<ReplyKind> for Mode {
    fn from(kind: ReplyKind) -> Self {
        match kind {
            ReplyKind::Message => Self::Normal,
            ReplyKind::YesNo => Self::YesNo,
            ReplyKind::MultipleChoice => Self::MultipleChoice,
            ReplyKind::Custom(name) => Self::Custom(name),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => f.write_str("normal"),
            Self::YesNo => f.write_str("yes/no"),
            Self::MultipleChoice => f.write_str("multiple choice"),
            Self::Custom(name) => write!(f, "custom mode {name:?}"),
        }
    }
}

/// Handles the input of one mode.
pub trait ModeHandler {
    /// Parses and interprets one line of input.
    ///
    /// # Errors
    ///
    /// See [`Interpreter::interpret`].
    fn handle(&mut self, input: &str, state: &mut State, registries: &Registries)
    -> Result<Response>;

    /// Receives the response that entered this mode.
    fn backup_result(&mut self, response: Response);
}

/// A parser feeding an interpreter.
#[derive(Debug, Default)]
pub struct Pipeline<P, I> {
    parser: P,
    interpreter: I,
}

impl<P, I> Pipeline<P, I> {
    /// Creates a pipeline.
    pub fn new(parser: P, interpreter: I) -> Self {
        Self {
            parser,
            interpreter,
        }
    }
}

impl<P, I> ModeHandler for Pipeline<P, I>
where
    P: Parser,
    I: Interpreter<Input = P::Output>,
{
    fn handle(
        &mut self,
        input: &str,
        state: &mut State,
        registries: &Registries,
    ) -> Result<Response> {
        let parsed = self.parser.parse(input, &registries.vocabulary);
        self.interpreter.interpret(parsed, state, registries)
    }

    fn backup_result(&mut self, response: Response) {
        self.interpreter.backup_result(response);
    }
}

/// Routes input to the handler of the current mode.
pub struct Caller {
    mode: Mode,
    handlers: HashMap<Mode, Box<dyn ModeHandler>>,
}

impl Default for Caller {
    fn default() -> Self {
        Self::new()
    }
}

impl Caller {
    /// Creates a caller in [`Mode::Normal`] with the three built-in modes.
    #[must_use]
    pub fn new() -> Self {
        let mut handlers: HashMap<Mode, Box<dyn ModeHandler>> = HashMap::new();
        handlers.insert(
            Mode::Normal,
            Box::new(Pipeline::new(CommandParser, CommandInterpreter)),
        );
        handlers.insert(
            Mode::YesNo,
            Box::new(Pipeline::new(YesNoParser, YesNoInterpreter::default())),
        );
        handlers.insert(
            Mode::MultipleChoice,
            Box::new(Pipeline::new(
                MultipleChoiceParser,
                MultipleChoiceInterpreter::default(),
            )),
        );
        Self {
            mode: Mode::Normal,
            handlers,
        }
    }

    /// Returns the current mode.
    #[must_use]
    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    /// Returns true while the caller waits for something other than a command.
    #[must_use]
    pub fn has_pending_question(&self) -> bool {
        self.mode != Mode::Normal
    }

    /// Adds or replaces the handler of a mode.
    pub fn set_mode(&mut self, mode: Mode, handler: Box<dyn ModeHandler>) {
        debug!("setting handler for {mode}");
        self.handlers.insert(mode, handler);
    }

    /// Drops any pending question and returns to [`Mode::Normal`].
    pub fn reset(&mut self) {
        debug!("resetting from {} mode", self.mode);
        self.mode = Mode::Normal;
    }

    /// Handles one line of input and returns the text to show.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::ModeNotFound`] if a reply names a mode without handler
    /// - anything the current handler fails with
    pub fn call(
        &mut self,
        text: &str,
        state: &mut State,
        registries: &Registries,
    ) -> Result<Message> {
        let handler = self
            .handlers
            .get_mut(&self.mode)
            .ok_or_else(|| Error::new(ErrorKind::ModeNotFound(self.mode.to_string())))?;
        debug!("{} mode handles {text:?}", self.mode);
        let response = handler.handle(text, state, registries)?;

        let next = Mode::from(response.kind());
        let message = response.to_message();
        let Some(next_handler) = self.handlers.get_mut(&next) else {
            return Err(Error::new(ErrorKind::ModeNotFound(next.to_string())));
        };
        if response.success {
            if next != self.mode {
                info!("switching from {} to {next}", self.mode);
            }
            next_handler.backup_result(response);
            self.mode = next;
        } else {
            debug!("input failed, staying in {} mode", self.mode);
        }
        Ok(message)
    }
}

impl fmt::Debug for Caller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Caller")
            .field("mode", &self.mode)
            .field("handlers", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}
