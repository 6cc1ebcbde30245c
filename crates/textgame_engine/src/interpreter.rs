//! Interpreters: one per mode, each turning parsed input into a [`Response`].
//!
//! The command interpreter runs the hooks around the handler:
//!
//! ```text
//! pre-hooks ─▶ handler ─▶ room hook (if the player moved) ─▶ post-hooks
//!  prelude       reply            epilogue ───────────────────▶
//! ```
//!
//! The answer interpreters resolve the question backed up by the caller.

use log::{debug, warn};
use textgame_foundation::{Error, ErrorKind, Message, Result};
use textgame_parser::{Command, ParseError, YesNoAnswer};

use crate::registry::{HookFn, Registries, Registry};
use crate::reply::{Reply, Response};
use crate::state::State;
use crate::words::info;

/// Turns one kind of parsed input into a response.
pub trait Interpreter {
    /// The parser output this interpreter consumes.
    type Input;

    /// Handles one input.
    ///
    /// Mistakes of the player give a response with `success == false`.
    ///
    /// # Errors
    ///
    /// Only for inconsistencies between the caller and its interpreters,
    /// such as answering a question that was never asked.
    fn interpret(
        &mut self,
        input: Self::Input,
        state: &mut State,
        registries: &Registries,
    ) -> Result<Response>;

    /// Receives the response that switched the caller into this mode.
    fn backup_result(&mut self, _response: Response) {}
}

// =============================================================================
// CommandInterpreter
// =============================================================================

/// Dispatches commands to the registered handlers.
#[derive(Clone, Copy, Debug, Default)]
pub struct CommandInterpreter;

fn run_hooks(
    kind: &str,
    hooks: &Registry<HookFn>,
    skip: &[String],
    state: &mut State,
) -> Message {
    let mut message = Message::empty();
    for (name, hook) in hooks.iter() {
        if skip.iter().any(|skipped| skipped == name) {
            debug!("skipping {kind} hook {name:?}");
            continue;
        }
        debug!("calling {kind} hook {name:?}");
        message += hook(state);
    }
    message
}

impl Interpreter for CommandInterpreter {
    type Input = std::result::Result<Command, ParseError>;

    fn interpret(
        &mut self,
        input: Self::Input,
        state: &mut State,
        registries: &Registries,
    ) -> Result<Response> {
        let command = match input {
            Ok(command) => command,
            Err(err) => {
                debug!("not interpreting: {err}");
                return Ok(Response::failure(info::TOO_MANY_ARGUMENTS));
            }
        };
        let Some(entry) = registries.commands.get(&command.verb) else {
            debug!("no command registered for {:?}", command.verb);
            return Ok(Response::failure(info::NOT_UNDERSTOOD));
        };

        let prelude = run_hooks(
            "pre",
            &registries.pre_hooks,
            &registries.pre_hook_skips(entry),
            state,
        );

        let location_before = state.player_location().to_string();
        debug!("calling command {:?} with {:?}", command.verb, command.noun);
        let reply = (entry.handler)(&command.noun, state);

        let mut epilogue = Message::empty();
        if state.player_location() != location_before {
            let location = state.player_location().to_string();
            if let Some(hook) = registries.room_hooks.get(&location) {
                debug!("calling room hook of {location:?}");
                epilogue += hook(state);
            }
        }
        epilogue += run_hooks(
            "post",
            &registries.post_hooks,
            &registries.post_hook_skips(entry),
            state,
        );

        Ok(Response {
            prelude,
            reply,
            epilogue,
            success: true,
        })
    }
}

// =============================================================================
// YesNoInterpreter
// =============================================================================

/// Answers the pending yes/no question.
#[derive(Debug, Default)]
pub struct YesNoInterpreter {
    backup: Option<Response>,
}

impl Interpreter for YesNoInterpreter {
    type Input = YesNoAnswer;

    fn interpret(
        &mut self,
        answer: YesNoAnswer,
        state: &mut State,
        _registries: &Registries,
    ) -> Result<Response> {
        let Some(backup) = self.backup.as_mut() else {
            return Err(Error::new(ErrorKind::NoPendingQuestion("YesNoInterpreter")));
        };
        if answer == YesNoAnswer::Invalid {
            return Ok(Response::failure(info::YES_NO));
        }
        let question = backup.take_yes_no();
        self.backup = None;
        let Some(question) = question else {
            warn!("the backed up response holds no yes/no question");
            return Err(Error::new(ErrorKind::NoPendingQuestion("YesNoInterpreter")));
        };
        debug!("answering {:?} with {answer:?}", question.question.as_str());
        let reply = if answer == YesNoAnswer::Yes {
            question.yes(state)
        } else {
            question.no(state)
        };
        Ok(Response::new(reply))
    }

    fn backup_result(&mut self, response: Response) {
        self.backup = Some(response);
    }
}

// =============================================================================
// MultipleChoiceInterpreter
// =============================================================================

/// Answers the pending multiple choice question.
#[derive(Debug, Default)]
pub struct MultipleChoiceInterpreter {
    backup: Option<Response>,
}

impl Interpreter for MultipleChoiceInterpreter {
    type Input = String;

    fn interpret(
        &mut self,
        key: String,
        state: &mut State,
        _registries: &Registries,
    ) -> Result<Response> {
        let Some(backup) = self.backup.as_mut() else {
            return Err(Error::new(ErrorKind::NoPendingQuestion(
                "MultipleChoiceInterpreter",
            )));
        };
        if let Reply::MultipleChoice(question) = &backup.reply {
            if !question.is_valid(&key) {
                debug!("{key:?} is not a valid answer");
                return Ok(Response::failure(info::no_valid_answer(
                    &question.possible_answers(),
                )));
            }
        }
        let question = backup.take_multiple_choice();
        self.backup = None;
        let reply = question
            .and_then(|question| question.into_response(&key, state))
            .ok_or_else(|| {
                Error::new(ErrorKind::NoPendingQuestion("MultipleChoiceInterpreter"))
            })?;
        Ok(Response::new(reply))
    }

    fn backup_result(&mut self, response: Response) {
        self.backup = Some(response);
    }
}
