//! What commands answer with.
//!
//! A command either finishes the turn with a [`Message`] or asks a follow-up
//! question. The kind of the reply decides which mode the caller enters next:
//!
//! | Reply                     | Next mode        |
//! |---------------------------|------------------|
//! | `Reply::Message`          | `Normal`         |
//! | `Reply::YesNo`            | `YesNo`          |
//! | `Reply::MultipleChoice`   | `MultipleChoice` |
//! | `Reply::Custom { mode }`  | `Custom(mode)`   |

use std::any::Any;
use std::fmt;

use textgame_foundation::Message;

use crate::state::State;

// =============================================================================
// Reply
// =============================================================================

/// The result of a command or of an answered question.
#[derive(Debug)]
pub enum Reply {
    /// Plain text, the turn is over.
    Message(Message),
    /// A question the player answers with yes or no.
    YesNo(YesNoQuestion),
    /// A question with numbered answers.
    MultipleChoice(MultipleChoiceQuestion),
    /// A reply for a mode registered by the host.
    Custom(CustomReply),
}

/// The kind of a [`Reply`], used to pick the next mode.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ReplyKind {
    /// See [`Reply::Message`].
    Message,
    /// See [`Reply::YesNo`].
    YesNo,
    /// See [`Reply::MultipleChoice`].
    MultipleChoice,
    /// See [`Reply::Custom`], carrying the mode name.
    Custom(String),
}

impl Reply {
    /// Returns the kind of this reply.
    #[must_use]
    pub fn kind(&self) -> ReplyKind {
        match self {
            Self::Message(_) => ReplyKind::Message,
            Self::YesNo(_) => ReplyKind::YesNo,
            Self::MultipleChoice(_) => ReplyKind::MultipleChoice,
            Self::Custom(custom) => ReplyKind::Custom(custom.mode.clone()),
        }
    }

    /// Returns the text shown to the player.
    #[must_use]
    pub fn to_message(&self) -> Message {
        match self {
            Self::Message(message) => message.clone(),
            Self::YesNo(question) => question.question.clone(),
            Self::MultipleChoice(question) => question.to_message(),
            Self::Custom(custom) => custom.message.clone(),
        }
    }
}

impl Default for Reply {
    fn default() -> Self {
        Self::Message(Message::empty())
    }
}

impl From<Message> for Reply {
    fn from(message: Message) -> Self {
        Self::Message(message)
    }
}

impl From<&str> for Reply {
    fn from(text: &str) -> Self {
        Self::Message(text.into())
    }
}

impl From<String> for Reply {
    fn from(text: String) -> Self {
        Self::Message(text.into())
    }
}

impl From<YesNoQuestion> for Reply {
    fn from(question: YesNoQuestion) -> Self {
        Self::YesNo(question)
    }
}

impl From<MultipleChoiceQuestion> for Reply {
    fn from(question: MultipleChoiceQuestion) -> Self {
        Self::MultipleChoice(question)
    }
}

impl From<CustomReply> for Reply {
    fn from(custom: CustomReply) -> Self {
        Self::Custom(custom)
    }
}

// =============================================================================
// Branch
// =============================================================================

/// One possible outcome of a question.
pub enum Branch {
    /// Returned as is.
    Literal(Box<Reply>),
    /// Computed when the answer is given.
    Deferred(Box<dyn FnOnce(&mut State) -> Reply>),
}

impl Branch {
    /// Creates a branch that runs `f` once the answer is known.
    pub fn deferred<F, R>(f: F) -> Self
    where
        F: FnOnce(&mut State) -> R + 'static,
        R: Into<Reply>,
    {
        Self::Deferred(Box::new(move |state| f(state).into()))
    }

    /// Evaluates the branch.
    pub fn resolve(self, state: &mut State) -> Reply {
        match self {
            Self::Literal(reply) => *reply,
            Self::Deferred(f) => f(state),
        }
    }
}

impl fmt::Debug for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(reply) => f.debug_tuple("Literal").field(reply).finish(),
            Self::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}

macro_rules! literal_branch {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Branch {
                fn from(value: $ty) -> Self {
                    Self::Literal(Box::new(value.into()))
                }
            }
        )*
    };
}

literal_branch!(Reply, Message, &str, String, YesNoQuestion, MultipleChoiceQuestion);

// =============================================================================
// Questions
// =============================================================================

/// A question the player answers with yes or no.
#[derive(Debug)]
pub struct YesNoQuestion {
    /// The question text.
    pub question: Message,
    yes: Branch,
    no: Branch,
}

impl YesNoQuestion {
    /// Creates a question.
    pub fn new(question: impl Into<Message>, yes: impl Into<Branch>, no: impl Into<Branch>) -> Self {
        Self {
            question: question.into(),
            yes: yes.into(),
            no: no.into(),
        }
    }

    /// Resolves the yes branch.
    pub fn yes(self, state: &mut State) -> Reply {
        self.yes.resolve(state)
    }

    /// Resolves the no branch.
    pub fn no(self, state: &mut State) -> Reply {
        self.no.resolve(state)
    }
}

/// Label and reply of the automatic cancel choice.
const CANCEL: (&str, &str) = ("Cancel", "Ok.");

/// A question with numbered answers, keyed `"1"`, `"2"`, ...
///
/// A cancel choice answering "Ok." is appended unless
/// [`MultipleChoiceQuestion::without_cancel`] is used.
#[derive(Debug)]
pub struct MultipleChoiceQuestion {
    question: Message,
    choices: Vec<(Message, Branch)>,
    cancel: bool,
}

impl MultipleChoiceQuestion {
    /// Creates a question from `(label, outcome)` pairs, in order.
    pub fn new<I, L, B>(question: impl Into<Message>, answers: I) -> Self
    where
        I: IntoIterator<Item = (L, B)>,
        L: Into<Message>,
        B: Into<Branch>,
    {
        Self {
            question: question.into(),
            choices: answers
                .into_iter()
                .map(|(label, branch)| (label.into(), branch.into()))
                .collect(),
            cancel: true,
        }
    }

    /// Drops the automatic cancel choice.
    #[must_use]
    pub fn without_cancel(mut self) -> Self {
        self.cancel = false;
        self
    }

    fn len(&self) -> usize {
        self.choices.len() + usize::from(self.cancel)
    }

    /// Returns the valid answer keys in order.
    #[must_use]
    pub fn possible_answers(&self) -> Vec<String> {
        (1..=self.len()).map(|i| i.to_string()).collect()
    }

    /// Returns true if `key` selects a choice.
    #[must_use]
    pub fn is_valid(&self, key: &str) -> bool {
        self.index_of(key).is_some()
    }

    fn index_of(&self, key: &str) -> Option<usize> {
        // "01" or "+1" are not keys
        if key.is_empty() || !key.bytes().all(|b| b.is_ascii_digit()) || key.starts_with('0') {
            return None;
        }
        key.parse::<usize>()
            .ok()
            .filter(|i| (1..=self.len()).contains(i))
            .map(|i| i - 1)
    }

    /// Resolves the outcome selected by `key`. Returns `None` for invalid keys.
    pub fn into_response(self, key: &str, state: &mut State) -> Option<Reply> {
        let index = self.index_of(key)?;
        if index == self.choices.len() {
            return Some(CANCEL.1.into());
        }
        self.choices
            .into_iter()
            .nth(index)
            .map(|(_, branch)| branch.resolve(state))
    }

    /// Renders the question followed by one ` (key) label` line per choice.
    #[must_use]
    pub fn to_message(&self) -> Message {
        let labels = self
            .choices
            .iter()
            .map(|(label, _)| label.as_str())
            .chain(self.cancel.then_some(CANCEL.0));
        let mut message = self.question.clone();
        for (i, label) in labels.enumerate() {
            message += format!(" ({}) {label}", i + 1);
        }
        message
    }
}

/// A reply that enters a mode registered by the host.
pub struct CustomReply {
    /// Name of the mode to enter.
    pub mode: String,
    /// Text shown to the player.
    pub message: Message,
    /// Data for the mode's interpreter, recovered with `downcast`.
    pub payload: Box<dyn Any>,
}

impl CustomReply {
    /// Creates a custom reply.
    pub fn new(mode: impl Into<String>, message: impl Into<Message>, payload: impl Any) -> Self {
        Self {
            mode: mode.into(),
            message: message.into(),
            payload: Box::new(payload),
        }
    }
}

impl fmt::Debug for CustomReply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomReply")
            .field("mode", &self.mode)
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Response
// =============================================================================

/// The outcome of one interpreter call.
///
/// The prelude and epilogue carry hook output around the reply. The kind of
/// the response is the kind of the reply alone.
#[derive(Debug, Default)]
pub struct Response {
    /// Output of the pre-command hooks.
    pub prelude: Message,
    /// The command's reply.
    pub reply: Reply,
    /// Output of the room hook and post-command hooks.
    pub epilogue: Message,
    /// False if the input could not be handled, which keeps the current mode.
    pub success: bool,
}

impl Response {
    /// Creates a successful response without hook output.
    pub fn new(reply: impl Into<Reply>) -> Self {
        Self {
            prelude: Message::empty(),
            reply: reply.into(),
            epilogue: Message::empty(),
            success: true,
        }
    }

    /// Creates a failed response.
    pub fn failure(reply: impl Into<Reply>) -> Self {
        Self {
            success: false,
            ..Self::new(reply)
        }
    }

    /// Returns the kind of the reply.
    #[must_use]
    pub fn kind(&self) -> ReplyKind {
        self.reply.kind()
    }

    /// Flattens prelude, reply and epilogue into one message.
    #[must_use]
    pub fn to_message(&self) -> Message {
        self.prelude.clone() + self.reply.to_message() + self.epilogue.clone()
    }

    /// Takes the yes/no question out of the reply, leaving an empty message.
    pub fn take_yes_no(&mut self) -> Option<YesNoQuestion> {
        match std::mem::take(&mut self.reply) {
            Reply::YesNo(question) => Some(question),
            other => {
                self.reply = other;
                None
            }
        }
    }

    /// Takes the multiple choice question out of the reply.
    pub fn take_multiple_choice(&mut self) -> Option<MultipleChoiceQuestion> {
        match std::mem::take(&mut self.reply) {
            Reply::MultipleChoice(question) => Some(question),
            other => {
                self.reply = other;
                None
            }
        }
    }
}
