//! Error types for textgame.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.
//!
//! Only programming and content errors are represented here. Mistakes made by
//! the player (unknown verbs, invalid answers) are answered with a message and
//! never surface as an [`Error`].

use std::fmt;

use thiserror::Error;

/// Result alias used throughout textgame.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for textgame operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates a thing not found error.
    #[must_use]
    pub fn thing_not_found(id: impl Into<String>) -> Self {
        Self::new(ErrorKind::ThingNotFound(id.into()))
    }

    /// Creates a store not found error.
    #[must_use]
    pub fn store_not_found(id: impl Into<String>) -> Self {
        Self::new(ErrorKind::StoreNotFound(id.into()))
    }

    /// Creates a store limit exceeded error.
    #[must_use]
    pub fn store_limit_exceeded(store: impl Into<String>, thing: impl Into<String>) -> Self {
        Self::new(ErrorKind::StoreLimitExceeded {
            store: store.into(),
            thing: thing.into(),
        })
    }

    /// Creates a room not found error.
    #[must_use]
    pub fn room_not_found(id: impl Into<String>) -> Self {
        Self::new(ErrorKind::RoomNotFound(id.into()))
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration(message.into()))
    }

    /// Returns true if this is a [`ErrorKind::StoreLimitExceeded`] error.
    #[must_use]
    pub fn is_store_limit_exceeded(&self) -> bool {
        matches!(self.kind, ErrorKind::StoreLimitExceeded { .. })
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// Thing was not found in storage.
    #[error("thing not found: {0}")]
    ThingNotFound(String),

    /// Store was never registered with the storage manager.
    #[error("store not found: {0}")]
    StoreNotFound(String),

    /// A store with the same id is already registered.
    #[error("store with the id {0:?} already exists in this manager")]
    DuplicateStore(String),

    /// Adding a thing would exceed the store's limit.
    #[error("cannot add {thing:?} to store {store:?}: store is full")]
    StoreLimitExceeded {
        /// The store that is full.
        store: String,
        /// The thing that was rejected.
        thing: String,
    },

    /// Room id does not exist in the room graph.
    #[error("room not found: {0}")]
    RoomNotFound(String),

    /// Content or registration is inconsistent.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// No constructor is registered for a content type.
    #[error("{0:?} is not a registered type")]
    FactoryNotFound(String),

    /// No behaviour is registered under this name.
    #[error("behaviour {0:?} is not registered")]
    BehaviourNotRegistered(String),

    /// A creature was asked to run a behaviour it does not have.
    #[error("the behaviour {behaviour:?} is not defined for the creature {creature:?}")]
    BehaviourNotDefined {
        /// The creature id.
        creature: String,
        /// The behaviour name.
        behaviour: String,
    },

    /// A response entered a mode the caller has no handler for.
    #[error("no mode is configured for {0:?}")]
    ModeNotFound(String),

    /// An answer interpreter ran without a question to answer.
    #[error("{0} has no backup of the previous response")]
    NoPendingQuestion(&'static str),

    /// The caller is waiting for an answer and cannot be persisted.
    #[error("cannot snapshot while a question is pending")]
    PendingQuestion,

    /// Snapshot encoding or decoding failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Reading or writing a file failed.
    #[error("io error: {0}")]
    Io(String),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Source file the content came from.
    pub source: Option<String>,
    /// Stack of objects being built when the error occurred.
    pub stack: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source location.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Adds a stack frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack.push(frame.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(source) = &self.source {
            write!(f, "in {source}")?;
        }
        if !self.stack.is_empty() {
            writeln!(f)?;
            for frame in &self.stack {
                writeln!(f, "  while creating {frame}")?;
            }
        }
        Ok(())
    }
}
