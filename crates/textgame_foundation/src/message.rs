//! Messages shown to the player.
//!
//! A [`Message`] is plain text. Adding two messages joins them with a
//! newline, but only when both sides carry text, so empty hook output never
//! leaves blank lines behind.

use std::fmt;
use std::ops::{Add, AddAssign};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Text shown to the player.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Message(String);

impl Message {
    /// Separator inserted between joined messages.
    pub const SEPARATOR: &'static str = "\n";

    /// Creates a message from text.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Creates an empty message.
    #[must_use]
    pub const fn empty() -> Self {
        Self(String::new())
    }

    /// Returns true if the message carries no text.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the text of the message.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the message contains `pattern`.
    #[must_use]
    pub fn contains(&self, pattern: &str) -> bool {
        self.0.contains(pattern)
    }

    /// Appends `other`, inserting the separator only between non-empty parts.
    pub fn push(&mut self, other: impl Into<Message>) {
        let other = other.into();
        if other.is_empty() {
            return;
        }
        if !self.0.is_empty() {
            self.0.push_str(Self::SEPARATOR);
        }
        self.0.push_str(&other.0);
    }

    /// Joins all messages in order.
    pub fn join<I>(messages: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Message>,
    {
        let mut joined = Self::empty();
        for message in messages {
            joined.push(message);
        }
        joined
    }

    /// Consumes the message and returns its text.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Message {
    fn from(text: &str) -> Self {
        Self(text.to_string())
    }
}

impl From<String> for Message {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl From<&String> for Message {
    fn from(text: &String) -> Self {
        Self(text.clone())
    }
}

impl From<Option<Message>> for Message {
    fn from(message: Option<Message>) -> Self {
        message.unwrap_or_default()
    }
}

impl<T: Into<Message>> Add<T> for Message {
    type Output = Message;

    fn add(mut self, other: T) -> Message {
        self.push(other);
        self
    }
}

impl<T: Into<Message>> AddAssign<T> for Message {
    fn add_assign(&mut self, other: T) {
        self.push(other);
    }
}

impl PartialEq<str> for Message {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Message {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl PartialEq<String> for Message {
    fn eq(&self, other: &String) -> bool {
        &self.0 == other
    }
}
