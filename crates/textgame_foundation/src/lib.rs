//! Core types for textgame.
//!
//! This crate provides:
//! - [`Message`] - Text shown to the player, joined line by line
//! - [`Direction`] - The fixed set of directions a door can face
//! - [`Error`] - Rich error types with context

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod direction;
pub mod error;
pub mod message;

pub use direction::Direction;
pub use error::{Error, ErrorContext, ErrorKind, Result};
pub use message::Message;
