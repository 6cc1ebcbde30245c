//! Content loading, configuration, snapshots and the interactive shell for
//! textgame.
//!
//! This crate provides:
//! - [`StateBuilder`] - Builds a [`State`](textgame_engine::State) from JSON content
//! - [`GameConfig`] - Settings that decide which stock commands and hooks run
//! - [`snapshot`] - `MessagePack` snapshots of a running game
//! - [`Repl`] - Interactive loop around a [`Game`](textgame_engine::Game)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod editor;
pub mod loader;
pub mod repl;
pub mod snapshot;

pub use config::{DaylightConfig, GameConfig};
pub use editor::{LineEditor, ReadResult, RustylineEditor};
pub use loader::{Constructor, Factory, LockSpec, Resources, RoomSpec, StateBuilder, load_resources};
pub use repl::Repl;
pub use snapshot::{from_bytes, load_from_file, load_game, save_game, save_to_file, to_bytes};
