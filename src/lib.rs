//! textgame - Library for building text adventures
//!
//! This crate re-exports all layers of textgame for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 4: textgame_runtime    — Content loader, settings, snapshots, REPL + CLI
//! Layer 3: textgame_engine     — World model, registries, interpreters, caller, game
//! Layer 2: textgame_parser     — Two-word commands, yes/no and choice answers
//! Layer 1: textgame_storage    — Things stored in exactly one place
//! Layer 0: textgame_foundation — Core types (Message, Direction, Error)
//! ```

pub use textgame_engine as engine;
pub use textgame_foundation as foundation;
pub use textgame_parser as parser;
pub use textgame_runtime as runtime;
pub use textgame_storage as storage;
