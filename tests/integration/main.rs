//! Cross-layer integration tests for textgame
//!
//! Content files, settings, snapshots and the REPL working together.

mod content;
mod repl;
mod world;
