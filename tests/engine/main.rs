//! Integration tests for the turn loop
//!
//! Tests for hooks, question modes, stock commands, behaviours and events
//! driven through [`textgame_engine::Game`].

mod behaviours;
mod hooks;
mod modes;
mod scenarios;
