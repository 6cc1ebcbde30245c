//! REPL integration tests
//!
//! Drives the loop with scripted input instead of a terminal.

use std::collections::VecDeque;

use textgame_engine::words::{action, info};
use textgame_foundation::Result;
use textgame_runtime::{GameConfig, LineEditor, ReadResult, Repl};

use crate::world::{load_game, write_world};

/// Replays a fixed script, then reports end of input.
struct Script {
    lines: VecDeque<ReadResult>,
}

impl Script {
    fn new(lines: &[&str]) -> Self {
        Self {
            lines: lines
                .iter()
                .map(|line| ReadResult::Line((*line).to_string()))
                .collect(),
        }
    }
}

impl LineEditor for Script {
    fn read_line(&mut self, _prompt: &str) -> Result<ReadResult> {
        Ok(self.lines.pop_front().unwrap_or(ReadResult::Eof))
    }

    fn add_history(&mut self, _line: &str) {}

    fn set_verbs(&mut self, _verbs: Vec<String>) {}
}

fn run(lines: &[&str]) -> (String, Repl<Script>) {
    let dir = tempfile::tempdir().unwrap();
    write_world(dir.path());
    let game = load_game(dir.path(), &GameConfig::new().with_seed(5));
    let mut repl = Repl::with_editor(Script::new(lines), game);
    let mut out = Vec::new();
    repl.run_with(&mut out).unwrap();
    (String::from_utf8(out).unwrap(), repl)
}

#[test]
fn a_short_session() {
    let (out, repl) = run(&["take lamp", "  ", "d", "take key", "inventory"]);
    assert!(out.starts_with("You are in a kitchen."));
    assert!(out.contains(&action::succ_take("oil lamp")));
    assert!(out.contains("You are now carrying:\nA oil lamp\nA brass key"));
    assert!(out.ends_with(&format!("{}\n\n", info::score(20))));
    assert_eq!(repl.game().state().player_location(), "cellar");
}

#[test]
fn blank_lines_are_not_turns() {
    let (_, repl) = run(&["look", "", "   ", "score"]);
    assert_eq!(repl.game().state().time, 1);
}

#[test]
fn saving_and_loading_from_the_prompt() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("slot1");
    let save = format!("save {}", path.display());
    let load = format!("load {}", path.display());

    let (out, repl) = run(&["take lamp", &save, "drop lamp", "east", &load]);
    assert!(out.contains(info::SAVED));
    assert!(out.contains(info::LOADED));
    assert!(out.contains("You are in a kitchen."));
    assert_eq!(repl.game().state().player_location(), "kitchen");
    assert!(repl.game().state().inventory_has("lamp"));
}

#[test]
fn failed_loads_keep_playing() {
    let (out, repl) = run(&["load /nonexistent/slot", "east"]);
    assert!(out.contains("Error: io error"));
    assert_eq!(repl.game().state().player_location(), "garden");
}

#[test]
fn saving_needs_one_path() {
    let (out, _) = run(&["save"]);
    assert!(out.contains(info::NOT_UNDERSTOOD));
}
