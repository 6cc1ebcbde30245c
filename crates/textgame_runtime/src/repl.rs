//! The interactive loop.
//!
//! Lines go to [`Game::play`] except two meta-commands:
//!
//! - `save <file>` writes a snapshot
//! - `load <file>` replaces the running game with a snapshot

use std::io::{self, Write};

use log::warn;
use textgame_engine::Game;
use textgame_engine::words::info;
use textgame_foundation::{Error, ErrorKind, Message, Result};

use crate::editor::{LineEditor, ReadResult, RustylineEditor};
use crate::snapshot::{load_game, save_game};

const SAVE: &str = "save";
const LOAD: &str = "load";

/// The interactive loop around a [`Game`].
pub struct Repl<E: LineEditor = RustylineEditor> {
    /// The line editor for input.
    editor: E,

    /// The running game.
    game: Game,

    /// Whether to describe the first room before the first prompt.
    show_banner: bool,

    /// Primary prompt.
    prompt: String,
}

impl Repl<RustylineEditor> {
    /// Creates a REPL with the default rustyline editor.
    ///
    /// # Errors
    ///
    /// Returns an error if the editor fails to initialize.
    pub fn new(game: Game) -> Result<Self> {
        let editor = RustylineEditor::new()?;
        Ok(Self::with_editor(editor, game))
    }
}

impl<E: LineEditor> Repl<E> {
    /// Creates a REPL with the given editor. Registered verbs are offered for
    /// completion.
    pub fn with_editor(mut editor: E, game: Game) -> Self {
        let mut verbs: Vec<String> = game
            .registries()
            .commands
            .keys()
            .map(str::to_string)
            .chain([SAVE, LOAD].map(str::to_string))
            .collect();
        verbs.sort();
        editor.set_verbs(verbs);
        Self {
            editor,
            game,
            show_banner: true,
            prompt: "> ".to_string(),
        }
    }

    /// Skips the description of the first room.
    #[must_use]
    pub fn without_banner(mut self) -> Self {
        self.show_banner = false;
        self
    }

    /// Sets the prompt.
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Returns the game.
    #[must_use]
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Returns the game mutably.
    pub fn game_mut(&mut self) -> &mut Game {
        &mut self.game
    }

    /// Gives the game back.
    #[must_use]
    pub fn into_game(self) -> Game {
        self.game
    }

    /// Runs the loop on stdout until end of input or game over.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input or writing output fails.
    pub fn run(&mut self) -> Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.run_with(&mut out)
    }

    /// Runs the loop writing replies to `out`.
    ///
    /// Errors of single turns are printed and the loop goes on.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input or writing output fails.
    pub fn run_with<W: Write>(&mut self, out: &mut W) -> Result<()> {
        if self.show_banner {
            print(out, &self.game.state().describe_location(true))?;
        }

        while !self.game.over() {
            let line = match self.editor.read_line(&self.prompt)? {
                ReadResult::Line(line) => line,
                ReadResult::Interrupted => continue,
                ReadResult::Eof => break,
            };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            self.editor.add_history(line);

            match self.eval(line) {
                Ok(message) => print(out, &message)?,
                Err(e) => {
                    warn!("{line:?} failed: {e}");
                    print(out, &Message::new(format!("Error: {e}")))?;
                }
            }
        }

        print(out, &Message::new(info::score(self.game.state().score)))
    }

    /// Handles one line: a meta-command or a turn of the game.
    ///
    /// # Errors
    ///
    /// Returns an error if the game, saving or loading fails.
    pub fn eval(&mut self, line: &str) -> Result<Message> {
        let words: Vec<&str> = line.split_whitespace().collect();
        match words.as_slice() {
            [SAVE, path] => {
                save_game(&self.game, path)?;
                Ok(info::SAVED.into())
            }
            [LOAD, path] => {
                load_game(&mut self.game, path)?;
                Ok(Message::new(info::LOADED) + self.game.state().describe_location(true))
            }
            _ => self.game.play(line),
        }
    }
}

fn print<W: Write>(out: &mut W, message: &Message) -> Result<()> {
    if message.is_empty() {
        return Ok(());
    }
    writeln!(out, "{message}\n").map_err(|e| Error::new(ErrorKind::Io(e.to_string())))
}
