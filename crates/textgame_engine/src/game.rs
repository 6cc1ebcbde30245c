//! Thin driver feeding input through the caller.

use log::info;
use textgame_foundation::{Message, Result};

use crate::caller::Caller;
use crate::registry::Registries;
use crate::state::{PlayerStatus, State};

/// A running game.
#[derive(Debug)]
pub struct Game {
    state: State,
    caller: Caller,
    registries: Registries,
    over: bool,
}

impl Game {
    /// Creates a game with a fresh [`Caller`].
    #[must_use]
    pub fn new(state: State, registries: Registries) -> Self {
        Self {
            state,
            caller: Caller::new(),
            registries,
            over: false,
        }
    }

    /// Handles one line of input and returns the reply.
    ///
    /// # Errors
    ///
    /// See [`Caller::call`].
    pub fn play(&mut self, text: &str) -> Result<Message> {
        let message = self.caller.call(text, &mut self.state, &self.registries)?;
        if self.state.player_status == PlayerStatus::Dead && !self.over {
            info!("the player died, game over");
            self.over = true;
        }
        Ok(message)
    }

    /// Returns true once the player is dead.
    #[must_use]
    pub fn over(&self) -> bool {
        self.over
    }

    /// Returns the state.
    #[must_use]
    pub fn state(&self) -> &State {
        &self.state
    }

    /// Returns the state mutably.
    pub fn state_mut(&mut self) -> &mut State {
        &mut self.state
    }

    /// Swaps in another state, e.g. one loaded from a snapshot, and drops any
    /// pending question. Returns the old state.
    pub fn replace_state(&mut self, state: State) -> State {
        self.caller.reset();
        self.over = state.player_status == PlayerStatus::Dead;
        std::mem::replace(&mut self.state, state)
    }

    /// Returns the registries.
    #[must_use]
    pub fn registries(&self) -> &Registries {
        &self.registries
    }

    /// Returns the registries mutably.
    pub fn registries_mut(&mut self) -> &mut Registries {
        &mut self.registries
    }

    /// Returns the caller.
    #[must_use]
    pub fn caller(&self) -> &Caller {
        &self.caller
    }

    /// Returns the caller mutably, e.g. to add host modes.
    pub fn caller_mut(&mut self) -> &mut Caller {
        &mut self.caller
    }
}
