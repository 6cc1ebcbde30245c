//! Game settings.
//!
//! Settings decide which stock commands, hooks and synonyms a game uses. They
//! can be written in code or read from a JSON file:
//!
//! ```json
//! {
//!     "seed": 7,
//!     "inventory_limit": 5,
//!     "synonyms": {"take": ["grab"]},
//!     "daylight": {"day": 30, "night": 10}
//! }
//! ```
//!
//! Missing fields keep their defaults.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};
use textgame_engine::defaults::behaviours::{RANDOM_APPEARANCE, RANDOM_SPAWN_ONCE, RANDOM_WALK};
use textgame_engine::defaults::{hooks, use_default_behaviours, use_default_commands};
use textgame_engine::{Registries, State};
use textgame_foundation::{Error, ErrorContext, ErrorKind, Result};

/// Turns of daylight and darkness.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaylightConfig {
    /// Turns of daylight per cycle.
    pub day: u64,
    /// Turns of darkness per cycle.
    pub night: u64,
}

/// Settings of a game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Seed of the random source, 0 when unset.
    pub seed: Option<u64>,
    /// How many things the player can carry, unlimited when unset.
    pub inventory_limit: Option<usize>,
    /// Use the stock synonyms (`n` for `north`, `get` for `take`, ...).
    pub use_default_synonyms: bool,
    /// Extra synonyms as `word → [synonyms]`.
    pub synonyms: IndexMap<String, Vec<String>>,
    /// Register the stock commands.
    pub default_commands: bool,
    /// Cycle day and night.
    pub daylight: Option<DaylightConfig>,
    /// Let monsters attack the player after every command.
    pub fights: bool,
    /// Advance the clock after every command.
    pub time: bool,
    /// Behaviours run for every creature after every command.
    pub behaviour_hooks: Vec<String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            inventory_limit: None,
            use_default_synonyms: true,
            synonyms: IndexMap::new(),
            default_commands: true,
            daylight: None,
            fights: true,
            time: true,
            behaviour_hooks: [RANDOM_WALK, RANDOM_APPEARANCE, RANDOM_SPAWN_ONCE]
                .map(str::to_string)
                .to_vec(),
        }
    }
}

impl GameConfig {
    /// Creates the default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Limits the inventory.
    #[must_use]
    pub fn with_inventory_limit(mut self, limit: usize) -> Self {
        self.inventory_limit = Some(limit);
        self
    }

    /// Turns the stock synonyms on or off.
    #[must_use]
    pub fn with_default_synonyms(mut self, enabled: bool) -> Self {
        self.use_default_synonyms = enabled;
        self
    }

    /// Adds synonyms for `word`.
    #[must_use]
    pub fn with_synonyms<I, S>(mut self, word: impl Into<String>, synonyms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.synonyms
            .entry(word.into())
            .or_default()
            .extend(synonyms.into_iter().map(Into::into));
        self
    }

    /// Turns the stock commands on or off.
    #[must_use]
    pub fn with_default_commands(mut self, enabled: bool) -> Self {
        self.default_commands = enabled;
        self
    }

    /// Cycles `day` turns of daylight and `night` turns of darkness.
    #[must_use]
    pub fn with_daylight(mut self, day: u64, night: u64) -> Self {
        self.daylight = Some(DaylightConfig { day, night });
        self
    }

    /// Turns monster attacks on or off.
    #[must_use]
    pub fn with_fights(mut self, enabled: bool) -> Self {
        self.fights = enabled;
        self
    }

    /// Turns the clock on or off.
    #[must_use]
    pub fn with_time(mut self, enabled: bool) -> Self {
        self.time = enabled;
        self
    }

    /// Replaces the behaviours run after every command.
    #[must_use]
    pub fn with_behaviour_hooks<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.behaviour_hooks = names.into_iter().map(Into::into).collect();
        self
    }

    /// Reads settings from a JSON file.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::Io`] if the file cannot be read
    /// - [`ErrorKind::Configuration`] if it is not valid settings
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            Error::new(ErrorKind::Io(format!(
                "failed to read file '{}': {e}",
                path.display()
            )))
        })?;
        Self::from_json(&text).map_err(|err| {
            err.with_context(ErrorContext::new().with_source(path.display().to_string()))
        })
    }

    /// Reads settings from JSON text.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::Configuration`] if the text is not valid settings.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| Error::configuration(e.to_string()))
    }

    /// Seed of the random source.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed.unwrap_or(0)
    }

    /// Builds the registries these settings ask for.
    ///
    /// Stock behaviours are always registered so stock content loads. Hooks
    /// run in this order: daylight before the command; then behaviours,
    /// fights, due events and the clock after it.
    #[must_use]
    pub fn registries(&self) -> Registries {
        let mut registries = Registries::new();
        if self.use_default_synonyms {
            registries.vocabulary.use_default_synonyms();
        }
        registries.vocabulary.update_synonyms(&self.synonyms);
        if self.default_commands {
            use_default_commands(&mut registries);
        }
        use_default_behaviours(&mut registries);

        if let Some(DaylightConfig { day, night }) = self.daylight {
            registries.register_pre_hook("daylight", hooks::daylight(day, night));
        }
        for name in &self.behaviour_hooks {
            registries.register_post_hook(name.as_str(), hooks::single_behaviour_hook(name.as_str()));
        }
        if self.fights {
            registries.register_post_hook("fights", hooks::manage_fights);
        }
        registries.register_post_hook("events", hooks::ready_events);
        if self.time {
            registries.register_post_hook("time", hooks::time);
        }
        debug!(
            "registries ready: {} commands, {} pre-hooks, {} post-hooks",
            registries.commands.len(),
            registries.pre_hooks.len(),
            registries.post_hooks.len()
        );
        registries
    }

    /// Applies the settings that live in the state: the seed and the
    /// inventory limit.
    pub fn apply(&self, state: &mut State) {
        state.reseed(self.seed());
        state.set_inventory_limit(self.inventory_limit);
    }
}
