//! Named, ordered tables of commands, hooks and behaviours.
//!
//! Nothing here is global: a [`Registries`] value is built once by the host
//! and handed to every call that needs it.
//!
//! ```
//! use textgame_engine::{HookSkip, Registries, SkipHooks};
//!
//! let mut registries = Registries::new();
//! registries.register_post_hook("time", |state| {
//!     state.time += 1;
//!     ""
//! });
//! registries.register_command_with(
//!     "score",
//!     |_, state| format!("Your score is {}.", state.score),
//!     SkipHooks::new().pre(HookSkip::All).post(HookSkip::All),
//! );
//! assert!(registries.commands.contains("score"));
//! ```

use std::ops::{Deref, DerefMut};
use std::rc::Rc;

use indexmap::IndexMap;
use log::debug;
use textgame_foundation::{Message, Result};
use textgame_parser::Vocabulary;

use crate::behaviour::Behaviour;
use crate::reply::Reply;
use crate::state::State;

/// A command handler: `(noun, state) -> reply`.
pub type CommandFn = Rc<dyn Fn(&str, &mut State) -> Reply>;

/// A hook: `state -> message`, possibly empty.
pub type HookFn = Rc<dyn Fn(&mut State) -> Message>;

/// Builds a behaviour from its parameters. Gets the registry so combinators
/// can build their children.
pub type BehaviourFactory =
    Rc<dyn Fn(&serde_json::Value, &BehaviourRegistry) -> Result<Box<dyn Behaviour>>>;

/// Registry of behaviour factories.
/// Wraps the table so [`BehaviourFactory`] can name it.
#[derive(Debug, Default)]
pub struct BehaviourRegistry(Registry<BehaviourFactory>);

impl BehaviourRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Deref for BehaviourRegistry {
    type Target = Registry<BehaviourFactory>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for BehaviourRegistry {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

// =============================================================================
// Registry
// =============================================================================

/// A name → value table iterated in registration order.
pub struct Registry<V> {
    entries: IndexMap<String, V>,
}

impl<V> Default for Registry<V> {
    fn default() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }
}

impl<V> Registry<V> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` under `name`. Re-registering a name replaces the value
    /// but keeps its position.
    pub fn register(&mut self, name: impl Into<String>, value: V) -> &mut Self {
        let name = name.into();
        debug!("registering {name:?}");
        self.entries.insert(name, value);
        self
    }

    /// Removes `name`. Absent names are ignored.
    pub fn unregister(&mut self, name: &str) -> Option<V> {
        self.entries.shift_remove(name)
    }

    /// Returns the value registered under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&V> {
        self.entries.get(name)
    }

    /// Returns true if `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Iterates in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Iterates over the names in registration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes everything.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<V: Clone> Registry<V> {
    /// Returns a function that registers its argument under `name` and hands
    /// it back unchanged.
    pub fn registrar(&mut self, name: impl Into<String>) -> impl FnOnce(V) -> V + '_ {
        let name = name.into();
        move |value| {
            self.register(name, value.clone());
            value
        }
    }
}

impl<V> std::fmt::Debug for Registry<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.keys()).finish()
    }
}

// =============================================================================
// Hook skips
// =============================================================================

/// Which hooks a command skips.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HookSkip {
    /// Skip the named hooks.
    Only(Vec<String>),
    /// Skip every hook.
    All,
}

impl Default for HookSkip {
    fn default() -> Self {
        Self::Only(Vec::new())
    }
}

impl HookSkip {
    /// Skip the given hooks.
    pub fn only<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Only(names.into_iter().map(Into::into).collect())
    }

    /// Returns true if the hook `name` is skipped.
    #[must_use]
    pub fn skips(&self, name: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(names) => names.iter().any(|n| n == name),
        }
    }
}

/// Hook skips of a command, before and after it runs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SkipHooks {
    /// Skipped pre-command hooks.
    pub pre: HookSkip,
    /// Skipped post-command hooks.
    pub post: HookSkip,
}

impl SkipHooks {
    /// Skips nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Skips every hook.
    #[must_use]
    pub fn all() -> Self {
        Self {
            pre: HookSkip::All,
            post: HookSkip::All,
        }
    }

    /// Sets the skipped pre-command hooks.
    #[must_use]
    pub fn pre(mut self, skip: HookSkip) -> Self {
        self.pre = skip;
        self
    }

    /// Sets the skipped post-command hooks.
    #[must_use]
    pub fn post(mut self, skip: HookSkip) -> Self {
        self.post = skip;
        self
    }
}

/// A registered command: the handler plus its hook skips.
#[derive(Clone)]
pub struct CommandEntry {
    /// The handler.
    pub handler: CommandFn,
    /// Hooks not run around this command.
    pub skip: SkipHooks,
}

// =============================================================================
// Registries
// =============================================================================

/// Everything the caller dispatches to.
#[derive(Debug, Default)]
pub struct Registries {
    /// Synonyms used by the parsers.
    pub vocabulary: Vocabulary,
    /// Commands by verb.
    pub commands: Registry<CommandEntry>,
    /// Behaviour factories by name.
    pub behaviours: BehaviourRegistry,
    /// Hooks run before every command.
    pub pre_hooks: Registry<HookFn>,
    /// Hooks run after every command.
    pub post_hooks: Registry<HookFn>,
    /// Hooks run when the player enters the room with the same id.
    pub room_hooks: Registry<HookFn>,
}

fn hook<F, M>(f: F) -> HookFn
where
    F: Fn(&mut State) -> M + 'static,
    M: Into<Message>,
{
    Rc::new(move |state| f(state).into())
}

impl Registries {
    /// Creates empty registries with an empty vocabulary.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a command that runs every hook.
    pub fn register_command<F, R>(&mut self, verb: impl Into<String>, handler: F) -> &mut Self
    where
        F: Fn(&str, &mut State) -> R + 'static,
        R: Into<Reply>,
    {
        self.register_command_with(verb, handler, SkipHooks::new())
    }

    /// Registers a command with hook skips.
    pub fn register_command_with<F, R>(
        &mut self,
        verb: impl Into<String>,
        handler: F,
        skip: SkipHooks,
    ) -> &mut Self
    where
        F: Fn(&str, &mut State) -> R + 'static,
        R: Into<Reply>,
    {
        let handler: CommandFn = Rc::new(move |noun, state| handler(noun, state).into());
        self.commands.register(verb, CommandEntry { handler, skip });
        self
    }

    /// Changes the hook skips of a registered command. Returns false if the
    /// verb is unknown.
    pub fn set_skip_hooks(&mut self, verb: &str, skip: SkipHooks) -> bool {
        match self.commands.entries.get_mut(verb) {
            Some(entry) => {
                entry.skip = skip;
                true
            }
            None => false,
        }
    }

    /// Registers a hook run before every command.
    pub fn register_pre_hook<F, M>(&mut self, name: impl Into<String>, f: F) -> &mut Self
    where
        F: Fn(&mut State) -> M + 'static,
        M: Into<Message>,
    {
        self.pre_hooks.register(name, hook(f));
        self
    }

    /// Registers a hook run after every command.
    pub fn register_post_hook<F, M>(&mut self, name: impl Into<String>, f: F) -> &mut Self
    where
        F: Fn(&mut State) -> M + 'static,
        M: Into<Message>,
    {
        self.post_hooks.register(name, hook(f));
        self
    }

    /// Registers a hook run when the player enters `room_id`.
    pub fn register_room_hook<F, M>(&mut self, room_id: impl Into<String>, f: F) -> &mut Self
    where
        F: Fn(&mut State) -> M + 'static,
        M: Into<Message>,
    {
        self.room_hooks.register(room_id, hook(f));
        self
    }

    /// Registers a behaviour factory.
    pub fn register_behaviour(&mut self, name: impl Into<String>, factory: BehaviourFactory) -> &mut Self {
        self.behaviours.register(name, factory);
        self
    }

    /// Removes a command.
    pub fn unregister_command(&mut self, verb: &str) {
        self.commands.unregister(verb);
    }

    /// Removes a pre-command hook.
    pub fn unregister_pre_hook(&mut self, name: &str) {
        self.pre_hooks.unregister(name);
    }

    /// Removes a post-command hook.
    pub fn unregister_post_hook(&mut self, name: &str) {
        self.post_hooks.unregister(name);
    }

    /// Removes a room hook.
    pub fn unregister_room_hook(&mut self, room_id: &str) {
        self.room_hooks.unregister(room_id);
    }

    /// Removes a behaviour factory.
    pub fn unregister_behaviour(&mut self, name: &str) {
        self.behaviours.unregister(name);
    }

    /// Names of the pre-command hooks `entry` skips.
    #[must_use]
    pub fn pre_hook_skips(&self, entry: &CommandEntry) -> Vec<String> {
        skipped(&self.pre_hooks, &entry.skip.pre)
    }

    /// Names of the post-command hooks `entry` skips.
    #[must_use]
    pub fn post_hook_skips(&self, entry: &CommandEntry) -> Vec<String> {
        skipped(&self.post_hooks, &entry.skip.post)
    }
}

fn skipped(hooks: &Registry<HookFn>, skip: &HookSkip) -> Vec<String> {
    match skip {
        HookSkip::All => hooks.keys().map(str::to_string).collect(),
        HookSkip::Only(names) => names.clone(),
    }
}

impl std::fmt::Debug for CommandEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandEntry")
            .field("skip", &self.skip)
            .finish_non_exhaustive()
    }
}
