//! World model and turn loop for textgame.
//!
//! This crate provides:
//! - [`State`] - Rooms, things, the player and the seeded random source
//! - [`Registries`] - Commands, hooks and behaviours, threaded through every call
//! - [`Caller`] - The mode machine that picks a parser and interpreter per turn
//! - [`Game`] - Thin driver feeding input through the caller
//!
//! # A turn
//!
//! ```text
//! "take lamp"
//!      │
//!      ▼
//!  Caller (mode = Normal) ──▶ CommandParser ──▶ Command { take, lamp }
//!      │
//!      ▼
//!  CommandInterpreter: pre-hooks ▶ handler ▶ room hook ▶ post-hooks
//!      │
//!      ▼
//!  Response { prelude, reply, epilogue, success }
//!      │
//!      ▼
//!  Caller switches mode by reply kind (only on success)
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod behaviour;
pub mod caller;
pub mod defaults;
pub mod events;
pub mod game;
pub mod interpreter;
pub mod registry;
pub mod reply;
pub mod room;
pub mod state;
pub mod thing;
pub mod words;

pub use behaviour::{Behaviour, BehaviourSpec, Behaviours, SequenceBehaviour, behaviour_factory};
pub use caller::{Caller, Mode, ModeHandler, Pipeline};
pub use events::{Event, Timer, Trigger};
pub use game::Game;
pub use interpreter::{
    CommandInterpreter, Interpreter, MultipleChoiceInterpreter, YesNoInterpreter,
};
pub use registry::{
    BehaviourFactory, BehaviourRegistry, CommandEntry, CommandFn, HookFn, HookSkip, Registries,
    Registry, SkipHooks,
};
pub use reply::{
    Branch, CustomReply, MultipleChoiceQuestion, Reply, ReplyKind, Response, YesNoQuestion,
};
pub use room::{Darkness, Exit, Room};
pub use state::{Daytime, INVENTORY, PlayerStatus, STORAGE_ROOM, State};
pub use thing::{
    ContainerInfo, CreatureInfo, ItemInfo, KeyInfo, MonsterInfo, Strength, Thing, ThingKind,
    WeaponInfo,
};
