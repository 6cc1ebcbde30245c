//! Stock commands, hooks and behaviours.
//!
//! Nothing here is registered unless asked for:
//!
//! ```
//! use textgame_engine::Registries;
//! use textgame_engine::defaults::{self, hooks};
//!
//! let mut registries = Registries::new();
//! defaults::use_default_commands(&mut registries);
//! defaults::use_default_behaviours(&mut registries);
//! registries
//!     .register_pre_hook("daylight", hooks::daylight(20, 10))
//!     .register_post_hook("time", hooks::time);
//! assert!(registries.commands.contains("take"));
//! ```

pub mod behaviours;
pub mod commands;
pub mod hooks;

pub use behaviours::{RandomAppearance, RandomSpawnOnce, RandomWalk, use_default_behaviours};
pub use commands::use_default_commands;
