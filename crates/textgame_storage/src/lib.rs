//! Location tracking for textgame.
//!
//! This crate provides:
//! - [`StorageManager`] - Owns every thing and the single thing → store mapping
//! - [`Store`] - A named location with an optional capacity
//! - [`StoreMut`] - A store bound to its manager, for `add`/`get`/`pop` style access
//!
//! ```text
//!   thing "lamp" ──location_of──▶ "inventory"
//!   store "inventory" ──members──▶ ["lamp", "key"]   (insertion order)
//! ```
//!
//! Both indices are updated together, so a thing is never listed in two
//! stores, and never listed in a store that `location_of` does not report.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod manager;
pub mod store;

pub use manager::{Identify, StorageManager};
pub use store::{Store, StoreMut};
