//! Named locations.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use textgame_foundation::Result;

use crate::manager::{Identify, StorageManager};

/// A named location with an optional capacity.
///
/// A store holds no things itself. Membership lives in the
/// [`StorageManager`] the store is registered with.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Store {
    /// Unique id of the store.
    pub id: String,
    /// Maximum number of members, `None` for unlimited.
    pub limit: Option<usize>,
}

impl Store {
    /// Creates an unlimited store.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            limit: None,
        }
    }

    /// Sets the capacity.
    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// A store bound to its manager.
pub struct StoreMut<'a, T> {
    manager: &'a mut StorageManager<T>,
    id: String,
}

impl<'a, T: Identify> StoreMut<'a, T> {
    pub(crate) fn new(manager: &'a mut StorageManager<T>, id: String) -> Self {
        Self { manager, id }
    }

    /// Returns the id of the store.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Adds a thing, honouring the store's limit.
    ///
    /// # Errors
    ///
    /// Returns [`textgame_foundation::ErrorKind::StoreLimitExceeded`] if the
    /// store is full.
    pub fn add(&mut self, thing_id: &str) -> Result<bool> {
        self.manager.add(thing_id, &self.id)
    }

    /// Returns the thing if it is in this store.
    #[must_use]
    pub fn get(&self, thing_id: &str) -> Option<&T> {
        self.manager.get_from(thing_id, &self.id)
    }

    /// Takes a thing out of this store.
    pub fn pop(&mut self, thing_id: &str) -> Option<&T> {
        self.manager.remove_from(thing_id, &self.id)
    }

    /// Returns the member ids in insertion order.
    #[must_use]
    pub fn ids(&self) -> Vec<String> {
        self.manager.ids_in(&self.id)
    }

    /// Returns true if `thing_id` is a member.
    #[must_use]
    pub fn contains(&self, thing_id: &str) -> bool {
        self.manager.contains(&self.id, thing_id)
    }

    /// Returns the number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.manager.len_of(&self.id)
    }

    /// Returns true if the store has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
