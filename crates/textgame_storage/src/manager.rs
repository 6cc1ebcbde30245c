//! The storage manager: single source of truth for where things are.
//!
//! The manager owns every thing and keeps two indices in step:
//! - store id → ordered member ids
//! - thing id → id of the store holding it
//!
//! Looking up a thing that does not exist is a routine question ("is the lamp
//! here?") and answers `None`. Placing an unknown thing is a silent no-op.
//! Only operations that name an unregistered store fail.

use indexmap::{IndexMap, IndexSet};
use log::debug;
use textgame_foundation::{Error, ErrorKind, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::store::{Store, StoreMut};

/// Anything that can be kept by a [`StorageManager`].
pub trait Identify {
    /// Returns the unique id of this thing.
    fn id(&self) -> &str;
}

/// Registered store plus its members in insertion order.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
struct StoreSlot {
    store: Store,
    members: IndexSet<String>,
}

/// Owns all things and tracks the store each one is in.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StorageManager<T> {
    /// Every thing that exists, by id.
    things: IndexMap<String, T>,
    /// Registered stores by id.
    stores: IndexMap<String, StoreSlot>,
    /// Thing id -> id of the store holding it.
    locations: IndexMap<String, String>,
}

impl<T> Default for StorageManager<T> {
    fn default() -> Self {
        Self {
            things: IndexMap::new(),
            stores: IndexMap::new(),
            locations: IndexMap::new(),
        }
    }
}

impl<T: Identify> StorageManager<T> {
    /// Creates an empty manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a manager owning `things`, none of them placed yet.
    pub fn with_things(things: impl IntoIterator<Item = T>) -> Self {
        let mut manager = Self::new();
        for thing in things {
            manager.insert_thing(thing);
        }
        manager
    }

    /// Hands a thing to the manager. Returns the previous thing with the
    /// same id, whose location is kept for the replacement.
    pub fn insert_thing(&mut self, thing: T) -> Option<T> {
        self.things.insert(thing.id().to_string(), thing)
    }

    /// Registers a store.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::DuplicateStore`] if the id is already taken.
    pub fn add_store(&mut self, store: Store) -> Result<()> {
        if self.stores.contains_key(&store.id) {
            return Err(Error::new(ErrorKind::DuplicateStore(store.id)));
        }
        debug!("registering store {:?} (limit {:?})", store.id, store.limit);
        self.stores.insert(
            store.id.clone(),
            StoreSlot {
                store,
                members: IndexSet::new(),
            },
        );
        Ok(())
    }

    /// Returns the store registered under `store_id`.
    #[must_use]
    pub fn store(&self, store_id: &str) -> Option<&Store> {
        self.stores.get(store_id).map(|slot| &slot.store)
    }

    /// Binds the store `store_id` to this manager for store-centric access.
    pub fn store_mut(&mut self, store_id: &str) -> Option<StoreMut<'_, T>> {
        if self.stores.contains_key(store_id) {
            Some(StoreMut::new(self, store_id.to_string()))
        } else {
            None
        }
    }

    /// Returns true if a store with this id is registered.
    #[must_use]
    pub fn has_store(&self, store_id: &str) -> bool {
        self.stores.contains_key(store_id)
    }

    /// Changes the capacity of a registered store. Things already inside stay.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::StoreNotFound`] for an unregistered store.
    pub fn set_limit(&mut self, store_id: &str, limit: Option<usize>) -> Result<()> {
        let slot = self
            .stores
            .get_mut(store_id)
            .ok_or_else(|| Error::store_not_found(store_id))?;
        slot.store.limit = limit;
        Ok(())
    }

    /// Returns the thing with this id, wherever it is.
    #[must_use]
    pub fn get(&self, thing_id: &str) -> Option<&T> {
        self.things.get(thing_id)
    }

    /// Returns the thing with this id mutably, wherever it is.
    pub fn get_mut(&mut self, thing_id: &str) -> Option<&mut T> {
        self.things.get_mut(thing_id)
    }

    /// Returns true if the manager owns a thing with this id.
    #[must_use]
    pub fn contains_thing(&self, thing_id: &str) -> bool {
        self.things.contains_key(thing_id)
    }

    /// Iterates over every thing the manager owns, placed or not.
    pub fn all(&self) -> impl Iterator<Item = &T> {
        self.things.values()
    }

    /// Iterates over the ids of every thing the manager owns.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.things.keys().map(String::as_str)
    }

    /// Moves a thing into a store, detaching it from its previous store first.
    ///
    /// Returns `Ok(false)` without doing anything if the thing is unknown.
    /// Does not look at the store's limit; use [`StorageManager::add`] for that.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::StoreNotFound`] for an unregistered store.
    pub fn place(&mut self, thing_id: &str, store_id: &str) -> Result<bool> {
        if !self.stores.contains_key(store_id) {
            return Err(Error::store_not_found(store_id));
        }
        if !self.things.contains_key(thing_id) {
            debug!("cannot place unknown thing {thing_id:?}, ignoring");
            return Ok(false);
        }
        if let Some(current) = self.locations.get(thing_id) {
            debug!("{thing_id:?} is currently in {current:?}, remove it from there");
            if let Some(slot) = self.stores.get_mut(current) {
                slot.members.shift_remove(thing_id);
            }
        }
        debug!("adding {thing_id:?} to store {store_id:?}");
        if let Some(slot) = self.stores.get_mut(store_id) {
            slot.members.insert(thing_id.to_string());
        }
        self.locations
            .insert(thing_id.to_string(), store_id.to_string());
        Ok(true)
    }

    /// Adds a thing to a store, honouring the store's limit.
    ///
    /// Re-adding a thing that is already in the store is a no-op and never
    /// counts against the limit. Unknown things are ignored like in
    /// [`StorageManager::place`].
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::StoreNotFound`] for an unregistered store
    /// - [`ErrorKind::StoreLimitExceeded`] if the store is already full
    pub fn add(&mut self, thing_id: &str, store_id: &str) -> Result<bool> {
        let slot = self
            .stores
            .get(store_id)
            .ok_or_else(|| Error::store_not_found(store_id))?;
        if slot.members.contains(thing_id) {
            return Ok(true);
        }
        if !self.things.contains_key(thing_id) {
            debug!("cannot add unknown thing {thing_id:?}, ignoring");
            return Ok(false);
        }
        if let Some(limit) = slot.store.limit {
            if slot.members.len() >= limit {
                return Err(Error::store_limit_exceeded(store_id, thing_id));
            }
        }
        self.place(thing_id, store_id)
    }

    /// Detaches a thing from `store_id` if it is there and returns it.
    ///
    /// The thing stays owned by the manager, it just has no location anymore.
    pub fn remove_from(&mut self, thing_id: &str, store_id: &str) -> Option<&T> {
        let slot = self.stores.get_mut(store_id)?;
        if !slot.members.shift_remove(thing_id) {
            return None;
        }
        debug!("removing {thing_id:?} from {store_id:?}");
        self.locations.shift_remove(thing_id);
        self.things.get(thing_id)
    }

    /// Detaches a thing from whatever store holds it. Returns that store's id.
    pub fn unplace(&mut self, thing_id: &str) -> Option<String> {
        let store_id = self.locations.shift_remove(thing_id)?;
        if let Some(slot) = self.stores.get_mut(&store_id) {
            slot.members.shift_remove(thing_id);
        }
        Some(store_id)
    }

    /// Returns the thing if it is in `store_id`.
    #[must_use]
    pub fn get_from(&self, thing_id: &str, store_id: &str) -> Option<&T> {
        if self.contains(store_id, thing_id) {
            self.things.get(thing_id)
        } else {
            None
        }
    }

    /// Returns every thing in `store_id`, in insertion order.
    ///
    /// An unregistered store has no contents.
    #[must_use]
    pub fn things_in(&self, store_id: &str) -> IndexMap<&str, &T> {
        let Some(slot) = self.stores.get(store_id) else {
            return IndexMap::new();
        };
        slot.members
            .iter()
            .filter_map(|id| self.things.get(id).map(|thing| (id.as_str(), thing)))
            .collect()
    }

    /// Returns the ids of the things in `store_id`, in insertion order.
    #[must_use]
    pub fn ids_in(&self, store_id: &str) -> Vec<String> {
        self.stores
            .get(store_id)
            .map(|slot| slot.members.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Returns true if `thing_id` is in `store_id`.
    #[must_use]
    pub fn contains(&self, store_id: &str, thing_id: &str) -> bool {
        self.stores
            .get(store_id)
            .is_some_and(|slot| slot.members.contains(thing_id))
    }

    /// Returns the number of things in `store_id`.
    #[must_use]
    pub fn len_of(&self, store_id: &str) -> usize {
        self.stores.get(store_id).map_or(0, |slot| slot.members.len())
    }

    /// Returns the id of the store holding `thing_id`, if it is placed.
    #[must_use]
    pub fn location_of(&self, thing_id: &str) -> Option<&str> {
        self.locations.get(thing_id).map(String::as_str)
    }
}
