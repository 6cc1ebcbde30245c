//! The single mutable root of a game session.
//!
//! [`State`] owns the room graph, every thing (through a
//! [`StorageManager`]), the player and the seeded random source. Commands,
//! hooks, behaviours and events all work on it.
//!
//! Every room id is a store. So are [`INVENTORY`] and the id of every
//! container, which keeps each thing in at most one place.

use indexmap::IndexMap;
use log::{debug, info};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use textgame_foundation::{Error, Message, Result};
use textgame_storage::{StorageManager, Store};

use crate::events::{Event, Events};
use crate::registry::BehaviourRegistry;
use crate::room::Room;
use crate::thing::{Strength, Thing};
use crate::words::descriptions;

/// Id of the player's inventory store.
pub const INVENTORY: &str = "inventory";

/// Id of the room where things wait while out of the game.
pub const STORAGE_ROOM: &str = "storage_room";

/// What the player is up to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerStatus {
    /// Free to go.
    #[default]
    Normal,
    /// Cannot leave the room.
    Trapped,
    /// In a fight, leaving is deadly.
    Fighting,
    /// Game over.
    Dead,
}

/// Time of day.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Daytime {
    /// Rooms are lit unless always dark.
    #[default]
    Day,
    /// Every room without light is dark.
    Night,
}

fn full_health() -> f64 {
    100.0
}

/// A game session.
#[derive(Debug, Serialize, Deserialize)]
pub struct State {
    rooms: IndexMap<String, Room>,
    /// Every thing and where it is.
    pub things: StorageManager<Thing>,
    player_location: String,
    player_location_old: Option<String>,
    /// What the player is up to.
    pub player_status: PlayerStatus,
    /// Points earned so far.
    pub score: i64,
    /// Dead at zero or below.
    #[serde(default = "full_health")]
    pub health: f64,
    /// Turns played, advanced by the `time` hook.
    pub time: u64,
    /// Time of day, switched by the `daylight` hook.
    pub daytime: Daytime,
    rng: ChaCha8Rng,
    /// Free-form data for host commands and hooks.
    #[serde(default)]
    pub misc: IndexMap<String, Value>,
    #[serde(skip)]
    events: Events,
}

impl State {
    /// Creates a session.
    ///
    /// Registers a store per room, the inventory and every container, adds an
    /// empty [`STORAGE_ROOM`] if the rooms have none, places every thing in
    /// its `initlocation` and visits the initial room.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::RoomNotFound`](textgame_foundation::ErrorKind::RoomNotFound)
    ///   if `initial_location` is not a room
    /// - [`ErrorKind::DuplicateStore`](textgame_foundation::ErrorKind::DuplicateStore)
    ///   if a container shares its id with a room or the inventory
    /// - [`ErrorKind::StoreNotFound`](textgame_foundation::ErrorKind::StoreNotFound)
    ///   if a thing starts in an unknown place
    pub fn new(
        rooms: impl IntoIterator<Item = Room>,
        initial_location: &str,
        things: impl IntoIterator<Item = Thing>,
        seed: u64,
    ) -> Result<Self> {
        let mut rooms: IndexMap<String, Room> =
            rooms.into_iter().map(|room| (room.id.clone(), room)).collect();
        if !rooms.contains_key(initial_location) {
            return Err(Error::room_not_found(initial_location));
        }
        rooms
            .entry(STORAGE_ROOM.to_string())
            .or_insert_with(|| Room::new(STORAGE_ROOM));

        let mut manager = StorageManager::with_things(things);
        for id in rooms.keys() {
            manager.add_store(Store::new(id.as_str()))?;
        }
        manager.add_store(Store::new(INVENTORY))?;
        let containers: Vec<Store> = manager
            .all()
            .filter_map(|thing| {
                thing.container_limit().map(|limit| Store {
                    id: thing.id.clone(),
                    limit,
                })
            })
            .collect();
        for store in containers {
            manager.add_store(store)?;
        }

        let mut state = Self {
            rooms,
            things: manager,
            player_location: initial_location.to_string(),
            player_location_old: None,
            player_status: PlayerStatus::Normal,
            score: 0,
            health: full_health(),
            time: 0,
            daytime: Daytime::Day,
            rng: ChaCha8Rng::seed_from_u64(seed),
            misc: IndexMap::new(),
            events: Events::default(),
        };
        state.place_initial()?;
        state.refresh_all_darkness();
        state.location_mut().visit();
        info!(
            "new game with {} rooms and {} things, starting in {initial_location:?}",
            state.rooms.len(),
            state.things.ids().count()
        );
        Ok(state)
    }

    /// A single empty room called `start`, seeded with 0.
    #[must_use]
    pub fn empty() -> Self {
        let mut things = StorageManager::new();
        for id in ["start", STORAGE_ROOM, INVENTORY] {
            // fresh manager, ids are distinct
            let _ = things.add_store(Store::new(id));
        }
        Self {
            rooms: [Room::new("start"), Room::new(STORAGE_ROOM)]
                .into_iter()
                .map(|room| (room.id.clone(), room))
                .collect(),
            things,
            player_location: "start".to_string(),
            player_location_old: None,
            player_status: PlayerStatus::Normal,
            score: 0,
            health: full_health(),
            time: 0,
            daytime: Daytime::Day,
            rng: ChaCha8Rng::seed_from_u64(0),
            misc: IndexMap::new(),
            events: Events::default(),
        }
    }

    fn place_initial(&mut self) -> Result<()> {
        let placements: Vec<(String, String)> = self
            .things
            .all()
            .filter(|thing| !thing.initlocation.is_empty())
            .map(|thing| (thing.id.clone(), thing.initlocation.clone()))
            .collect();
        for (thing, location) in placements {
            self.things.place(&thing, &location)?;
        }
        Ok(())
    }

    // ===== Rooms and the player =====

    /// Returns the room with this id.
    #[must_use]
    pub fn room(&self, room_id: &str) -> Option<&Room> {
        self.rooms.get(room_id)
    }

    /// Mutable version of [`State::room`].
    pub fn room_mut(&mut self, room_id: &str) -> Option<&mut Room> {
        self.rooms.get_mut(room_id)
    }

    /// Iterates over all rooms in load order.
    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms.values()
    }

    /// Returns the id of the player's room.
    #[must_use]
    pub fn player_location(&self) -> &str {
        &self.player_location
    }

    /// Returns the id of the room the player came from.
    #[must_use]
    pub fn player_location_old(&self) -> Option<&str> {
        self.player_location_old.as_deref()
    }

    /// Returns the player's room.
    ///
    /// # Panics
    ///
    /// Never: the player location is checked whenever it changes and rooms
    /// cannot be removed.
    #[must_use]
    pub fn location(&self) -> &Room {
        &self.rooms[self.player_location.as_str()]
    }

    /// Mutable version of [`State::location`].
    ///
    /// # Panics
    ///
    /// Never, see [`State::location`].
    pub fn location_mut(&mut self) -> &mut Room {
        &mut self.rooms[self.player_location.as_str()]
    }

    /// Moves the player to `room_id`, remembering the current room, and
    /// updates the darkness of the new room.
    ///
    /// Does not visit the room; the caller decides about score.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::RoomNotFound`](textgame_foundation::ErrorKind::RoomNotFound)
    /// for unknown rooms.
    pub fn move_player(&mut self, room_id: &str) -> Result<()> {
        if !self.rooms.contains_key(room_id) {
            return Err(Error::room_not_found(room_id));
        }
        debug!("moving player from {:?} to {room_id:?}", self.player_location);
        let old = std::mem::replace(&mut self.player_location, room_id.to_string());
        self.player_location_old = Some(old);
        self.refresh_darkness(room_id);
        Ok(())
    }

    // ===== Things =====

    /// Returns a thing, wherever it is.
    #[must_use]
    pub fn thing(&self, thing_id: &str) -> Option<&Thing> {
        self.things.get(thing_id)
    }

    /// Mutable version of [`State::thing`].
    pub fn thing_mut(&mut self, thing_id: &str) -> Option<&mut Thing> {
        self.things.get_mut(thing_id)
    }

    /// Moves a thing into a room, container or the inventory, ignoring limits.
    ///
    /// # Errors
    ///
    /// See [`StorageManager::place`].
    pub fn place(&mut self, thing_id: &str, store_id: &str) -> Result<bool> {
        self.things.place(thing_id, store_id)
    }

    /// Ids of the things in the player's room, in the order they arrived.
    #[must_use]
    pub fn things_here(&self) -> Vec<String> {
        self.things.ids_in(&self.player_location)
    }

    /// Ids of the things in the inventory.
    #[must_use]
    pub fn inventory_ids(&self) -> Vec<String> {
        self.things.ids_in(INVENTORY)
    }

    /// Returns true if the player carries `thing_id`.
    #[must_use]
    pub fn inventory_has(&self, thing_id: &str) -> bool {
        self.things.contains(INVENTORY, thing_id)
    }

    /// Puts a thing into the inventory.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::StoreLimitExceeded`](textgame_foundation::ErrorKind::StoreLimitExceeded)
    /// if the inventory is full.
    pub fn add_to_inventory(&mut self, thing_id: &str) -> Result<bool> {
        self.things.add(thing_id, INVENTORY)
    }

    /// Sets how many things the player can carry.
    pub fn set_inventory_limit(&mut self, limit: Option<usize>) {
        // the inventory store is registered by every constructor
        let _ = self.things.set_limit(INVENTORY, limit);
    }

    /// Returns the id of the room a thing lies in, `None` if it is carried,
    /// inside a container or nowhere.
    #[must_use]
    pub fn room_of(&self, thing_id: &str) -> Option<&str> {
        self.things
            .location_of(thing_id)
            .filter(|store| self.rooms.contains_key(*store))
    }

    /// Ids of every creature in a room, room by room.
    #[must_use]
    pub fn creature_ids(&self) -> Vec<String> {
        self.rooms
            .keys()
            .flat_map(|room| self.things.ids_in(room))
            .filter(|id| self.things.get(id).is_some_and(|thing| thing.creature().is_some()))
            .collect()
    }

    /// Returns true if a light source lies in `room_id`, or the player is
    /// there and carries one.
    #[must_use]
    pub fn is_lit(&self, room_id: &str) -> bool {
        let has_lamp = |store: &str| {
            self.things
                .things_in(store)
                .values()
                .any(|thing| thing.is_lightsource())
        };
        has_lamp(room_id) || (room_id == self.player_location && has_lamp(INVENTORY))
    }

    /// Returns true if the player's room is lit.
    #[must_use]
    pub fn has_light(&self) -> bool {
        self.is_lit(&self.player_location)
    }

    /// Updates the darkness of a room: dark when always dark or at night,
    /// unless lit.
    pub fn refresh_darkness(&mut self, room_id: &str) {
        let lit = self.is_lit(room_id);
        let night = self.daytime == Daytime::Night;
        if let Some(room) = self.rooms.get_mut(room_id) {
            room.dark.now = (room.dark.always || night) && !lit;
        }
    }

    /// Updates the darkness of every room.
    pub fn refresh_all_darkness(&mut self) {
        let ids: Vec<String> = self.rooms.keys().cloned().collect();
        for id in ids {
            self.refresh_darkness(&id);
        }
    }

    /// Returns true if the player's room is dark.
    #[must_use]
    pub fn is_dark_here(&self) -> bool {
        self.location().is_dark()
    }

    /// Describes the player's room and everything in it.
    #[must_use]
    pub fn describe_location(&self, long: bool) -> Message {
        let room = self.location();
        if room.is_dark() {
            return descriptions::DARK_L.into();
        }
        let mut message = room.describe(long);
        for thing in self.things.things_in(room.id.as_str()).values() {
            message += thing.describe();
        }
        message
    }

    // ===== Randomness =====

    /// Returns a uniform number in `[0, 1)`.
    pub fn random(&mut self) -> f64 {
        self.rng.r#gen::<f64>()
    }

    /// Returns a uniform integer in `[0, upper)`.
    pub fn random_below(&mut self, upper: usize) -> usize {
        self.rng.gen_range(0..upper.max(1))
    }

    /// Picks one element.
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.rng)
    }

    /// Restarts the random source from `seed`.
    pub fn reseed(&mut self, seed: u64) {
        debug!("reseeding the random source with {seed}");
        self.rng = ChaCha8Rng::seed_from_u64(seed);
    }

    /// Rolls the damage of an attack.
    pub fn roll_damage(&mut self, strength: Strength) -> f64 {
        strength.calculate_damage(&mut self.rng)
    }

    // ===== Behaviours =====

    /// Runs the behaviour `name` of a creature if it is switched on.
    ///
    /// A behaviour that leaves its creature dead is switched off.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::ThingNotFound`](textgame_foundation::ErrorKind::ThingNotFound)
    ///   if there is no creature `creature_id`
    /// - [`ErrorKind::BehaviourNotDefined`](textgame_foundation::ErrorKind::BehaviourNotDefined)
    ///   if the creature has no behaviour `name`
    pub fn call_behaviour(&mut self, creature_id: &str, name: &str) -> Result<Option<Message>> {
        let creature = self
            .things
            .get_mut(creature_id)
            .and_then(Thing::creature_mut)
            .ok_or_else(|| Error::thing_not_found(creature_id))?;
        let mut behaviour = creature.behaviours.take(creature_id, name)?;
        let message = if behaviour.is_switched_on() {
            debug!("calling behaviour {name:?} of {creature_id:?}");
            behaviour.run(creature_id, self)
        } else {
            None
        };
        if let Some(creature) = self.things.get_mut(creature_id).and_then(Thing::creature_mut) {
            if !creature.alive() {
                behaviour.switch_off();
            }
            creature.behaviours.put_back(name, behaviour);
        }
        Ok(message)
    }

    /// Checks that the player's current and previous rooms exist. Run on
    /// states that did not come from [`State::new`], such as snapshots.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::RoomNotFound`](textgame_foundation::ErrorKind::RoomNotFound)
    /// naming the first missing room.
    pub fn check_locations(&self) -> Result<()> {
        let rooms = std::iter::once(self.player_location.as_str())
            .chain(self.player_location_old.as_deref());
        for room_id in rooms {
            if !self.rooms.contains_key(room_id) {
                return Err(Error::room_not_found(room_id));
            }
        }
        Ok(())
    }

    /// Builds the behaviours of every creature loaded from a snapshot.
    ///
    /// # Errors
    ///
    /// See [`crate::behaviour_factory`].
    pub fn restore_behaviours(&mut self, registry: &BehaviourRegistry) -> Result<()> {
        let ids: Vec<String> = self.things.ids().map(str::to_string).collect();
        for id in ids {
            if let Some(creature) = self.things.get_mut(&id).and_then(Thing::creature_mut) {
                creature.behaviours.resolve(registry)?;
            }
        }
        Ok(())
    }

    // ===== Events =====

    /// Schedules an event.
    pub fn set_event(&mut self, event: impl Event + 'static) {
        if event.condition(self) {
            self.events.ready.push(Box::new(event));
        } else {
            self.events.pending.push(Box::new(event));
        }
    }

    /// Moves pending events whose condition now holds to the ready list, then
    /// takes all ready events.
    pub fn pop_ready_events(&mut self) -> Vec<Box<dyn Event>> {
        let pending = std::mem::take(&mut self.events.pending);
        for event in pending {
            if event.condition(self) {
                self.events.ready.push(event);
            } else {
                self.events.pending.push(event);
            }
        }
        std::mem::take(&mut self.events.ready)
    }

    /// Returns the number of scheduled events.
    #[must_use]
    pub fn scheduled_events(&self) -> usize {
        self.events.len()
    }
}
