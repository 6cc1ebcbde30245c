//! Rooms and the doors between them.
//!
//! A room knows its exits in every [`Direction`], whether or not a door
//! leads anywhere. Things inside a room are not stored here: every room id is
//! also a store in the [`StorageManager`](textgame_storage::StorageManager)
//! owned by [`State`](crate::State).

use std::collections::BTreeMap;
use std::sync::LazyLock;

use log::debug;
use serde::{Deserialize, Deserializer, Serialize};
use textgame_foundation::{Direction, Message};

use crate::words::{descriptions, info, moving};

fn cant_go() -> String {
    moving::FAIL_CANT_GO.to_string()
}

fn no_sound() -> String {
    descriptions::NO_SOUND.to_string()
}

fn default_value() -> i64 {
    Room::DEFAULT_VALUE
}

fn default_hint_value() -> i64 {
    Room::DEFAULT_HINT_VALUE
}

/// One side of a door.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Exit {
    /// Id of the room the door leads to, `None` if there is no door.
    #[serde(default)]
    pub destination: Option<String>,
    /// A locked door cannot be passed.
    #[serde(default)]
    pub locked: bool,
    /// Code of the key that opens the door.
    #[serde(default)]
    pub key: Option<i64>,
    /// Shown when walking through the door.
    #[serde(default)]
    pub description: String,
    /// Shown when there is no door.
    #[serde(default = "cant_go")]
    pub error: String,
}

impl Default for Exit {
    fn default() -> Self {
        Self {
            destination: None,
            locked: false,
            key: None,
            description: String::new(),
            error: cant_go(),
        }
    }
}

/// Darkness of a room.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Darkness {
    /// Dark unless lit, day or night.
    #[serde(default)]
    pub always: bool,
    /// Dark right now.
    #[serde(default)]
    pub now: bool,
}

fn all_exits() -> BTreeMap<Direction, Exit> {
    Direction::ALL
        .into_iter()
        .map(|dir| (dir, Exit::default()))
        .collect()
}

fn fill_exits<'de, D>(deserializer: D) -> Result<BTreeMap<Direction, Exit>, D::Error>
where
    D: Deserializer<'de>,
{
    let mut exits = all_exits();
    exits.extend(BTreeMap::<Direction, Exit>::deserialize(deserializer)?);
    Ok(exits)
}

/// A place the player can be in.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Room {
    /// Unique id, also the id of the room's store.
    pub id: String,
    /// Long description.
    #[serde(default)]
    pub description: String,
    /// Description used once the room was visited.
    #[serde(default)]
    pub short_description: String,
    #[serde(default = "all_exits", deserialize_with = "fill_exits")]
    exits: BTreeMap<Direction, Exit>,
    #[serde(default)]
    hidden: BTreeMap<Direction, String>,
    /// Set on the first visit with light.
    #[serde(default)]
    pub visited: bool,
    /// Darkness flags.
    #[serde(default)]
    pub dark: Darkness,
    /// Points awarded on the first visit.
    #[serde(default = "default_value")]
    pub value: i64,
    /// Answer to `listen`.
    #[serde(default = "no_sound")]
    pub sound: String,
    /// Hint for this room, empty for none.
    #[serde(default)]
    pub hint: String,
    /// Points a hint costs.
    #[serde(default = "default_hint_value")]
    pub hint_value: i64,
}

impl Room {
    /// Points a room is worth unless told otherwise.
    pub const DEFAULT_VALUE: i64 = 5;
    /// Points a hint costs unless told otherwise.
    pub const DEFAULT_HINT_VALUE: i64 = 2;

    /// Creates a lit room without doors.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: String::new(),
            short_description: String::new(),
            exits: all_exits(),
            hidden: BTreeMap::new(),
            visited: false,
            dark: Darkness::default(),
            value: Self::DEFAULT_VALUE,
            sound: no_sound(),
            hint: String::new(),
            hint_value: Self::DEFAULT_HINT_VALUE,
        }
    }

    // ===== Builders =====

    /// Sets the long and short descriptions.
    #[must_use]
    pub fn with_description(mut self, long: impl Into<String>, short: impl Into<String>) -> Self {
        self.description = long.into();
        self.short_description = short.into();
        self
    }

    /// Adds a door.
    #[must_use]
    pub fn with_door(mut self, dir: Direction, destination: impl Into<String>) -> Self {
        self.add_connection(dir, destination);
        self
    }

    /// Adds a hidden door.
    #[must_use]
    pub fn with_hidden_door(mut self, dir: Direction, destination: impl Into<String>) -> Self {
        self.add_hidden_connection(dir, destination);
        self
    }

    /// Locks the door in `dir` with the key code `key`.
    #[must_use]
    pub fn with_lock(mut self, dir: Direction, key: i64) -> Self {
        let exit = self.exit_mut(dir);
        exit.locked = true;
        exit.key = Some(key);
        self
    }

    /// Sets what walking in `dir` looks like.
    #[must_use]
    pub fn with_way_description(mut self, dir: Direction, text: impl Into<String>) -> Self {
        self.exit_mut(dir).description = text.into();
        self
    }

    /// Sets the error shown when there is no door in `dir`.
    #[must_use]
    pub fn with_error(mut self, dir: Direction, text: impl Into<String>) -> Self {
        self.exit_mut(dir).error = text.into();
        self
    }

    /// Sets the points awarded on the first visit.
    #[must_use]
    pub fn with_value(mut self, value: i64) -> Self {
        self.value = value;
        self
    }

    /// Sets the sound.
    #[must_use]
    pub fn with_sound(mut self, sound: impl Into<String>) -> Self {
        self.sound = sound.into();
        self
    }

    /// Sets the hint and its price.
    #[must_use]
    pub fn with_hint(mut self, hint: impl Into<String>, cost: i64) -> Self {
        self.hint = hint.into();
        self.hint_value = cost;
        self
    }

    /// Makes the room dark unless lit.
    #[must_use]
    pub fn always_dark(mut self) -> Self {
        self.dark = Darkness {
            always: true,
            now: true,
        };
        self
    }

    // ===== Exits =====

    /// Returns the exit in `dir`.
    #[must_use]
    pub fn exit(&self, dir: Direction) -> &Exit {
        static NO_DOOR: LazyLock<Exit> = LazyLock::new(Exit::default);
        self.exits.get(&dir).unwrap_or(&NO_DOOR)
    }

    /// Mutable version of [`Room::exit`].
    pub fn exit_mut(&mut self, dir: Direction) -> &mut Exit {
        self.exits.entry(dir).or_default()
    }

    /// Iterates over all exits in direction order.
    pub fn exits(&self) -> impl Iterator<Item = (Direction, &Exit)> {
        self.exits.iter().map(|(dir, exit)| (*dir, exit))
    }

    /// Returns the id of the room behind the door in `dir`.
    #[must_use]
    pub fn connection(&self, dir: Direction) -> Option<&str> {
        self.exit(dir).destination.as_deref()
    }

    /// Returns true if there is a door in `dir`.
    #[must_use]
    pub fn has_connection(&self, dir: Direction) -> bool {
        self.connection(dir).is_some()
    }

    /// Returns true if the door in `dir` is locked.
    #[must_use]
    pub fn is_locked(&self, dir: Direction) -> bool {
        self.exit(dir).locked
    }

    /// Locks or unlocks the door in `dir`.
    pub fn set_locked(&mut self, dir: Direction, locked: bool) {
        debug!(
            "{} the door of {:?} to the {dir}",
            if locked { "locking" } else { "unlocking" },
            self.id
        );
        self.exit_mut(dir).locked = locked;
    }

    /// Returns the key code of the door in `dir`.
    #[must_use]
    pub fn door_code(&self, dir: Direction) -> Option<i64> {
        self.exit(dir).key
    }

    /// Returns what walking in `dir` looks like.
    #[must_use]
    pub fn describe_way_to(&self, dir: Direction) -> Message {
        Message::new(self.exit(dir).description.as_str())
    }

    /// Returns the error for walking in `dir` without a door.
    #[must_use]
    pub fn describe_error(&self, dir: Direction) -> Message {
        Message::new(self.exit(dir).error.as_str())
    }

    /// Returns true if a door leads to `room_id`.
    #[must_use]
    pub fn connects_to(&self, room_id: &str) -> bool {
        self.direction_to(room_id).is_some()
    }

    /// Returns the first direction whose door leads to `room_id`.
    #[must_use]
    pub fn direction_to(&self, room_id: &str) -> Option<Direction> {
        self.exits()
            .find(|(_, exit)| exit.destination.as_deref() == Some(room_id))
            .map(|(dir, _)| dir)
    }

    /// Returns the unlocked doors and where they lead.
    #[must_use]
    pub fn open_connections(&self) -> Vec<(Direction, &str)> {
        self.exits()
            .filter(|(_, exit)| !exit.locked)
            .filter_map(|(dir, exit)| exit.destination.as_deref().map(|dest| (dir, dest)))
            .collect()
    }

    /// Adds or replaces the door in `dir`.
    pub fn add_connection(&mut self, dir: Direction, destination: impl Into<String>) {
        self.exit_mut(dir).destination = Some(destination.into());
    }

    /// Adds a door that only appears after [`Room::reveal_hidden_exits`].
    pub fn add_hidden_connection(&mut self, dir: Direction, destination: impl Into<String>) {
        self.hidden.insert(dir, destination.into());
    }

    /// Returns the hidden doors.
    #[must_use]
    pub fn hidden_connections(&self) -> &BTreeMap<Direction, String> {
        &self.hidden
    }

    /// Turns every hidden door into a regular one.
    pub fn reveal_hidden_exits(&mut self) {
        let hidden = std::mem::take(&mut self.hidden);
        debug!(
            "revealing hidden exits of {:?}: {:?}",
            self.id,
            hidden.keys().collect::<Vec<_>>()
        );
        for (dir, destination) in hidden {
            self.add_connection(dir, destination);
        }
    }

    // ===== Visiting =====

    /// Returns true if it is dark right now.
    #[must_use]
    pub fn is_dark(&self) -> bool {
        self.dark.now
    }

    /// Marks the room visited unless it is dark. Returns the points earned,
    /// the room value on the first lit visit and 0 otherwise.
    pub fn visit(&mut self) -> i64 {
        if self.dark.now || self.visited {
            return 0;
        }
        self.visited = true;
        self.value
    }

    /// Returns the room's own description, long on the first visit or when
    /// asked for.
    #[must_use]
    pub fn describe(&self, long: bool) -> Message {
        if self.dark.now {
            return descriptions::DARK_L.into();
        }
        if long || !self.visited {
            self.description.as_str().into()
        } else {
            self.short_description.as_str().into()
        }
    }

    /// Returns the price warning and the hint, `None` if there is no hint.
    #[must_use]
    pub fn hint(&self) -> Option<(Message, Message)> {
        if self.hint.is_empty() {
            return None;
        }
        Some((
            info::hint_warning(self.hint_value).into(),
            self.hint.as_str().into(),
        ))
    }
}
