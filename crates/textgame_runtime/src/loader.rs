//! Builds a [`State`] from JSON content.
//!
//! Content comes as three lists of JSON objects: rooms, items and creatures.
//! Things name their constructor with a `type` field; entries without one use
//! the default of their list (`item` or `creature`).
//!
//! ```
//! use serde_json::json;
//! use textgame_engine::Registries;
//! use textgame_runtime::StateBuilder;
//!
//! let rooms = [
//!     json!({"id": "beach", "doors": {"north": "cliff"}}),
//!     json!({"id": "cliff", "doors": {"south": "beach"}}),
//! ];
//! let items = [json!({"id": "shell", "initlocation": "beach", "value": 3})];
//! let state = StateBuilder::new()
//!     .build("beach", &rooms, &items, &[], &Registries::new().behaviours)
//!     .unwrap();
//! assert_eq!(state.things_here(), vec!["shell"]);
//! ```

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;
use std::rc::Rc;

use log::{debug, info};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use textgame_engine::{
    BehaviourRegistry, Behaviours, Darkness, Registry, Room, STORAGE_ROOM, State, Thing, ThingKind,
};
use textgame_foundation::{Direction, Error, ErrorContext, ErrorKind, Result};

/// Turns the type-specific fields of a thing into its [`ThingKind`].
pub type Constructor = Rc<dyn Fn(Value) -> serde_json::Result<ThingKind>>;

fn constructor<T, F>(wrap: F) -> Constructor
where
    T: DeserializeOwned,
    F: Fn(T) -> ThingKind + 'static,
{
    Rc::new(move |fields| serde_json::from_value(fields).map(&wrap))
}

// =============================================================================
// Factory
// =============================================================================

/// Registry of thing constructors by type name.
///
/// Starts out with `item`, `key`, `weapon`, `lightsource`, `container`,
/// `creature` and `monster`.
#[derive(Debug)]
pub struct Factory {
    constructors: Registry<Constructor>,
}

impl Default for Factory {
    fn default() -> Self {
        let mut constructors = Registry::new();
        constructors
            .register("item", constructor(ThingKind::Item))
            .register("key", constructor(ThingKind::Key))
            .register("weapon", constructor(ThingKind::Weapon))
            .register("lightsource", constructor(ThingKind::Lightsource))
            .register("container", constructor(ThingKind::Container))
            .register("creature", constructor(ThingKind::Creature))
            .register("monster", constructor(ThingKind::Monster));
        Self { constructors }
    }
}

impl Factory {
    /// Creates a factory knowing the stock types.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a constructor, replacing any previous one of that name.
    pub fn register(&mut self, type_name: impl Into<String>, constructor: Constructor) -> &mut Self {
        self.constructors.register(type_name, constructor);
        self
    }

    /// Removes a constructor. Unknown names are ignored.
    pub fn unregister(&mut self, type_name: &str) -> Option<Constructor> {
        self.constructors.unregister(type_name)
    }

    /// Returns true if `type_name` has a constructor.
    #[must_use]
    pub fn contains(&self, type_name: &str) -> bool {
        self.constructors.contains(type_name)
    }

    /// Builds a thing from its JSON description.
    ///
    /// `id`, `name`, `description` and `initlocation` are read here; a
    /// `behaviours` object (`name → params`) is built through `behaviours`.
    /// Everything else goes to the constructor.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::FactoryNotFound`] if the type has no constructor
    /// - [`ErrorKind::Configuration`] if the description is malformed or a
    ///   thing that is not a creature has behaviours
    /// - [`ErrorKind::BehaviourNotRegistered`] for unknown behaviours
    pub fn create(
        &self,
        description: &Value,
        default_type: Option<&str>,
        behaviours: &BehaviourRegistry,
    ) -> Result<Thing> {
        let Value::Object(fields) = description else {
            return Err(Error::configuration(format!(
                "a thing must be described by an object, got {description}"
            )));
        };
        let mut fields = fields.clone();
        let id = take_string(&mut fields, "id")?
            .ok_or_else(|| Error::configuration("id is missing from thing description"))?;
        let type_name = match take_string(&mut fields, "type")? {
            Some(type_name) => type_name,
            None => default_type
                .map(str::to_string)
                .ok_or_else(|| Error::configuration(format!("type is missing from {id:?}")))?,
        };
        let frame = ErrorContext::new().with_frame(format!("{type_name} {id:?}"));
        let Some(constructor) = self.constructors.get(&type_name) else {
            return Err(Error::new(ErrorKind::FactoryNotFound(type_name)).with_context(frame));
        };

        let name = take_string(&mut fields, "name")?;
        let text = take_string(&mut fields, "description")?.unwrap_or_default();
        let initlocation = take_string(&mut fields, "initlocation")?.unwrap_or_default();
        let behaviour_params = fields.remove("behaviours");
        let kind = constructor(Value::Object(fields))
            .map_err(|err| Error::configuration(err.to_string()).with_context(frame.clone()))?;

        let mut thing = Thing::new(id, kind)
            .with_description(text)
            .with_initlocation(initlocation);
        if let Some(name) = name {
            thing = thing.with_name(name);
        }
        if let Some(params) = behaviour_params {
            attach_behaviours(&mut thing, &params, behaviours)
                .map_err(|err| err.with_context(frame))?;
        }
        debug!("created {type_name} {:?}", thing.id);
        Ok(thing)
    }
}

fn take_string(fields: &mut Map<String, Value>, key: &str) -> Result<Option<String>> {
    match fields.remove(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text)),
        Some(other) => Err(Error::configuration(format!(
            "{key} must be a string, got {other}"
        ))),
    }
}

fn attach_behaviours(thing: &mut Thing, params: &Value, registry: &BehaviourRegistry) -> Result<()> {
    let Value::Object(params) = params else {
        return Err(Error::configuration("behaviours must map names to parameters"));
    };
    let id = thing.id.clone();
    let Some(creature) = thing.creature_mut() else {
        return Err(Error::configuration(format!(
            "{id:?} is not a creature and cannot have behaviours"
        )));
    };
    creature.behaviours = Behaviours::from_params(params, registry)?;
    Ok(())
}

// =============================================================================
// Rooms
// =============================================================================

/// Lock state of one door.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LockSpec {
    /// The door starts locked.
    #[serde(default, alias = "locked")]
    pub closed: bool,
    /// Code of the key fitting the door.
    #[serde(default)]
    pub key: Option<i64>,
}

/// JSON description of a room.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoomSpec {
    /// Unique id.
    pub id: String,
    /// Only `room` is accepted.
    #[serde(default, rename = "type")]
    pub type_name: Option<String>,
    /// Long description.
    #[serde(default, alias = "descript")]
    pub description: String,
    /// Short description.
    #[serde(default, alias = "sdescript", alias = "shortdescription")]
    pub short_description: String,
    /// Points for the first visit.
    #[serde(default)]
    pub value: Option<i64>,
    /// Darkness flags.
    #[serde(default)]
    pub dark: Darkness,
    /// Answer to `listen`.
    #[serde(default)]
    pub sound: Option<String>,
    /// Hint text.
    #[serde(default)]
    pub hint: String,
    /// Price of the hint.
    #[serde(default)]
    pub hint_value: Option<i64>,
    /// Doors by direction.
    #[serde(default)]
    pub doors: BTreeMap<Direction, String>,
    /// Doors revealed later.
    #[serde(default)]
    pub hiddendoors: BTreeMap<Direction, String>,
    /// Locks by direction.
    #[serde(default)]
    pub locked: BTreeMap<Direction, LockSpec>,
    /// Text shown when walking in a direction.
    #[serde(default)]
    pub dir_descriptions: BTreeMap<Direction, String>,
    /// Text shown when there is no door in a direction.
    #[serde(default)]
    pub errors: BTreeMap<Direction, String>,
}

impl RoomSpec {
    /// Builds the room. Every door must lead to a room in `known`.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::FactoryNotFound`] if `type` is not `room`
    /// - [`ErrorKind::Configuration`] for doors into unknown rooms and for
    ///   locked doors without a key
    pub fn into_room(self, known: &HashSet<&str>) -> Result<Room> {
        if let Some(type_name) = self.type_name.filter(|name| name != "room") {
            return Err(Error::new(ErrorKind::FactoryNotFound(type_name)));
        }
        let mut room = Room::new(self.id.as_str())
            .with_description(self.description, self.short_description);
        room.dark = self.dark;
        room.hint = self.hint;
        if let Some(value) = self.value {
            room.value = value;
        }
        if let Some(sound) = self.sound {
            room.sound = sound;
        }
        if let Some(cost) = self.hint_value {
            room.hint_value = cost;
        }

        for (dir, destination) in self.doors {
            check_destination(&self.id, dir, &destination, known)?;
            room.add_connection(dir, destination);
        }
        for (dir, destination) in self.hiddendoors {
            check_destination(&self.id, dir, &destination, known)?;
            room.add_hidden_connection(dir, destination);
        }
        for (dir, lock) in self.locked {
            let exit = room.exit_mut(dir);
            match (lock.closed, lock.key) {
                (true, None) => {
                    return Err(Error::configuration(format!(
                        "the door {dir} of {:?} is locked but has no key",
                        self.id
                    )));
                }
                (closed, key) => {
                    exit.locked = closed;
                    exit.key = key;
                }
            }
        }
        for (dir, text) in self.dir_descriptions {
            room.exit_mut(dir).description = text;
        }
        for (dir, text) in self.errors {
            room.exit_mut(dir).error = text;
        }
        Ok(room)
    }
}

fn check_destination(id: &str, dir: Direction, destination: &str, known: &HashSet<&str>) -> Result<()> {
    if known.contains(destination) {
        Ok(())
    } else {
        Err(Error::configuration(format!(
            "the door {dir} of {id:?} leads to the unknown room {destination:?}"
        )))
    }
}

// =============================================================================
// StateBuilder
// =============================================================================

/// Puts rooms, items and creatures together into a [`State`].
#[derive(Debug, Default)]
pub struct StateBuilder {
    factory: Factory,
    seed: u64,
}

impl StateBuilder {
    /// Creates a builder with the stock factory and seed 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses another factory.
    #[must_use]
    pub fn with_factory(mut self, factory: Factory) -> Self {
        self.factory = factory;
        self
    }

    /// Seeds the random source of the built state.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Returns the factory, e.g. to register custom types.
    pub fn factory_mut(&mut self) -> &mut Factory {
        &mut self.factory
    }

    /// Builds the state and puts every thing in its `initlocation`.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::RoomNotFound`] if `initial_location` is not a room
    /// - [`ErrorKind::Configuration`] for malformed content, duplicate ids and
    ///   things starting in unknown rooms
    /// - Any error of [`Factory::create`]
    pub fn build(
        &self,
        initial_location: &str,
        rooms: &[Value],
        items: &[Value],
        creatures: &[Value],
        behaviours: &BehaviourRegistry,
    ) -> Result<State> {
        debug!("create rooms");
        let mut specs = Vec::with_capacity(rooms.len());
        for value in rooms {
            let frame = format!("room {:?}", value.get("id").and_then(Value::as_str).unwrap_or("?"));
            let spec = RoomSpec::deserialize(value).map_err(|err| {
                Error::configuration(err.to_string()).with_context(ErrorContext::new().with_frame(frame))
            })?;
            specs.push(spec);
        }
        let mut known: HashSet<&str> = HashSet::from([STORAGE_ROOM]);
        for spec in &specs {
            if !known.insert(spec.id.as_str()) {
                return Err(Error::configuration(format!("the room {:?} is defined twice", spec.id)));
            }
        }
        let mut room_objs = Vec::with_capacity(specs.len());
        for spec in specs.iter().cloned() {
            let frame = format!("room {:?}", spec.id);
            room_objs.push(
                spec.into_room(&known)
                    .map_err(|err| err.with_context(ErrorContext::new().with_frame(frame)))?,
            );
        }

        debug!("create items");
        let mut things = Vec::with_capacity(items.len() + creatures.len());
        for value in items {
            things.push(self.factory.create(value, Some("item"), behaviours)?);
        }
        debug!("create creatures");
        for value in creatures {
            things.push(self.factory.create(value, Some("creature"), behaviours)?);
        }

        let mut ids = HashSet::new();
        for thing in &things {
            if !ids.insert(thing.id.as_str()) {
                return Err(Error::configuration(format!("the thing {:?} is defined twice", thing.id)));
            }
            if !known.contains(thing.initlocation.as_str()) {
                return Err(Error::configuration(format!(
                    "the initial location {:?} of thing {:?} does not exist",
                    thing.initlocation, thing.id
                )));
            }
        }

        info!(
            "built {} rooms and {} things, starting in {initial_location:?}",
            room_objs.len(),
            things.len()
        );
        State::new(room_objs, initial_location, things, self.seed)
    }

    /// Builds the state from loaded [`Resources`], starting in the first room.
    ///
    /// # Errors
    ///
    /// See [`StateBuilder::build`]. Fails with
    /// [`ErrorKind::Configuration`] if there are no rooms.
    pub fn build_resources(&self, resources: &Resources, behaviours: &BehaviourRegistry) -> Result<State> {
        let start = resources
            .first_room()
            .ok_or_else(|| Error::configuration("there are no rooms"))?;
        self.build(start, &resources.rooms, &resources.items, &resources.creatures, behaviours)
    }
}

// =============================================================================
// Resources
// =============================================================================

/// Raw content read by [`load_resources`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Resources {
    /// Room descriptions.
    pub rooms: Vec<Value>,
    /// Item descriptions.
    pub items: Vec<Value>,
    /// Creature descriptions.
    pub creatures: Vec<Value>,
}

impl Resources {
    /// Returns the id of the first room, where games start.
    #[must_use]
    pub fn first_room(&self) -> Option<&str> {
        self.rooms.first()?.get("id")?.as_str()
    }
}

/// Reads `rooms.json`, `items.json` and `creatures.json` from `dir`.
///
/// Only `rooms.json` is required.
///
/// # Errors
///
/// - [`ErrorKind::Io`] if a file cannot be read
/// - [`ErrorKind::Configuration`] if a file is not a JSON list
pub fn load_resources(dir: impl AsRef<Path>) -> Result<Resources> {
    let dir = dir.as_ref();
    Ok(Resources {
        rooms: load_list(&dir.join("rooms.json"), true)?,
        items: load_list(&dir.join("items.json"), false)?,
        creatures: load_list(&dir.join("creatures.json"), false)?,
    })
}

fn load_list(path: &Path, required: bool) -> Result<Vec<Value>> {
    if !required && !path.exists() {
        debug!("no resource at {}", path.display());
        return Ok(Vec::new());
    }
    debug!("load resource {}", path.display());
    let text = fs::read_to_string(path).map_err(|e| {
        Error::new(ErrorKind::Io(format!(
            "failed to read file '{}': {e}",
            path.display()
        )))
    })?;
    serde_json::from_str(&text).map_err(|e| {
        Error::configuration(e.to_string())
            .with_context(ErrorContext::new().with_source(path.display().to_string()))
    })
}
