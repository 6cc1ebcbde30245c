//! Creature behaviours.
//!
//! A behaviour is a switchable piece of creature logic, run by hooks through
//! [`State::call_behaviour`]. Behaviours are built from JSON parameters by
//! factories in the [`BehaviourRegistry`], and persisted the same way: as
//! their registry name plus parameters.

use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use log::debug;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use textgame_foundation::{Error, ErrorKind, Message, Result};

use crate::registry::{BehaviourFactory, BehaviourRegistry};
use crate::state::State;

/// Name of [`SequenceBehaviour`] in the default registry.
pub const SEQUENCE: &str = "sequence";

/// A switchable unit of creature logic.
pub trait Behaviour: fmt::Debug {
    /// Name of the factory that builds this behaviour.
    fn kind(&self) -> &str;

    /// Returns true if the behaviour runs when called.
    fn is_switched_on(&self) -> bool;

    /// Switches the behaviour on.
    fn switch_on(&mut self);

    /// Switches the behaviour off.
    fn switch_off(&mut self);

    /// Flips the switch.
    fn toggle(&mut self) {
        if self.is_switched_on() {
            self.switch_off();
        } else {
            self.switch_on();
        }
    }

    /// Runs the behaviour for the creature `creature_id`.
    fn run(&mut self, creature_id: &str, state: &mut State) -> Option<Message>;

    /// Parameters that rebuild this behaviour through its factory.
    fn params(&self) -> Value;
}

/// A behaviour as persisted: factory name plus parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BehaviourSpec {
    /// Factory name.
    pub kind: String,
    /// Factory parameters.
    pub params: Value,
}

/// Builds the behaviour `name` from `params`. A missing `switch` parameter
/// defaults to on.
///
/// # Errors
///
/// - [`ErrorKind::BehaviourNotRegistered`] if no factory is registered as `name`
/// - [`ErrorKind::Configuration`] if the factory rejects the parameters
pub fn behaviour_factory(
    name: &str,
    params: &Value,
    registry: &BehaviourRegistry,
) -> Result<Box<dyn Behaviour>> {
    let factory = registry
        .get(name)
        .ok_or_else(|| Error::new(ErrorKind::BehaviourNotRegistered(name.to_string())))?;
    let mut params = match params {
        Value::Null => Value::Object(Map::new()),
        other => other.clone(),
    };
    if let Value::Object(map) = &mut params {
        map.entry("switch").or_insert(Value::Bool(true));
    }
    let behaviour = factory(&params, registry)?;
    debug!(
        "built behaviour {name:?}, switched {}",
        if behaviour.is_switched_on() { "on" } else { "off" }
    );
    Ok(behaviour)
}

/// Factory for behaviours that deserialize from their parameters.
#[must_use]
pub fn from_params<B>(kind: &'static str) -> BehaviourFactory
where
    B: Behaviour + DeserializeOwned + 'static,
{
    Rc::new(move |params, _| {
        serde_json::from_value::<B>(params.clone())
            .map(|behaviour| Box::new(behaviour) as Box<dyn Behaviour>)
            .map_err(|err| Error::configuration(format!("bad parameters for behaviour {kind:?}: {err}")))
    })
}

/// Serializes a behaviour's own fields as its parameters.
pub fn params_of<B: Serialize>(behaviour: &B) -> Value {
    serde_json::to_value(behaviour).unwrap_or(Value::Null)
}

/// Serde default for `switch` fields.
#[must_use]
pub fn switched_on() -> bool {
    true
}

// =============================================================================
// Behaviours
// =============================================================================

enum Slot {
    Live(Box<dyn Behaviour>),
    /// Loaded from a snapshot, waiting for [`Behaviours::resolve`].
    Unresolved(BehaviourSpec),
    /// Taken out while it runs.
    Running,
}

/// The behaviours of one creature, by name, in insertion order.
#[derive(Default)]
pub struct Behaviours {
    slots: IndexMap<String, Slot>,
}

impl Behaviours {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds each `name → params` entry through the registry.
    ///
    /// # Errors
    ///
    /// See [`behaviour_factory`].
    pub fn from_params<'a, I>(params: I, registry: &BehaviourRegistry) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a String, &'a Value)>,
    {
        let mut behaviours = Self::new();
        for (name, params) in params {
            behaviours.insert(name.clone(), behaviour_factory(name, params, registry)?);
        }
        Ok(behaviours)
    }

    /// Adds or replaces a behaviour.
    pub fn insert(&mut self, name: impl Into<String>, behaviour: Box<dyn Behaviour>) {
        self.slots.insert(name.into(), Slot::Live(behaviour));
    }

    /// Returns true if a behaviour called `name` exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.slots.contains_key(name)
    }

    /// Iterates over the behaviour names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.slots.keys().map(String::as_str)
    }

    /// Returns the behaviour called `name` if it is built.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&dyn Behaviour> {
        match self.slots.get(name)? {
            Slot::Live(behaviour) => Some(behaviour.as_ref()),
            Slot::Unresolved(_) | Slot::Running => None,
        }
    }

    /// Mutable version of [`Behaviours::get`].
    pub fn get_mut(&mut self, name: &str) -> Option<&mut (dyn Behaviour + 'static)> {
        match self.slots.get_mut(name)? {
            Slot::Live(behaviour) => Some(behaviour.as_mut()),
            Slot::Unresolved(_) | Slot::Running => None,
        }
    }

    /// Returns the number of behaviours.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if there are no behaviours.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Switches every behaviour off.
    pub fn switch_all_off(&mut self) {
        for slot in self.slots.values_mut() {
            match slot {
                Slot::Live(behaviour) => behaviour.switch_off(),
                Slot::Unresolved(spec) => {
                    if let Value::Object(map) = &mut spec.params {
                        map.insert("switch".to_string(), Value::Bool(false));
                    }
                }
                Slot::Running => {}
            }
        }
    }

    /// Returns true if every behaviour is built.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.slots.values().all(|slot| matches!(slot, Slot::Live(_)))
    }

    /// Builds behaviours loaded from a snapshot.
    ///
    /// # Errors
    ///
    /// See [`behaviour_factory`].
    pub fn resolve(&mut self, registry: &BehaviourRegistry) -> Result<()> {
        for slot in self.slots.values_mut() {
            if let Slot::Unresolved(spec) = slot {
                *slot = Slot::Live(behaviour_factory(&spec.kind, &spec.params, registry)?);
            }
        }
        Ok(())
    }

    /// Takes the behaviour out so it can run against the state that owns it.
    pub(crate) fn take(&mut self, creature: &str, name: &str) -> Result<Box<dyn Behaviour>> {
        let slot = self.slots.get_mut(name).ok_or_else(|| {
            Error::new(ErrorKind::BehaviourNotDefined {
                creature: creature.to_string(),
                behaviour: name.to_string(),
            })
        })?;
        match std::mem::replace(slot, Slot::Running) {
            Slot::Live(behaviour) => Ok(behaviour),
            Slot::Unresolved(spec) => {
                *slot = Slot::Unresolved(spec);
                Err(Error::configuration(format!(
                    "behaviour {name:?} of {creature:?} was never built; restore behaviours after loading"
                )))
            }
            Slot::Running => Err(Error::new(ErrorKind::Internal(format!(
                "behaviour {name:?} of {creature:?} is already running"
            )))),
        }
    }

    /// Puts a behaviour back into the slot it was taken from.
    pub(crate) fn put_back(&mut self, name: &str, behaviour: Box<dyn Behaviour>) {
        if let Some(slot) = self.slots.get_mut(name) {
            *slot = Slot::Live(behaviour);
        }
    }

    fn specs(&self) -> IndexMap<&str, BehaviourSpec> {
        self.slots
            .iter()
            .filter_map(|(name, slot)| {
                let spec = match slot {
                    Slot::Live(behaviour) => BehaviourSpec {
                        kind: behaviour.kind().to_string(),
                        params: behaviour.params(),
                    },
                    Slot::Unresolved(spec) => spec.clone(),
                    Slot::Running => return None,
                };
                Some((name.as_str(), spec))
            })
            .collect()
    }
}

impl fmt::Debug for Behaviours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.specs()).finish()
    }
}

impl Serialize for Behaviours {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.specs().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Behaviours {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let specs = IndexMap::<String, BehaviourSpec>::deserialize(deserializer)?;
        Ok(Self {
            slots: specs
                .into_iter()
                .map(|(name, spec)| (name, Slot::Unresolved(spec)))
                .collect(),
        })
    }
}

// =============================================================================
// SequenceBehaviour
// =============================================================================

/// Runs the first switched-on child. Switches itself off once no child is
/// left, and switching it propagates to all children.
#[derive(Debug)]
pub struct SequenceBehaviour {
    switch: bool,
    children: Vec<Box<dyn Behaviour>>,
}

impl SequenceBehaviour {
    /// Creates a switched-on sequence.
    #[must_use]
    pub fn new(children: Vec<Box<dyn Behaviour>>) -> Self {
        Self {
            switch: true,
            children,
        }
    }

    /// Returns the children in order.
    #[must_use]
    pub fn children(&self) -> &[Box<dyn Behaviour>] {
        &self.children
    }

    /// Factory reading `{"switch": bool, "sequence": [{name: params}, ...]}`.
    #[must_use]
    pub fn factory() -> BehaviourFactory {
        Rc::new(|params, registry| {
            let switch = params.get("switch").and_then(Value::as_bool).unwrap_or(true);
            let steps = match params.get("sequence") {
                None => &[][..],
                Some(Value::Array(steps)) => steps.as_slice(),
                Some(_) => return Err(Error::configuration("a behaviour sequence must be a list")),
            };
            let mut children = Vec::with_capacity(steps.len());
            for step in steps {
                let entry = step
                    .as_object()
                    .filter(|map| map.len() == 1)
                    .and_then(|map| map.iter().next())
                    .ok_or_else(|| {
                        Error::configuration(format!(
                            "each step of a behaviour sequence needs exactly one behaviour, got {step}"
                        ))
                    })?;
                children.push(behaviour_factory(entry.0, entry.1, registry)?);
            }
            let mut sequence = Self::new(children);
            if !switch {
                sequence.switch = false;
            }
            Ok(Box::new(sequence) as Box<dyn Behaviour>)
        })
    }
}

impl Behaviour for SequenceBehaviour {
    fn kind(&self) -> &str {
        SEQUENCE
    }

    fn is_switched_on(&self) -> bool {
        self.switch
    }

    fn switch_on(&mut self) {
        self.switch = true;
        for child in &mut self.children {
            child.switch_on();
        }
    }

    fn switch_off(&mut self) {
        self.switch = false;
        for child in &mut self.children {
            child.switch_off();
        }
    }

    fn run(&mut self, creature_id: &str, state: &mut State) -> Option<Message> {
        match self.children.iter_mut().find(|child| child.is_switched_on()) {
            Some(child) => child.run(creature_id, state),
            None => {
                debug!("behaviour sequence of {creature_id:?} is exhausted");
                self.switch_off();
                None
            }
        }
    }

    fn params(&self) -> Value {
        let sequence = self
            .children
            .iter()
            .map(|child| {
                let mut step = Map::new();
                step.insert(child.kind().to_string(), child.params());
                Value::Object(step)
            })
            .collect();
        serde_json::json!({ "switch": self.switch, "sequence": Value::Array(sequence) })
    }
}
