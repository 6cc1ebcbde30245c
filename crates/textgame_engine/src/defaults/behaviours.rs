//! Stock creature behaviours.

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use textgame_foundation::Message;

use crate::behaviour::{Behaviour, SEQUENCE, SequenceBehaviour, from_params, params_of, switched_on};
use crate::registry::Registries;
use crate::state::{STORAGE_ROOM, State};

/// Registry name of [`RandomWalk`].
pub const RANDOM_WALK: &str = "randomwalk";
/// Registry name of [`RandomAppearance`].
pub const RANDOM_APPEARANCE: &str = "randomappearance";
/// Registry name of [`RandomSpawnOnce`].
pub const RANDOM_SPAWN_ONCE: &str = "random_spawn_once";

/// Registers every stock behaviour plus [`SequenceBehaviour`].
pub fn use_default_behaviours(registries: &mut Registries) {
    registries
        .register_behaviour(RANDOM_WALK, from_params::<RandomWalk>(RANDOM_WALK))
        .register_behaviour(
            RANDOM_APPEARANCE,
            from_params::<RandomAppearance>(RANDOM_APPEARANCE),
        )
        .register_behaviour(
            RANDOM_SPAWN_ONCE,
            from_params::<RandomSpawnOnce>(RANDOM_SPAWN_ONCE),
        )
        .register_behaviour(SEQUENCE, SequenceBehaviour::factory());
}

fn place(state: &mut State, creature_id: &str, room_id: &str) {
    if let Err(err) = state.place(creature_id, room_id) {
        warn!("cannot move {creature_id:?} to {room_id:?}: {err}");
    }
}

macro_rules! switch_impl {
    ($kind:expr) => {
        fn kind(&self) -> &str {
            $kind
        }

        fn is_switched_on(&self) -> bool {
            self.switch
        }

        fn switch_on(&mut self) {
            self.switch = true;
        }

        fn switch_off(&mut self) {
            self.switch = false;
        }

        fn params(&self) -> Value {
            params_of(self)
        }
    };
}

/// Wanders through an unlocked door with probability `mobility` per call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RandomWalk {
    /// Runs when called.
    #[serde(default = "switched_on")]
    pub switch: bool,
    /// Probability of moving, in `[0, 1]`.
    pub mobility: f64,
}

impl Behaviour for RandomWalk {
    switch_impl!(RANDOM_WALK);

    fn run(&mut self, creature_id: &str, state: &mut State) -> Option<Message> {
        let Some(room_id) = state.room_of(creature_id).map(str::to_string) else {
            debug!("{creature_id:?} is not in a room, skipping the random walk");
            return None;
        };
        let connections: Vec<String> = state
            .room(&room_id)?
            .open_connections()
            .into_iter()
            .map(|(_, destination)| destination.to_string())
            .collect();
        if state.random() < self.mobility {
            let next = state.choose(&connections)?.clone();
            debug!("{creature_id:?} walks from {room_id:?} to {next:?}");
            place(state, creature_id, &next);
        }
        None
    }
}

/// Shows up next to the player in matching rooms, and vanishes into the
/// storage room one turn later.
///
/// A room matches if its id contains one of `rooms`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RandomAppearance {
    /// Runs when called.
    #[serde(default = "switched_on")]
    pub switch: bool,
    /// Probability of appearing, in `[0, 1]`.
    pub probability: f64,
    /// Patterns of room ids to appear in.
    pub rooms: Vec<String>,
}

impl Behaviour for RandomAppearance {
    switch_impl!(RANDOM_APPEARANCE);

    fn run(&mut self, creature_id: &str, state: &mut State) -> Option<Message> {
        let here = state.player_location().to_string();
        if state.room_of(creature_id) == Some(here.as_str()) {
            debug!("{creature_id:?} disappears");
            place(state, creature_id, STORAGE_ROOM);
        } else if state.random() < self.probability
            && self.rooms.iter().any(|pattern| here.contains(pattern.as_str()))
        {
            debug!("{creature_id:?} appears in {here:?}");
            place(state, creature_id, &here);
        }
        None
    }
}

/// Spawns from the storage room into one of `rooms` with probability
/// `probability` per call, then switches itself off.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RandomSpawnOnce {
    /// Runs when called.
    #[serde(default = "switched_on")]
    pub switch: bool,
    /// Candidate rooms.
    pub rooms: Vec<String>,
    /// Probability of spawning, in `[0, 1]`.
    pub probability: f64,
}

impl Behaviour for RandomSpawnOnce {
    switch_impl!(RANDOM_SPAWN_ONCE);

    fn run(&mut self, creature_id: &str, state: &mut State) -> Option<Message> {
        if state.room_of(creature_id) != Some(STORAGE_ROOM) {
            return None;
        }
        if state.random() < self.probability {
            let room = state.choose(&self.rooms)?.clone();
            debug!("spawning {creature_id:?} into {room:?}");
            place(state, creature_id, &room);
            self.switch_off();
        }
        None
    }
}
