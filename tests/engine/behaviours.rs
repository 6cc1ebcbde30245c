//! Creature behaviour integration tests
//!
//! Behaviours run through hooks after every command.

use std::rc::Rc;

use serde_json::{Value, json};
use textgame_engine::defaults::behaviours::{RANDOM_APPEARANCE, RANDOM_SPAWN_ONCE, RANDOM_WALK};
use textgame_engine::defaults::{hooks, use_default_behaviours};
use textgame_engine::{
    Behaviour, BehaviourFactory, Behaviours, CreatureInfo, Game, Registries, Room, STORAGE_ROOM,
    State, Thing, ThingKind,
};
use textgame_foundation::{Direction, Message};

use crate::world::stock_registries;

fn registries_with(hook: &str) -> Registries {
    let mut registries = stock_registries();
    use_default_behaviours(&mut registries);
    registries.register_post_hook(hook, hooks::single_behaviour_hook(hook));
    registries
}

fn creature(id: &str, location: &str, behaviours: &Value, registries: &Registries) -> Thing {
    let params = behaviours.as_object().unwrap();
    let behaviours = Behaviours::from_params(params, &registries.behaviours).unwrap();
    Thing::new(
        id,
        ThingKind::Creature(CreatureInfo {
            behaviours,
            ..CreatureInfo::default()
        }),
    )
    .with_initlocation(location)
}

fn meadow(creatures: Vec<Thing>, seed: u64) -> State {
    let rooms = vec![
        Room::new("meadow")
            .with_door(Direction::East, "pond")
            .with_door(Direction::North, "barn")
            .with_lock(Direction::North, 1),
        Room::new("pond").with_door(Direction::West, "meadow"),
        Room::new("barn").with_door(Direction::South, "meadow"),
    ];
    State::new(rooms, "meadow", creatures, seed).unwrap()
}

// =============================================================================
// Stock Behaviours
// =============================================================================

#[test]
fn restless_creatures_avoid_locked_doors() {
    let registries = registries_with(RANDOM_WALK);
    let goose = creature("goose", "meadow", &json!({RANDOM_WALK: {"mobility": 1.0}}), &registries);
    let mut game = Game::new(meadow(vec![goose], 4), registries);

    for turn in 0..10 {
        game.play("look").unwrap();
        let expected = if turn % 2 == 0 { "pond" } else { "meadow" };
        assert_eq!(game.state().room_of("goose"), Some(expected));
    }
}

#[test]
fn spawning_happens_once() {
    let registries = registries_with(RANDOM_SPAWN_ONCE);
    let ghost = creature(
        "ghost",
        STORAGE_ROOM,
        &json!({RANDOM_SPAWN_ONCE: {"rooms": ["pond"], "probability": 1.0}}),
        &registries,
    );
    let mut game = Game::new(meadow(vec![ghost], 4), registries);

    game.play("look").unwrap();
    assert_eq!(game.state().room_of("ghost"), Some("pond"));
    let info = game.state().thing("ghost").and_then(Thing::creature).unwrap();
    assert!(!info.behaviours.get(RANDOM_SPAWN_ONCE).unwrap().is_switched_on());

    game.state_mut().place("ghost", STORAGE_ROOM).unwrap();
    game.play("look").unwrap();
    assert_eq!(game.state().room_of("ghost"), Some(STORAGE_ROOM));
}

#[test]
fn apparitions_come_and_go() {
    let registries = registries_with(RANDOM_APPEARANCE);
    let wisp = creature(
        "wisp",
        STORAGE_ROOM,
        &json!({RANDOM_APPEARANCE: {"probability": 1.0, "rooms": ["pon"]}}),
        &registries,
    );
    let mut game = Game::new(meadow(vec![wisp], 4), registries);

    game.play("look").unwrap();
    assert_eq!(game.state().room_of("wisp"), Some(STORAGE_ROOM));

    game.play("east").unwrap();
    assert_eq!(game.state().room_of("wisp"), Some("pond"));
    game.play("look").unwrap();
    assert_eq!(game.state().room_of("wisp"), Some(STORAGE_ROOM));
}

// =============================================================================
// Sequences
// =============================================================================

#[test]
fn sequences_spawn_then_wander() {
    let registries = registries_with("sequence");
    let fox = creature(
        "fox",
        STORAGE_ROOM,
        &json!({"sequence": {"sequence": [
            {RANDOM_SPAWN_ONCE: {"rooms": ["pond"], "probability": 1.0}},
            {RANDOM_WALK: {"mobility": 1.0}},
        ]}}),
        &registries,
    );
    let mut game = Game::new(meadow(vec![fox], 4), registries);

    game.play("look").unwrap();
    assert_eq!(game.state().room_of("fox"), Some("pond"));
    game.play("look").unwrap();
    assert_eq!(game.state().room_of("fox"), Some("meadow"));
    game.play("look").unwrap();
    assert_eq!(game.state().room_of("fox"), Some("pond"));
}

#[test]
fn dead_creatures_stop_behaving() {
    let registries = registries_with(RANDOM_WALK);
    let goose = creature("goose", "meadow", &json!({RANDOM_WALK: {"mobility": 1.0}}), &registries);
    let mut game = Game::new(meadow(vec![goose], 4), registries);

    game.state_mut().thing_mut("goose").unwrap().die();
    game.play("look").unwrap();
    assert_eq!(game.state().room_of("goose"), Some("meadow"));
}

// =============================================================================
// Host Behaviours
// =============================================================================

#[derive(Debug)]
struct Howl {
    switch: bool,
    text: String,
}

impl Behaviour for Howl {
    fn kind(&self) -> &str {
        "howl"
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

    fn run(&mut self, creature_id: &str, state: &mut State) -> Option<Message> {
        (state.room_of(creature_id) == Some(state.player_location()))
            .then(|| self.text.as_str().into())
    }

    fn params(&self) -> Value {
        json!({"switch": self.switch, "text": self.text})
    }
}

fn howl_factory() -> BehaviourFactory {
    Rc::new(|params, _| {
        let text = params
            .get("text")
            .and_then(Value::as_str)
            .unwrap_or("Awoo!")
            .to_string();
        let switch = params.get("switch").and_then(Value::as_bool).unwrap_or(true);
        Ok(Box::new(Howl { switch, text }) as Box<dyn Behaviour>)
    })
}

#[test]
fn host_behaviours_talk() {
    let mut registries = registries_with("howl");
    registries.register_behaviour("howl", howl_factory());
    let wolf = creature("wolf", "pond", &json!({"howl": {"text": "The wolf howls."}}), &registries);
    let mut game = Game::new(meadow(vec![wolf], 4), registries);

    assert!(!game.play("look").unwrap().contains("howls"));
    assert_eq!(game.play("east").unwrap(), "The wolf howls.");
}

// =============================================================================
// Determinism
// =============================================================================

fn wanderers(seed: u64) -> Game {
    let registries = registries_with(RANDOM_WALK);
    let creatures = ["cat", "dog", "hen"]
        .into_iter()
        .map(|id| creature(id, "meadow", &json!({RANDOM_WALK: {"mobility": 0.5}}), &registries))
        .collect();
    Game::new(meadow(creatures, seed), registries)
}

fn trail(game: &mut Game, turns: usize) -> Vec<Vec<String>> {
    (0..turns)
        .map(|_| {
            game.play("look").unwrap();
            ["cat", "dog", "hen"]
                .into_iter()
                .map(|id| game.state().room_of(id).unwrap_or_default().to_string())
                .collect()
        })
        .collect()
}

#[test]
fn same_seed_same_story() {
    let mut a = wanderers(2024);
    let mut b = wanderers(2024);
    assert_eq!(trail(&mut a, 30), trail(&mut b, 30));
}

#[test]
fn reseeding_restarts_the_story() {
    let mut a = wanderers(1);
    a.state_mut().reseed(77);
    let mut b = wanderers(77);
    assert_eq!(trail(&mut a, 30), trail(&mut b, 30));
}
