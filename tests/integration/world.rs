//! A small world written to disk the way content ships.

use std::fs;
use std::path::Path;

use serde_json::{Value, json};
use textgame_engine::Game;
use textgame_runtime::{GameConfig, StateBuilder, load_resources};

pub fn rooms() -> Value {
    json!([
        {
            "id": "kitchen",
            "descript": "You are in a kitchen.",
            "sdescript": "Kitchen.",
            "value": 0,
            "doors": {"down": "cellar", "east": "garden"},
            "hint": "Light helps in the cellar.",
            "hint_value": 1
        },
        {
            "id": "cellar",
            "descript": "A damp cellar.",
            "sdescript": "Cellar.",
            "value": 20,
            "dark": {"always": true},
            "doors": {"up": "kitchen"}
        },
        {
            "id": "garden",
            "descript": "A walled garden.",
            "sdescript": "Garden.",
            "sound": "Bees are humming.",
            "doors": {"west": "kitchen", "north": "shed"},
            "locked": {"north": {"closed": true, "key": 3}}
        },
        {
            "id": "shed",
            "descript": "A tool shed.",
            "sdescript": "Shed.",
            "value": 8,
            "doors": {"south": "garden"}
        }
    ])
}

pub fn items() -> Value {
    json!([
        {
            "id": "lamp",
            "type": "lightsource",
            "name": "oil lamp",
            "description": "An oil lamp stands on the table.",
            "initlocation": "kitchen"
        },
        {
            "id": "key",
            "type": "key",
            "key_id": 3,
            "name": "brass key",
            "description": "A brass key glints in the dark.",
            "initlocation": "cellar"
        },
        {
            "id": "spade",
            "type": "weapon",
            "strength": 25,
            "variation": 0,
            "description": "A spade leans on the wall.",
            "initlocation": "shed"
        }
    ])
}

pub fn creatures() -> Value {
    json!([
        {
            "id": "rat",
            "type": "monster",
            "health": 20,
            "strength": 5,
            "variation": 0,
            "description": "A big rat hisses at you.",
            "fight_message": "The rat bites you.",
            "win_message": "The rat flees squeaking.",
            "loss_message": "The rat gnaws on your bones.",
            "initlocation": "shed"
        },
        {
            "id": "cat",
            "description": "A cat watches you.",
            "initlocation": "garden",
            "behaviours": {"randomwalk": {"mobility": 0.5}}
        }
    ])
}

/// Writes the world into `dir`.
pub fn write_world(dir: &Path) {
    fs::write(dir.join("rooms.json"), rooms().to_string()).unwrap();
    fs::write(dir.join("items.json"), items().to_string()).unwrap();
    fs::write(dir.join("creatures.json"), creatures().to_string()).unwrap();
}

/// Loads the world from `dir` like the command line tool does.
pub fn load_game(dir: &Path, config: &GameConfig) -> Game {
    let registries = config.registries();
    let resources = load_resources(dir).unwrap();
    let mut state = StateBuilder::new()
        .with_seed(config.seed())
        .build_resources(&resources, &registries.behaviours)
        .unwrap();
    config.apply(&mut state);
    Game::new(state, registries)
}
